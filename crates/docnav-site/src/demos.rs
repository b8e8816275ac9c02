//! Runnable demos attached to component pages.
//!
//! A [`DemoBundle`] maps demo keys to [`Demo`]s. [`Showcase::select`] picks the
//! demos to display, orders them and lays them out in columns.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::locale::{Locale, LocaleText, localize_value};
use crate::page_meta::parse_order;

/// Demo metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoMeta {
    /// Sort position, parsed like page order.
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: i64,
    /// Demo title.
    #[serde(default)]
    pub title: LocaleText,
    /// Anchor id.
    #[serde(default)]
    pub id: String,
    /// When any demo in a bundle sets this, only those demos are shown.
    #[serde(default)]
    pub only: bool,
}

fn lenient_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(parse_order(&Value::deserialize(deserializer)?))
}

/// One runnable example.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demo {
    /// Metadata.
    #[serde(default)]
    pub meta: DemoMeta,
    /// Intro content, plain or keyed by locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Render payload for the live preview; demos without one are hidden
    /// unless flagged `only`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Value>,
    /// Demo-specific CSS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Highlighted source code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_code: Option<Value>,
}

impl Demo {
    /// Intro content for `locale`.
    #[must_use]
    pub fn intro(&self, locale: Locale) -> Option<&Value> {
        self.content.as_ref().map(|c| localize_value(c, locale))
    }
}

/// Demo key to demo.
pub type DemoBundle = BTreeMap<String, Demo>;

/// Link to a demo from the page's demo index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DemoAnchor {
    /// Anchor id.
    pub id: String,
    /// Localized title.
    pub title: LocaleText,
}

/// Demos selected for display, in order and by column.
#[derive(Debug, Default, PartialEq)]
pub struct Showcase<'a> {
    /// Displayed demos in order.
    pub demos: Vec<&'a Demo>,
    /// Demos in the left column.
    pub left: Vec<&'a Demo>,
    /// Demos in the right column.
    pub right: Vec<&'a Demo>,
}

impl<'a> Showcase<'a> {
    /// Select, order and lay out the demos of `bundle`.
    ///
    /// With `single_column`, every demo goes to the left column; otherwise
    /// demos alternate left and right.
    #[must_use]
    pub fn select(bundle: &'a DemoBundle, single_column: bool) -> Self {
        let any_only = bundle.values().any(|demo| demo.meta.only);
        let mut demos: Vec<&Demo> = bundle
            .values()
            .filter(|demo| {
                if any_only {
                    demo.meta.only
                } else {
                    demo.preview.is_some()
                }
            })
            .collect();
        demos.sort_by_key(|demo| demo.meta.order);

        let (left, right) = demos
            .iter()
            .enumerate()
            .partition::<Vec<_>, _>(|(i, _)| single_column || i % 2 == 0);

        Self {
            left: left.into_iter().map(|(_, d)| *d).collect(),
            right: right.into_iter().map(|(_, d)| *d).collect(),
            demos,
        }
    }

    /// Anchors for the displayed demos, titles localized for `locale`.
    #[must_use]
    pub fn anchors(&self, locale: Locale) -> Vec<DemoAnchor> {
        self.demos
            .iter()
            .map(|demo| DemoAnchor {
                id: demo.meta.id.clone(),
                title: demo.meta.title.localize(locale).into_owned(),
            })
            .collect()
    }
}
