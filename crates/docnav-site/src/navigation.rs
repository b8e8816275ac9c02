//! Linear reading order and footer navigation.
//!
//! [`flatten`] walks the rendered menu depth-first and keeps only leaves, in
//! visual order. [`footer_nav`] picks the neighbors of the active entry in that
//! sequence.

use serde::Serialize;

use crate::locale::LocaleText;
use crate::ordering::{MenuItem, MenuLeaf};

/// A leaf of the menu in reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNavEntry {
    /// Menu key.
    pub key: String,
    /// Localized title.
    pub title: LocaleText,
    /// Route path.
    pub url: String,
    /// Whether the entry is shown but not navigable.
    pub disabled: bool,
    /// External URL when the entry links out of the site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

impl From<&MenuLeaf> for FlatNavEntry {
    fn from(leaf: &MenuLeaf) -> Self {
        Self {
            key: leaf.key.clone(),
            title: leaf.title.clone(),
            url: leaf.url.clone(),
            disabled: leaf.disabled,
            external_link: leaf.external_link.clone(),
        }
    }
}

/// Previous and next entries around the active one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FooterNav<'a> {
    /// Entry before the active one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a FlatNavEntry>,
    /// Entry after the active one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a FlatNavEntry>,
}

/// Flatten a rendered menu into its leaves, depth-first.
#[must_use]
pub fn flatten(items: &[MenuItem]) -> Vec<FlatNavEntry> {
    fn visit(items: &[MenuItem], out: &mut Vec<FlatNavEntry>) {
        for item in items {
            match item {
                MenuItem::Leaf(leaf) => out.push(FlatNavEntry::from(leaf)),
                MenuItem::Group(group) => visit(&group.children, out),
            }
        }
    }

    let mut out = Vec::new();
    visit(items, &mut out);
    out
}

/// Neighbors of `active_key` in `flat`.
///
/// Both sides are `None` when the key is absent. If several entries share the
/// key, the last one is used.
#[must_use]
pub fn footer_nav<'a>(flat: &'a [FlatNavEntry], active_key: &str) -> FooterNav<'a> {
    let Some(idx) = flat.iter().rposition(|entry| entry.key == active_key) else {
        return FooterNav::default();
    };

    FooterNav {
        prev: idx.checked_sub(1).and_then(|i| flat.get(i)),
        next: flat.get(idx + 1),
    }
}
