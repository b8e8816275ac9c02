//! Page metadata contributed by the content pipeline.
//!
//! Provides [`PageMeta`], one record per documentation page. Fields are parsed
//! leniently: a malformed `order` becomes `0` and an unexpected `category` or
//! `type` shape is dropped, so one bad record never fails a whole menu build.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::locale::LocaleText;

/// Metadata for one documentation page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Sort position; strings are parsed like integers, anything else is `0`.
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: i64,

    /// Menu category, plain or per locale. `None` groups under `topLevel`.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<LocaleText>,

    /// Menu type within the category. `None` groups under `topLevel`.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_type: Option<String>,

    /// Page title.
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: LocaleText,

    /// Secondary title shown next to grouped entries.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<LocaleText>,

    /// Source filename (e.g., `components/button/index.en-US.md`).
    #[serde(default)]
    pub filename: String,

    /// Whether the entry is shown but not navigable.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub disabled: bool,

    /// External URL; marks the entry as an outbound link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Page identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Demo column count hint for the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<Value>,

    /// Timeline layout hint for the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Value>,

    /// Table-of-contents hint for the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc: Option<Value>,
}

impl PageMeta {
    /// True when the page is rendered as a single demo column.
    #[must_use]
    pub fn is_single_column(&self) -> bool {
        self.cols.as_ref().is_some_and(|cols| parse_order(cols) == 1)
    }
}

/// Coerce an order value to an integer.
///
/// Numbers are truncated; strings are read like `parseInt` (optional sign,
/// leading digits, trailing junk ignored). Everything else is `0`.
#[must_use]
pub fn parse_order(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate))
            .unwrap_or(0),
        Value::String(s) => parse_leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.trunc() as i64)
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn lenient_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(parse_order(&Value::deserialize(deserializer)?))
}

fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<LocaleText>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(LocaleText::Plain(s)),
        Value::Object(map) => {
            let entries: Option<_> = map
                .into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect();
            if entries.is_none() {
                tracing::warn!("Ignoring locale mapping with non-string values");
            }
            entries.map(LocaleText::Localized)
        }
        other => {
            tracing::warn!(value = %other, "Ignoring field with unexpected shape");
            None
        }
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LocaleText, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => {
            tracing::warn!(value = %other, "Ignoring type with unexpected shape");
            None
        }
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}
