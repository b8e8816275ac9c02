//! Locale selection and locale-tagged fields.
//!
//! Provides [`Locale`], [`LocaleResolver`] for picking the effective locale of a
//! request, and [`LocaleText`] for metadata fields that are either a plain
//! string or a mapping from locale tag to string.
//!
//! # Fallback
//!
//! [`LocaleText::localize`] has exactly one fallback step: when a mapping lacks
//! the requested locale, the raw mapping itself is returned as
//! [`Localized::Raw`]. There is no chain through other locales.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported site locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    /// Simplified Chinese.
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// US English.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::EnUs];

    /// The locale tag (e.g., `"zh-CN"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// The other locale of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::ZhCn => Self::EnUs,
            Self::EnUs => Self::ZhCn,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a locale tag is not supported.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct LocaleParseError(pub String);

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| LocaleParseError(s.to_owned()))
    }
}

/// Read-only access to the process-wide locale preference.
///
/// Injected at startup; the resolver never writes through it.
pub trait LocalePreference: Send + Sync {
    /// Locale tag the user persisted earlier, if any.
    fn persisted(&self) -> Option<String>;

    /// Preferred language reported by the platform, if any.
    fn platform(&self) -> Option<String>;
}

/// Fixed preference values, for tests and for callers that read them once.
#[derive(Clone, Debug, Default)]
pub struct StaticPreference {
    /// Persisted locale tag.
    pub persisted: Option<String>,
    /// Platform language tag.
    pub platform: Option<String>,
}

impl LocalePreference for StaticPreference {
    fn persisted(&self) -> Option<String> {
        self.persisted.clone()
    }

    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }
}

/// Picks the effective locale for a request.
///
/// Checks, in order:
/// 1. a `locale=<tag>` pair in the route query string,
/// 2. the persisted preference,
/// 3. the platform language.
///
/// The first source that yields a value decides; an unsupported tag there
/// resolves to the fallback locale.
pub struct LocaleResolver<P> {
    preference: P,
    fallback: Locale,
}

impl<P: LocalePreference> LocaleResolver<P> {
    /// Create a resolver over `preference` with the given fallback locale.
    #[must_use]
    pub fn new(preference: P, fallback: Locale) -> Self {
        Self {
            preference,
            fallback,
        }
    }

    /// Resolve the locale for a request with the given query string.
    #[must_use]
    pub fn resolve(&self, query: Option<&str>) -> Locale {
        if let Some(locale) = query.and_then(locale_from_query) {
            return locale;
        }

        let language = self
            .preference
            .persisted()
            .filter(|tag| !tag.is_empty())
            .or_else(|| self.preference.platform());

        language
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(self.fallback)
    }
}

/// Extract a supported `locale` parameter from a query string.
///
/// Accepts a leading `?`. Unsupported values are ignored.
#[must_use]
pub fn locale_from_query(query: &str) -> Option<Locale> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == "locale")
        .find_map(|(_, value)| value.parse().ok())
}

/// A metadata field that is either plain or keyed by locale tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocaleText {
    /// Same value for every locale.
    Plain(String),
    /// Locale tag to value.
    Localized(BTreeMap<String, String>),
}

impl Default for LocaleText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocaleText {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

/// Result of [`LocaleText::localize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Localized<'a> {
    /// The value for the requested locale, or the plain value.
    Text(&'a str),
    /// The mapping lacked the requested locale; the raw mapping is handed back.
    Raw(&'a BTreeMap<String, String>),
}

impl<'a> Localized<'a> {
    /// The resolved string, if the field resolved to one.
    #[must_use]
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Raw(_) => None,
        }
    }

    /// Convert into an owned [`LocaleText`].
    #[must_use]
    pub fn into_owned(self) -> LocaleText {
        match self {
            Self::Text(text) => LocaleText::Plain(text.to_owned()),
            Self::Raw(map) => LocaleText::Localized(map.clone()),
        }
    }
}

impl LocaleText {
    /// Resolve the field for `locale`.
    ///
    /// Plain values are returned unchanged. A mapping yields its entry for
    /// `locale`, or itself when that key is absent.
    #[must_use]
    pub fn localize(&self, locale: Locale) -> Localized<'_> {
        match self {
            Self::Plain(text) => Localized::Text(text),
            Self::Localized(map) => map
                .get(locale.as_str())
                .map_or(Localized::Raw(map), |text| Localized::Text(text)),
        }
    }
}

/// Resolve an untyped JSON value the same way as [`LocaleText::localize`].
///
/// Used for payloads such as demo intros whose localized values are not strings.
#[must_use]
pub fn localize_value(value: &serde_json::Value, locale: Locale) -> &serde_json::Value {
    value
        .as_object()
        .and_then(|map| map.get(locale.as_str()))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn pair() -> LocaleText {
        serde_json::from_value(json!({"en-US": "A", "zh-CN": "B"})).unwrap()
    }

    #[test]
    fn test_locale_round_trips_through_tag() {
        for locale in Locale::ALL {
            assert_eq!(locale.as_str().parse::<Locale>(), Ok(locale));
        }
        assert_eq!(
            "fr-FR".parse::<Locale>(),
            Err(LocaleParseError("fr-FR".to_owned()))
        );
    }

    #[test]
    fn test_other_locale() {
        assert_eq!(Locale::ZhCn.other(), Locale::EnUs);
        assert_eq!(Locale::EnUs.other(), Locale::ZhCn);
    }

    #[test]
    fn test_localize_picks_requested_locale() {
        assert_eq!(pair().localize(Locale::ZhCn), Localized::Text("B"));
        assert_eq!(pair().localize(Locale::EnUs), Localized::Text("A"));
    }

    #[test]
    fn test_localize_missing_key_returns_raw_mapping() {
        let field: LocaleText = serde_json::from_value(json!({"en-US": "A"})).unwrap();
        let LocaleText::Localized(map) = &field else {
            panic!("expected localized field");
        };

        assert_eq!(field.localize(Locale::ZhCn), Localized::Raw(map));
        assert_eq!(field.localize(Locale::ZhCn).into_owned(), field);
    }

    #[test]
    fn test_localize_plain_unchanged() {
        let field = LocaleText::from("Button");
        assert_eq!(field.localize(Locale::ZhCn), Localized::Text("Button"));
        assert_eq!(field.localize(Locale::EnUs), Localized::Text("Button"));
    }

    #[test]
    fn test_localized_serializes_untagged() {
        let field: LocaleText = serde_json::from_value(json!({"en-US": "A"})).unwrap();
        assert_eq!(
            serde_json::to_value(field.localize(Locale::ZhCn)).unwrap(),
            json!({"en-US": "A"})
        );
        assert_eq!(
            serde_json::to_value(field.localize(Locale::EnUs)).unwrap(),
            json!("A")
        );
    }

    #[test]
    fn test_localize_value() {
        let intro = json!({"zh-CN": ["p", "按钮"], "en-US": ["p", "Button"]});
        assert_eq!(
            localize_value(&intro, Locale::EnUs),
            &json!(["p", "Button"])
        );

        let plain = json!(["p", "shared"]);
        assert_eq!(localize_value(&plain, Locale::ZhCn), &plain);
    }

    #[test]
    fn test_locale_from_query() {
        assert_eq!(locale_from_query("?locale=zh-CN"), Some(Locale::ZhCn));
        assert_eq!(
            locale_from_query("theme=dark&locale=en-US"),
            Some(Locale::EnUs)
        );
        assert_eq!(locale_from_query("locale=fr-FR"), None);
        assert_eq!(locale_from_query(""), None);
    }

    #[test]
    fn test_resolve_query_overrides_preference() {
        let resolver = LocaleResolver::new(
            StaticPreference {
                persisted: Some("en-US".to_owned()),
                platform: Some("en-US".to_owned()),
            },
            Locale::EnUs,
        );
        assert_eq!(resolver.resolve(Some("locale=zh-CN")), Locale::ZhCn);
    }

    #[test]
    fn test_resolve_persisted_before_platform() {
        let resolver = LocaleResolver::new(
            StaticPreference {
                persisted: Some("zh-CN".to_owned()),
                platform: Some("en-US".to_owned()),
            },
            Locale::EnUs,
        );
        assert_eq!(resolver.resolve(None), Locale::ZhCn);
    }

    #[test]
    fn test_resolve_platform_when_nothing_persisted() {
        let resolver = LocaleResolver::new(
            StaticPreference {
                persisted: None,
                platform: Some("zh-CN".to_owned()),
            },
            Locale::EnUs,
        );
        assert_eq!(resolver.resolve(Some("theme=dark")), Locale::ZhCn);
    }

    #[test]
    fn test_resolve_unsupported_language_uses_fallback() {
        let resolver = LocaleResolver::new(
            StaticPreference {
                persisted: None,
                platform: Some("zh-TW".to_owned()),
            },
            Locale::EnUs,
        );
        assert_eq!(resolver.resolve(None), Locale::EnUs);

        let empty = LocaleResolver::new(StaticPreference::default(), Locale::ZhCn);
        assert_eq!(empty.resolve(None), Locale::ZhCn);
    }
}
