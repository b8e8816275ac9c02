//! Mapping from source filenames to route paths.
//!
//! Source filenames look like `components/button/index.en-US.md` or
//! `docs/practice/cases.md`. A trailing `/index` segment, a locale suffix and
//! the `.md` extension are stripped to form the route.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Matches the suffix stripped from source filenames.
static SOURCE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(/index)?(\.zh-CN|\.en-US)?\.md$").expect("valid source suffix pattern")
});

/// Strip `/index`, the locale suffix and the `.md` extension.
///
/// Filenames without a `.md` extension are returned unchanged apart from
/// trailing slashes.
fn strip_source_suffix(filename: &str) -> &str {
    let mut stripped = filename.trim_end_matches('/');
    // Repeat so names like `notes.md.md` cannot leave a suffix behind.
    while let Some(m) = SOURCE_SUFFIX.find(stripped) {
        stripped = stripped[..m.start()].trim_end_matches('/');
    }
    stripped
}

/// Convert a source filename to its menu key (last route segment, lower-cased).
///
/// Idempotent: the output carries no extension or locale suffix, so mapping it
/// again yields the same value.
///
/// # Examples
///
/// ```
/// use docnav_site::filename_to_path;
///
/// assert_eq!(filename_to_path("components/button/index.en-US.md"), "button");
/// assert_eq!(filename_to_path("docs/practice/cases.md"), "cases");
/// ```
#[must_use]
pub fn filename_to_path(filename: &str) -> String {
    let stripped = strip_source_suffix(filename);
    stripped
        .rsplit('/')
        .next()
        .unwrap_or(stripped)
        .to_lowercase()
}

/// Convert a source filename to its full route path, lower-cased.
///
/// `components/Button/index.zh-CN.md` becomes `components/button`.
#[must_use]
pub fn filename_to_url(filename: &str) -> String {
    strip_source_suffix(filename).to_lowercase()
}

/// Content key of a source filename: the stripped path, case preserved.
///
/// `CHANGELOG.en-US.md` becomes `CHANGELOG`.
#[must_use]
pub fn filename_to_route(filename: &str) -> &str {
    strip_source_suffix(filename)
}

/// Locale carried by a filename suffix, if any.
#[must_use]
pub fn filename_locale(filename: &str) -> Option<Locale> {
    let lower = filename.to_lowercase();
    Locale::ALL
        .into_iter()
        .find(|locale| lower.ends_with(&format!(".{}.md", locale.as_str().to_lowercase())))
}

/// Normalize a route pathname by stripping leading and trailing slashes.
#[must_use]
pub fn normalize_pathname(pathname: &str) -> &str {
    pathname.trim_matches('/')
}

/// Route parameters extracted by the router.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    /// The `:children` segment of routes like `components/:children/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
}

/// The route being rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteContext {
    /// Route pathname (e.g., `components/button/`).
    pub pathname: String,
    /// Raw query string, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Router parameters.
    #[serde(default)]
    pub params: RouteParams,
}

impl RouteContext {
    /// Create a context for `pathname` with no query or params.
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Default::default()
        }
    }

    /// Key of the menu entry this route activates.
    ///
    /// The `children` parameter when present, otherwise the pathname.
    #[must_use]
    pub fn active_key(&self) -> &str {
        self.params.children.as_deref().unwrap_or(&self.pathname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_to_path_strips_index_and_locale() {
        assert_eq!(
            filename_to_path("components/button/index.en-US.md"),
            "button"
        );
        assert_eq!(
            filename_to_path("components/button/index.zh-CN.md"),
            "button"
        );
    }

    #[test]
    fn test_filename_to_path_plain_markdown() {
        assert_eq!(filename_to_path("docs/practice/cases.md"), "cases");
        assert_eq!(filename_to_path("CHANGELOG.en-US.md"), "changelog");
    }

    #[test]
    fn test_filename_to_path_lowercases() {
        assert_eq!(
            filename_to_path("docs/react/Getting-Started.MD"),
            "getting-started"
        );
    }

    #[test]
    fn test_filename_to_path_idempotent() {
        let inputs = [
            "components/button/index.en-US.md",
            "docs/practice/cases.md",
            "docs/react/Introduce.zh-CN.md",
            "index.md",
            "notes.md.md",
            "components/date-picker/",
            "no-extension",
            "",
        ];
        for input in inputs {
            let once = filename_to_path(input);
            assert_eq!(
                filename_to_path(&once),
                once,
                "not idempotent for {input:?}"
            );
        }
    }

    #[test]
    fn test_filename_to_path_unexpected_shape() {
        assert_eq!(filename_to_path("components/button/README"), "readme");
        assert_eq!(filename_to_path("components/button/"), "button");
        assert_eq!(filename_to_path(""), "");
    }

    #[test]
    fn test_filename_to_url() {
        assert_eq!(
            filename_to_url("components/Button/index.zh-CN.md"),
            "components/button"
        );
        assert_eq!(
            filename_to_url("docs/spec/colors.en-US.md"),
            "docs/spec/colors"
        );
        assert_eq!(filename_to_url("CHANGELOG.zh-CN.md"), "changelog");
    }

    #[test]
    fn test_filename_to_route_keeps_case() {
        assert_eq!(filename_to_route("CHANGELOG.en-US.md"), "CHANGELOG");
        assert_eq!(
            filename_to_route("components/Button/index.md"),
            "components/Button"
        );
    }

    #[test]
    fn test_filename_locale() {
        assert_eq!(
            filename_locale("components/button/index.zh-CN.md"),
            Some(Locale::ZhCn)
        );
        assert_eq!(
            filename_locale("docs/react/faq.en-US.md"),
            Some(Locale::EnUs)
        );
        assert_eq!(filename_locale("docs/practice/cases.md"), None);
    }

    #[test]
    fn test_normalize_pathname() {
        assert_eq!(
            normalize_pathname("/components/button/"),
            "components/button"
        );
        assert_eq!(normalize_pathname("changelog"), "changelog");
    }

    #[test]
    fn test_active_key_prefers_children_param() {
        let mut route = RouteContext::new("components/button/");
        assert_eq!(route.active_key(), "components/button/");

        route.params.children = Some("button".to_owned());
        assert_eq!(route.active_key(), "button");
    }
}
