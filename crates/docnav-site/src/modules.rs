//! Selecting the pages that make up the menu for a route.

use std::collections::HashMap;

use crate::locale::Locale;
use crate::page_meta::PageMeta;
use crate::route::{filename_locale, normalize_pathname};

/// Module name for a route pathname.
///
/// Paths under `components` belong to `components`; others use their first
/// two segments (`docs/react/faq` is in `docs/react`).
#[must_use]
pub fn module_name(pathname: &str) -> String {
    let path = normalize_pathname(pathname);
    if path.starts_with("components") {
        return "components".to_owned();
    }
    path.split('/').take(2).collect::<Vec<_>>().join("/")
}

/// Pages grouped by module, with a set of modules that share one menu.
#[derive(Clone, Debug, Default)]
pub struct ModuleScope {
    modules: HashMap<String, Vec<PageMeta>>,
    shared: Vec<String>,
}

impl ModuleScope {
    /// Create a scope over per-module page lists.
    #[must_use]
    pub fn new(modules: HashMap<String, Vec<PageMeta>>, shared: Vec<String>) -> Self {
        Self { modules, shared }
    }

    /// Pages for the menu shown on `pathname` in `locale`.
    ///
    /// A shared module yields the pages of every shared module, in the order
    /// they are listed. Pages whose filename carries the other locale's
    /// suffix are left out.
    #[must_use]
    pub fn pages_for(&self, pathname: &str, locale: Locale) -> Vec<PageMeta> {
        let module = module_name(pathname);
        let names: Vec<&str> = if self.shared.contains(&module) {
            self.shared.iter().map(String::as_str).collect()
        } else {
            vec![module.as_str()]
        };

        let pages: Vec<PageMeta> = names
            .into_iter()
            .filter_map(|name| self.modules.get(name))
            .flatten()
            .cloned()
            .collect();

        if pages.is_empty() {
            tracing::debug!(%module, "No pages for module");
        }

        filter_for_locale(pages, locale)
    }
}

/// Drop pages whose filename carries the other locale's suffix.
///
/// Suffixes are matched the same way as [`filename_locale`], ignoring case.
#[must_use]
pub fn filter_for_locale(pages: Vec<PageMeta>, locale: Locale) -> Vec<PageMeta> {
    let excluded = locale.other();
    pages
        .into_iter()
        .filter(|page| filename_locale(&page.filename) != Some(excluded))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(filename: &str) -> PageMeta {
        PageMeta {
            filename: filename.to_owned(),
            ..Default::default()
        }
    }

    fn filenames(pages: &[PageMeta]) -> Vec<&str> {
        pages.iter().map(|p| p.filename.as_str()).collect()
    }

    fn scope() -> ModuleScope {
        ModuleScope::new(
            HashMap::from([
                (
                    "components".to_owned(),
                    vec![
                        page("components/button/index.zh-CN.md"),
                        page("components/button/index.en-US.md"),
                    ],
                ),
                ("docs/react".to_owned(), vec![page("docs/react/faq.md")]),
                ("changelog".to_owned(), vec![page("CHANGELOG.en-US.md")]),
                ("docs/spec".to_owned(), vec![page("docs/spec/colors.zh-CN.md")]),
            ]),
            vec![
                "components".to_owned(),
                "docs/react".to_owned(),
                "changelog".to_owned(),
            ],
        )
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("components/button/"), "components");
        assert_eq!(module_name("/components-overview"), "components");
        assert_eq!(module_name("docs/react/faq"), "docs/react");
        assert_eq!(module_name("changelog"), "changelog");
        assert_eq!(module_name(""), "");
    }

    #[test]
    fn test_shared_modules_combined_and_filtered() {
        let pages = scope().pages_for("docs/react/faq", Locale::EnUs);
        assert_eq!(
            filenames(&pages),
            vec![
                "components/button/index.en-US.md",
                "docs/react/faq.md",
                "CHANGELOG.en-US.md"
            ]
        );
    }

    #[test]
    fn test_unshared_module_alone() {
        let pages = scope().pages_for("docs/spec/colors", Locale::ZhCn);
        assert_eq!(filenames(&pages), vec!["docs/spec/colors.zh-CN.md"]);

        let pages = scope().pages_for("docs/spec/colors", Locale::EnUs);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_unknown_module_is_empty() {
        let pages = scope().pages_for("docs/pattern/list", Locale::EnUs);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_filter_for_locale() {
        let pages = vec![page("a.zh-CN.md"), page("a.en-US.md"), page("b.md")];
        assert_eq!(
            filenames(&filter_for_locale(pages, Locale::ZhCn)),
            vec!["a.zh-CN.md", "b.md"]
        );
    }

    #[test]
    fn test_filter_for_locale_ignores_suffix_case() {
        let pages = vec![
            page("docs/react/faq.ZH-CN.md"),
            page("docs/react/faq.en-us.MD"),
        ];

        let kept = filter_for_locale(pages, Locale::EnUs);

        assert_eq!(filenames(&kept), vec!["docs/react/faq.en-us.MD"]);
        assert_eq!(
            filename_locale("docs/react/faq.ZH-CN.md"),
            Some(Locale::ZhCn)
        );
    }
}
