//! Two-level grouping of page metadata.
//!
//! [`MenuNode::build`] sorts pages by `order` and groups them by localized
//! category, then by type. Pages without a category or type land in the
//! [`TOP_LEVEL`] bucket, which is always kept first.
//!
//! # Invariants
//!
//! - Every input page appears in exactly one `(category, type)` bucket.
//! - Equal-order pages keep their input order (the sort is stable).
//! - Within a bucket, pages keep the order they were appended in.

use crate::locale::{Locale, Localized};
use crate::page_meta::PageMeta;
use crate::route::filename_to_path;

/// Bucket name for pages without a category or type.
pub const TOP_LEVEL: &str = "topLevel";

/// Pages sharing one `(category, type)` pair, in menu order.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeBucket<'a> {
    /// Type name, or [`TOP_LEVEL`].
    pub name: String,
    /// Pages in this bucket.
    pub pages: Vec<&'a PageMeta>,
}

/// Type buckets of one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryBucket<'a> {
    /// Localized category name, or [`TOP_LEVEL`].
    pub name: String,
    /// Type buckets, [`TOP_LEVEL`] first when present.
    pub types: Vec<TypeBucket<'a>>,
}

impl<'a> CategoryBucket<'a> {
    fn new(name: String) -> Self {
        Self {
            name,
            types: Vec::new(),
        }
    }

    /// Pages of the given type, if the bucket exists.
    #[must_use]
    pub fn pages(&self, page_type: &str) -> Option<&[&'a PageMeta]> {
        self.types
            .iter()
            .find(|bucket| bucket.name == page_type)
            .map(|bucket| bucket.pages.as_slice())
    }

    fn push(&mut self, page_type: &str, page: &'a PageMeta) {
        let idx = bucket_index(&mut self.types, page_type, |name| TypeBucket {
            name,
            pages: Vec::new(),
        });
        self.types[idx].pages.push(page);
    }
}

/// Category to type to ordered pages.
///
/// Derived on demand from the page list; never mutated after building.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuNode<'a> {
    categories: Vec<CategoryBucket<'a>>,
}

impl<'a> MenuNode<'a> {
    /// Group `pages` for `locale`.
    #[must_use]
    pub fn build(pages: &'a [PageMeta], locale: Locale) -> Self {
        let mut sorted: Vec<&PageMeta> = pages.iter().collect();
        sorted.sort_by_key(|page| page.order);

        let mut categories: Vec<CategoryBucket<'a>> = Vec::new();
        for page in sorted {
            let category = category_key(page, locale);
            let page_type = page
                .page_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(TOP_LEVEL);

            let idx = bucket_index(&mut categories, category, CategoryBucket::new);
            categories[idx].push(page_type, page);
        }

        tracing::debug!(
            pages = pages.len(),
            categories = categories.len(),
            %locale,
            "Built menu"
        );

        Self { categories }
    }

    /// Category buckets, [`TOP_LEVEL`] first when present.
    #[must_use]
    pub fn categories(&self) -> &[CategoryBucket<'a>] {
        &self.categories
    }

    /// Category bucket by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryBucket<'a>> {
        self.categories.iter().find(|bucket| bucket.name == name)
    }

    /// Pages in the `(category, page_type)` bucket.
    #[must_use]
    pub fn pages(&self, category: &str, page_type: &str) -> Option<&[&'a PageMeta]> {
        self.category(category)?.pages(page_type)
    }

    /// Total number of pages across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.types)
            .map(|t| t.pages.len())
            .sum()
    }

    /// True when no page was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category names, used as the initially open submenu keys.
    #[must_use]
    pub fn open_keys(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Route key of the landing page: the first enabled top-level page.
    #[must_use]
    pub fn index_route(&self) -> Option<String> {
        self.pages(TOP_LEVEL, TOP_LEVEL)?
            .iter()
            .find(|page| !page.disabled)
            .map(|page| filename_to_path(&page.filename))
    }
}

/// Localized category name, degrading to [`TOP_LEVEL`].
fn category_key(page: &PageMeta, locale: Locale) -> &str {
    match page.category.as_ref().map(|c| c.localize(locale)) {
        Some(Localized::Text(text)) if !text.is_empty() => text,
        Some(Localized::Raw(_)) => {
            tracing::warn!(
                filename = %page.filename,
                %locale,
                "Category has no entry for locale, grouping under topLevel"
            );
            TOP_LEVEL
        }
        _ => TOP_LEVEL,
    }
}

trait Named {
    fn name(&self) -> &str;
}

impl Named for CategoryBucket<'_> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for TypeBucket<'_> {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Index of the bucket called `name`, creating it if needed.
///
/// A new [`TOP_LEVEL`] bucket is inserted at the front; others are appended.
fn bucket_index<B: Named>(
    buckets: &mut Vec<B>,
    name: &str,
    make: impl FnOnce(String) -> B,
) -> usize {
    if let Some(idx) = buckets.iter().position(|b| b.name() == name) {
        return idx;
    }
    if name == TOP_LEVEL {
        buckets.insert(0, make(name.to_owned()));
        0
    } else {
        buckets.push(make(name.to_owned()));
        buckets.len() - 1
    }
}
