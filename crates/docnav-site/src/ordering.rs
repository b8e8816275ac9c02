//! Ordering policy and the rendered menu tree.
//!
//! [`render_menu`] turns a [`MenuNode`] into an ordered tree of [`MenuItem`]s:
//!
//! 1. Top-level pages of the top-level category, in builder order.
//! 2. Type groups of the top-level category.
//! 3. One submenu per remaining category, ranked by `category_order`.
//!
//! Inside a category, type groups are ranked by `type_order`, and pages in a
//! type group are sorted by the first character of their localized title.
//!
//! Names missing from a rank table sort after every ranked name, alphabetically.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::locale::{Locale, LocaleText};
use crate::menu::{CategoryBucket, MenuNode, TOP_LEVEL};
use crate::page_meta::PageMeta;
use crate::route::{filename_to_path, filename_to_url};

/// Ordering and link options for rendering a menu.
#[derive(Clone, Debug, Default)]
pub struct MenuOptions {
    /// Rank of each category name (ascending).
    pub category_order: HashMap<String, i32>,
    /// Rank of each type name (ascending).
    pub type_order: HashMap<String, i32>,
    /// URL prefixes whose links end with `/` (e.g., `components`).
    pub trailing_slash: Vec<String>,
}

impl MenuOptions {
    fn url_for(&self, filename: &str) -> String {
        let url = filename_to_url(filename);
        if self
            .trailing_slash
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
        {
            format!("{url}/")
        } else {
            url
        }
    }
}

/// Kind of menu group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKind {
    /// Collapsible category submenu.
    SubMenu,
    /// Titled group of entries sharing a type.
    ItemGroup,
}

/// A group of menu items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    /// Group key (category or type name).
    pub key: String,
    /// Display title.
    pub title: String,
    /// Group kind.
    pub kind: GroupKind,
    /// Items in display order.
    pub children: Vec<MenuItem>,
}

/// A navigable menu entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuLeaf {
    /// Menu key (see [`filename_to_path`]).
    pub key: String,
    /// Localized title.
    pub title: LocaleText,
    /// Localized subtitle, shown for entries inside type groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<LocaleText>,
    /// Route path of the page.
    pub url: String,
    /// Whether the entry is shown but not navigable.
    pub disabled: bool,
    /// External URL when the entry links out of the site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

/// Rendered menu tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum MenuItem {
    /// A group with children.
    Group(MenuGroup),
    /// A single entry.
    Leaf(MenuLeaf),
}

/// Render `menu` into an ordered tree.
#[must_use]
pub fn render_menu(menu: &MenuNode<'_>, options: &MenuOptions, locale: Locale) -> Vec<MenuItem> {
    let renderer = Renderer { options, locale };

    let mut items = menu
        .category(TOP_LEVEL)
        .map(|top| renderer.category_items(top))
        .unwrap_or_default();

    let mut categories: Vec<&CategoryBucket<'_>> = menu
        .categories()
        .iter()
        .filter(|c| c.name != TOP_LEVEL)
        .collect();
    categories.sort_by(|a, b| by_rank(&options.category_order, &a.name, &b.name));

    items.extend(categories.into_iter().map(|category| {
        MenuItem::Group(MenuGroup {
            key: category.name.clone(),
            title: category.name.clone(),
            kind: GroupKind::SubMenu,
            children: renderer.category_items(category),
        })
    }));

    items
}

struct Renderer<'o> {
    options: &'o MenuOptions,
    locale: Locale,
}

impl Renderer<'_> {
    /// Top-level entries of a category followed by its ranked type groups.
    fn category_items(&self, category: &CategoryBucket<'_>) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = category
            .pages(TOP_LEVEL)
            .unwrap_or_default()
            .iter()
            .map(|page| MenuItem::Leaf(self.leaf(page, true)))
            .collect();

        let mut types: Vec<_> = category
            .types
            .iter()
            .filter(|t| t.name != TOP_LEVEL)
            .collect();
        types.sort_by(|a, b| by_rank(&self.options.type_order, &a.name, &b.name));

        for bucket in types {
            let mut pages = bucket.pages.clone();
            pages.sort_by_key(|page| title_sort_key(page, self.locale));
            items.push(MenuItem::Group(MenuGroup {
                key: bucket.name.clone(),
                title: bucket.name.clone(),
                kind: GroupKind::ItemGroup,
                children: pages
                    .into_iter()
                    .map(|page| MenuItem::Leaf(self.leaf(page, false)))
                    .collect(),
            }));
        }

        items
    }

    fn leaf(&self, page: &PageMeta, top: bool) -> MenuLeaf {
        let subtitle = if top {
            None
        } else {
            page.subtitle
                .as_ref()
                .map(|s| s.localize(self.locale).into_owned())
        };
        MenuLeaf {
            key: filename_to_path(&page.filename),
            title: page.title.localize(self.locale).into_owned(),
            subtitle,
            url: self.options.url_for(&page.filename),
            disabled: page.disabled,
            external_link: page.link.clone(),
        }
    }
}

/// Sort key for entries in a type group.
///
/// The first UTF-16 code unit of the localized title, so characters outside
/// the BMP sort by their high surrogate. Untitled entries sort last.
fn title_sort_key(page: &PageMeta, locale: Locale) -> (bool, u16) {
    match page
        .title
        .localize(locale)
        .as_text()
        .and_then(|t| t.chars().next())
    {
        Some(c) => (false, c.encode_utf16(&mut [0; 2])[0]),
        None => (true, 0),
    }
}

/// Compare two names by rank; unranked names go last, alphabetically.
fn by_rank(ranks: &HashMap<String, i32>, a: &str, b: &str) -> Ordering {
    match (ranks.get(a), ranks.get(b)) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    fn pages(values: Vec<Value>) -> Vec<PageMeta> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    fn options() -> MenuOptions {
        MenuOptions {
            category_order: HashMap::from([
                ("Principles".to_owned(), 0),
                ("Design Fundamental".to_owned(), 1),
            ]),
            type_order: HashMap::from([
                ("Basic".to_owned(), 0),
                ("Form Controls".to_owned(), 1),
                ("Views".to_owned(), 2),
            ]),
            trailing_slash: vec!["components".to_owned()],
        }
    }

    fn keys(items: &[MenuItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                MenuItem::Group(group) => format!("[{}]", group.key),
                MenuItem::Leaf(leaf) => leaf.key.clone(),
            })
            .collect()
    }

    fn group<'a>(items: &'a [MenuItem], key: &str) -> &'a MenuGroup {
        items
            .iter()
            .find_map(|item| match item {
                MenuItem::Group(g) if g.key == key => Some(g),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_top_level_first_then_ranked_categories() {
        let input = pages(vec![
            json!({"filename": "docs/spec/colors.md", "category": "Design Fundamental"}),
            json!({"filename": "docs/spec/values.md", "category": "Principles"}),
            json!({"filename": "docs/spec/introduce.md"}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(
            keys(&items),
            vec!["introduce", "[Principles]", "[Design Fundamental]"]
        );
        assert_eq!(group(&items, "Principles").kind, GroupKind::SubMenu);
    }

    #[test]
    fn test_unranked_categories_after_ranked_alphabetically() {
        let input = pages(vec![
            json!({"filename": "z.md", "category": "Zeta"}),
            json!({"filename": "a.md", "category": "Alpha"}),
            json!({"filename": "p.md", "category": "Principles"}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(keys(&items), vec!["[Principles]", "[Alpha]", "[Zeta]"]);
    }

    #[test]
    fn test_types_ranked_with_top_level_entries_first() {
        let input = pages(vec![
            json!({"filename": "components/table/index.md", "category": "Components", "type": "Views"}),
            json!({"filename": "components/button/index.md", "category": "Components", "type": "Basic"}),
            json!({"filename": "components/overview/index.md", "category": "Components"}),
            json!({"filename": "components/form/index.md", "category": "Components", "type": "Form Controls"}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        let components = group(&items, "Components");
        assert_eq!(
            keys(&components.children),
            vec!["overview", "[Basic]", "[Form Controls]", "[Views]"]
        );
        assert_eq!(
            group(&components.children, "Basic").kind,
            GroupKind::ItemGroup
        );
    }

    #[test]
    fn test_grouped_entries_sorted_by_first_title_char() {
        let input = pages(vec![
            json!({"filename": "components/icon/index.md", "title": "Icon", "type": "Basic", "order": 0}),
            json!({"filename": "components/button/index.md", "title": "Button", "type": "Basic", "order": 1}),
            json!({"filename": "components/grid/index.md", "title": "Grid", "type": "Basic", "order": 2}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(
            keys(&group(&items, "Basic").children),
            vec!["button", "grid", "icon"]
        );
    }

    #[test]
    fn test_grouped_entries_sorted_by_utf16_code_unit() {
        let input = pages(vec![
            json!({"filename": "components/wide/index.md", "title": "\u{FF21}", "type": "Basic"}),
            json!({"filename": "components/emoji/index.md", "title": "\u{1F600}", "type": "Basic"}),
            json!({"filename": "components/plain/index.md", "title": "Plain", "type": "Basic"}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(
            keys(&group(&items, "Basic").children),
            vec!["plain", "emoji", "wide"]
        );
    }

    #[test]
    fn test_unranked_types_after_ranked_alphabetically() {
        let input = pages(vec![
            json!({"filename": "components/a/index.md", "category": "Components", "type": "Zeta"}),
            json!({"filename": "components/b/index.md", "category": "Components", "type": "Views"}),
            json!({"filename": "components/c/index.md", "category": "Components", "type": "Alpha"}),
            json!({"filename": "components/d/index.md", "category": "Components", "type": "Basic"}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(
            keys(&group(&items, "Components").children),
            vec!["[Basic]", "[Views]", "[Alpha]", "[Zeta]"]
        );
    }

    #[test]
    fn test_top_level_entries_keep_builder_order() {
        let input = pages(vec![
            json!({"filename": "docs/react/z.md", "title": "Zebra", "order": 0}),
            json!({"filename": "docs/react/a.md", "title": "Aardvark", "order": 1}),
        ]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let items = render_menu(&menu, &options(), Locale::EnUs);

        assert_eq!(keys(&items), vec!["z", "a"]);
    }

    #[test]
    fn test_leaf_fields() {
        let input = pages(vec![
            json!({
                "filename": "components/button/index.zh-CN.md",
                "title": "Button",
                "subtitle": {"zh-CN": "按钮"},
                "type": "Basic",
            }),
            json!({
                "filename": "docs/react/Changelog.md",
                "title": {"zh-CN": "更新日志", "en-US": "Change Log"},
                "link": "https://example.com/changelog",
                "disabled": true,
            }),
        ]);
        let menu = MenuNode::build(&input, Locale::ZhCn);

        let items = render_menu(&menu, &options(), Locale::ZhCn);

        let MenuItem::Leaf(top) = &items[0] else {
            panic!("expected leaf");
        };
        assert_eq!(top.key, "changelog");
        assert_eq!(top.title, LocaleText::from("更新日志"));
        assert_eq!(top.url, "docs/react/changelog");
        assert!(top.disabled);
        assert_eq!(
            top.external_link.as_deref(),
            Some("https://example.com/changelog")
        );
        assert!(top.subtitle.is_none());

        let MenuItem::Leaf(grouped) = &group(&items, "Basic").children[0] else {
            panic!("expected leaf");
        };
        assert_eq!(grouped.url, "components/button/");
        assert_eq!(grouped.subtitle, Some(LocaleText::from("按钮")));
    }

    #[test]
    fn test_serialized_tree_is_tagged() {
        let input = pages(vec![json!({"filename": "a.md", "type": "Basic", "title": "A"})]);
        let menu = MenuNode::build(&input, Locale::EnUs);

        let value = serde_json::to_value(render_menu(&menu, &options(), Locale::EnUs)).unwrap();

        assert_eq!(value[0]["node"], json!("group"));
        assert_eq!(value[0]["kind"], json!("itemGroup"));
        assert_eq!(value[0]["children"][0]["node"], json!("leaf"));
        assert_eq!(value[0]["children"][0]["url"], json!("a"));
    }
}
