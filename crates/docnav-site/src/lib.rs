//! Navigation and content resolution for a bilingual component-library site.
//!
//! This crate provides:
//! - [`LocaleResolver`]: active locale from query, persisted preference and platform
//! - [`MenuNode`] and [`render_menu`]: grouped, ranked sidebar menu
//! - [`flatten`] and [`footer_nav`]: reading order and previous/next links
//! - [`ContentLoader`]: per-route content and demo loading
//! - [`SiteManifest`]: page metadata and content files on disk
//!
//! # Quick Start
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use docnav_site::{
//!     ContentLoader, Locale, MenuNode, MenuOptions, RouteContext, SiteManifest, flatten,
//!     footer_nav, render_menu,
//! };
//!
//! let manifest = SiteManifest::load(Path::new("site-data.json")).await?;
//! let route = RouteContext::new("components/button/");
//! let locale = Locale::EnUs;
//!
//! // Sidebar menu and footer links
//! let scope = manifest.module_scope(vec!["components".to_owned()]);
//! let pages = scope.pages_for(&route.pathname, locale);
//! let menu = render_menu(&MenuNode::build(&pages, locale), &MenuOptions::default(), locale);
//! let flat = flatten(&menu);
//! let nav = footer_nav(&flat, "button");
//!
//! // Page content
//! let loader = ContentLoader::new(Arc::new(manifest.content_index(Path::new("."))));
//! let resolution = loader.resolve(&route, locale).await?;
//! # Ok(())
//! # }
//! ```

mod demos;
mod loader;
mod locale;
mod manifest;
mod menu;
mod modules;
mod navigation;
mod ordering;
mod page_meta;
mod route;

pub use demos::{Demo, DemoAnchor, DemoBundle, DemoMeta, Showcase};
pub use loader::{
    BoxFuture, ContentIndex, ContentLoader, ContentProvider, LoadError, LoadResult, Loadable,
    NotFound, ProviderError, Resolution, await_all,
};
pub use locale::{
    Locale, LocaleParseError, LocalePreference, LocaleResolver, LocaleText, Localized,
    StaticPreference, locale_from_query, localize_value,
};
pub use manifest::{ManifestEntry, ManifestError, SiteManifest};
pub use menu::{CategoryBucket, MenuNode, TOP_LEVEL, TypeBucket};
pub use modules::{ModuleScope, filter_for_locale, module_name};
pub use navigation::{FlatNavEntry, FooterNav, flatten, footer_nav};
pub use ordering::{GroupKind, MenuGroup, MenuItem, MenuLeaf, MenuOptions, render_menu};
pub use page_meta::{PageMeta, parse_order};
pub use route::{
    RouteContext, RouteParams, filename_locale, filename_to_path, filename_to_route,
    filename_to_url, normalize_pathname,
};
