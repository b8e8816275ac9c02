//! CLI command implementations.

pub(crate) mod menu;
pub(crate) mod nav;
pub(crate) mod resolve;

pub(crate) use menu::MenuArgs;
pub(crate) use nav::NavArgs;
pub(crate) use resolve::ResolveArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config, MenuConfig};
use docnav_site::{
    ContentIndex, Locale, LocalePreference, LocaleResolver, MenuItem, MenuNode, MenuOptions,
    PageMeta, RouteContext, RouteParams, SiteManifest, filename_to_url, normalize_pathname,
    render_menu,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site manifest (overrides config).
    #[arg(short, long, env = "DOCNAV_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Preferred locale (overrides config).
    #[arg(short, long)]
    locale: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration and the site manifest.
    pub(crate) async fn load(&self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            manifest: self.manifest.clone(),
            locale: self.locale.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let manifest = SiteManifest::load(&config.manifest_path).await?;

        let fallback: Locale = config.locale.fallback.parse()?;
        let preference = EnvPreference {
            persisted: config.locale.preferred.clone(),
        };

        Ok(Site {
            resolver: LocaleResolver::new(preference, fallback),
            options: menu_options(&config.menu),
            config,
            manifest,
        })
    }
}

/// Loaded configuration and site data.
pub(crate) struct Site {
    config: Config,
    manifest: SiteManifest,
    resolver: LocaleResolver<EnvPreference>,
    options: MenuOptions,
}

/// Menu for one route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderedMenu {
    pub locale: Locale,
    pub items: Vec<MenuItem>,
    pub open_keys: Vec<String>,
    pub index_route: Option<String>,
}

impl Site {
    /// Effective locale for a request with `query`.
    pub(crate) fn locale(&self, query: Option<&str>) -> Locale {
        self.resolver.resolve(query)
    }

    /// Render the menu shown on `pathname`.
    pub(crate) fn menu(&self, pathname: &str, locale: Locale) -> RenderedMenu {
        let scope = self
            .manifest
            .module_scope(self.config.menu.shared_modules.clone());
        let pages = scope.pages_for(pathname, locale);
        let node = MenuNode::build(&pages, locale);

        RenderedMenu {
            locale,
            items: render_menu(&node, &self.options, locale),
            open_keys: node.open_keys(),
            index_route: node.index_route(),
        }
    }

    /// Route index with configured aliases applied.
    pub(crate) fn content_index(&self) -> ContentIndex<Value> {
        let base_dir = self
            .config
            .manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."));

        let mut index = self.manifest.content_index(base_dir);
        for (path, target) in &self.config.routes.aliases {
            index.insert_alias(path, target);
        }
        index
    }

    /// Metadata of the page served at `pathname`, in any locale.
    pub(crate) fn page(&self, pathname: &str) -> Option<&PageMeta> {
        let url = normalize_pathname(pathname).to_lowercase();
        self.manifest
            .modules
            .values()
            .flatten()
            .map(|entry| &entry.meta)
            .find(|meta| filename_to_url(&meta.filename) == url)
    }
}

fn menu_options(menu: &MenuConfig) -> MenuOptions {
    MenuOptions {
        category_order: menu.category_order.clone(),
        type_order: menu.type_order.clone(),
        trailing_slash: menu.trailing_slash.clone(),
    }
}

/// Build the route for `path`.
///
/// Site routes have the shape `<section>/:children`, so without an explicit
/// `children` the last segment of a multi-segment path is used.
pub(crate) fn route_context(
    path: &str,
    children: Option<String>,
    query: Option<String>,
) -> RouteContext {
    let children = children.or_else(|| {
        normalize_pathname(path)
            .rsplit_once('/')
            .map(|(_, last)| last.to_owned())
    });

    RouteContext {
        pathname: path.to_owned(),
        query,
        params: RouteParams { children },
    }
}

/// Locale preference from configuration and the process environment.
struct EnvPreference {
    persisted: Option<String>,
}

impl LocalePreference for EnvPreference {
    fn persisted(&self) -> Option<String> {
        self.persisted.clone()
    }

    fn platform(&self) -> Option<String> {
        ["LC_ALL", "LANG"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| platform_tag(&value))
    }
}

/// Convert a POSIX locale (`zh_CN.UTF-8`) to a language tag (`zh-CN`).
fn platform_tag(value: &str) -> Option<String> {
    let name = value.split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}
