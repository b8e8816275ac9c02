//! `docnav resolve` command implementation.

use std::sync::Arc;

use clap::Args;
use docnav_site::{
    ContentLoader, Demo, DemoAnchor, DemoBundle, Locale, PageMeta, Resolution, Showcase,
};
use serde::Serialize;
use serde_json::Value;

use super::{SiteArgs, route_context};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Route pathname to resolve.
    #[arg(short, long)]
    path: String,

    /// Route query string (e.g., `locale=zh-CN`).
    #[arg(short, long)]
    query: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport<'a> {
    locale: Locale,
    content: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    demos: Option<DemoReport<'a>>,
}

/// Demo layout for the page.
#[derive(Debug, PartialEq, Serialize)]
struct DemoReport<'a> {
    left: Vec<&'a str>,
    right: Vec<&'a str>,
    anchors: Vec<DemoAnchor>,
}

impl<'a> DemoReport<'a> {
    fn new(bundle: &'a DemoBundle, single_column: bool, locale: Locale) -> Self {
        let showcase = Showcase::select(bundle, single_column);
        let ids = |demos: &[&'a Demo]| -> Vec<&'a str> {
            demos.iter().map(|d| d.meta.id.as_str()).collect()
        };
        Self {
            left: ids(&showcase.left),
            right: ids(&showcase.right),
            anchors: showcase.anchors(locale),
        }
    }
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// A route without content prints the not-found payload and fails with
    /// [`CliError::NotFound`].
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load().await?;

        let route = route_context(&self.path, None, self.query);
        let locale = site.locale(route.query.as_deref());
        let loader = ContentLoader::new(Arc::new(site.content_index()));

        tracing::info!(path = %route.pathname, %locale, "Resolving route");
        match loader.resolve(&route, locale).await? {
            Resolution::Found(result) => {
                let single_column = site
                    .page(&route.pathname)
                    .is_some_and(PageMeta::is_single_column);
                let demos = result
                    .demos
                    .as_ref()
                    .map(|bundle| DemoReport::new(bundle, single_column, locale));

                output.json(&ResolveReport {
                    locale,
                    content: &result.content,
                    demos,
                })
            }
            Resolution::NotFound(not_found) => {
                output.json(&not_found)?;
                Err(CliError::NotFound(not_found.pathname))
            }
        }
    }
}
