//! `docnav nav` command implementation.

use clap::Args;
use docnav_site::{FooterNav, flatten, footer_nav};
use serde::Serialize;

use super::{SiteArgs, route_context};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Route pathname of the active page.
    #[arg(short, long)]
    path: String,

    /// Menu key of the active page (default: last path segment).
    #[arg(long)]
    children: Option<String>,

    /// Route query string (e.g., `locale=zh-CN`).
    #[arg(short, long)]
    query: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavReport<'a> {
    active_key: &'a str,
    #[serde(flatten)]
    nav: FooterNav<'a>,
}

impl NavArgs {
    /// Execute the nav command.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load().await?;

        let route = route_context(&self.path, self.children, self.query);
        let locale = site.locale(route.query.as_deref());
        let menu = site.menu(&route.pathname, locale);
        let flat = flatten(&menu.items);

        let active_key = route.active_key();
        let nav = footer_nav(&flat, active_key);
        if nav == FooterNav::default() {
            output.warning(&format!("No neighbors for '{active_key}'"));
        }

        output.json(&NavReport { active_key, nav })
    }
}
