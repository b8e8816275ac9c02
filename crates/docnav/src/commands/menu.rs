//! `docnav menu` command implementation.

use clap::Args;

use super::{SiteArgs, route_context};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Route pathname whose menu is shown.
    #[arg(short, long, default_value = "")]
    path: String,

    /// Route query string (e.g., `locale=zh-CN`).
    #[arg(short, long)]
    query: Option<String>,
}

impl MenuArgs {
    /// Execute the menu command.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load().await?;

        let route = route_context(&self.path, None, self.query);
        let locale = site.locale(route.query.as_deref());
        let menu = site.menu(&route.pathname, locale);

        if menu.items.is_empty() {
            output.warning(&format!("No pages for route '{}'", route.pathname));
        } else {
            output.info(&format!("Menu for '{}' ({locale})", route.pathname));
        }

        output.json(&menu)
    }
}
