//! docnav CLI - Documentation site navigation.
//!
//! Provides commands for:
//! - `menu`: Print the sidebar menu for a route
//! - `nav`: Print the previous/next footer links for a route
//! - `resolve`: Load the content and demos for a route

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MenuArgs, NavArgs, ResolveArgs};
use output::Output;

/// docnav - Documentation site navigation.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered menu, open keys and index route.
    Menu(MenuArgs),
    /// Print the previous and next entries around the active page.
    Nav(NavArgs),
    /// Load content and demos for a route.
    Resolve(ResolveArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Menu(args) => args.site.verbose,
            Self::Nav(args) => args.site.verbose,
            Self::Resolve(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async {
        match cli.command {
            Commands::Menu(args) => args.execute().await,
            Commands::Nav(args) => args.execute().await,
            Commands::Resolve(args) => args.execute().await,
        }
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(err.exit_code());
    }
}
