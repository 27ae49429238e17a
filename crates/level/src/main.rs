//! Level CLI - single-level page indexing.
//!
//! Provides commands for:
//! - `nav`: Load the level of a page and show its navigation
//! - `breadcrumbs`: Show the breadcrumb trail of a document id

mod commands;
mod error;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BreadcrumbsArgs, NavArgs};
use output::Output;

/// Level - scoped content-directory indexing.
#[derive(Parser)]
#[command(name = "level", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the level of a page and print its siblings and neighbours.
    Nav(NavArgs),
    /// Print the breadcrumb trail of a document id.
    Breadcrumbs(BreadcrumbsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Nav(args) => args.site.verbose,
        Commands::Breadcrumbs(args) => args.site.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(&output),
        Commands::Breadcrumbs(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
