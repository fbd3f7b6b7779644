//! sitenav CLI - Sidebar navigation checker.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and sidebar
//! - `tree`: Print the validated sidebar as an outline or JSON
//! - `resolve`: Find the sidebar entry that owns a route

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, TreeArgs};
use output::Output;

/// sitenav - Sidebar navigation checker.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration and sidebar.
    Check(CheckArgs),
    /// Print the validated sidebar.
    Tree(TreeArgs),
    /// Find the sidebar entry that owns a route.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or fall back to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        default_filter(std::env::var("RUST_LOG").ok().as_deref())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Log filter used without `--verbose`: `RUST_LOG` when set, otherwise WARN.
fn default_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
