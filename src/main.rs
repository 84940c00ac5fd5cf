mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vmkcal_core::render::RendererKind;

#[derive(Parser, Debug)]
#[command(name = "vmkcal")]
#[command(about = "Convert the MyVMK events calendar into an .ics feed")]
#[command(version)]
struct Cli {
    /// URL of the events calendar (file:// URLs and local paths work too)
    #[arg(long)]
    url: Option<String>,

    /// Output .ics file, or "-" for stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Force year (e.g. 2025)
    #[arg(long)]
    year: Option<i32>,

    /// Force month 1-12 (e.g. 10)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// TZID label for DTSTART/DTEND (no VTIMEZONE is emitted). Pass "" for floating times
    #[arg(long)]
    tz: Option<String>,

    /// Calendar display name (X-WR-CALNAME)
    #[arg(long)]
    name: Option<String>,

    /// How to load the page: "browser" runs its JavaScript, "static" does a plain fetch
    #[arg(long)]
    renderer: Option<RendererKind>,

    /// Browser executable (defaults to the first Chromium/Chrome found in PATH)
    #[arg(long)]
    browser: Option<PathBuf>,

    /// Give up on rendering after this long (e.g. "30s")
    #[arg(long)]
    timeout: Option<humantime::Duration>,

    /// Time given to page scripts to fill in the calendar (e.g. "3s")
    #[arg(long)]
    settle: Option<humantime::Duration>,

    /// Save the rendered HTML to this file for inspection
    #[arg(long)]
    dump_html: Option<PathBuf>,

    /// Config file (defaults to ~/.config/vmkcal/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print diagnostics while scraping
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    commands::scrape::run(cli).await
}

/// RUST_LOG wins; otherwise debug output for our crates under --verbose.
fn init_logging(verbose: bool) {
    let default_directives = if verbose {
        "warn,vmkcal=debug,vmkcal_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
