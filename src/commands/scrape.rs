use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;
use vmkcal_core::config::Settings;
use vmkcal_core::header::MonthOverride;
use vmkcal_core::ics;
use vmkcal_core::render::render as render_page;
use vmkcal_core::scrape::scrape_html;

use super::create_spinner;
use crate::Cli;
use crate::render::{Render, pluralize};

const STDOUT_PATH: &str = "-";

pub async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    let render_options = settings.render_options()?;
    let feed_options = settings.feed_options();
    let output = settings.output_path();

    let spinner = create_spinner(format!("Rendering {}", settings.url));
    let result = render_page(&settings.url, &render_options).await;
    spinner.finish_and_clear();
    let html = result.with_context(|| format!("Failed to load {}", settings.url))?;

    if let Some(path) = &cli.dump_html {
        dump_html(path, &html);
    }

    let overrides = MonthOverride {
        year: cli.year,
        month: cli.month,
    };
    let scrape = scrape_html(
        &html,
        Some(&settings.url),
        overrides,
        &settings.markers,
        Local::now().date_naive(),
    );

    if cli.verbose {
        eprintln!("{}", scrape.month.render());
        for event in &scrape.events {
            eprintln!("   {}", event.render());
        }
    }

    let ics = ics::generate_feed(&scrape.events, &feed_options);
    write_output(&output, &ics)?;

    let count = scrape.events.len();
    let message = format!(
        "Wrote {} {} to {}",
        count,
        pluralize("event", count),
        output.display()
    );
    if output == Path::new(STDOUT_PATH) {
        eprintln!("{}", message.green());
    } else {
        println!("{}", message.green());
    }

    Ok(())
}

/// Config file and environment, then command-line flags on top.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_cli(&mut settings, cli);
    Ok(settings)
}

fn apply_cli(settings: &mut Settings, cli: &Cli) {
    if let Some(url) = &cli.url {
        settings.url = url.clone();
    }
    if let Some(out) = &cli.out {
        settings.output = out.clone();
    }
    if let Some(tz) = &cli.tz {
        settings.tz = tz.clone();
    }
    if let Some(name) = &cli.name {
        settings.calendar_name = name.clone();
    }
    if let Some(renderer) = cli.renderer {
        settings.renderer = renderer;
    }
    if let Some(browser) = &cli.browser {
        settings.browser_path = Some(browser.clone());
    }
    if let Some(timeout) = &cli.timeout {
        settings.timeout = timeout.to_string();
    }
    if let Some(settle) = &cli.settle {
        settings.settle = settle.to_string();
    }
}

/// Debug aid only: a failed dump never stops the run.
fn dump_html(path: &Path, html: &str) {
    match std::fs::write(path, html) {
        Ok(()) => tracing::info!("Saved rendered HTML to {}", path.display()),
        Err(e) => tracing::warn!("Could not save rendered HTML to {}: {}", path.display(), e),
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path == Path::new(STDOUT_PATH) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write feed to stdout")?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
