//! Getting the final HTML of the calendar page.
//!
//! The calendar is filled in by JavaScript, so the default backend runs a
//! headless Chromium-family browser (found in PATH) and dumps the DOM once
//! the page has settled. A plain HTTP fetch is available for pages that do
//! not need scripts, and `file://` URLs or local paths are read from disk.
//!
//! Every backend runs under a single timeout; hitting it aborts the run.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use url::Url;

use crate::error::{VmkCalError, VmkCalResult};

/// Executables tried, in order, when no browser path is configured.
const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra time given to page scripts to populate the calendar.
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Headless browser with JavaScript.
    #[default]
    Browser,
    /// Plain HTTP GET, no scripts.
    Static,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "browser" => Ok(RendererKind::Browser),
            "static" => Ok(RendererKind::Static),
            other => Err(format!(
                "Unknown renderer '{}'. Expected 'browser' or 'static'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub kind: RendererKind,
    pub timeout: Duration,
    pub settle: Duration,
    /// Browser executable to use instead of searching PATH.
    pub browser_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            kind: RendererKind::default(),
            timeout: DEFAULT_TIMEOUT,
            settle: DEFAULT_SETTLE,
            browser_path: None,
        }
    }
}

/// What a URL argument points at.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Remote(Url),
    File(PathBuf),
}

impl Target {
    fn parse(input: &str) -> VmkCalResult<Self> {
        match Url::parse(input) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Target::Remote(url)),
                "file" => url.to_file_path().map(Target::File).map_err(|_| {
                    VmkCalError::InvalidUrl(input.to_string(), "not a local file path".into())
                }),
                scheme => Err(VmkCalError::InvalidUrl(
                    input.to_string(),
                    format!("unsupported scheme '{}'", scheme),
                )),
            },
            Err(e) => {
                let path = Path::new(input);
                if path.is_file() {
                    Ok(Target::File(path.to_path_buf()))
                } else {
                    Err(VmkCalError::InvalidUrl(input.to_string(), e.to_string()))
                }
            }
        }
    }
}

/// Render `url` and return the resulting HTML.
pub async fn render(url: &str, options: &RenderOptions) -> VmkCalResult<String> {
    let target = Target::parse(url)?;

    timeout(options.timeout, render_target(&target, options))
        .await
        .map_err(|_| VmkCalError::RenderTimeout(options.timeout))?
}

async fn render_target(target: &Target, options: &RenderOptions) -> VmkCalResult<String> {
    match target {
        Target::File(path) => {
            tracing::debug!("Reading {}", path.display());
            tokio::fs::read_to_string(path).await.map_err(|e| {
                VmkCalError::Render(format!("Could not read {}: {}", path.display(), e))
            })
        }
        Target::Remote(url) => match options.kind {
            RendererKind::Browser => render_in_browser(url, options).await,
            RendererKind::Static => fetch_static(url, options).await,
        },
    }
}

fn find_browser(explicit: Option<&Path>) -> VmkCalResult<PathBuf> {
    if let Some(path) = explicit {
        return which::which(path)
            .map_err(|_| VmkCalError::BrowserNotInstalled(path.display().to_string()));
    }

    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or_else(|| VmkCalError::BrowserNotInstalled(BROWSER_CANDIDATES.join(", ")))
}

async fn render_in_browser(url: &Url, options: &RenderOptions) -> VmkCalResult<String> {
    let binary_path = find_browser(options.browser_path.as_deref())?;
    tracing::debug!(
        "Rendering {} with {} (JavaScript enabled)",
        url,
        binary_path.display()
    );

    // kill_on_drop: the outer timeout drops this future and must take the
    // browser down with it.
    let output = Command::new(&binary_path)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-first-run")
        .arg("--hide-scrollbars")
        .arg(format!("--virtual-time-budget={}", options.settle.as_millis()))
        .arg("--dump-dom")
        .arg(url.as_str())
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            VmkCalError::Render(format!("Failed to spawn {}: {}", binary_path.display(), e))
        })?;

    if !output.status.success() {
        return Err(VmkCalError::Render(format!(
            "Browser exited with status: {}",
            output.status.code().unwrap_or(-1)
        )));
    }

    let html = String::from_utf8_lossy(&output.stdout).into_owned();
    if html.trim().is_empty() {
        return Err(VmkCalError::Render("Browser returned an empty page".into()));
    }

    tracing::debug!("Rendered {} bytes of HTML", html.len());
    Ok(html)
}

async fn fetch_static(url: &Url, options: &RenderOptions) -> VmkCalResult<String> {
    tracing::debug!("Fetching {} (no JavaScript)", url);

    let client = reqwest::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|e| VmkCalError::Render(e.to_string()))?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| VmkCalError::Render(format!("Failed to fetch {}: {}", url, e)))?;

    response
        .text()
        .await
        .map_err(|e| VmkCalError::Render(format!("Failed to read body of {}: {}", url, e)))
}
