//! Error types for vmkcal.

use std::time::Duration;

use thiserror::Error;

/// Errors that can abort a vmkcal run.
///
/// Everything else (unparseable header, malformed day cells, odd time text)
/// is recovered where it happens and never surfaces here.
#[derive(Error, Debug)]
pub enum VmkCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Rendering timed out after {}", elapsed(.0))]
    RenderTimeout(Duration),

    #[error("No headless browser found in PATH (tried: {0})")]
    BrowserNotInstalled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn elapsed(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// Result type alias for vmkcal operations.
pub type VmkCalResult<T> = Result<T, VmkCalError>;
