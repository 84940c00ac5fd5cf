//! Settings for a vmkcal run.
//!
//! Layered from lowest to highest priority: built-in defaults, the config
//! file (`~/.config/vmkcal/config.toml` unless another path is given), and
//! `VMKCAL_*` environment variables. Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::dom::markers::Markers;
use crate::error::{VmkCalError, VmkCalResult};
use crate::ics::FeedOptions;
use crate::render::{DEFAULT_SETTLE, DEFAULT_TIMEOUT, RenderOptions, RendererKind};

pub const DEFAULT_URL: &str = "https://download.myvmk.com/calendar.html";
pub const DEFAULT_OUTPUT: &str = "myvmk.ics";
pub const DEFAULT_TZ: &str = "America/New_York";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub output: PathBuf,
    /// TZID label for DTSTART/DTEND. Empty means floating times.
    pub tz: String,
    pub calendar_name: String,
    pub product_id: String,
    pub placeholder_title: String,
    pub uid_domain: String,
    pub renderer: RendererKind,
    pub browser_path: Option<PathBuf>,
    /// humantime duration, e.g. `30s`
    pub timeout: String,
    /// humantime duration, e.g. `3s`
    pub settle: String,
    pub markers: Markers,
}

impl Default for Settings {
    fn default() -> Self {
        let feed = FeedOptions::default();
        Settings {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            tz: DEFAULT_TZ.to_string(),
            calendar_name: feed.calendar_name,
            product_id: feed.product_id,
            placeholder_title: feed.placeholder_title,
            uid_domain: feed.uid_domain,
            renderer: RendererKind::default(),
            browser_path: None,
            timeout: humantime::format_duration(DEFAULT_TIMEOUT).to_string(),
            settle: humantime::format_duration(DEFAULT_SETTLE).to_string(),
            markers: Markers::default(),
        }
    }
}

impl Settings {
    /// `~/.config/vmkcal/config.toml`
    pub fn default_config_path() -> VmkCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| VmkCalError::Config("Could not determine config directory".into()))?
            .join("vmkcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings. An explicitly given config file must exist; the
    /// default one is optional.
    pub fn load(config_path: Option<&Path>) -> VmkCalResult<Self> {
        let (path, required) = match config_path {
            Some(path) => (expand_path(path), true),
            None => (Self::default_config_path()?, false),
        };

        if required && !path.exists() {
            return Err(VmkCalError::Config(format!(
                "Config file not found at {}",
                path.display()
            )));
        }

        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(Environment::with_prefix("VMKCAL"))
            .build()
            .map_err(|e| VmkCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| VmkCalError::Config(e.to_string()))?;

        Ok(settings)
    }

    /// Output path with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output)
    }

    /// The TZID label, or `None` when it is empty.
    pub fn tz_label(&self) -> Option<&str> {
        let tz = self.tz.trim();
        (!tz.is_empty()).then_some(tz)
    }

    pub fn render_options(&self) -> VmkCalResult<RenderOptions> {
        Ok(RenderOptions {
            kind: self.renderer,
            timeout: parse_duration("timeout", &self.timeout)?,
            settle: parse_duration("settle", &self.settle)?,
            browser_path: self.browser_path.as_deref().map(expand_path),
        })
    }

    pub fn feed_options(&self) -> FeedOptions {
        let tzid = self.tz_label().map(str::to_string);
        if let Some(tz) = tzid.as_deref() {
            warn_if_unknown_tz(tz);
        }

        FeedOptions {
            calendar_name: self.calendar_name.clone(),
            product_id: self.product_id.clone(),
            tzid,
            placeholder_title: self.placeholder_title.clone(),
            uid_domain: self.uid_domain.clone(),
        }
    }
}

/// The label is written out as-is either way; calendar apps only resolve
/// names they know.
fn warn_if_unknown_tz(tz: &str) {
    if chrono_tz::Tz::from_str(tz).is_err() {
        tracing::warn!("'{}' is not a known IANA time zone; using it as TZID anyway", tz);
    }
}

fn parse_duration(key: &str, value: &str) -> VmkCalResult<Duration> {
    humantime::parse_duration(value.trim())
        .map_err(|e| VmkCalError::Config(format!("Invalid {} '{}': {}", key, value, e)))
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
