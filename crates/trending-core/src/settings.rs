use chrono::Weekday;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::DashboardError;

/// Default `trending_date` layout in the export, e.g. `17.14.11`.
pub const DEFAULT_TRENDING_DATE_FORMAT: &str = "%y.%d.%m";

/// Default `publish_time` layout in the export, e.g. `2017-11-13T17:13:01.000Z`.
pub const DEFAULT_PUBLISH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Exploratory dashboard over trending video statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "trending-dashboard",
    about = "Exploratory dashboard over trending video statistics",
    version
)]
pub struct Settings {
    /// Trending videos CSV export
    #[arg(long, default_value = "data/USvideos.csv")]
    pub data_file: PathBuf,

    /// Category mapping JSON (videoCategories export)
    #[arg(long, default_value = "data/US_category_id.json")]
    pub category_file: PathBuf,

    /// Initial dashboard tab
    #[arg(long, default_value = "overview", value_parser = ["overview", "channels"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Only show these category labels (repeatable; all when omitted)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Minimum viral score a record needs to be shown
    #[arg(long, default_value = "0.0")]
    pub min_viral_score: f64,

    /// Only show videos published on these weekdays (repeatable; all when omitted)
    #[arg(long = "weekday")]
    pub weekdays: Vec<String>,

    /// Number of bins in the view-count histogram (1-200)
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u16).range(1..=200))]
    pub histogram_bins: u16,

    /// Number of channels in the channel rankings (1-50)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub top_channels: u16,

    /// strftime layout of the trending_date column
    #[arg(long, default_value = DEFAULT_TRENDING_DATE_FORMAT)]
    pub trending_date_format: String,

    /// strftime layout of the publish_time column
    #[arg(long, default_value = DEFAULT_PUBLISH_TIME_FORMAT)]
    pub publish_time_format: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.trending-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram_bins: Option<u16>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".trending-dashboard").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation; accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins; filters are never restored.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        // clap stores the arg id using the field name (underscores).
        if !is_arg_explicitly_set(&matches, "data_file") {
            if let Some(v) = last.data_file {
                settings.data_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "category_file") {
            if let Some(v) = last.category_file {
                settings.category_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "histogram_bins") {
            if let Some(v) = last.histogram_bins.filter(|b| (1..=200).contains(b)) {
                settings.histogram_bins = v;
            }
        }

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not persist settings to {}: {}", config_path.display(), e);
        }

        settings.apply_debug()
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Parse the `--weekday` values into [`Weekday`]s.
    ///
    /// Accepts full or abbreviated English names in any case.
    pub fn parsed_weekdays(&self) -> Result<Vec<Weekday>, DashboardError> {
        self.weekdays
            .iter()
            .map(|name| {
                name.trim()
                    .parse::<Weekday>()
                    .map_err(|_| DashboardError::Config(format!("Unknown weekday: {}", name)))
            })
            .collect()
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            data_file: Some(s.data_file.clone()),
            category_file: Some(s.category_file.clone()),
            histogram_bins: Some(s.histogram_bins),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
