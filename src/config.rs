//! Tool configuration.
//!
//! Configuration is an explicit struct threaded into the run, resolved from
//! three layers: command-line flags override the optional `traffic.toml`
//! file, which overrides built-in defaults. The repository owner and name
//! have no defaults and must come from one of the first two layers.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use std::fs;

/// Default number of days kept in the short-term snapshot.
pub const DEFAULT_WINDOW_DAYS: usize = 14;

/// Default directory for JSON data and chart files.
const DEFAULT_STATS_DIR: &str = "stats";

/// Default configuration file consulted when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "traffic.toml";

/// Resolved configuration handed to the update run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Directory where JSON data and charts are written.
    pub stats_dir: Utf8PathBuf,

    /// Number of days kept in the short-term snapshot.
    pub window_days: usize,
}

/// Values a run can override on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub stats_dir: Option<Utf8PathBuf>,
    pub window_days: Option<usize>,
}

/// On-disk configuration file contents; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    owner: Option<String>,
    repo: Option<String>,
    stats_dir: Option<Utf8PathBuf>,
    window_days: Option<usize>,
}

impl Config {
    /// Resolve the configuration from flags, an optional file, and defaults.
    ///
    /// An explicitly-passed config path must exist; the default path is
    /// consulted only if present.
    pub fn resolve(config_path: Option<&Utf8Path>, overrides: Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_file(path)?,
            None => {
                let default = Utf8Path::new(DEFAULT_CONFIG_FILE);
                if default.as_std_path().exists() {
                    read_file(default)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let Some(owner) = overrides.owner.or(file.owner) else {
            bail!("no repository owner configured; pass --owner or set `owner` in {DEFAULT_CONFIG_FILE}");
        };

        let Some(repo) = overrides.repo.or(file.repo) else {
            bail!("no repository name configured; pass --repo or set `repo` in {DEFAULT_CONFIG_FILE}");
        };

        let window_days = overrides.window_days.or(file.window_days).unwrap_or(DEFAULT_WINDOW_DAYS);
        if window_days == 0 {
            bail!("window size must be at least one day");
        }

        Ok(Self {
            owner,
            repo,
            stats_dir: overrides.stats_dir.or(file.stats_dir).unwrap_or_else(|| DEFAULT_STATS_DIR.into()),
            window_days,
        })
    }

    /// Path of the unbounded history file.
    #[must_use]
    pub fn history_path(&self) -> Utf8PathBuf {
        self.stats_dir.join("traffic_history.json")
    }

    /// Path of the short-term snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> Utf8PathBuf {
        self.stats_dir.join("traffic.json")
    }

    /// Path of the daily chart.
    #[must_use]
    pub fn daily_chart_path(&self) -> Utf8PathBuf {
        self.stats_dir.join("traffic_daily.svg")
    }

    /// Path of the weekly chart.
    #[must_use]
    pub fn weekly_chart_path(&self) -> Utf8PathBuf {
        self.stats_dir.join("traffic_weekly.svg")
    }

    /// Path of the monthly chart.
    #[must_use]
    pub fn monthly_chart_path(&self) -> Utf8PathBuf {
        self.stats_dir.join("traffic_monthly.svg")
    }
}

fn read_file(path: &Utf8Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
    toml::from_str(&contents).into_app_err_with(|| format!("parsing configuration file '{path}'"))
}
