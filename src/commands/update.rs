//! The update run: fetch, merge, snapshot, aggregate, render.

use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use ohno::bail;
use repo_traffic::Result;
use repo_traffic::config::{Config, Overrides};
use repo_traffic::reports;
use repo_traffic::traffic::{self, Client, HistoryStore};

const LOG_TARGET: &str = "    update";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments for the update run
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// GitHub personal access token used for the traffic API
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository owner (overrides the configuration file)
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Repository name (overrides the configuration file)
    #[arg(long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Path to configuration file [default: traffic.toml]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where JSON data and charts are written [default: stats]
    #[arg(long, value_name = "PATH")]
    pub stats_dir: Option<Utf8PathBuf>,

    /// Number of days kept in the short-term snapshot [default: 14]
    #[arg(long, value_name = "DAYS")]
    pub window_days: Option<usize>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Run the whole update: one fetch, then merge, snapshot, aggregate, and
/// render. The fetch happens before anything is written, so a failed run
/// leaves both JSON files untouched.
pub async fn run_update(args: &UpdateArgs) -> Result<()> {
    init_logging(args.log_level);

    let Some(token) = args.github_token.as_deref() else {
        bail!("no GitHub token supplied; pass --github-token or set GITHUB_TOKEN");
    };

    let config = Config::resolve(
        args.config.as_deref(),
        Overrides {
            owner: args.owner.clone(),
            repo: args.repo.clone(),
            stats_dir: args.stats_dir.clone(),
            window_days: args.window_days,
        },
    )?;

    let client = Client::new(token, traffic::GITHUB_API_BASE)?;
    let views = client.fetch_views(&config.owner, &config.repo).await?;
    log::info!(target: LOG_TARGET, "fetched {} day(s) of traffic for {}/{}", views.len(), config.owner, config.repo);

    let records = traffic::normalize_views(views)?;

    let mut store = HistoryStore::load(config.history_path());
    store.merge(records);
    store.save()?;
    log::info!(target: LOG_TARGET, "history now covers {} day(s)", store.entries().len());

    let window = traffic::recent(store.entries(), config.window_days);
    traffic::write_records(&config.snapshot_path(), &window)?;

    let daily = traffic::aggregate::daily(&window);
    let weekly = traffic::aggregate::weekly(store.entries())?;
    let monthly = traffic::aggregate::monthly(store.entries())?;

    let daily_title = format!("Daily Unique Visitors (last {} days)", config.window_days);
    reports::write_chart(&config.daily_chart_path(), &daily, &daily_title, "date", "unique visitors")?;
    reports::write_chart(&config.weekly_chart_path(), &weekly, "Weekly Unique Visitors", "week", "unique visitors")?;
    reports::write_chart(&config.monthly_chart_path(), &monthly, "Monthly Unique Visitors", "month", "unique visitors")?;

    Ok(())
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
