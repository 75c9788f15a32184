//! A tool that tracks GitHub repository traffic over time.
//!
//! # Overview
//!
//! `repo-traffic` fetches the daily visitor counts that GitHub keeps for a
//! repository (the traffic API only retains the last 14 days), folds them
//! into an unbounded date-keyed history file, and renders daily, weekly,
//! and monthly unique-visitor charts from that history. Running it once a
//! day from a scheduled job is enough to never lose a day of data.
//!
//! # Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! repo-traffic --owner you --repo your-site
//! ```
//!
//! This writes five files under `stats/`:
//!
//! - `traffic_history.json` — every day ever observed, merged across runs
//! - `traffic.json` — the most recent 14 days, overwritten each run
//! - `traffic_daily.svg`, `traffic_weekly.svg`, `traffic_monthly.svg`
//!
//! # Configuration
//!
//! Defaults can live in a `traffic.toml` next to where the tool runs:
//!
//! ```toml
//! owner = "you"
//! repo = "your-site"
//! stats_dir = "stats"
//! window_days = 14
//! ```
//!
//! Command-line flags override the file. The token is only accepted via
//! `--github-token` or the `GITHUB_TOKEN` environment variable; it never
//! appears in the configuration file.
//!
//! # Scheduling
//!
//! The tool is a single-run batch job with no locking: if two invocations
//! run concurrently against the same stats directory their writes race.
//! Run it from a scheduler that serializes invocations (cron, CI).
//!
//! **Example CI workflow:**
//! ```yaml
//! - name: Update traffic stats
//!   run: repo-traffic --owner you --repo your-site
//!   env:
//!     GITHUB_TOKEN: ${{ secrets.TRAFFIC_TOKEN }}
//! ```
//!
//! # Errors
//!
//! A missing token, an unreadable configuration file, a non-2xx response
//! from the traffic endpoint, or a malformed timestamp all abort the run
//! with a non-zero exit status before anything is persisted. A missing or
//! corrupt history file is not an error; it is treated as an empty history.

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use repo_traffic::Result;

mod commands;

use crate::commands::{UpdateArgs, run_update};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-traffic", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: UpdateArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run_update(&cli.args).await
}
