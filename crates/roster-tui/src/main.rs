//! `roster-tui`: terminal front end for a student records service.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive state from
//! `roster-core`'s [`Roster`](roster_core::Roster). Two views: the student
//! list (`/`) with its creation form, and the single-record detail view
//! (`/student/{id}`).
//!
//! Logs are written to a file (default `/tmp/roster-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge forwards every
//! roster change into the TUI action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_config::Profile;
use roster_core::{Roster, RosterConfig};

use crate::app::App;
use crate::event::Rates;
use crate::screen::Route;

/// Terminal UI for listing, adding, and deleting student records.
#[derive(Parser, Debug)]
#[command(name = "roster-tui", version, about)]
struct Cli {
    /// Service base URL (overrides the profile)
    #[arg(short = 'u', long, env = "ROSTER_BASE_URL")]
    base_url: Option<String>,

    /// Config profile to use
    #[arg(short = 'p', long, env = "ROSTER_PROFILE")]
    profile: Option<String>,

    /// Start on this route, e.g. `/student/42`
    #[arg(long, default_value = "/")]
    route: Route,

    /// Tick rate in Hz (toast expiry, loading animation)
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=60))]
    tick_rate: u32,

    /// Render rate in frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=120))]
    frame_rate: u32,

    /// Log file path (defaults to /tmp/roster-tui.log)
    #[arg(long, default_value = "/tmp/roster-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal is in raw mode. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("roster_tui={log_level},roster_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("roster-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the service settings: `--base-url` > profile > built-in default.
fn resolve_config(cli: &Cli) -> Result<RosterConfig> {
    let cfg = roster_config::load_config_or_default();
    let name = cfg.active_profile_name(cli.profile.as_deref());

    let mut profile = match (cfg.profile(&name), &cli.base_url) {
        (Ok(profile), _) => profile.clone(),
        (Err(_), Some(_)) => Profile::default(),
        (Err(e), None) => return Err(e.into()),
    };
    if let Some(url) = &cli.base_url {
        profile.base_url.clone_from(url);
    }

    Ok(roster_config::profile_to_roster_config(&profile, &name)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = resolve_config(&cli)?;
    info!(base_url = %config.base_url, route = %cli.route, "starting roster-tui");

    let roster = Roster::from_config(&config)?;
    let rates = Rates::from_hz(cli.tick_rate, cli.frame_rate);
    let mut app = App::new(roster, cli.route).with_rates(rates);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rates_come_from_flags() {
        let cli = Cli::try_parse_from(["roster-tui", "--tick-rate", "10", "--frame-rate", "60"])
            .unwrap();
        let rates = Rates::from_hz(cli.tick_rate, cli.frame_rate);
        assert_eq!(rates.tick, Duration::from_millis(100));
        assert_eq!(rates.render, Duration::from_secs(1) / 60);
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        assert!(Cli::try_parse_from(["roster-tui", "--frame-rate", "0"]).is_err());
    }
}
