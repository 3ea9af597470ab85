mod config;
mod error;
mod logging;
mod notify;
mod ops;
mod pomodoro;

use anyhow::Context;
use clap::Parser;
use config::Config;
use notify::{DesktopNotifier, NullNotifier, Notifier};
use pomodoro::App;
use pomodoro::ui::{Runtime, TerminalGuard, run_app};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(version, about = "Pomodoro timer with a to-do list")]
struct Args {
    /// Config file (defaults to <config dir>/pomodo/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name shown in the greeting
    #[arg(short, long)]
    name: Option<String>,

    /// Start in light mode
    #[arg(long)]
    light: bool,

    /// Also send desktop notifications
    #[arg(long)]
    desktop_notify: bool,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(name) = args.name {
        config.user_name = name;
    }
    if args.light {
        config.dark_mode = false;
    }
    if args.desktop_notify {
        config.notifications.desktop = true;
    }

    let log_dir = args.log_dir.unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init(&log_dir)
        .with_context(|| format!("failed to set up logging in {}", log_dir.display()))?;
    tracing::info!(dark_mode = config.dark_mode, "pomodo starting");

    let notifier: Box<dyn Notifier> = if config.notifications.desktop {
        Box::new(DesktopNotifier::new(config.notifications.toast_seconds))
    } else {
        Box::new(NullNotifier)
    };
    let runtime = Runtime::new(
        notifier,
        Duration::from_secs(config.notifications.toast_seconds),
    );
    let app = App::new(&config.user_name, config.dark_mode);

    // Terminal setup; restored when the guard drops
    let guard = TerminalGuard::enter().context("failed to set up terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);
    drop(guard);

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        return Err(err).context("event loop failed");
    }

    tracing::info!("pomodo shut down cleanly");
    Ok(())
}
