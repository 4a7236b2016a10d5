//! Daily Advice - one piece of advice per day, in your terminal
//!
//! A terminal UI application that shows an advice of the day fetched from the
//! Advice Slip API, with manual refresh and clipboard copy.

mod ui;

use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dailyadvice::app::App;
use dailyadvice::cache::{DailyCache, KeyValueStore};
use dailyadvice::cli::{Cli, StartupConfig};
use dailyadvice::clipboard::quoted;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Sends tracing output to `<dir>/dailyadvice.log`
///
/// Filter comes from `RUST_LOG` and defaults to `info`. Returns `None` (no
/// logging) if the log file cannot be opened.
fn init_logging(dir: &Path) -> Option<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("dailyadvice.log")
        .build(dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .ok()?;

    Some(guard)
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_advice(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Resolves today's advice once and prints it
async fn run_print(mut app: App) -> ExitCode {
    app.start();
    app.settle().await;

    match (&app.advice, app.notifier.current()) {
        (Some(advice), _) => {
            println!("{}", quoted(&advice.text));
            ExitCode::SUCCESS
        }
        (None, Some(notification)) => {
            eprintln!("error: {}", notification.message);
            ExitCode::FAILURE
        }
        (None, None) => {
            eprintln!("error: no advice available");
            ExitCode::FAILURE
        }
    }
}

async fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Cache hit shows advice right away; a miss starts the first fetch
    app.start();

    loop {
        app.on_tick();
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let store = config
        .cache_dir
        .clone()
        .map(KeyValueStore::with_dir)
        .or_else(KeyValueStore::new);
    let _log_guard = store.as_ref().and_then(|store| init_logging(store.dir()));
    info!(
        endpoint = %config.endpoint,
        cache_dir = ?store.as_ref().map(KeyValueStore::dir),
        "starting"
    );

    let cache = DailyCache::new(store);
    if config.fresh {
        cache.invalidate();
    }
    let app = App::new(config.endpoint.clone(), cache);

    if config.print {
        return Ok(run_print(app).await);
    }

    if let Err(e) = run_tui(app).await {
        error!("terminal error: {}", e);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        return Err(e);
    }
    Ok(ExitCode::SUCCESS)
}
