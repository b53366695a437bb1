//! Bvlge - a terminal client for a personal-finance API.
//!
//! Sign in, review and add transactions, and browse income/expense
//! statistics from the keyboard.
//!
//! Usage: `bvlge [ROUTE]` starts on ROUTE (default `/`);
//! `bvlge --logout` forgets the stored session and exits.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bvlge_core::config::Config;
use bvlge_core::routes::Route;
use bvlge_core::session::SessionContext;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the cache directory (rotated daily)
const LOG_FILE: &str = "bvlge.log";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a file in the cache
/// directory. Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let dir = config.cache_dir().ok()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Logging disabled: cannot create {}: {}", dir.display(), e);
        return None;
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config ({e}), using defaults");
            Config::default()
        }
    };

    let _log_guard = init_tracing(&config);

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--logout" {
        return logout(&config);
    }
    let start = match args.get(1) {
        Some(path) => Route::from_path(path)
            .with_context(|| format!("Unknown route: {path}"))?,
        None => Route::Landing,
    };

    info!(%start, "Bvlge starting");

    let mut app = App::new(config, start)?;
    app.sync_route();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Bvlge shutting down");
    Ok(())
}

/// Clear the stored session tokens
fn logout(config: &Config) -> Result<()> {
    let store = config.session_store().context("Failed to open session store")?;
    let session = SessionContext::new(store);
    let was_signed_in = session.is_authenticated();
    session.clear().context("Failed to clear session")?;

    if was_signed_in {
        info!("Session cleared from the command line");
        println!("Signed out.");
    } else {
        warn!("Logout requested with no stored session");
        println!("No stored session.");
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
                app.sync_route();
            }
        }

        // Let spawned requests make progress before draining their results
        tokio::task::yield_now().await;
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
