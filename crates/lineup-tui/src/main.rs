// Lineup entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the roster and build the mode controller
// 4. Pick the submitter (HTTP or dry run)
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits or the lineup is saved
// 8. Cleanup on exit

use std::path::Path;

use lineup_core::config;
use lineup_core::controller::{ControllerSettings, ModeController};
use lineup_core::roster;
use lineup_tui::app;
use lineup_tui::submit;
use lineup_tui::tui;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Lineup starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: roster={}, initial mode={}",
        config.roster.path,
        config.ui.mode()
    );

    // 3. Load the roster and build the controller
    let roster = roster::load_roster(Path::new(&config.roster.path))
        .with_context(|| format!("failed to load roster from {}", config.roster.path))?;
    info!("Loaded {} players", roster.players.len());

    let settings = ControllerSettings::from_config(&config.drag, config.ui.mode());
    let controller = ModeController::new(roster.into_store(), settings);

    // 4. Submitter
    let submitter = submit::from_config(&config.submit).context("failed to build submitter")?;

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(config, controller, submitter, StdRng::from_os_rng());

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocking until the user quits or the
    //    app loop ends the session).
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Lineup shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lineup.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lineup=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
