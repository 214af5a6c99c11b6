//! pomodoro-cards - a board of pomodoro countdown cards in the terminal
//!
//! This is the main entry point: it parses the configuration, sets up
//! logging and runs the board until the user quits.

use anyhow::Context;
use bubbletea_rs::Program;
use std::fs::File;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pomodoro_cards::{board::Board, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(format!("pomodoro_cards={}", config.log_level()))),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    info!("Starting pomodoro-cards v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: presets={:?}, quick_add={:?}, step={}s, tick={}ms, sound={:?}",
        config.initial_minutes(),
        config.quick_add,
        config.step,
        config.tick_ms,
        config.sound_source()
    );

    if config.install().is_err() {
        anyhow::bail!("configuration installed twice");
    }

    let program = Program::<Board>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .context("cannot set up the terminal")?;
    program.run().await.context("board stopped with an error")?;

    info!("Shutdown complete");
    Ok(())
}
