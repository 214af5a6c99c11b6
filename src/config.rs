//! Configuration and CLI argument handling.
//!
//! The binary parses a [`Config`] once and installs it with
//! [`Config::install`]. The board picks it up in its `init`, which takes no
//! arguments, and falls back to the defaults when nothing was installed.

use crate::sound::{self, SoundSource};
use clap::Parser;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

static INSTALLED: OnceCell<Config> = OnceCell::new();

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pomodoro-cards")]
#[command(about = "A board of pomodoro countdown cards in the terminal")]
#[command(version)]
pub struct Config {
    /// Minutes of the cards the board starts with
    #[arg(
        long = "preset",
        value_name = "MIN",
        num_args = 1..,
        default_values_t = [1u64, 5, 10, 25],
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub presets: Vec<u64>,

    /// Start with an empty board instead of the presets
    #[arg(long, conflicts_with = "presets")]
    pub empty: bool,

    /// Minutes offered by the quick-add buttons (keys 1-9)
    #[arg(
        long = "quick-add",
        value_name = "MIN",
        num_args = 1..=9,
        default_values_t = [5u64, 10, 25],
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub quick_add: Vec<u64>,

    /// Seconds added or removed by the adjust keys
    #[arg(long, value_name = "SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub step: u64,

    /// Audio file played when a countdown completes; the terminal bell is used without it
    #[arg(long, value_name = "PATH")]
    pub sound: Option<PathBuf>,

    /// Program that plays the audio file
    #[arg(long, value_name = "PROGRAM", default_value_t = sound::default_player().to_string())]
    pub player: String,

    /// Never make a sound
    #[arg(long, conflicts_with = "sound")]
    pub silent: bool,

    /// Milliseconds between ticks; every tick takes one second off
    #[arg(long, value_name = "MS", default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["pomodoro-cards"])
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Minutes of the starting cards.
    pub fn initial_minutes(&self) -> &[u64] {
        if self.empty {
            &[]
        } else {
            &self.presets
        }
    }

    /// Where the alarm sound comes from.
    pub fn sound_source(&self) -> SoundSource {
        if self.silent {
            return SoundSource::Silent;
        }
        match &self.sound {
            Some(path) => SoundSource::File {
                player: self.player.clone(),
                path: path.clone(),
            },
            None => SoundSource::Bell,
        }
    }

    /// Time between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Makes this configuration visible to [`Config::installed`]. Only the
    /// first call wins; later ones hand their config back.
    pub fn install(self) -> Result<(), Config> {
        INSTALLED.set(self)
    }

    /// The installed configuration, if any.
    pub fn installed() -> Option<&'static Config> {
        INSTALLED.get()
    }
}
