//! Alarm playback handles.
//!
//! Every timer widget owns exactly one [`Sound`]. The widget calls
//! [`Sound::load`] when the user first starts it, [`Sound::play`] when the
//! countdown completes, [`Sound::ring`] once per interval while the alarm is
//! sounding, and [`Sound::stop`] when the alarm is acknowledged, the timer is
//! reset, or the card is removed.
//!
//! Playback may be refused by the host (no player installed, asset missing).
//! That is reported as a [`SoundError`] and handled by the widget; it never
//! aborts the program.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

/// Why playback could not start.
#[derive(Debug, Error)]
pub enum SoundError {
    /// The configured audio file does not exist.
    #[error("sound asset {0} not found")]
    AssetMissing(PathBuf),
    /// The external player could not be started.
    #[error("failed to start player `{program}`: {source}")]
    Spawn {
        /// Player program name.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// The host refused playback, e.g. the player exited with an error.
    #[error("playback rejected: {0}")]
    Rejected(String),
    /// Writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A playback handle owned by one timer widget.
pub trait Sound: Send {
    /// Prepares the resource. Called when playback is unlocked by a user
    /// action, before any `play`.
    fn load(&mut self) -> Result<(), SoundError>;

    /// Starts looping playback from the beginning.
    fn play(&mut self) -> Result<(), SoundError>;

    /// Called once per interval while playing. Players that loop on their own
    /// leave this empty.
    fn ring(&mut self) {}

    /// Stops playback and rewinds.
    fn stop(&mut self);

    /// Reports whether playback is active.
    fn is_playing(&self) -> bool;
}

/// Where a widget's alarm comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SoundSource {
    /// No sound at all.
    Silent,
    /// The terminal bell.
    #[default]
    Bell,
    /// An audio file played by an external program, e.g. `paplay alarm.mp3`.
    File {
        /// Player program.
        player: String,
        /// Audio file handed to the player.
        path: PathBuf,
    },
}

impl SoundSource {
    /// Opens a fresh handle. Each widget gets its own.
    pub fn open(&self) -> Box<dyn Sound> {
        match self {
            SoundSource::Silent => Box::new(Silent::default()),
            SoundSource::Bell => Box::new(Bell::default()),
            SoundSource::File { player, path } => Box::new(FilePlayer::new(player, path)),
        }
    }
}

/// Player program used for audio files when none is configured.
pub fn default_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "paplay"
    }
}

/// Sound that never makes a noise but tracks the playing flag.
#[derive(Debug, Default)]
pub struct Silent {
    playing: bool,
}

impl Sound for Silent {
    fn load(&mut self) -> Result<(), SoundError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), SoundError> {
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// The terminal bell, rung once per interval while playing.
#[derive(Debug, Default)]
pub struct Bell {
    playing: bool,
}

impl Bell {
    fn beep() -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl Sound for Bell {
    fn load(&mut self) -> Result<(), SoundError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), SoundError> {
        Self::beep()?;
        self.playing = true;
        Ok(())
    }

    fn ring(&mut self) {
        if self.playing {
            if let Err(err) = Self::beep() {
                debug!(error = %err, "bell ring failed");
            }
        }
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// An audio file played through an external player process.
///
/// The file is checked on `load` and again on `play`. While playing, `ring`
/// restarts the player whenever the previous run has finished, which loops
/// the clip. Dropping the handle stops the player.
#[derive(Debug)]
pub struct FilePlayer {
    player: String,
    path: PathBuf,
    child: Option<Child>,
    playing: bool,
}

impl FilePlayer {
    /// Creates a handle for `path` played by `player`.
    pub fn new(player: &str, path: &Path) -> Self {
        Self {
            player: player.to_string(),
            path: path.to_path_buf(),
            child: None,
            playing: false,
        }
    }

    fn check_asset(&self) -> Result<(), SoundError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(SoundError::AssetMissing(self.path.clone()))
        }
    }

    fn spawn(&mut self) -> Result<(), SoundError> {
        let child = Command::new(&self.player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SoundError::Spawn {
                program: self.player.clone(),
                source,
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                debug!(error = %err, "player already exited");
            }
            let _ = child.wait();
        }
    }
}

impl Sound for FilePlayer {
    fn load(&mut self) -> Result<(), SoundError> {
        self.check_asset()
    }

    fn play(&mut self) -> Result<(), SoundError> {
        self.check_asset()?;
        self.kill();
        self.spawn()?;
        self.playing = true;
        Ok(())
    }

    fn ring(&mut self) {
        if !self.playing {
            return;
        }
        let status = match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => return,
            Some(Ok(Some(status))) => Some(status),
            Some(Err(err)) => {
                debug!(error = %err, "player status unknown");
                None
            }
            None => None,
        };
        self.child = None;

        let restarted = match status {
            Some(status) if !status.success() => Err(SoundError::Rejected(format!(
                "`{}` exited with {}",
                self.player, status
            ))),
            _ => self.spawn(),
        };
        if let Err(err) = restarted {
            warn!(error = %err, "alarm loop stopped");
            self.playing = false;
        }
    }

    fn stop(&mut self) {
        self.kill();
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Drop for FilePlayer {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_tracks_playing() {
        let mut s = Silent::default();
        assert!(s.load().is_ok());
        assert!(s.play().is_ok());
        assert!(s.is_playing());
        s.stop();
        assert!(!s.is_playing());
    }

    #[test]
    fn test_missing_asset_is_rejected() {
        let mut p = FilePlayer::new("true", Path::new("/nonexistent/alarm.mp3"));
        assert!(matches!(p.load(), Err(SoundError::AssetMissing(_))));
        assert!(matches!(p.play(), Err(SoundError::AssetMissing(_))));
        assert!(!p.is_playing());
    }

    #[test]
    fn test_missing_player_is_a_spawn_error() {
        let asset = std::env::temp_dir().join("pomodoro-cards-test-asset.wav");
        std::fs::write(&asset, b"RIFF").unwrap();

        let mut p = FilePlayer::new("pomodoro-cards-no-such-player", &asset);
        assert!(p.load().is_ok());
        let err = p.play().unwrap_err();
        assert!(matches!(err, SoundError::Spawn { .. }));
        assert!(err.to_string().contains("pomodoro-cards-no-such-player"));
        assert!(!p.is_playing());

        let _ = std::fs::remove_file(&asset);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_player_stops_the_loop() {
        let asset = std::env::temp_dir().join("pomodoro-cards-test-failing.wav");
        std::fs::write(&asset, b"RIFF").unwrap();

        let mut p = FilePlayer::new("false", &asset);
        p.play().unwrap();
        assert!(p.is_playing());
        p.child.as_mut().unwrap().wait().unwrap();

        p.ring();
        assert!(!p.is_playing());
        assert!(p.child.is_none());

        let _ = std::fs::remove_file(&asset);
    }

    #[cfg(unix)]
    #[test]
    fn test_finished_player_is_restarted() {
        let asset = std::env::temp_dir().join("pomodoro-cards-test-looping.wav");
        std::fs::write(&asset, b"RIFF").unwrap();

        let mut p = FilePlayer::new("true", &asset);
        p.play().unwrap();
        p.child.as_mut().unwrap().wait().unwrap();

        p.ring();
        assert!(p.is_playing());
        assert!(p.child.is_some());

        p.stop();
        let _ = std::fs::remove_file(&asset);
    }

    #[test]
    fn test_source_opens_independent_handles() {
        let source = SoundSource::Silent;
        let mut a = source.open();
        let b = source.open();
        a.play().unwrap();
        assert!(a.is_playing());
        assert!(!b.is_playing());
    }
}
