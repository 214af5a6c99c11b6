//! Timer widget state and transitions.

use super::keymap::{default_key_map, KeyMap};
use crate::card;
use crate::field::{self, Model as Field};
use crate::sound::Sound;
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

// Internal ID management for timer instances
static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of a timer.
///
/// Messages carry the id of the widget that scheduled them, so any number of
/// widgets can share one program without reacting to each other's ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns a fresh id, never handed out before in this process.
    pub fn next() -> Self {
        TimerId(LAST_ID.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One second elapsed for a running timer.
///
/// A tick is honored only while its widget is still in the running period
/// that scheduled it; ticks from an earlier period carry a stale tag and are
/// dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Timer that scheduled the tick.
    pub id: TimerId,
    pub(crate) tag: u64,
}

/// One alarm interval elapsed while the alarm is sounding.
#[derive(Debug, Clone)]
pub struct RingMsg {
    /// Timer whose alarm is sounding.
    pub id: TimerId,
    pub(crate) tag: u64,
}

/// A timer asks its container to remove it.
///
/// This is the only message a widget sends upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveMsg {
    /// Timer to remove.
    pub id: TimerId,
}

/// Countdown phase. Remaining time lives inside the phase, so a completed
/// timer cannot hold time and a running timer always owns its tick tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Paused or never started.
    Idle {
        /// Seconds left.
        remaining: u64,
    },
    /// Counting down once per interval.
    Running {
        /// Seconds left.
        remaining: u64,
        /// Tag of the current running period.
        tag: u64,
    },
    /// Reached zero while running. The alarm may be sounding.
    Complete,
}

impl Countdown {
    /// Seconds left in this phase.
    pub fn remaining(&self) -> u64 {
        match *self {
            Countdown::Idle { remaining } | Countdown::Running { remaining, .. } => remaining,
            Countdown::Complete => 0,
        }
    }
}

/// A single countdown card.
///
/// The widget owns its countdown, label, alarm handle and delete
/// confirmation. It schedules its own ticks and only talks to its container
/// through [`RemoveMsg`].
pub struct Model {
    pub(super) id: TimerId,
    pub(super) initial: u64,
    pub(super) countdown: Countdown,
    pub(super) label: Field,
    pub(super) sound: Box<dyn Sound>,
    pub(super) audio_armed: bool,
    // Tag of the sounding alarm's ring cycle.
    pub(super) alarm: Option<u64>,
    pub(super) delete_confirm: bool,
    pub(super) last_tag: u64,
    pub(super) selected: bool,
    /// Time between ticks. Each accepted tick takes one second off.
    pub interval: Duration,
    /// Seconds added or removed by the adjust keys.
    pub step: u64,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Card styles.
    pub styles: card::Styles,
}

/// Creates an idle timer of `initial_seconds` with a one second interval.
pub fn new(id: TimerId, initial_seconds: u64, sound: Box<dyn Sound>) -> Model {
    let mut label = field::new();
    label.width = 28;
    label.set_value(&default_label(initial_seconds));

    let mut model = Model {
        id,
        initial: initial_seconds,
        countdown: Countdown::Idle {
            remaining: initial_seconds,
        },
        label,
        sound,
        audio_armed: false,
        alarm: None,
        delete_confirm: false,
        last_tag: 0,
        selected: false,
        interval: Duration::from_secs(1),
        step: 30,
        key_map: default_key_map(),
        styles: card::Styles::default(),
    };
    model.sync_bindings();
    model
}

/// Label a fresh timer starts with, e.g. `"25 min timer"` or `"1.5 min timer"`.
pub fn default_label(seconds: u64) -> String {
    let minutes = if seconds % 60 == 0 {
        (seconds / 60).to_string()
    } else {
        let s = format!("{:.2}", seconds as f64 / 60.0);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    format!("{} min timer", minutes)
}

impl Model {
    /// Sets the tick interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the adjust step in seconds.
    pub fn with_step(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Returns the timer's id.
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Configured duration in seconds.
    pub fn initial(&self) -> u64 {
        self.initial
    }

    /// Current phase.
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Seconds left.
    pub fn remaining(&self) -> u64 {
        self.countdown.remaining()
    }

    /// Whether the countdown is running.
    pub fn running(&self) -> bool {
        matches!(self.countdown, Countdown::Running { .. })
    }

    /// Whether the countdown completed and has not been acknowledged.
    pub fn complete(&self) -> bool {
        matches!(self.countdown, Countdown::Complete)
    }

    /// Whether playback has been unlocked by a user action.
    pub fn audio_armed(&self) -> bool {
        self.audio_armed
    }

    /// Whether the alarm is sounding.
    pub fn alarm_sounding(&self) -> bool {
        self.alarm.is_some()
    }

    /// Whether a delete is waiting for confirmation.
    pub fn delete_confirm_pending(&self) -> bool {
        self.delete_confirm
    }

    /// Current label text.
    pub fn label(&self) -> String {
        self.label.value()
    }

    /// Whether the label is being edited.
    pub fn renaming(&self) -> bool {
        self.label.focused()
    }

    /// Starts or pauses the countdown.
    ///
    /// The first call unlocks playback and prepares the alarm. Starting a
    /// timer with nothing left runs it for one second, so it completes and
    /// sounds again instead of sitting at zero.
    pub fn toggle(&mut self) -> Option<Cmd> {
        if !self.audio_armed {
            self.audio_armed = true;
            if let Err(err) = self.sound.load() {
                warn!(timer = %self.id, error = %err, "alarm could not be prepared");
            }
        }

        let cmd = if self.remaining() == 0 {
            self.silence();
            Some(self.run(1))
        } else if let Countdown::Running { remaining, .. } = self.countdown {
            debug!(timer = %self.id, remaining, "paused");
            self.countdown = Countdown::Idle { remaining };
            None
        } else {
            Some(self.run(self.remaining()))
        };
        self.sync_bindings();
        cmd
    }

    /// Applies one tick: one second off while running, completing at zero.
    /// Does nothing unless running.
    pub fn tick(&mut self) -> Option<Cmd> {
        let Countdown::Running { remaining, tag } = self.countdown else {
            return None;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            return self.finish();
        }
        self.countdown = Countdown::Running { remaining, tag };
        Some(self.tick_cmd(tag))
    }

    /// Adds `delta` seconds, never going below zero.
    ///
    /// Running and idle timers keep their phase, except that a running timer
    /// taken down to zero completes right away. Adding time to a completed
    /// timer silences it and leaves it idle with the added time.
    pub fn adjust(&mut self, delta: i64) -> Option<Cmd> {
        if self.complete() {
            if delta <= 0 {
                return None;
            }
            self.acknowledge();
        }

        let remaining = self.remaining();
        let remaining = if delta < 0 {
            remaining.saturating_sub(delta.unsigned_abs())
        } else {
            remaining.saturating_add(delta.unsigned_abs())
        };
        self.countdown = match self.countdown {
            Countdown::Running { .. } if remaining == 0 => return self.finish(),
            Countdown::Running { tag, .. } => Countdown::Running { remaining, tag },
            _ => Countdown::Idle { remaining },
        };
        None
    }

    /// Stops the alarm. A completed timer becomes idle at zero.
    pub fn acknowledge(&mut self) {
        self.silence();
        if self.complete() {
            info!(timer = %self.id, "alarm acknowledged");
            self.countdown = Countdown::Idle { remaining: 0 };
        }
        self.sync_bindings();
    }

    /// Stops the alarm and restores the configured duration, paused.
    pub fn reset(&mut self) {
        self.silence();
        self.countdown = Countdown::Idle {
            remaining: self.initial,
        };
        debug!(timer = %self.id, remaining = self.initial, "reset");
        self.sync_bindings();
    }

    /// Replaces the label.
    pub fn rename(&mut self, label: &str) {
        self.label.set_value(label);
    }

    /// Starts editing the label in place.
    pub fn start_rename(&mut self) {
        self.label.focus();
        self.sync_bindings();
    }

    /// Stops editing the label.
    pub fn finish_rename(&mut self) {
        self.label.blur();
        debug!(timer = %self.id, label = %self.label.value(), "renamed");
        self.sync_bindings();
    }

    /// Shows or hides the delete confirmation.
    pub fn request_delete(&mut self) {
        self.delete_confirm = !self.delete_confirm;
        self.sync_bindings();
    }

    /// Hides the delete confirmation.
    pub fn cancel_delete(&mut self) {
        self.delete_confirm = false;
        self.sync_bindings();
    }

    /// Releases the alarm and the running tick, then asks the container to
    /// remove this timer.
    pub fn confirm_delete(&mut self) -> Option<Cmd> {
        self.delete_confirm = false;
        self.silence();
        if let Countdown::Running { remaining, .. } = self.countdown {
            self.countdown = Countdown::Idle { remaining };
        }
        self.sync_bindings();
        info!(timer = %self.id, "removal requested");

        let id = self.id;
        Some(bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(RemoveMsg { id }) as Msg
        }))
    }

    /// Processes tick, ring and key messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if tick.id != self.id {
                return None;
            }
            return match self.countdown {
                Countdown::Running { tag, .. } if tag == tick.tag => self.tick(),
                _ => None,
            };
        }

        if let Some(ring) = msg.downcast_ref::<RingMsg>() {
            if ring.id != self.id || self.alarm != Some(ring.tag) {
                return None;
            }
            self.sound.ring();
            if !self.sound.is_playing() {
                self.alarm = None;
                return None;
            }
            return Some(self.ring_cmd(ring.tag));
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }

        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.key_map.finish_rename.matches(key) {
            self.finish_rename();
        } else if self.label.focused() {
            self.label.update(key);
        } else if self.key_map.confirm.matches(key) {
            return self.confirm_delete();
        } else if self.key_map.cancel.matches(key) {
            self.cancel_delete();
        } else if self.key_map.toggle.matches(key) {
            return self.toggle();
        } else if self.key_map.decrease.matches(key) {
            return self.adjust(-(self.step as i64));
        } else if self.key_map.increase.matches(key) {
            return self.adjust(self.step as i64);
        } else if self.key_map.reset.matches(key) {
            self.reset();
        } else if self.key_map.silence.matches(key) {
            self.acknowledge();
        } else if self.key_map.delete.matches(key) {
            self.request_delete();
        } else if self.key_map.rename.matches(key) {
            self.start_rename();
        }
        None
    }

    fn run(&mut self, remaining: u64) -> Cmd {
        let tag = self.next_tag();
        self.countdown = Countdown::Running { remaining, tag };
        debug!(timer = %self.id, remaining, "running");
        self.tick_cmd(tag)
    }

    fn finish(&mut self) -> Option<Cmd> {
        self.countdown = Countdown::Complete;
        self.sync_bindings();
        info!(timer = %self.id, label = %self.label.value(), "countdown complete");

        if !self.audio_armed {
            debug!(timer = %self.id, "alarm not armed, staying silent");
            return None;
        }
        match self.sound.play() {
            Ok(()) => {
                let tag = self.next_tag();
                self.alarm = Some(tag);
                Some(self.ring_cmd(tag))
            }
            Err(err) => {
                error!(timer = %self.id, error = %err, "alarm playback failed");
                self.audio_armed = false;
                None
            }
        }
    }

    fn silence(&mut self) {
        self.alarm = None;
        self.sound.stop();
    }

    fn next_tag(&mut self) -> u64 {
        self.last_tag += 1;
        self.last_tag
    }

    fn tick_cmd(&self, tag: u64) -> Cmd {
        let id = self.id;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn ring_cmd(&self, tag: u64) -> Cmd {
        let id = self.id;
        bubbletea_tick(self.interval, move |_| Box::new(RingMsg { id, tag }) as Msg)
    }

    // Enables exactly the bindings that apply to the current state.
    fn sync_bindings(&mut self) {
        let renaming = self.label.focused();
        let confirming = self.delete_confirm && !renaming;
        let normal = !renaming && !confirming;
        let complete = self.complete();

        let km = &mut self.key_map;
        km.toggle.set_enabled(normal);
        km.decrease.set_enabled(normal);
        km.increase.set_enabled(normal);
        km.reset.set_enabled(normal);
        km.rename.set_enabled(normal);
        km.delete.set_enabled(normal && !complete);
        km.silence.set_enabled(normal && complete);
        km.confirm.set_enabled(confirming);
        km.cancel.set_enabled(confirming);
        km.finish_rename.set_enabled(renaming);
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.selected = true;
        None
    }

    fn blur(&mut self) {
        self.selected = false;
        if self.label.focused() {
            self.finish_rename();
        }
    }

    fn focused(&self) -> bool {
        self.selected
    }
}
