//! Countdown timer card.
//!
//! A timer card owns one countdown. It starts idle at its configured
//! duration, runs while started, and completes when it reaches zero, at which
//! point the alarm plays until it is acknowledged. Time can be adjusted in
//! any phase, the label can be edited in place, and deleting asks for
//! confirmation first.
//!
//! # Ticking
//!
//! Each time the card enters the running phase it draws a fresh tag and
//! schedules a [`TickMsg`] carrying it. A tick is only applied while the
//! card is still in that same running period, so pausing, completing,
//! resetting or removing the card cancels the pending tick without any
//! bookkeeping: the stale tick simply fails the check.
//!
//! # Alarm
//!
//! Playback must be unlocked by the user before the alarm can sound: the
//! first start arms the alarm and prepares the sound. When playback fails the
//! error is logged and the alarm is disarmed, so the next start tries again.
//!
//! # Usage
//!
//! ```rust
//! use pomodoro_cards::sound::Silent;
//! use pomodoro_cards::timer::{new, TimerId};
//!
//! let mut timer = new(TimerId::next(), 3, Box::new(Silent::default()));
//! let _tick = timer.toggle();
//! assert!(timer.running());
//!
//! timer.tick();
//! timer.tick();
//! timer.tick();
//! assert!(timer.complete());
//! assert_eq!(timer.remaining(), 0);
//! ```

pub mod keymap;
pub mod model;
pub mod view;

#[cfg(test)]
mod tests;

pub use keymap::{default_key_map, KeyMap};
pub use model::{default_label, new, Countdown, Model, RemoveMsg, RingMsg, TickMsg, TimerId};
pub use view::format_clock;
