#![warn(missing_docs)]

//! # pomodoro-cards
//!
//! A board of pomodoro countdown cards for the terminal, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) and styled with
//! lipgloss.
//!
//! ## Overview
//!
//! Every card is an independent countdown: start and pause it, add or take
//! off time, rename it, reset it, or delete it after a confirmation. When a
//! running card reaches zero it turns red and its alarm rings until it is
//! acknowledged. The board holds any number of cards, starting from a set
//! of presets, and adds more from quick-add keys.
//!
//! Components follow the Elm Architecture with `update()` and `view()`
//! methods; the [`board::Board`] is the top-level `bubbletea_rs::Model`.
//!
//! ## Components
//!
//! - **Primitives**: [`button`], [`card`], [`field`], [`icon`]
//! - **Widgets**: [`timer`], [`board`]
//! - **Support**: [`key`], [`help`], [`sound`], [`config`]
//!
//! ## Running a board
//!
//! ```rust,no_run
//! use bubbletea_rs::Program;
//! use pomodoro_cards::board::Board;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let program = Program::<Board>::builder()
//!     .alt_screen(true)
//!     .signal_handler(true)
//!     .build()?;
//! program.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Focus Management
//!
//! Focusable components implement [`Component`]. The board focuses the
//! selected card; a focused card draws a highlighted border and receives the
//! keys the board does not bind itself.
//!
//! ```rust
//! use pomodoro_cards::prelude::*;
//!
//! let mut timer = timer_new(TimerId::next(), 60, Box::new(Silent::default()));
//! assert!(!timer.focused());
//! timer.focus();
//! assert!(timer.focused());
//! timer.blur();
//! assert!(!timer.focused());
//! ```

pub mod board;
pub mod button;
pub mod card;
pub mod config;
pub mod field;
pub mod help;
pub mod icon;
pub mod key;
pub mod sound;
pub mod timer;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// - `focus()` marks the component as able to receive keyboard input and may
///   return a command to run on focus
/// - `blur()` clears the focused state and ends any focus-only mode, such as
///   an in-place edit
/// - `focused()` reports the current state
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use board::{Board, TimerDescriptor};
pub use button::{Button, Size as ButtonSize, Variant as ButtonVariant};
pub use card::Card;
pub use config::Config;
pub use field::Model as Field;
pub use help::Model as HelpModel;
pub use icon::Icon;
pub use key::{
    matches, new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding,
    Help as KeyHelp, KeyPress,
};
pub use sound::{Sound, SoundError, SoundSource};
pub use timer::{
    new as timer_new, Countdown, Model as Timer, RemoveMsg as TimerRemoveMsg,
    RingMsg as TimerRingMsg, TickMsg as TimerTickMsg, TimerId,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use pomodoro_cards::prelude::*;
///
/// let board = Board::new(&[25]);
/// assert_eq!(board.len(), 1);
/// ```
pub mod prelude {
    pub use crate::board::{Board, TimerDescriptor};
    pub use crate::button::{Button, Size as ButtonSize, Variant as ButtonVariant};
    pub use crate::card::Card;
    pub use crate::help::KeyMap as HelpKeyMap;
    pub use crate::icon::Icon;
    pub use crate::key::{Binding, KeyPress};
    pub use crate::sound::{Bell, Silent, Sound, SoundError, SoundSource};
    pub use crate::timer::{
        new as timer_new, Countdown, Model as Timer, RemoveMsg as TimerRemoveMsg, TimerId,
    };
    pub use crate::Component;
}
