//! The board: an ordered collection of timer cards.
//!
//! [`Board`] is the top-level `bubbletea_rs::Model` of the application. It
//! owns one [`TimerDescriptor`] per card together with the card's widget,
//! adds cards from presets and quick-add keys, and removes a card when the
//! card asks for it with a [`RemoveMsg`](crate::timer::RemoveMsg).
//!
//! ```rust
//! use pomodoro_cards::board::Board;
//!
//! let mut board = Board::new(&[1, 5, 10, 25]);
//! board.add(5);
//!
//! let descriptors = board.descriptors();
//! assert_eq!(descriptors.len(), 5);
//! assert_eq!(descriptors[4].initial_seconds, 300);
//!
//! board.remove(descriptors[0].id);
//! assert_eq!(board.len(), 4);
//! ```

pub mod keymap;
pub mod model;
pub mod view;


pub use keymap::{KeyMap, QuickAdd};
pub use model::{Board, TimerDescriptor};
pub use view::TITLE;
