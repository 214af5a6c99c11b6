//! Key bindings for the board.

use crate::help;
use crate::key::{new_binding, with_help, with_keys_str, Binding};
use crossterm::event::KeyCode;

/// Quick-add keys, in order.
const QUICK_KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// A quick-add entry: the binding and the minutes it adds.
#[derive(Debug, Clone)]
pub struct QuickAdd {
    /// Minutes of the new card.
    pub minutes: u64,
    /// Keys that add it.
    pub binding: Binding,
}

/// Key bindings of the board. Keys not bound here go to the selected card.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Select the previous card.
    pub prev: Binding,
    /// Select the next card.
    pub next: Binding,
    /// Add a card of a fixed length.
    pub quick_add: Vec<QuickAdd>,
    /// Toggle the full help.
    pub show_full_help: Binding,
    /// Quit.
    pub quit: Binding,
    /// Quit, even while a card captures the keyboard.
    pub force_quit: Binding,
}

impl KeyMap {
    /// Creates the board keys with one quick-add binding per entry of
    /// `minutes`, bound to `1`, `2` and so on. Only the first nine are used.
    pub fn new(minutes: &[u64]) -> Self {
        let quick_add = minutes
            .iter()
            .zip(QUICK_KEYS)
            .map(|(&minutes, key)| QuickAdd {
                minutes,
                binding: Binding::new(vec![KeyCode::Char(key)])
                    .with_help(key.to_string(), format!("+{} min", minutes)),
            })
            .collect();

        Self {
            prev: new_binding(vec![with_keys_str(&["up", "k"]), with_help("↑/k", "prev")]),
            next: new_binding(vec![with_keys_str(&["down", "j"]), with_help("↓/j", "next")]),
            quick_add,
            show_full_help: new_binding(vec![with_keys_str(&["?"]), with_help("?", "more")]),
            quit: new_binding(vec![with_keys_str(&["q"]), with_help("q", "quit")]),
            force_quit: new_binding(vec![
                with_keys_str(&["ctrl+c"]),
                with_help("ctrl+c", "force quit"),
            ]),
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        KeyMap::new(&[5, 10, 25])
    }
}

impl help::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        let mut keys = vec![&self.prev, &self.next];
        keys.extend(self.quick_add.iter().map(|q| &q.binding));
        keys.push(&self.show_full_help);
        keys.push(&self.quit);
        keys
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.prev, &self.next],
            self.quick_add.iter().map(|q| &q.binding).collect(),
            vec![&self.show_full_help, &self.quit, &self.force_quit],
        ]
    }
}
