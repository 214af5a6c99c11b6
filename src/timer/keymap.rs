//! Key bindings for a timer card.
//!
//! Bindings that make no sense in the card's current state are disabled by
//! the widget, so overlapping keys (`x` deletes or silences, `enter` confirms
//! or finishes a rename) never fire together and the help line only lists
//! what currently works.

use crate::help;
use crate::key::{new_binding, with_help, with_keys_str, Binding};

/// Key bindings of the timer widget.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Start or pause the countdown.
    pub toggle: Binding,
    /// Take one step off the remaining time.
    pub decrease: Binding,
    /// Add one step to the remaining time.
    pub increase: Binding,
    /// Restore the configured duration.
    pub reset: Binding,
    /// Stop the alarm.
    pub silence: Binding,
    /// Ask to delete the card.
    pub delete: Binding,
    /// Confirm a pending delete.
    pub confirm: Binding,
    /// Cancel a pending delete.
    pub cancel: Binding,
    /// Start editing the label.
    pub rename: Binding,
    /// Stop editing the label.
    pub finish_rename: Binding,
}

/// The default card keys.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        toggle: new_binding(vec![
            with_keys_str(&["space", "p"]),
            with_help("space", "start/pause"),
        ]),
        decrease: new_binding(vec![with_keys_str(&["-", "_"]), with_help("-", "less time")]),
        increase: new_binding(vec![with_keys_str(&["+", "="]), with_help("+", "more time")]),
        reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
        silence: new_binding(vec![with_keys_str(&["s", "x"]), with_help("s", "silence")]),
        delete: new_binding(vec![with_keys_str(&["x", "d"]), with_help("x", "delete")]),
        confirm: new_binding(vec![with_keys_str(&["y", "enter"]), with_help("y", "delete")]),
        cancel: new_binding(vec![with_keys_str(&["n", "esc"]), with_help("n", "keep")]),
        rename: new_binding(vec![with_keys_str(&["e"]), with_help("e", "rename")]),
        finish_rename: new_binding(vec![
            with_keys_str(&["enter", "esc"]),
            with_help("enter", "done"),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl help::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.toggle,
            &self.decrease,
            &self.increase,
            &self.reset,
            &self.silence,
            &self.delete,
            &self.confirm,
            &self.cancel,
            &self.rename,
            &self.finish_rename,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.toggle, &self.reset, &self.silence],
            vec![&self.decrease, &self.increase],
            vec![&self.delete, &self.confirm, &self.cancel],
            vec![&self.rename, &self.finish_rename],
        ]
    }
}
