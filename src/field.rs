//! Single-line text field.
//!
//! Used for editing a card's label in place. The value is stored as a vector
//! of chars so cursor movement and deletion never split a code point. The
//! field only reacts to keys while focused.

use crate::key::{new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthChar;

/// Editing key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move cursor one character right.
    pub character_forward: Binding,
    /// Move cursor one character left.
    pub character_backward: Binding,
    /// Delete one character backward.
    pub delete_character_backward: Binding,
    /// Delete one character forward.
    pub delete_character_forward: Binding,
    /// Delete from start of line to cursor.
    pub delete_before_cursor: Binding,
    /// Move to start of line.
    pub line_start: Binding,
    /// Move to end of line.
    pub line_end: Binding,
}

/// Default editing keys, readline flavoured.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
    }
}

/// Text field state.
#[derive(Debug, Clone)]
pub struct Model {
    value: Vec<char>,
    pos: usize,
    focus: bool,
    /// Display width in cells; 0 means unlimited. Longer values are clipped
    /// around the cursor.
    pub width: usize,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    /// Style of the text.
    pub text_style: Style,
    /// Style of the cell under the cursor.
    pub cursor_style: Style,
    /// Key bindings.
    pub key_map: KeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            focus: false,
            width: 0,
            char_limit: 0,
            text_style: Style::new(),
            cursor_style: Style::new(),
            key_map: default_key_map(),
        }
    }
}

/// Creates an empty, unfocused field.
pub fn new() -> Model {
    Model::default()
}

impl Model {
    /// Returns the current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the text and moves the cursor to its end.
    pub fn set_value(&mut self, s: &str) {
        let mut chars: Vec<char> = s.chars().filter(|c| !c.is_control()).collect();
        if self.char_limit > 0 && chars.len() > self.char_limit {
            chars.truncate(self.char_limit);
        }
        self.value = chars;
        self.pos = self.value.len();
    }

    /// Cursor position in chars.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    fn insert(&mut self, c: char) {
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.pos, c);
        self.pos += 1;
    }

    /// Applies one key press. Ignored while blurred.
    pub fn update(&mut self, msg: &KeyMsg) {
        if !self.focus {
            return;
        }

        if self.key_map.character_forward.matches(msg) {
            self.set_cursor(self.pos + 1);
        } else if self.key_map.character_backward.matches(msg) {
            self.pos = self.pos.saturating_sub(1);
        } else if self.key_map.delete_character_backward.matches(msg) {
            if self.pos > 0 {
                self.pos -= 1;
                self.value.remove(self.pos);
            }
        } else if self.key_map.delete_character_forward.matches(msg) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if self.key_map.delete_before_cursor.matches(msg) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else if self.key_map.line_start.matches(msg) {
            self.pos = 0;
        } else if self.key_map.line_end.matches(msg) {
            self.pos = self.value.len();
        } else if let KeyCode::Char(c) = msg.key {
            let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
            if !c.is_control() && !msg.modifiers.intersects(chord) {
                self.insert(c);
            }
        }
    }

    /// Renders the value, with the cursor shown while focused.
    pub fn view(&self) -> String {
        let (start, end) = self.visible_range();
        let mut out = String::new();

        let before: String = self.value[start..self.pos.max(start)].iter().collect();
        out.push_str(&self.text_style.clone().inline(true).render(&before));

        if self.focus {
            let under = self.value.get(self.pos).map_or(' ', |c| *c).to_string();
            out.push_str(
                &self
                    .cursor_style
                    .clone()
                    .inline(true)
                    .reverse(true)
                    .render(&under),
            );
            if self.pos < end {
                let after: String = self.value[self.pos + 1..end].iter().collect();
                out.push_str(&self.text_style.clone().inline(true).render(&after));
            }
        } else if self.pos < end {
            let after: String = self.value[self.pos..end].iter().collect();
            out.push_str(&self.text_style.clone().inline(true).render(&after));
        }
        out
    }

    // Window of chars that fits `width` and keeps the cursor cell visible.
    fn visible_range(&self) -> (usize, usize) {
        let len = self.value.len();
        if self.width == 0 {
            return (0, len);
        }

        let cell = |c: &char| UnicodeWidthChar::width(*c).unwrap_or(0);
        // Reserve one cell for the cursor when it sits past the last char.
        let budget = if self.focus && self.pos == len {
            self.width.saturating_sub(1)
        } else {
            self.width
        };

        let mut start = 0;
        let mut used: usize = self.value[..self.pos.min(len)].iter().map(cell).sum();
        while used > budget && start < self.pos {
            used -= cell(&self.value[start]);
            start += 1;
        }

        let mut end = self.pos;
        while end < len && used + cell(&self.value[end]) <= self.width {
            used += cell(&self.value[end]);
            end += 1;
        }
        (start, end)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn typed(s: &str) -> Model {
        let mut f = new();
        f.focus();
        for c in s.chars() {
            f.update(&key(KeyCode::Char(c)));
        }
        f
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut f = typed("focus");
        assert_eq!(f.value(), "focus");
        f.update(&key(KeyCode::Backspace));
        assert_eq!(f.value(), "focu");
        assert_eq!(f.position(), 4);
    }

    #[test]
    fn test_insert_mid_value() {
        let mut f = typed("ac");
        f.update(&key(KeyCode::Left));
        f.update(&key(KeyCode::Char('b')));
        assert_eq!(f.value(), "abc");
        f.update(&key(KeyCode::Home));
        f.update(&key(KeyCode::Delete));
        assert_eq!(f.value(), "bc");
    }

    #[test]
    fn test_blurred_field_ignores_keys() {
        let mut f = new();
        f.set_value("label");
        f.update(&key(KeyCode::Char('x')));
        assert_eq!(f.value(), "label");
    }

    #[test]
    fn test_ctrl_u_clears_before_cursor() {
        let mut f = typed("25 min timer");
        f.update(&KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert_eq!(f.value(), "");
    }

    #[test]
    fn test_char_limit() {
        let mut f = new();
        f.char_limit = 3;
        f.set_value("abcdef");
        assert_eq!(f.value(), "abc");
        f.focus();
        f.update(&key(KeyCode::Char('z')));
        assert_eq!(f.value(), "abc");
    }

    #[test]
    fn test_view_clips_to_width_around_cursor() {
        let mut f = typed("abcdefghij");
        f.width = 5;
        let shown = lipgloss::strip_ansi(&f.view());
        // four chars plus the cursor cell
        assert_eq!(shown, "ghij ");

        f.blur();
        f.set_cursor(0);
        assert_eq!(lipgloss::strip_ansi(&f.view()), "abcde");
    }
}
