//! Button primitive.
//!
//! A button is a styled label plus the key binding that activates it. It holds
//! no state of its own: the owning component matches key messages against its
//! key map and runs the action itself. The button only shows the key, and
//! hides it while the binding is disabled.
//!
//! ```rust
//! use pomodoro_cards::button::{Button, Size, Variant};
//! use pomodoro_cards::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let reset = Button::new("Reset")
//!     .with_variant(Variant::Outline)
//!     .with_size(Size::Sm)
//!     .with_binding(Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"));
//! assert!(reset.view().contains("Reset"));
//! ```

use crate::key::Binding;
use lipgloss_extras::prelude::*;

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Filled primary button.
    #[default]
    Default,
    /// Bracketed, unfilled button.
    Outline,
    /// Filled red button for irreversible actions.
    Destructive,
}

/// Horizontal padding of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    /// One cell of padding on each side.
    Sm,
    /// Two cells of padding on each side.
    #[default]
    Md,
}

/// A labelled, key-activated button.
#[derive(Debug, Clone)]
pub struct Button {
    /// Text or glyph rendered inside the button.
    pub content: String,
    /// Visual weight.
    pub variant: Variant,
    /// Padding.
    pub size: Size,
    /// Keys that activate the button.
    pub binding: Binding,
    /// Render the activating key after the content.
    pub show_key: bool,
}

impl Button {
    /// Creates a default, medium button with no binding.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            variant: Variant::Default,
            size: Size::Md,
            binding: Binding::default(),
            show_key: true,
        }
    }

    /// Sets the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the activating binding.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Renders the button.
    pub fn view(&self) -> String {
        let pad = match self.size {
            Size::Sm => 1,
            Size::Md => 2,
        };
        let key = &self.binding.help().key;
        let label = if self.show_key && self.binding.enabled() && !key.is_empty() {
            format!("{} {}", self.content, key_hint().render(key))
        } else {
            self.content.clone()
        };

        match self.variant {
            Variant::Default => Style::new()
                .foreground(Color::from("#ffffff"))
                .background(Color::from("#3B82F6"))
                .padding(0, pad, 0, pad)
                .inline(true)
                .render(&label),
            Variant::Outline => {
                let inner = Style::new()
                    .foreground(Color::from("#3B82F6"))
                    .padding(0, pad - 1, 0, pad - 1)
                    .inline(true)
                    .render(&label);
                format!("[{}]", inner)
            }
            Variant::Destructive => Style::new()
                .foreground(Color::from("#ffffff"))
                .background(Color::from("#EF4444"))
                .bold(true)
                .padding(0, pad, 0, pad)
                .inline(true)
                .render(&label),
        }
    }
}

fn key_hint() -> Style {
    Style::new().faint(true).inline(true)
}
