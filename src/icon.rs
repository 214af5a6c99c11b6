//! Icon glyphs used on card buttons.
//!
//! Each icon is a single-cell glyph so buttons keep a stable width.

/// The icons a timer card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Add time.
    Plus,
    /// Remove time.
    Minus,
    /// Start the countdown.
    Play,
    /// Pause the countdown.
    Pause,
    /// Delete the card.
    X,
    /// Silence the alarm.
    Volume,
}

impl Icon {
    /// Returns the glyph for this icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Plus => "+",
            Icon::Minus => "−",
            Icon::Play => "▶",
            Icon::Pause => "⏸",
            Icon::X => "✕",
            Icon::Volume => "♪",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}
