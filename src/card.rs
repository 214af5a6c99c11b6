//! Card primitive: a bordered box with a header and a body.
//!
//! The header holds the title row and is separated from the content rows by
//! a rule. Cards are pure rendering; the timer widget fills one per frame.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Border and background styles of a card.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Normal card frame.
    pub frame: Style,
    /// Frame of the selected card.
    pub selected_frame: Style,
    /// Frame of a card whose countdown has completed.
    pub complete_frame: Style,
    /// Title text.
    pub title: Style,
    /// Rule between header and content.
    pub rule: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let frame = Style::new()
            .border_style(lipgloss::normal_border())
            .border_foreground(Color::from("#D1D5DB"))
            .padding(0, 1, 0, 1);
        Self {
            selected_frame: frame.clone().border_foreground(Color::from("#3B82F6")),
            complete_frame: frame
                .clone()
                .border_foreground(Color::from("#EF4444"))
                .background(Color::from("#3F1D1D")),
            frame,
            title: Style::new().bold(true).foreground(Color::from("#1F2937")),
            rule: Style::new().foreground(Color::from("#D1D5DB")),
        }
    }
}

/// One card's content for a single frame.
#[derive(Debug, Clone, Default)]
pub struct Card {
    /// Title row (already rendered, may contain styling).
    pub title: String,
    /// Content rows (already rendered).
    pub content: Vec<String>,
    /// Draw with the completion highlight.
    pub complete: bool,
    /// Draw with the selection highlight.
    pub selected: bool,
    /// Minimum inner width in cells.
    pub min_width: usize,
}

impl Card {
    /// Creates a card with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Appends a content row.
    pub fn row(mut self, row: impl Into<String>) -> Self {
        self.content.push(row.into());
        self
    }

    /// Renders with the given styles.
    pub fn view(&self, styles: &Styles) -> String {
        let inner = self
            .content
            .iter()
            .map(|r| lipgloss::width_visible(r))
            .chain(std::iter::once(lipgloss::width_visible(&self.title)))
            .max()
            .unwrap_or(0)
            .max(self.min_width);

        let mut lines = Vec::with_capacity(self.content.len() + 2);
        lines.push(pad_right(&styles.title.clone().inline(true).render(&self.title), inner));
        lines.push(styles.rule.clone().inline(true).render(&"─".repeat(inner)));
        lines.extend(self.content.iter().map(|r| pad_right(r, inner)));

        let frame = if self.complete {
            &styles.complete_frame
        } else if self.selected {
            &styles.selected_frame
        } else {
            &styles.frame
        };
        frame.render(&lines.join("\n"))
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let w = lipgloss::width_visible(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
