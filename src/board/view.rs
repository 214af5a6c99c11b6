//! Rendering of the board.

use super::model::Board;
use crate::button::{Button, Size, Variant};
use crate::icon::Icon;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Heading shown above the cards.
pub const TITLE: &str = "Pomodoro Timer App🍅";

// Cards per row when the terminal width is unknown.
const DEFAULT_COLUMNS: usize = 3;
const GAP: &str = " ";

impl Board {
    /// Renders the heading, quick-add buttons, the cards and the help.
    pub(super) fn render(&self) -> String {
        let mut sections = vec![
            Style::new()
                .bold(true)
                .foreground(Color::from("#EF4444"))
                .inline(true)
                .render(TITLE),
            self.quick_add_row(),
            String::new(),
        ];

        if self.timers.is_empty() {
            let hint = match self.key_map.quick_add.first() {
                Some(q) => format!("No timers. Press {} to add one.", q.binding.help().key),
                None => "No timers.".to_string(),
            };
            sections.push(Style::new().faint(true).inline(true).render(&hint));
        } else {
            let cards: Vec<String> = self.timers.iter().map(|t| t.view()).collect();
            sections.extend(self.layout(&cards));
        }

        sections.push(String::new());
        if let Some(timer) = self.selected() {
            sections.push(self.help.view(&timer.key_map));
        }
        sections.push(self.help.view(&self.key_map));
        sections.join("\n")
    }

    fn quick_add_row(&self) -> String {
        self.key_map
            .quick_add
            .iter()
            .map(|q| {
                Button::new(format!("{} Add {} min", Icon::Plus, q.minutes))
                    .with_variant(Variant::Default)
                    .with_size(Size::Sm)
                    .with_binding(q.binding.clone())
                    .view()
            })
            .collect::<Vec<_>>()
            .join(GAP)
    }

    // Packs cards into rows that fit the terminal width.
    fn layout(&self, cards: &[String]) -> Vec<String> {
        let mut rows = Vec::new();
        let mut row: Vec<&str> = Vec::new();
        let mut row_width = 0;

        for card in cards {
            let width = block_width(card);
            let full = if self.width == 0 {
                row.len() >= DEFAULT_COLUMNS
            } else {
                !row.is_empty() && row_width + GAP.len() + width > self.width
            };
            if full {
                rows.push(join_row(&row));
                row.clear();
                row_width = 0;
            }
            if !row.is_empty() {
                row_width += GAP.len();
            }
            row.push(card);
            row_width += width;
        }
        if !row.is_empty() {
            rows.push(join_row(&row));
        }
        rows
    }
}

fn join_row(cards: &[&str]) -> String {
    let mut parts = Vec::with_capacity(cards.len() * 2);
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            parts.push(GAP);
        }
        parts.push(*card);
    }
    lipgloss::join_horizontal(lipgloss::TOP, &parts)
}

fn block_width(block: &str) -> usize {
    block.lines().map(lipgloss::width_visible).max().unwrap_or(0)
}
