//! Rendering of a timer card.

use super::model::Model;
use crate::button::{Button, Size, Variant};
use crate::card::Card;
use crate::icon::Icon;
use crate::Component;
use lipgloss_extras::prelude::*;

/// Formats seconds as `MM:SS`. Minutes are not capped.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl Model {
    /// Renders the card: label, adjust row, controls and, while a delete is
    /// pending, the confirmation prompt.
    pub fn view(&self) -> String {
        let km = &self.key_map;
        let title = if self.label.focused() {
            self.label.view()
        } else {
            self.label.value()
        };

        let clock = Style::new()
            .bold(true)
            .padding(0, 2, 0, 2)
            .inline(true)
            .render(&format_clock(self.remaining()));
        let minus = Button::new(Icon::Minus.glyph())
            .with_variant(Variant::Outline)
            .with_size(Size::Sm)
            .with_binding(km.decrease.clone());
        let plus = Button::new(Icon::Plus.glyph())
            .with_variant(Variant::Outline)
            .with_size(Size::Sm)
            .with_binding(km.increase.clone());
        let adjust_row = format!("{}{}{}", minus.view(), clock, plus.view());

        let play = Button::new(if self.running() {
            Icon::Pause.glyph()
        } else {
            Icon::Play.glyph()
        })
        .with_variant(Variant::Outline)
        .with_binding(km.toggle.clone());
        let reset = Button::new("Reset")
            .with_variant(Variant::Outline)
            .with_binding(km.reset.clone());
        let last = if self.complete() {
            Button::new(Icon::Volume.glyph())
                .with_variant(Variant::Outline)
                .with_binding(km.silence.clone())
        } else {
            Button::new(Icon::X.glyph())
                .with_variant(Variant::Destructive)
                .with_binding(km.delete.clone())
        };
        let controls = format!("{} {} {}", play.view(), reset.view(), last.view());

        let mut card = Card::new(title).row(adjust_row).row(controls);
        if self.delete_confirm {
            let delete = Button::new("Delete")
                .with_variant(Variant::Destructive)
                .with_binding(km.confirm.clone());
            let cancel = Button::new("Cancel")
                .with_variant(Variant::Outline)
                .with_binding(km.cancel.clone());
            card = card
                .row("")
                .row("Are you sure you want to delete this timer?")
                .row(format!("{} {}", delete.view(), cancel.view()));
        }
        card.complete = self.complete();
        card.selected = self.focused();
        card.view(&self.styles)
    }
}
