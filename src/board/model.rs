//! Board state, timer bookkeeping and message routing.

use super::keymap::KeyMap;
use crate::config::Config;
use crate::help;
use crate::sound::SoundSource;
use crate::timer::{self, RemoveMsg, RingMsg, TickMsg, TimerId};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use std::time::Duration;
use tracing::{debug, info};

/// The immutable description of one card: which timer and how long it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDescriptor {
    /// Timer id.
    pub id: TimerId,
    /// Configured duration, always above zero.
    pub initial_seconds: u64,
}

/// An ordered collection of timer cards.
///
/// The board creates a widget per descriptor and drops it on removal. Ticks
/// and rings are routed by id, so every card counts down on its own; keys go
/// to the selected card unless the board binds them.
pub struct Board {
    pub(super) timers: Vec<timer::Model>,
    pub(super) selected: usize,
    source: SoundSource,
    step: u64,
    interval: Duration,
    pub(super) width: usize,
    /// Board key bindings.
    pub key_map: KeyMap,
    /// Help view.
    pub help: help::Model,
}

impl Board {
    /// Creates a board with one card per entry of `presets_minutes` and the
    /// default settings.
    pub fn new(presets_minutes: &[u64]) -> Self {
        let mut board = Self::empty(&Config::default());
        for &minutes in presets_minutes {
            board.add(minutes);
        }
        board
    }

    /// Creates a board from a parsed configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut board = Self::empty(config);
        for &minutes in config.initial_minutes() {
            board.add(minutes);
        }
        board
    }

    fn empty(config: &Config) -> Self {
        Self {
            timers: Vec::new(),
            selected: 0,
            source: config.sound_source(),
            step: config.step,
            interval: config.tick_interval(),
            width: 0,
            key_map: KeyMap::new(&config.quick_add),
            help: help::Model::new(),
        }
    }

    /// Appends a card of `minutes` minutes. Zero minutes adds nothing.
    pub fn add(&mut self, minutes: u64) -> Option<TimerId> {
        self.add_seconds(minutes.saturating_mul(60))
    }

    /// Appends a card of `seconds` seconds. Zero seconds adds nothing.
    pub fn add_seconds(&mut self, seconds: u64) -> Option<TimerId> {
        if seconds == 0 {
            debug!("ignoring empty timer");
            return None;
        }

        let id = TimerId::next();
        let mut timer = timer::new(id, seconds, self.source.open())
            .with_interval(self.interval)
            .with_step(self.step);
        if self.timers.is_empty() {
            self.selected = 0;
            timer.focus();
        }
        self.timers.push(timer);
        info!(timer = %id, seconds, "timer added");
        Some(id)
    }

    /// Removes the card with `id` and drops its widget, which releases the
    /// alarm. Unknown ids are ignored. Returns whether a card was removed.
    pub fn remove(&mut self, id: TimerId) -> bool {
        let Some(index) = self.timers.iter().position(|t| t.id() == id) else {
            debug!(timer = %id, "remove of unknown timer ignored");
            return false;
        };

        self.timers.remove(index);
        if index < self.selected || self.selected >= self.timers.len() {
            self.selected = self.selected.saturating_sub(1);
        }
        if let Some(timer) = self.timers.get_mut(self.selected) {
            timer.focus();
        }
        info!(timer = %id, remaining = self.timers.len(), "timer removed");
        true
    }

    /// The descriptors of all cards, in display order.
    pub fn descriptors(&self) -> Vec<TimerDescriptor> {
        self.timers
            .iter()
            .map(|t| TimerDescriptor {
                id: t.id(),
                initial_seconds: t.initial(),
            })
            .collect()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// The card with `id`.
    pub fn timer(&self, id: TimerId) -> Option<&timer::Model> {
        self.timers.iter().find(|t| t.id() == id)
    }

    /// The card with `id`, mutably.
    pub fn timer_mut(&mut self, id: TimerId) -> Option<&mut timer::Model> {
        self.timers.iter_mut().find(|t| t.id() == id)
    }

    /// The selected card, if the board is not empty.
    pub fn selected(&self) -> Option<&timer::Model> {
        self.timers.get(self.selected)
    }

    /// Moves the selection to `index`, clamped to the cards.
    pub fn select(&mut self, index: usize) {
        if self.timers.is_empty() {
            return;
        }
        let index = index.min(self.timers.len() - 1);
        if let Some(timer) = self.timers.get_mut(self.selected) {
            timer.blur();
        }
        self.selected = index;
        if let Some(timer) = self.timers.get_mut(index) {
            timer.focus();
        }
    }

    fn select_id(&mut self, id: TimerId) {
        if let Some(index) = self.timers.iter().position(|t| t.id() == id) {
            self.select(index);
        }
    }

    // A card that is renaming or confirming a delete takes every key.
    fn capturing(&self) -> bool {
        self.selected()
            .is_some_and(|t| t.renaming() || t.delete_confirm_pending())
    }

    // Handles keys the board owns. Returns `None` when the key belongs to
    // the selected card.
    fn handle_key(&mut self, key: &KeyMsg) -> Option<Option<Cmd>> {
        if self.key_map.force_quit.matches(key) {
            info!("quitting");
            return Some(Some(bubbletea_rs::quit()));
        }
        if self.capturing() {
            return None;
        }

        if self.key_map.quit.matches(key) {
            info!("quitting");
            return Some(Some(bubbletea_rs::quit()));
        }
        if self.key_map.show_full_help.matches(key) {
            self.help.show_all = !self.help.show_all;
            return Some(None);
        }
        if self.key_map.prev.matches(key) {
            self.select(self.selected.saturating_sub(1));
            return Some(None);
        }
        if self.key_map.next.matches(key) {
            self.select(self.selected + 1);
            return Some(None);
        }

        let minutes = self
            .key_map
            .quick_add
            .iter()
            .find(|q| q.binding.matches(key))
            .map(|q| q.minutes)?;
        if let Some(id) = self.add(minutes) {
            self.select_id(id);
        }
        Some(None)
    }
}

impl BubbleTeaModel for Board {
    fn init() -> (Self, Option<Cmd>) {
        let config = Config::installed().cloned().unwrap_or_default();
        let board = Board::from_config(&config);
        info!(timers = board.len(), "board ready");
        (board, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            let id = tick.id;
            return self.timer_mut(id)?.update(msg);
        }

        if let Some(ring) = msg.downcast_ref::<RingMsg>() {
            let id = ring.id;
            return self.timer_mut(id)?.update(msg);
        }

        if let Some(remove) = msg.downcast_ref::<RemoveMsg>() {
            self.remove(remove.id);
            return None;
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.help.width = self.width;
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if let Some(cmd) = self.handle_key(key) {
                return cmd;
            }
            let index = self.selected;
            return self.timers.get_mut(index)?.update(msg);
        }

        None
    }

    fn view(&self) -> String {
        self.render()
    }
}
