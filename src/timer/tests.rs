//! Tests for the timer card.

use super::*;
use crate::sound::{Sound, SoundError};
use crate::Component;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Calls {
    load: AtomicUsize,
    play: AtomicUsize,
    ring: AtomicUsize,
    stop: AtomicUsize,
    reject: AtomicBool,
}

impl Calls {
    fn load(&self) -> usize {
        self.load.load(Ordering::SeqCst)
    }
    fn play(&self) -> usize {
        self.play.load(Ordering::SeqCst)
    }
    fn ring(&self) -> usize {
        self.ring.load(Ordering::SeqCst)
    }
    fn stop(&self) -> usize {
        self.stop.load(Ordering::SeqCst)
    }
}

struct Recording {
    calls: Arc<Calls>,
    playing: bool,
}

impl Sound for Recording {
    fn load(&mut self) -> Result<(), SoundError> {
        self.calls.load.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn play(&mut self) -> Result<(), SoundError> {
        self.calls.play.fetch_add(1, Ordering::SeqCst);
        if self.calls.reject.load(Ordering::SeqCst) {
            return Err(SoundError::Rejected("no user gesture".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn ring(&mut self) {
        self.calls.ring.fetch_add(1, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        self.calls.stop.fetch_add(1, Ordering::SeqCst);
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

fn timer(seconds: u64) -> (Model, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let sound = Recording {
        calls: Arc::clone(&calls),
        playing: false,
    };
    (new(TimerId::next(), seconds, Box::new(sound)), calls)
}

fn key(c: char) -> Msg {
    Box::new(KeyMsg {
        key: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
    })
}

fn code(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn tick_msg(t: &Model) -> Option<Msg> {
    match t.countdown() {
        Countdown::Running { tag, .. } => Some(Box::new(TickMsg { id: t.id(), tag })),
        _ => None,
    }
}

#[test]
fn test_new_timer_is_idle_at_initial() {
    let (t, _) = timer(300);
    assert_eq!(t.remaining(), 300);
    assert_eq!(t.initial(), 300);
    assert!(!t.running());
    assert!(!t.complete());
    assert!(!t.audio_armed());
    assert!(!t.delete_confirm_pending());
    assert_eq!(t.label(), "5 min timer");
}

#[test]
fn test_default_label() {
    assert_eq!(default_label(60), "1 min timer");
    assert_eq!(default_label(1500), "25 min timer");
    assert_eq!(default_label(90), "1.5 min timer");
    assert_eq!(default_label(30), "0.5 min timer");
    assert_eq!(default_label(100), "1.67 min timer");
}

#[test]
fn test_unique_ids() {
    let (a, _) = timer(10);
    let (b, _) = timer(10);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_first_toggle_arms_audio_once() {
    let (mut t, calls) = timer(10);
    assert!(t.toggle().is_some());
    assert!(t.running());
    assert!(t.audio_armed());
    assert_eq!(calls.load(), 1);

    assert!(t.toggle().is_none());
    assert!(!t.running());
    assert_eq!(t.remaining(), 10);

    t.toggle();
    assert!(t.running());
    assert_eq!(calls.load(), 1);
}

#[test]
fn test_toggle_at_zero_runs_for_one_second() {
    let (mut t, _) = timer(10);
    t.adjust(-60);
    assert_eq!(t.remaining(), 0);
    assert!(!t.running());

    assert!(t.toggle().is_some());
    assert!(t.running());
    assert_eq!(t.remaining(), 1);
}

#[test]
fn test_adjust_never_goes_negative() {
    let (mut t, _) = timer(45);
    let deltas = [-30, -30, 30, 90, -200, 5, -4, -1, -1, 30];
    let mut expected: i64 = 45;
    for d in deltas {
        expected = (expected + d).max(0);
        t.adjust(d);
        assert_eq!(t.remaining() as i64, expected, "after adjust({})", d);
    }
}

#[test]
fn test_adjust_keeps_running_phase() {
    let (mut t, _) = timer(60);
    t.toggle();
    let before = t.countdown();
    t.adjust(30);
    assert!(t.running());
    assert_eq!(t.remaining(), 90);
    match (before, t.countdown()) {
        (Countdown::Running { tag: a, .. }, Countdown::Running { tag: b, .. }) => assert_eq!(a, b),
        other => panic!("unexpected phases {:?}", other),
    }
}

#[test]
fn test_adjust_to_zero_while_running_completes() {
    let (mut t, calls) = timer(60);
    t.toggle();
    let pending = tick_msg(&t).unwrap();

    assert!(t.adjust(-60).is_some());
    assert!(t.complete());
    assert!(!t.running());
    assert_eq!(t.remaining(), 0);
    assert_eq!(calls.play(), 1);
    assert!(t.alarm_sounding());

    // The tick scheduled before the adjust finds nothing to do.
    assert!(t.update(pending).is_none());
    assert_eq!(calls.play(), 1);
}

#[test]
fn test_decrease_key_to_zero_completes() {
    let (mut t, calls) = timer(30);
    t.update(key(' '));
    assert!(t.update(key('-')).is_some());
    assert!(t.complete());
    assert_eq!(calls.play(), 1);
}

#[test]
fn test_adjust_to_zero_while_idle_stays_idle() {
    let (mut t, calls) = timer(30);
    assert!(t.adjust(-30).is_none());
    assert!(!t.complete());
    assert!(!t.running());
    assert_eq!(t.remaining(), 0);
    assert_eq!(calls.play(), 0);
}

#[test]
fn test_thirty_ticks_complete_and_play_once() {
    let (mut t, calls) = timer(30);
    t.toggle();
    for _ in 0..30 {
        t.tick();
    }
    assert!(t.complete());
    assert!(!t.running());
    assert_eq!(t.remaining(), 0);
    assert_eq!(calls.play(), 1);
    assert!(t.alarm_sounding());

    // Further ticks do nothing.
    assert!(t.tick().is_none());
    assert!(t.tick().is_none());
    assert!(t.complete());
    assert_eq!(calls.play(), 1);
}

#[test]
fn test_tick_while_idle_is_ignored() {
    let (mut t, _) = timer(10);
    assert!(t.tick().is_none());
    assert_eq!(t.remaining(), 10);
}

#[test]
fn test_stale_tick_after_pause_is_dropped() {
    let (mut t, _) = timer(10);
    t.toggle();
    let stale = tick_msg(&t).unwrap();
    t.toggle(); // pause
    t.toggle(); // resume with a new tag

    assert!(t.update(stale).is_none());
    assert_eq!(t.remaining(), 10);

    let fresh = tick_msg(&t).unwrap();
    assert!(t.update(fresh).is_some());
    assert_eq!(t.remaining(), 9);
}

#[test]
fn test_tick_for_other_timer_is_ignored() {
    let (mut a, _) = timer(10);
    let (mut b, _) = timer(10);
    a.toggle();
    b.toggle();
    let for_b = tick_msg(&b).unwrap();
    assert!(a.update(for_b).is_none());
    assert_eq!(a.remaining(), 10);
    assert_eq!(b.remaining(), 10);
}

#[test]
fn test_completion_without_arming_is_silent() {
    let (mut t, calls) = timer(2);
    // Force running without the user gesture.
    t.countdown = Countdown::Running {
        remaining: 2,
        tag: 1,
    };
    t.tick();
    t.tick();
    assert!(t.complete());
    assert_eq!(calls.play(), 0);
    assert!(!t.alarm_sounding());
}

#[test]
fn test_rejected_playback_disarms() {
    let (mut t, calls) = timer(1);
    calls.reject.store(true, Ordering::SeqCst);
    t.toggle();
    assert!(t.tick().is_none());

    assert!(t.complete());
    assert_eq!(calls.play(), 1);
    assert!(!t.audio_armed());
    assert!(!t.alarm_sounding());

    // The next start re-arms and prepares again.
    t.toggle();
    assert!(t.audio_armed());
    assert_eq!(calls.load(), 2);
}

#[test]
fn test_acknowledge_returns_to_idle_at_zero() {
    let (mut t, calls) = timer(1);
    t.toggle();
    t.tick();
    assert!(t.complete());

    t.acknowledge();
    assert!(!t.complete());
    assert!(!t.running());
    assert_eq!(t.remaining(), 0);
    assert!(!t.alarm_sounding());
    assert!(calls.stop() >= 1);
}

#[test]
fn test_toggle_from_complete_silences_and_runs() {
    let (mut t, calls) = timer(1);
    t.toggle();
    t.tick();
    let stops = calls.stop();

    t.toggle();
    assert!(t.running());
    assert_eq!(t.remaining(), 1);
    assert!(!t.alarm_sounding());
    assert!(calls.stop() > stops);
}

#[test]
fn test_adjust_on_complete() {
    let (mut t, _) = timer(1);
    t.toggle();
    t.tick();

    t.adjust(-30);
    assert!(t.complete());
    assert_eq!(t.remaining(), 0);

    t.adjust(30);
    assert!(!t.complete());
    assert!(!t.alarm_sounding());
    assert_eq!(t.remaining(), 30);
}

#[test]
fn test_reset_restores_initial_from_any_phase() {
    // idle, adjusted
    let (mut t, _) = timer(120);
    t.adjust(-90);
    t.reset();
    assert_eq!(t.remaining(), 120);
    assert!(!t.running());

    // running
    t.toggle();
    t.tick();
    t.reset();
    assert_eq!(t.remaining(), 120);
    assert!(!t.running());

    // complete
    let (mut t, _) = timer(1);
    t.toggle();
    t.tick();
    assert!(t.complete());
    t.reset();
    assert_eq!(t.remaining(), 1);
    assert!(!t.running());
    assert!(!t.complete());
    assert!(!t.alarm_sounding());
}

#[test]
fn test_reset_cancels_pending_tick() {
    let (mut t, _) = timer(10);
    t.toggle();
    let pending = tick_msg(&t).unwrap();
    t.reset();
    assert!(t.update(pending).is_none());
    assert_eq!(t.remaining(), 10);
}

#[test]
fn test_rename_overwrites_label() {
    let (mut t, _) = timer(60);
    t.rename("Deep work");
    assert_eq!(t.label(), "Deep work");
    t.rename("");
    assert_eq!(t.label(), "");
}

#[test]
fn test_rename_keeps_long_labels_whole() {
    let (mut t, _) = timer(60);
    let long = "a".repeat(60);
    t.rename(&long);
    assert_eq!(t.label(), long);

    // Typing past the display width keeps every character too.
    t.start_rename();
    for _ in 0..10 {
        t.update(key('b'));
    }
    t.finish_rename();
    assert_eq!(t.label().chars().count(), 70);
}

#[test]
fn test_request_then_cancel_restores_state() {
    let (mut t, _) = timer(60);
    t.toggle();
    t.adjust(30);
    let before = (t.countdown(), t.label(), t.audio_armed());

    t.request_delete();
    assert!(t.delete_confirm_pending());
    t.cancel_delete();
    assert!(!t.delete_confirm_pending());
    assert_eq!((t.countdown(), t.label(), t.audio_armed()), before);
}

#[test]
fn test_request_delete_toggles() {
    let (mut t, _) = timer(60);
    t.request_delete();
    t.request_delete();
    assert!(!t.delete_confirm_pending());
}

#[tokio::test]
async fn test_confirm_delete_emits_remove_once() {
    let (mut t, calls) = timer(60);
    t.toggle();
    let pending = tick_msg(&t).unwrap();
    t.request_delete();

    let cmd = t.confirm_delete().expect("remove command");
    assert!(!t.delete_confirm_pending());
    assert!(!t.running());
    assert!(calls.stop() >= 1);
    assert!(t.update(pending).is_none());

    let msg = cmd.await.expect("remove message");
    let remove = msg.downcast_ref::<RemoveMsg>().expect("RemoveMsg");
    assert_eq!(remove.id, t.id());
}

#[test]
fn test_keys_drive_the_card() {
    let (mut t, _) = timer(60);
    assert!(t.update(key(' ')).is_some());
    assert!(t.running());
    t.update(key('+'));
    assert_eq!(t.remaining(), 90);
    t.update(key('-'));
    t.update(key('-'));
    assert_eq!(t.remaining(), 30);
    t.update(key('r'));
    assert_eq!(t.remaining(), 60);
    assert!(!t.running());
}

#[test]
fn test_delete_keys() {
    let (mut t, _) = timer(60);
    t.update(key('x'));
    assert!(t.delete_confirm_pending());

    // Other actions are locked while confirming.
    t.update(key(' '));
    assert!(!t.running());

    t.update(key('n'));
    assert!(!t.delete_confirm_pending());

    t.update(key('x'));
    assert!(t.update(key('y')).is_some());
    assert!(!t.delete_confirm_pending());
}

#[test]
fn test_x_silences_when_complete() {
    let (mut t, _) = timer(1);
    t.toggle();
    t.tick();
    assert!(t.complete());

    t.update(key('x'));
    assert!(!t.complete());
    assert!(!t.delete_confirm_pending());
}

#[test]
fn test_rename_keys() {
    let (mut t, _) = timer(60);
    t.update(key('e'));
    assert!(t.renaming());
    t.update(code(KeyCode::Home));
    t.update(key('x'));
    t.update(key(' '));
    assert_eq!(t.label(), "x 1 min timer");
    assert!(!t.running());
    assert!(!t.delete_confirm_pending());

    t.update(code(KeyCode::Enter));
    assert!(!t.renaming());
}

#[test]
fn test_blur_ends_rename() {
    let (mut t, _) = timer(60);
    t.focus();
    t.start_rename();
    t.blur();
    assert!(!t.renaming());
    assert!(!t.focused());
}

#[test]
fn test_ring_repeats_until_acknowledged() {
    let (mut t, calls) = timer(1);
    t.toggle();
    t.tick();
    let tag = t.alarm.expect("alarm sounding");

    assert!(t.update(Box::new(RingMsg { id: t.id(), tag })).is_some());
    assert_eq!(calls.ring(), 1);

    t.acknowledge();
    assert!(t.update(Box::new(RingMsg { id: t.id(), tag })).is_none());
    assert_eq!(calls.ring(), 1);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(59), "00:59");
    assert_eq!(format_clock(1500), "25:00");
    assert_eq!(format_clock(6000), "100:00");
}

#[test]
fn test_view_shows_label_and_clock() {
    let (t, _) = timer(1500);
    let text = lipgloss::strip_ansi(&t.view());
    assert!(text.contains("25 min timer"));
    assert!(text.contains("25:00"));
    assert!(text.contains("Reset"));
    assert!(!text.contains("Are you sure"));
}

#[test]
fn test_view_shows_confirmation() {
    let (mut t, _) = timer(60);
    t.request_delete();
    let text = lipgloss::strip_ansi(&t.view());
    assert!(text.contains("Are you sure you want to delete this timer?"));
    // Only confirm and cancel keys are offered while confirming.
    assert!(text.contains("Reset"));
    assert!(!text.contains("Reset r"));
    assert!(text.contains("Delete y"));
    assert!(text.contains("Delete"));
    assert!(text.contains("Cancel"));
}

#[test]
fn test_view_swaps_delete_for_silence_when_complete() {
    let (mut t, _) = timer(1);
    let idle = lipgloss::strip_ansi(&t.view());
    assert!(idle.contains('✕'));

    t.toggle();
    t.tick();
    let done = lipgloss::strip_ansi(&t.view());
    assert!(done.contains('♪'));
    assert!(!done.contains('✕'));
}
