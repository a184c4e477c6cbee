//! Manual stepping and seeking

use stepwise_playback::{PlaybackEvent, PlaybackState};

use crate::{RobberPlayer, player};

#[test]
fn loaded_player_is_idle_at_zero() {
    let p = player(&[2, 7, 9]);
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.position(), 0);
    assert_eq!(p.len(), 11);
    assert!(!p.at_end());
}

#[test]
fn empty_player_ignores_everything() {
    let mut p = RobberPlayer::default();
    assert!(p.is_empty());
    assert_eq!(p.step_forward(), None);
    assert_eq!(p.step_backward(), None);
    assert_eq!(p.seek(3), None);
    assert!(!p.pause());
    assert!(p.current().is_none());
}

#[test]
fn stepping_forward_pauses() {
    let mut p = player(&[2, 7, 9]);
    assert_eq!(p.step_forward(), Some(PlaybackEvent::Moved { position: 1 }));
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.current().map(|s| s.sequence_index()), Some(1));
}

#[test]
fn step_back_at_start_is_ignored() {
    let mut p = player(&[2, 7, 9]);
    assert_eq!(p.step_backward(), None);
    assert_eq!(p.state(), PlaybackState::Idle);
}

#[test]
fn stepping_to_the_end_completes_once() {
    let mut p = player(&[4]);
    let mut events = Vec::new();
    while let Some(event) = p.step_forward() {
        events.push(event);
    }

    let last = p.len() - 1;
    assert_eq!(events.last(), Some(&PlaybackEvent::Completed { position: last }));
    assert_eq!(events.iter().filter(|e| e.is_completed()).count(), 1);
    assert_eq!(p.state(), PlaybackState::Completed);
    assert_eq!(p.step_forward(), None);
}

#[test]
fn stepping_back_from_completed_pauses() {
    let mut p = player(&[4]);
    let last = p.len() - 1;
    assert!(p.seek(last).is_some_and(PlaybackEvent::is_completed));
    assert_eq!(p.step_backward(), Some(PlaybackEvent::Moved { position: last - 1 }));
    assert_eq!(p.state(), PlaybackState::Paused);

    // Returning to the end does not report completion again.
    assert_eq!(p.step_forward(), Some(PlaybackEvent::Moved { position: last }));
    assert_eq!(p.state(), PlaybackState::Completed);
}

#[test]
fn seek_clamps_to_the_last_snapshot() {
    let mut p = player(&[1, 2]);
    let last = p.len() - 1;
    assert_eq!(p.seek(1_000), Some(PlaybackEvent::Completed { position: last }));
    assert_eq!(p.seek(1_000), None);
}

#[test]
fn seek_to_current_position_is_ignored() {
    let mut p = player(&[1, 2]);
    p.seek(2);
    assert_eq!(p.seek(2), None);
    assert_eq!(p.position(), 2);
}

#[test]
fn reset_returns_to_idle() {
    let mut p = player(&[1, 2, 3]);
    p.seek(4);
    p.reset();
    assert_eq!(p.position(), 0);
    assert_eq!(p.state(), PlaybackState::Idle);
    assert!(p.active_timer().is_none());
}
