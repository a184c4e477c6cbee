//! Automatic playback through timer handles

use std::time::Duration;

use stepwise_dp::house_robber;
use stepwise_heap::SkewHeap;
use stepwise_playback::{Play, PlaybackEvent, PlaybackState, Player};

use crate::player;

#[test]
fn play_arms_one_timer() {
    let mut p = player(&[2, 7, 9]);
    let handle = p.play().handle().unwrap();
    assert_eq!(p.state(), PlaybackState::Running);
    assert_eq!(p.active_timer(), Some(handle));

    // A second play while running changes nothing.
    assert_eq!(p.play(), Play::Ignored);
    assert_eq!(p.active_timer(), Some(handle));
}

#[test]
fn ticks_run_to_completion() {
    let mut p = player(&[2, 7, 9]);
    let handle = p.play().handle().unwrap();

    let mut completed = 0;
    let mut ticks = 0;
    while let Some(event) = p.tick(handle) {
        ticks += 1;
        if event.is_completed() {
            completed += 1;
        }
    }

    assert_eq!(ticks, p.len() - 1);
    assert_eq!(completed, 1);
    assert_eq!(p.state(), PlaybackState::Completed);
    assert!(p.active_timer().is_none());
}

#[test]
fn manual_moves_are_ignored_while_running() {
    let mut p = player(&[2, 7, 9]);
    p.play();
    assert_eq!(p.step_forward(), None);
    assert_eq!(p.step_backward(), None);
    assert_eq!(p.seek(5), None);
    assert_eq!(p.position(), 0);
}

#[test]
fn pause_invalidates_the_handle() {
    let mut p = player(&[2, 7, 9]);
    let first = p.play().handle().unwrap();
    p.tick(first);
    assert!(p.pause());
    assert_eq!(p.tick(first), None);
    assert_eq!(p.position(), 1);

    let second = p.play().handle().unwrap();
    assert_ne!(first, second);
    assert_eq!(p.tick(first), None);
    assert_eq!(p.tick(second), Some(PlaybackEvent::Moved { position: 2 }));
}

#[test]
fn loading_a_new_trace_cancels_the_timer() {
    let mut p = player(&[2, 7, 9]);
    let handle = p.play().handle().unwrap();
    p.load(house_robber::solve(&[1]).unwrap().trace);

    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.tick(handle), None);
    assert_eq!(p.position(), 0);
}

#[test]
fn play_on_a_single_snapshot_finishes_immediately() {
    let heap = SkewHeap::from_values(&[1, 2]).unwrap();
    let trace = heap.clear().unwrap().trace;
    let mut p = Player::with_trace(trace, Duration::from_millis(10));

    assert_eq!(
        p.play(),
        Play::Finished(Some(PlaybackEvent::Completed { position: 0 }))
    );
    assert_eq!(p.state(), PlaybackState::Completed);
    assert!(p.active_timer().is_none());

    // Completed ignores play until reset, and completion is not re-reported.
    assert_eq!(p.play(), Play::Ignored);
    p.reset();
    assert_eq!(p.play(), Play::Finished(None));
}

#[test]
fn play_after_returning_to_the_end_is_ignored() {
    let mut p = player(&[3]);
    let last = p.len() - 1;
    p.seek(last);
    p.step_backward();
    assert_eq!(p.step_forward(), Some(PlaybackEvent::Moved { position: last }));
    assert_eq!(p.state(), PlaybackState::Completed);
    assert_eq!(p.play(), Play::Ignored);
}

#[test]
fn completion_is_reported_once_per_load() {
    let mut p = player(&[5, 1]);
    let handle = p.play().handle().unwrap();
    while p.tick(handle).is_some() {}

    p.reset();
    let handle = p.play().handle().unwrap();
    let events: Vec<_> = std::iter::from_fn(|| p.tick(handle)).collect();
    assert!(events.iter().all(|e| !e.is_completed()));
    assert_eq!(p.state(), PlaybackState::Completed);
}

#[test]
fn interval_changes_apply_immediately() {
    let mut p = player(&[1]);
    p.set_interval(Duration::from_millis(250));
    assert_eq!(p.interval(), Duration::from_millis(250));
}
