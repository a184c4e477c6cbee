//! Session lifecycle

use stepwise_foundation::ErrorKind;
use stepwise_runtime::{Limits, PlaybackConfig, PlaybackState, Session, SessionConfig};

use crate::{args, finish, manual_session};

// =============================================================================
// Triggering
// =============================================================================

#[test]
fn knapsack_loads_a_trace() {
    let mut session = manual_session();
    let triggered = session
        .trigger_named("knapsack", &args("capacity=10 weights=2,3,4,5 values=3,4,5,6"))
        .unwrap();

    assert_eq!(triggered.operation, "knapsack");
    assert!(!triggered.failed);
    assert!(triggered.summary.starts_with("max value 13"));
    assert_eq!(session.trace_len(), triggered.steps);
    assert_eq!(session.trace_label(), Some("knapsack"));
    assert_eq!(session.playback_state(), PlaybackState::Idle);
}

#[test]
fn unknown_operations_are_rejected() {
    let mut session = manual_session();
    let err = session.trigger_named("bogo-sort", &args("")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownOperation(_)));
    assert_eq!(session.trace_len(), 0);
}

#[test]
fn engine_rejections_leave_the_session_alone() {
    let mut session = manual_session();
    session
        .trigger_named("house-robber", &args("houses=2,7,9"))
        .unwrap();
    let before = session.trace_len();

    let err = session
        .trigger_named("coin-change", &args("amount=-1 coins=1"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    assert_eq!(session.trace_len(), before);
    assert_eq!(session.trace_label(), Some("house-robber"));
}

#[test]
fn oversized_random_requests_are_refused_up_front() {
    let mut session = manual_session();
    session.trigger_named("skew.insert", &args("5")).unwrap();
    finish(&mut session);
    let before = session.trace_len();

    let err = session
        .trigger_named("skew.meld", &args("random=4000000000"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    assert_eq!(session.skew().values(), vec![5]);
    assert_eq!(session.trace_len(), before);
    assert!(!session.has_pending());
}

#[test]
fn limits_are_enforced() {
    let config = SessionConfig::default()
        .with_playback(PlaybackConfig::manual())
        .with_limits(Limits::default().with_max_houses(3));
    let mut session = Session::new(config);

    let err = session
        .trigger_named("house-robber", &args("houses=1,2,3,4"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    assert!(session.trigger_named("house-robber", &args("houses=1,2,3")).is_ok());
}

#[test]
fn random_inputs_repeat_with_the_same_seed() {
    let mut first = manual_session();
    let mut second = manual_session();
    let a = first
        .trigger_named("knapsack", &args("random=5 seed=11"))
        .unwrap();
    let b = second
        .trigger_named("knapsack", &args("random=5 seed=11"))
        .unwrap();

    assert_eq!(a.summary, b.summary);
    assert_eq!(first.trace_outline(), second.trace_outline());
}

// =============================================================================
// Running Playback
// =============================================================================

#[test]
fn autoplay_starts_running() {
    let mut session = Session::new(
        SessionConfig::default().with_playback(PlaybackConfig::default().with_interval_ms(0)),
    );
    let triggered = session.trigger_named("lcs", &args("ABCDGH AEDFHR")).unwrap();

    assert!(triggered.timer.is_some());
    assert!(session.is_running());
}

#[test]
fn triggering_while_running_is_rejected() {
    let mut session = manual_session();
    session.trigger_named("skew.insert", &args("4")).unwrap();
    session.play();

    let err = session.trigger_named("skew.insert", &args("5")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::OperationInProgress);

    assert!(session.pause());
    assert!(session.trigger_named("skew.insert", &args("5")).is_ok());
}

// =============================================================================
// Committing Heap State
// =============================================================================

#[test]
fn heap_state_commits_on_completion() {
    let mut session = manual_session();
    session.trigger_named("skew.insert", &args("value=8")).unwrap();
    assert!(session.has_pending());
    assert!(session.skew().is_empty());

    finish(&mut session);
    assert!(!session.has_pending());
    assert_eq!(session.skew().peek(), Some(8));
}

#[test]
fn seeking_to_the_end_commits() {
    let mut session = manual_session();
    session.trigger_named("binomial.insert", &args("3")).unwrap();
    session.seek(usize::MAX);
    assert_eq!(session.binomial().len(), 1);
}

#[test]
fn a_new_trigger_discards_uncommitted_state() {
    let mut session = manual_session();
    session.trigger_named("skew.insert", &args("1")).unwrap();
    session.trigger_named("skew.insert", &args("2")).unwrap();
    finish(&mut session);

    assert_eq!(session.skew().len(), 1);
    assert_eq!(session.skew().peek(), Some(2));
}

#[test]
fn operations_build_on_committed_state() {
    let mut session = manual_session();
    for value in [5, 3, 9] {
        session
            .trigger_named("binomial.insert", &args(&value.to_string()))
            .unwrap();
        finish(&mut session);
    }
    assert_eq!(session.binomial().ranks(), vec![0, 1]);

    let triggered = session
        .trigger_named("binomial.extract-min", &args(""))
        .unwrap();
    assert!(triggered.summary.starts_with("extracted 3"));
    finish(&mut session);
    assert_eq!(session.binomial().len(), 2);
    assert_eq!(session.binomial().peek(), Some(5));
}

#[test]
fn extracting_from_an_empty_heap_is_a_failed_trace() {
    let mut session = manual_session();
    let triggered = session
        .trigger_named("skew.extract-min", &args(""))
        .unwrap();

    assert!(triggered.failed);
    assert_eq!(triggered.steps, 1);
    assert!(!session.has_pending());
    assert!(session.current_snapshot().unwrap().contains("heap is empty"));
}

#[test]
fn meld_and_clear_round_trip() {
    let mut session = manual_session();
    session
        .trigger_named("skew.meld", &args("values=4,1,7"))
        .unwrap();
    finish(&mut session);
    assert_eq!(session.skew().len(), 3);
    assert_eq!(session.skew().peek(), Some(1));

    session.trigger_named("skew.clear", &args("")).unwrap();
    finish(&mut session);
    assert!(session.skew().is_empty());
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn snapshot_text_tracks_the_cursor() {
    let mut session = manual_session();
    session
        .trigger_named("house-robber", &args("houses=2,7,9"))
        .unwrap();
    let first = session.current_snapshot().unwrap();
    assert!(first.starts_with("[1/11]"));

    session.step_forward();
    let second = session.current_snapshot().unwrap();
    assert!(second.starts_with("[2/11]"));

    session.reset();
    assert_eq!(session.current_snapshot().unwrap(), first);
}

#[test]
fn outline_and_stats_describe_the_trace() {
    let mut session = manual_session();
    assert!(session.trace_outline().is_none());
    assert!(session.stats().is_none());

    session
        .trigger_named("coin-change", &args("amount=6 coins=1,3,4"))
        .unwrap();
    let outline = session.trace_outline().unwrap();
    assert_eq!(outline.lines().count(), session.trace_len());

    let stats = session.stats().unwrap();
    assert_eq!(stats.snapshot_count, session.trace_len());
    assert_eq!(stats.count("complete"), 1);
}
