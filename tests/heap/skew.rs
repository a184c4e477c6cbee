//! Skew heap operations

use stepwise_foundation::ErrorKind;
use stepwise_heap::{HeapPhase, SkewHeap};

// =============================================================================
// Insert / Find
// =============================================================================

#[test]
fn insert_tracks_the_minimum() {
    let heap = SkewHeap::from_values(&[5, 3, 8, 1, 9]).unwrap();
    assert_eq!(heap.len(), 5);
    assert_eq!(heap.peek(), Some(1));
    assert!(heap.is_heap_ordered());
}

#[test]
fn insert_does_not_touch_the_original() {
    let heap = SkewHeap::from_values(&[4, 2]).unwrap();
    let run = heap.insert(1).unwrap();
    let bigger = run.outcome.unwrap();

    assert_eq!(heap.len(), 2);
    assert_eq!(heap.peek(), Some(2));
    assert_eq!(bigger.len(), 3);
    assert_eq!(bigger.peek(), Some(1));
}

#[test]
fn insert_trace_starts_and_ends_cleanly() {
    let heap = SkewHeap::from_values(&[10, 20, 30]).unwrap();
    let trace = heap.insert(15).unwrap().trace;

    assert_eq!(trace.first().unwrap().phase(), HeapPhase::Insert);
    assert_eq!(trace.last().unwrap().phase(), HeapPhase::Complete);
    assert!(!trace.by_phase(HeapPhase::Compare).is_empty());
    assert_eq!(trace.last().unwrap().result_so_far().size, 4);
}

#[test]
fn find_min_leaves_the_heap_alone() {
    let heap = SkewHeap::from_values(&[7, 3, 5]).unwrap();
    let run = heap.find_min().unwrap();
    assert_eq!(run.outcome, Ok(3));
    assert_eq!(run.trace.len(), 2);
    assert_eq!(run.trace.first().unwrap().phase(), HeapPhase::Found);
}

// =============================================================================
// Extract
// =============================================================================

#[test]
fn extract_returns_the_root() {
    let heap = SkewHeap::from_values(&[6, 2, 4]).unwrap();
    let run = heap.extract_min().unwrap();
    let (min, rest) = run.outcome.unwrap();

    assert_eq!(min, 2);
    assert_eq!(rest.len(), 2);
    assert_eq!(rest.peek(), Some(4));
    assert_eq!(run.trace.first().unwrap().phase(), HeapPhase::Extract);
    assert_eq!(run.trace.last().unwrap().result_so_far().answer, Some(2));
}

#[test]
fn extract_from_empty_is_a_one_step_error() {
    let run = SkewHeap::new().extract_min().unwrap();
    assert!(run.is_failure());
    assert!(run.trace.is_failure());
    assert_eq!(run.trace.len(), 1);
    assert_eq!(run.outcome.unwrap_err().kind, ErrorKind::EmptyHeap);
}

#[test]
fn find_min_on_empty_is_a_one_step_error() {
    let run = SkewHeap::new().find_min().unwrap();
    assert_eq!(run.trace.first().unwrap().phase(), HeapPhase::Error);
    assert_eq!(run.trace.first().unwrap().narrative(), "heap is empty");
}

// =============================================================================
// Meld / Clear
// =============================================================================

#[test]
fn meld_combines_both_heaps() {
    let left = SkewHeap::from_values(&[5, 9]).unwrap();
    let right = SkewHeap::from_values(&[3, 7]).unwrap();
    let melded = left.meld(&right).unwrap().outcome.unwrap();

    assert_eq!(melded.len(), 4);
    assert_eq!(melded.peek(), Some(3));
    assert!(melded.is_heap_ordered());
}

#[test]
fn meld_reissues_ids() {
    let left = SkewHeap::from_values(&[1, 2]).unwrap();
    let right = SkewHeap::from_values(&[3, 4]).unwrap();
    let melded = left.meld(&right).unwrap().outcome.unwrap();

    let mut ids = melded.node_ids();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn meld_with_empty_keeps_values() {
    let heap = SkewHeap::from_values(&[2, 1]).unwrap();
    let melded = heap.meld(&SkewHeap::new()).unwrap().outcome.unwrap();
    let mut values = melded.values();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn clear_is_one_complete_step() {
    let heap = SkewHeap::from_values(&[1, 2, 3]).unwrap();
    let run = heap.clear().unwrap();
    assert_eq!(run.trace.len(), 1);
    assert_eq!(run.trace.first().unwrap().phase(), HeapPhase::Complete);
    assert!(run.outcome.unwrap().is_empty());
}
