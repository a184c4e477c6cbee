//! Binomial queue operations

use stepwise_foundation::ErrorKind;
use stepwise_heap::{BinomialQueue, HeapPhase};

#[test]
fn ranks_follow_the_binary_size() {
    for (size, ranks) in [
        (1usize, vec![0usize]),
        (2, vec![1]),
        (3, vec![0, 1]),
        (4, vec![2]),
        (7, vec![0, 1, 2]),
        (13, vec![0, 2, 3]),
    ] {
        let values: Vec<i64> = (0..size as i64).rev().collect();
        let queue = BinomialQueue::from_values(&values).unwrap();
        assert_eq!(queue.ranks(), ranks, "size {size}");
        assert!(queue.is_well_formed());
    }
}

#[test]
fn insert_into_full_slot_carries() {
    let queue = BinomialQueue::from_values(&[4, 2, 6]).unwrap();
    let trace = queue.insert(1).unwrap().trace;

    assert!(!trace.by_phase(HeapPhase::Link).is_empty());
    assert!(!trace.by_phase(HeapPhase::Carry).is_empty());
    assert_eq!(trace.last().unwrap().result_so_far().min, Some(1));
}

#[test]
fn extract_min_rebuilds_the_forest() {
    let queue = BinomialQueue::from_values(&[8, 3, 5, 1, 9]).unwrap();
    let (min, rest) = queue.extract_min().unwrap().outcome.unwrap();

    assert_eq!(min, 1);
    assert_eq!(rest.len(), 4);
    assert_eq!(rest.ranks(), vec![2]);
    assert_eq!(rest.peek(), Some(3));
}

#[test]
fn empty_queue_errors_use_queue_wording() {
    let run = BinomialQueue::new().extract_min().unwrap();
    assert_eq!(run.trace.len(), 1);
    assert_eq!(run.trace.first().unwrap().narrative(), "queue is empty");
    assert_eq!(run.outcome.unwrap_err().kind, ErrorKind::EmptyQueue);

    let run = BinomialQueue::new().find_min().unwrap();
    assert!(run.trace.is_failure());
}

#[test]
fn find_min_scans_the_roots() {
    let queue = BinomialQueue::from_values(&[9, 4, 7]).unwrap();
    let run = queue.find_min().unwrap();
    assert_eq!(run.outcome, Ok(4));
    assert_eq!(run.trace.last().unwrap().phase(), HeapPhase::Complete);
}

#[test]
fn meld_adds_sizes() {
    let left = BinomialQueue::from_values(&[1, 2, 3]).unwrap();
    let right = BinomialQueue::from_values(&[4, 5, 6, 7, 8]).unwrap();
    let melded = left.meld(&right).unwrap().outcome.unwrap();

    assert_eq!(melded.len(), 8);
    assert_eq!(melded.ranks(), vec![3]);
    assert!(melded.is_well_formed());

    let mut ids = melded.node_ids();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[test]
fn clear_keeps_nothing() {
    let queue = BinomialQueue::from_values(&[1, 2]).unwrap();
    let cleared = queue.clear().unwrap().outcome.unwrap();
    assert!(cleared.is_empty());
    assert!(cleared.ranks().is_empty());
    assert_eq!(queue.len(), 2);
}
