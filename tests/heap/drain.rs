//! Draining heaps yields sorted output

use proptest::prelude::*;
use stepwise_heap::{BinomialQueue, SkewHeap};

use crate::{drain_binomial, drain_skew};

#[test]
fn skew_drains_in_order() {
    let heap = SkewHeap::from_values(&[5, -2, 8, 0, 3, 3]).unwrap();
    assert_eq!(drain_skew(heap), vec![-2, 0, 3, 3, 5, 8]);
}

#[test]
fn binomial_drains_in_order() {
    let queue = BinomialQueue::from_values(&[5, -2, 8, 0, 3, 3]).unwrap();
    assert_eq!(drain_binomial(queue), vec![-2, 0, 3, 3, 5, 8]);
}

proptest! {
    #[test]
    fn skew_heap_sorts(values in prop::collection::vec(-50i64..50, 0..30)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(drain_skew(SkewHeap::from_values(&values).unwrap()), expected);
    }

    #[test]
    fn binomial_queue_sorts(values in prop::collection::vec(-50i64..50, 0..30)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(drain_binomial(BinomialQueue::from_values(&values).unwrap()), expected);
    }

    #[test]
    fn melded_queues_hold_both_sides(
        left in prop::collection::vec(-50i64..50, 0..15),
        right in prop::collection::vec(-50i64..50, 0..15),
    ) {
        let a = BinomialQueue::from_values(&left).unwrap();
        let b = BinomialQueue::from_values(&right).unwrap();
        let melded = a.meld(&b).unwrap().outcome.unwrap();

        let mut expected: Vec<i64> = left.iter().chain(&right).copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(drain_binomial(melded), expected);
    }

    #[test]
    fn skew_meld_matches_concatenation(
        left in prop::collection::vec(-50i64..50, 0..15),
        right in prop::collection::vec(-50i64..50, 0..15),
    ) {
        let a = SkewHeap::from_values(&left).unwrap();
        let b = SkewHeap::from_values(&right).unwrap();
        let melded = a.meld(&b).unwrap().outcome.unwrap();

        let mut expected: Vec<i64> = left.iter().chain(&right).copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(drain_skew(melded), expected);
    }
}
