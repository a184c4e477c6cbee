//! Integration tests for Layer 2: Mergeable Heaps
//!
//! Tests skew heaps and binomial queues through their traced operations.

mod binomial;
mod drain;
mod random_ops;
mod skew;

use stepwise_heap::{BinomialQueue, SkewHeap};

/// Extracts every value from a skew heap, smallest first.
pub fn drain_skew(mut heap: SkewHeap) -> Vec<i64> {
    let mut out = Vec::with_capacity(heap.len());
    while !heap.is_empty() {
        let (min, rest) = heap.extract_min().unwrap().outcome.unwrap();
        assert!(rest.is_heap_ordered());
        out.push(min);
        heap = rest;
    }
    out
}

/// Extracts every value from a binomial queue, smallest first.
pub fn drain_binomial(mut queue: BinomialQueue) -> Vec<i64> {
    let mut out = Vec::with_capacity(queue.len());
    while !queue.is_empty() {
        let (min, rest) = queue.extract_min().unwrap().outcome.unwrap();
        assert!(rest.is_well_formed());
        out.push(min);
        queue = rest;
    }
    out
}
