//! Seeded random operation sequences checked against a sorted model

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stepwise_foundation::ErrorKind;
use stepwise_heap::{BinomialQueue, SkewHeap};

const STEPS: usize = 200;

/// Removes and returns the smallest value of the model.
fn pop_min(model: &mut Vec<i64>) -> Option<i64> {
    if model.is_empty() {
        return None;
    }
    model.sort_unstable();
    Some(model.remove(0))
}

fn random_batch(rng: &mut ChaCha8Rng) -> Vec<i64> {
    let n = rng.gen_range(0..6);
    (0..n).map(|_| rng.gen_range(-40..40)).collect()
}

#[test]
fn skew_heap_matches_model() {
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut heap = SkewHeap::new();
        let mut model: Vec<i64> = Vec::new();

        for _ in 0..STEPS {
            match rng.gen_range(0..4) {
                0 | 1 => {
                    let value = rng.gen_range(-40..40);
                    heap = heap.insert(value).unwrap().outcome.unwrap();
                    model.push(value);
                }
                2 => {
                    let run = heap.extract_min().unwrap();
                    match pop_min(&mut model) {
                        Some(expected) => {
                            let (min, rest) = run.outcome.unwrap();
                            assert_eq!(min, expected, "seed {seed}");
                            heap = rest;
                        }
                        None => {
                            assert_eq!(run.outcome.unwrap_err().kind, ErrorKind::EmptyHeap);
                        }
                    }
                }
                _ => {
                    let batch = random_batch(&mut rng);
                    let other = SkewHeap::from_values(&batch).unwrap();
                    heap = heap.meld(&other).unwrap().outcome.unwrap();
                    model.extend(batch);
                }
            }

            assert!(heap.is_heap_ordered(), "seed {seed}");
            assert_eq!(heap.len(), model.len(), "seed {seed}");
            assert_eq!(heap.peek(), model.iter().copied().min(), "seed {seed}");
        }
    }
}

#[test]
fn binomial_queue_matches_model() {
    for seed in 0..8 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut queue = BinomialQueue::new();
        let mut model: Vec<i64> = Vec::new();

        for _ in 0..STEPS {
            match rng.gen_range(0..4) {
                0 | 1 => {
                    let value = rng.gen_range(-40..40);
                    queue = queue.insert(value).unwrap().outcome.unwrap();
                    model.push(value);
                }
                2 => {
                    let run = queue.extract_min().unwrap();
                    match pop_min(&mut model) {
                        Some(expected) => {
                            let (min, rest) = run.outcome.unwrap();
                            assert_eq!(min, expected, "seed {seed}");
                            queue = rest;
                        }
                        None => {
                            assert_eq!(run.outcome.unwrap_err().kind, ErrorKind::EmptyQueue);
                        }
                    }
                }
                _ => {
                    let batch = random_batch(&mut rng);
                    let other = BinomialQueue::from_values(&batch).unwrap();
                    queue = queue.meld(&other).unwrap().outcome.unwrap();
                    model.extend(batch);
                }
            }

            assert!(queue.is_well_formed(), "seed {seed}");
            assert_eq!(queue.len(), model.len(), "seed {seed}");
            assert_eq!(queue.peek(), model.iter().copied().min(), "seed {seed}");
        }
    }
}
