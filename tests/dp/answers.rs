//! Known instances

use stepwise_dp::{CoinChange, Item, coin_change, house_robber, knapsack, lcs};

// =============================================================================
// Knapsack
// =============================================================================

#[test]
fn knapsack_textbook_instance() {
    let items = [Item::new(2, 3), Item::new(3, 4), Item::new(4, 5), Item::new(5, 6)];
    let solution = knapsack::solve(5, &items).unwrap().outcome.unwrap();

    assert_eq!(solution.max_value, 7);
    assert_eq!(solution.total_weight, 5);
    let mut indices: Vec<_> = solution.selected.iter().map(|s| s.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn knapsack_full_capacity() {
    let items = [Item::new(2, 3), Item::new(3, 4), Item::new(4, 5), Item::new(5, 6)];
    let run = knapsack::solve(10, &items).unwrap();
    let solution = run.outcome.unwrap();

    assert_eq!(solution.max_value, 13);
    assert_eq!(run.trace.last().unwrap().state_view().get(4, 10), Some(&13));
}

// =============================================================================
// LCS
// =============================================================================

#[test]
fn lcs_textbook_instance() {
    let solution = lcs::solve("ABCDGH", "AEDFHR").unwrap().outcome.unwrap();
    assert_eq!(solution.length, 3);
    assert_eq!(solution.subsequence, "ADH");
}

#[test]
fn lcs_with_an_empty_side() {
    let solution = lcs::solve("", "ABC").unwrap().outcome.unwrap();
    assert_eq!(solution.length, 0);
    assert_eq!(solution.subsequence, "");
}

// =============================================================================
// Coin Change
// =============================================================================

#[test]
fn coin_change_beats_greedy() {
    let outcome = coin_change::solve(6, &[1, 3, 4]).unwrap().outcome.unwrap();
    assert_eq!(outcome.count(), Some(2));
}

#[test]
fn coin_change_eleven() {
    let outcome = coin_change::solve(11, &[1, 2, 5]).unwrap().outcome.unwrap();
    assert_eq!(outcome.count(), Some(3));
    if let CoinChange::Possible { coins, .. } = outcome {
        assert_eq!(coins.iter().sum::<i64>(), 11);
    }
}

#[test]
fn coin_change_greedy_trap() {
    let outcome = coin_change::solve(11, &[1, 4, 5]).unwrap().outcome.unwrap();
    assert_eq!(outcome.count(), Some(3));
    assert_eq!(
        coin_change::solve(3, &[4, 5]).unwrap().outcome.unwrap(),
        CoinChange::Impossible
    );
}

#[test]
fn coin_change_impossible_is_not_an_error() {
    let run = coin_change::solve(3, &[2]).unwrap();
    assert!(!run.is_failure());
    assert_eq!(run.outcome.unwrap(), CoinChange::Impossible);
    assert!(run.trace.last().unwrap().narrative().contains("cannot be made"));
}

// =============================================================================
// House Robber
// =============================================================================

#[test]
fn house_robber_textbook_instance() {
    let solution = house_robber::solve(&[2, 7, 9, 3, 1]).unwrap().outcome.unwrap();
    assert_eq!(solution.max_money, 12);
    assert_eq!(solution.robbed, vec![0, 2, 4]);
}

#[test]
fn house_robber_final_progress_matches_answer() {
    let run = house_robber::solve(&[2, 7, 9, 3, 1]).unwrap();
    let last = run.trace.last().unwrap();
    assert_eq!(last.result_so_far().best, 12);
    assert_eq!(last.state_view().get(4), Some(&12));
}

// =============================================================================
// Rejected Input
// =============================================================================

#[test]
fn invalid_input_produces_no_trace() {
    assert!(knapsack::solve(-1, &[]).is_err());
    assert!(knapsack::solve(3, &[Item::new(0, 1)]).is_err());
    assert!(coin_change::solve(-5, &[1]).is_err());
    assert!(coin_change::solve(5, &[]).is_err());
    assert!(coin_change::solve(5, &[0, 1]).is_err());
    assert!(house_robber::solve(&[1, -1]).is_err());
}
