//! Trace shape

use stepwise_dp::{DpPhase, Item, coin_change, house_robber, knapsack, lcs};

use crate::assert_well_formed;

#[test]
fn every_engine_produces_a_well_formed_trace() {
    assert_well_formed(
        &knapsack::solve(7, &[Item::new(3, 4), Item::new(4, 5)])
            .unwrap()
            .trace,
    );
    assert_well_formed(&lcs::solve("ABCB", "BDCAB").unwrap().trace);
    assert_well_formed(&coin_change::solve(7, &[2, 3]).unwrap().trace);
    assert_well_formed(&coin_change::solve(1, &[2]).unwrap().trace);
    assert_well_formed(&house_robber::solve(&[1, 2, 3, 1]).unwrap().trace);
}

#[test]
fn degenerate_inputs_still_trace() {
    assert_well_formed(&knapsack::solve(0, &[]).unwrap().trace);
    assert_well_formed(&lcs::solve("", "").unwrap().trace);
    assert_well_formed(&coin_change::solve(0, &[1]).unwrap().trace);
    assert_well_formed(&house_robber::solve(&[]).unwrap().trace);
}

#[test]
fn knapsack_decides_every_cell_past_column_zero() {
    let items = [Item::new(1, 1), Item::new(2, 2), Item::new(3, 3)];
    let trace = knapsack::solve(4, &items).unwrap().trace;
    let decided =
        trace.by_phase(DpPhase::DecisionMade).len() + trace.by_phase(DpPhase::TooHeavy).len();
    assert_eq!(decided, items.len() * 4);
}

#[test]
fn lcs_backtracking_starts_at_the_corner() {
    let trace = lcs::solve("ABC", "AC").unwrap().trace;
    let start = trace.by_phase(DpPhase::BacktrackStart);
    assert_eq!(start.len(), 1);
    assert_eq!(start[0].focus().to_string(), "(3,2)");
}

#[test]
fn early_snapshots_never_see_later_cells() {
    let trace = house_robber::solve(&[5, 1, 5]).unwrap().trace;
    let first = trace.first().unwrap();
    assert!(first.state_view().iter().all(|v| *v == 0));
    assert!(trace.last().unwrap().state_view().iter().any(|v| *v == 10));
}
