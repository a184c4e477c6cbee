//! 0/1 knapsack with traced reconstruction.
//!
//! Table `dp[i][w]` holds the best value using the first `i` items within
//! capacity `w`. Inclusion needs a strictly larger value, so ties keep the
//! item out; the reconstruction relies on that to decide which items are
//! reported.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, ErrorContext, ErrorKind, Grid, Result};
use stepwise_trace::{Focus, Trace, TraceRecorder, Traced};

use crate::phase::DpPhase;
use crate::table::{read, to_index};

/// Trace of a knapsack run.
pub type KnapsackTrace = Trace<DpPhase, Grid<i64>, KnapsackProgress>;

/// Result and trace of a knapsack run.
pub type KnapsackRun = Traced<KnapsackSolution, DpPhase, Grid<i64>, KnapsackProgress>;

/// An input item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Weight, must be positive.
    pub weight: i64,
    /// Value, must be non-negative.
    pub value: i64,
}

impl Item {
    /// Creates an item.
    #[must_use]
    pub const fn new(weight: i64, value: i64) -> Self {
        Self { weight, value }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(w={}, v={})", self.weight, self.value)
    }
}

/// An item reported in the solution, with its position in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectedItem {
    /// Zero-based index in the input list.
    pub index: usize,
    /// The item itself.
    pub item: Item,
}

/// Final knapsack answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnapsackSolution {
    /// Best achievable value, `dp[n][W]`.
    pub max_value: i64,
    /// Sum of the selected weights.
    pub total_weight: i64,
    /// Selected items in reconstruction order (highest input index first).
    pub selected: Vec<SelectedItem>,
}

/// Partial answer carried on every snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnapsackProgress {
    /// Largest cell value computed so far.
    pub best: i64,
    /// Input indices selected so far during reconstruction.
    pub selected: Vec<usize>,
}

impl fmt::Display for KnapsackProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "best {}", self.best)?;
        if !self.selected.is_empty() {
            write!(f, ", taken {:?}", self.selected)?;
        }
        Ok(())
    }
}

fn reject(message: String) -> Error {
    Error::invalid_input(message).with_context(ErrorContext::new().with_operation("knapsack"))
}

fn validate(capacity: i64, items: &[Item]) -> Result<()> {
    if capacity < 0 {
        return Err(reject(format!("capacity must be non-negative, got {capacity}")));
    }
    for (index, item) in items.iter().enumerate() {
        if item.weight <= 0 {
            return Err(reject(format!(
                "item {index} has non-positive weight {}",
                item.weight
            )));
        }
        if item.value < 0 {
            return Err(reject(format!("item {index} has negative value {}", item.value)));
        }
    }
    if items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.value))
        .is_none()
    {
        return Err(reject("total item value overflows".to_string()));
    }
    Ok(())
}

/// Solves 0/1 knapsack, recording every cell and every reconstruction step.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative capacity, a non-positive weight, or
/// a negative value. No trace is produced in that case.
pub fn solve(capacity: i64, items: &[Item]) -> Result<KnapsackRun> {
    validate(capacity, items)?;
    let _span = tracing::debug_span!("knapsack", capacity, items = items.len()).entered();

    let n = items.len();
    let cap = to_index(capacity);
    let mut rec = TraceRecorder::new("knapsack");
    let mut dp = Grid::filled(n + 1, cap + 1, 0i64);
    let mut progress = KnapsackProgress::default();

    rec.record(
        DpPhase::Initialize,
        &dp,
        Focus::none(),
        format!(
            "Build a {}x{} table for {n} items and capacity {capacity}; row 0 and column 0 are 0",
            n + 1,
            cap + 1
        ),
        &progress,
    )?;

    for i in 1..=n {
        let item = items[i - 1];
        let weight = to_index(item.weight);

        for w in 1..=cap {
            let exclude = read(&dp, i - 1, w)?;

            if weight > w {
                dp.set(i, w, exclude)?;
                rec.record(
                    DpPhase::TooHeavy,
                    &dp,
                    Focus::cell(i, w).with_cell(i - 1, w),
                    format!(
                        "Item {} weighs {} > {w}; carry dp[{}][{w}] = {exclude} down",
                        i - 1,
                        item.weight,
                        i - 1
                    ),
                    &progress,
                )?;
                continue;
            }

            let rest = read(&dp, i - 1, w - weight)?;
            let include = item.value + rest;
            rec.record(
                DpPhase::Comparing,
                &dp,
                Focus::cell(i, w)
                    .with_cell(i - 1, w)
                    .with_cell(i - 1, w - weight),
                format!(
                    "Item {} at capacity {w}: include = {} + dp[{}][{}] = {include}, exclude = dp[{}][{w}] = {exclude}",
                    i - 1,
                    item.value,
                    i - 1,
                    w - weight,
                    i - 1
                ),
                &progress,
            )?;

            let narrative = if include > exclude {
                format!("Include item {}: {include} > {exclude}", i - 1)
            } else {
                format!("Exclude item {}: {exclude} >= {include}", i - 1)
            };
            let chosen = include.max(exclude);
            dp.set(i, w, chosen)?;
            progress.best = progress.best.max(chosen);
            rec.record(
                DpPhase::DecisionMade,
                &dp,
                Focus::cell(i, w),
                narrative,
                &progress,
            )?;
        }
    }

    let max_value = read(&dp, n, cap)?;
    rec.record(
        DpPhase::BacktrackStart,
        &dp,
        Focus::cell(n, cap),
        format!("Best value is dp[{n}][{cap}] = {max_value}; walk back to find the items"),
        &progress,
    )?;

    let mut selected = Vec::new();
    let (mut i, mut w) = (n, cap);
    while i > 0 && w > 0 {
        let here = read(&dp, i, w)?;
        let above = read(&dp, i - 1, w)?;
        let item = items[i - 1];
        let focus = Focus::cell(i, w).with_cell(i - 1, w);

        let narrative = if here == above {
            format!(
                "dp[{i}][{w}] = dp[{}][{w}] = {here}: item {} was not taken",
                i - 1,
                i - 1
            )
        } else {
            let before = w;
            w = w.checked_sub(to_index(item.weight)).ok_or_else(|| {
                Error::new(ErrorKind::Internal(format!(
                    "item {} taken at capacity {before} but weighs {}",
                    i - 1,
                    item.weight
                )))
            })?;
            selected.push(SelectedItem { index: i - 1, item });
            progress.selected.push(i - 1);
            format!(
                "dp[{i}][{before}] = {here} differs from dp[{}][{before}] = {above}: take item {}, capacity left {w}",
                i - 1,
                i - 1
            )
        };
        rec.record(DpPhase::Backtracking, &dp, focus, narrative, &progress)?;
        i -= 1;
    }

    let total_weight = selected.iter().map(|s| s.item.weight).sum();
    rec.record(
        DpPhase::Complete,
        &dp,
        Focus::cell(n, cap),
        format!(
            "Selected {} items with total weight {total_weight} and value {max_value}",
            selected.len()
        ),
        &progress,
    )?;

    let trace = rec.finish()?;
    tracing::debug!(max_value, steps = trace.len(), "knapsack solved");

    Ok(Traced::ok(
        KnapsackSolution {
            max_value,
            total_weight,
            selected,
        },
        trace,
    ))
}
