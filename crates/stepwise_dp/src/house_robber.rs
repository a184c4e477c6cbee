//! House robber (no two adjacent houses) with traced reconstruction.
//!
//! `dp[i]` is the most money from houses `0..=i`. A house is robbed when
//! `value[i] + dp[i-2]` is at least `dp[i-1]`, so ties prefer robbing. The
//! backward walk checks the same equality and therefore reports exactly the
//! houses the forward pass chose.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, ErrorContext, Result, Row};
use stepwise_trace::{Focus, Mark, Trace, TraceRecorder, Traced};

use crate::phase::DpPhase;
use crate::table::read_row;

/// Trace of a house robber run.
pub type RobberTrace = Trace<DpPhase, Row<i64>, RobberProgress>;

/// Result and trace of a house robber run.
pub type RobberRun = Traced<RobberSolution, DpPhase, Row<i64>, RobberProgress>;

/// Final house robber answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobberSolution {
    /// Most money obtainable.
    pub max_money: i64,
    /// Robbed house indices, ascending.
    pub robbed: Vec<usize>,
}

/// Partial answer carried on every snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobberProgress {
    /// Best total so far.
    pub best: i64,
    /// Houses identified during reconstruction, in walk order.
    pub robbed: Vec<usize>,
}

impl fmt::Display for RobberProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "best {}", self.best)?;
        if !self.robbed.is_empty() {
            write!(f, ", robbed {:?}", self.robbed)?;
        }
        Ok(())
    }
}

fn reject(message: String) -> Error {
    Error::invalid_input(message).with_context(ErrorContext::new().with_operation("house-robber"))
}

fn validate(houses: &[i64]) -> Result<()> {
    if let Some((index, value)) = houses.iter().enumerate().find(|(_, v)| **v < 0) {
        return Err(reject(format!("house {index} has negative value {value}")));
    }
    if houses
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
        .is_none()
    {
        return Err(reject("total house value overflows".to_string()));
    }
    Ok(())
}

/// `dp[i - 2]`, or 0 before the first house.
fn two_back(dp: &Row<i64>, i: usize) -> Result<i64> {
    if i >= 2 { read_row(dp, i - 2) } else { Ok(0) }
}

/// `dp[i - 1]`, or 0 before the first house.
fn one_back(dp: &Row<i64>, i: usize) -> Result<i64> {
    if i >= 1 { read_row(dp, i - 1) } else { Ok(0) }
}

/// Maximizes the money robbed from a row of houses without robbing two
/// neighbours.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative house value.
pub fn solve(houses: &[i64]) -> Result<RobberRun> {
    validate(houses)?;
    let n = houses.len();
    let _span = tracing::debug_span!("house_robber", houses = n).entered();

    let mut rec = TraceRecorder::new("house-robber");
    let mut dp = Row::filled(n, 0i64);
    let mut progress = RobberProgress::default();

    rec.record(
        DpPhase::Initialize,
        &dp,
        Focus::none(),
        format!("{n} houses; dp[i] will hold the best total from houses 0..=i"),
        &progress,
    )?;

    for (i, &value) in houses.iter().enumerate() {
        let rob = value + two_back(&dp, i)?;
        let skip = one_back(&dp, i)?;

        let mut focus = Focus::index(i);
        if i >= 1 {
            focus = focus.with(Mark::Index(i - 1));
        }
        if i >= 2 {
            focus = focus.with(Mark::Index(i - 2));
        }
        rec.record(
            DpPhase::Comparing,
            &dp,
            focus,
            format!("House {i}: rob = {value} + {} = {rob}, skip = {skip}", rob - value),
            &progress,
        )?;

        let (chosen, narrative) = if rob >= skip {
            (rob, format!("Rob house {i}: dp[{i}] = {rob}"))
        } else {
            (skip, format!("Skip house {i}: dp[{i}] = {skip}"))
        };
        dp.set(i, chosen)?;
        progress.best = chosen;
        rec.record(
            DpPhase::DecisionMade,
            &dp,
            Focus::index(i),
            narrative,
            &progress,
        )?;
    }

    let max_money = if n == 0 { 0 } else { read_row(&dp, n - 1)? };
    rec.record(
        DpPhase::BacktrackStart,
        &dp,
        if n == 0 {
            Focus::none()
        } else {
            Focus::index(n - 1)
        },
        format!("Best total is {max_money}; walk back to find the robbed houses"),
        &progress,
    )?;

    let mut i = n;
    while i > 0 {
        let k = i - 1;
        let here = read_row(&dp, k)?;
        let robbed = here == houses[k] + two_back(&dp, k)?;
        let narrative = if robbed {
            progress.robbed.push(k);
            i = i.saturating_sub(2);
            format!("dp[{k}] = {here} includes house {k}; jump two back")
        } else {
            i -= 1;
            format!("dp[{k}] = {here} equals dp[{}]; house {k} was skipped", k - 1)
        };
        rec.record(
            DpPhase::Backtracking,
            &dp,
            Focus::index(k),
            narrative,
            &progress,
        )?;
    }

    let mut robbed = progress.robbed.clone();
    robbed.reverse();
    rec.record(
        DpPhase::Complete,
        &dp,
        Focus::none(),
        format!("Rob houses {robbed:?} for {max_money}"),
        &progress,
    )?;

    let trace = rec.finish()?;
    tracing::debug!(max_money, steps = trace.len(), "house robber solved");

    Ok(Traced::ok(RobberSolution { max_money, robbed }, trace))
}
