//! Longest common subsequence with traced reconstruction.
//!
//! `dp[i][j]` is the LCS length of the first `i` characters of `a` and the
//! first `j` characters of `b`. During reconstruction a mismatch moves up only
//! when the upper cell is strictly larger; otherwise it moves left.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Grid, Result};
use stepwise_trace::{Focus, Trace, TraceRecorder, Traced};

use crate::phase::DpPhase;
use crate::table::read;

/// Trace of an LCS run.
pub type LcsTrace = Trace<DpPhase, Grid<usize>, LcsProgress>;

/// Result and trace of an LCS run.
pub type LcsRun = Traced<LcsSolution, DpPhase, Grid<usize>, LcsProgress>;

/// Final LCS answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcsSolution {
    /// Length of the longest common subsequence.
    pub length: usize,
    /// One longest common subsequence.
    pub subsequence: String,
}

/// Partial answer carried on every snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcsProgress {
    /// Longest length found in the table so far.
    pub length: usize,
    /// Characters recovered so far, in final order.
    pub recovered: String,
}

impl fmt::Display for LcsProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "length {}", self.length)?;
        if !self.recovered.is_empty() {
            write!(f, ", \"{}\"", self.recovered)?;
        }
        Ok(())
    }
}

/// Computes an LCS of `a` and `b`, recording every cell and backward step.
///
/// Characters are compared as Unicode scalar values.
///
/// # Errors
///
/// Only fails on internal recorder misuse.
pub fn solve(a: &str, b: &str) -> Result<LcsRun> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    let _span = tracing::debug_span!("lcs", m, n).entered();

    let mut rec = TraceRecorder::new("lcs");
    let mut dp = Grid::filled(m + 1, n + 1, 0usize);
    let mut progress = LcsProgress::default();

    rec.record(
        DpPhase::Initialize,
        &dp,
        Focus::none(),
        format!(
            "Build a {}x{} table; an empty prefix has LCS length 0",
            m + 1,
            n + 1
        ),
        &progress,
    )?;

    for i in 1..=m {
        for j in 1..=n {
            if a[i - 1] == b[j - 1] {
                let value = read(&dp, i - 1, j - 1)? + 1;
                dp.set(i, j, value)?;
                progress.length = progress.length.max(value);
                rec.record(
                    DpPhase::Match,
                    &dp,
                    Focus::cell(i, j).with_cell(i - 1, j - 1),
                    format!(
                        "'{}' matches: dp[{i}][{j}] = dp[{}][{}] + 1 = {value}",
                        a[i - 1],
                        i - 1,
                        j - 1
                    ),
                    &progress,
                )?;
            } else {
                let up = read(&dp, i - 1, j)?;
                let left = read(&dp, i, j - 1)?;
                let value = up.max(left);
                dp.set(i, j, value)?;
                rec.record(
                    DpPhase::DecisionMade,
                    &dp,
                    Focus::cell(i, j).with_cell(i - 1, j).with_cell(i, j - 1),
                    format!(
                        "'{}' != '{}': dp[{i}][{j}] = max(up {up}, left {left}) = {value}",
                        a[i - 1],
                        b[j - 1]
                    ),
                    &progress,
                )?;
            }
        }
    }

    let length = read(&dp, m, n)?;
    rec.record(
        DpPhase::BacktrackStart,
        &dp,
        Focus::cell(m, n),
        format!("LCS length is dp[{m}][{n}] = {length}; walk back to recover it"),
        &progress,
    )?;

    let mut reversed = Vec::with_capacity(length);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        let focus = Focus::cell(i, j);
        let narrative = if a[i - 1] == b[j - 1] {
            reversed.push(a[i - 1]);
            progress.recovered = reversed.iter().rev().collect();
            let text = format!("'{}' is part of the LCS; move diagonally", a[i - 1]);
            i -= 1;
            j -= 1;
            text
        } else {
            let up = read(&dp, i - 1, j)?;
            let left = read(&dp, i, j - 1)?;
            if up > left {
                i -= 1;
                format!("up {up} > left {left}; move up")
            } else {
                j -= 1;
                format!("up {up} <= left {left}; move left")
            }
        };
        rec.record(DpPhase::Backtracking, &dp, focus, narrative, &progress)?;
    }

    let subsequence: String = reversed.iter().rev().collect();
    rec.record(
        DpPhase::Complete,
        &dp,
        Focus::cell(m, n),
        format!("LCS \"{subsequence}\" has length {length}"),
        &progress,
    )?;

    let trace = rec.finish()?;
    tracing::debug!(length, steps = trace.len(), "lcs solved");

    Ok(Traced::ok(
        LcsSolution {
            length,
            subsequence,
        },
        trace,
    ))
}
