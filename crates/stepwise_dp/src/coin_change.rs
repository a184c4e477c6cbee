//! Minimum coin change with traced reconstruction.
//!
//! `dp[a]` is the fewest coins summing to `a`, or unreachable. Each amount
//! also remembers the coin that produced its best count; reconstruction
//! follows those coins back from the target. The first coin in input order
//! wins ties.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use stepwise_foundation::{Error, ErrorContext, ErrorKind, Result, Row};
use stepwise_trace::{Focus, Mark, Trace, TraceRecorder, Traced};

use crate::phase::DpPhase;
use crate::table::{read_row, to_index};

/// Trace of a coin change run.
pub type CoinChangeTrace = Trace<DpPhase, CoinTable, CoinProgress>;

/// Result and trace of a coin change run.
pub type CoinChangeRun = Traced<CoinChange, DpPhase, CoinTable, CoinProgress>;

// ============================================================================
// Table
// ============================================================================

/// Fewest coins for one amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Reach {
    /// Reachable with this many coins.
    Coins(usize),
    /// No combination sums to the amount.
    Unreachable,
}

impl Reach {
    /// Number of coins, if reachable.
    #[must_use]
    pub const fn count(self) -> Option<usize> {
        match self {
            Self::Coins(n) => Some(n),
            Self::Unreachable => None,
        }
    }

    /// Returns true if `self` needs strictly fewer coins than `other`.
    #[must_use]
    pub const fn beats(self, other: Self) -> bool {
        match (self, other) {
            (Self::Coins(a), Self::Coins(b)) => a < b,
            (Self::Coins(_), Self::Unreachable) => true,
            (Self::Unreachable, _) => false,
        }
    }
}

impl fmt::Display for Reach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coins(n) => write!(f, "{n}"),
            Self::Unreachable => f.write_str("∞"),
        }
    }
}

/// State shown on every coin change snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoinTable {
    /// `min_coins[a]` for every amount `0..=target`.
    pub min_coins: Row<Reach>,
    /// The coin that produced `min_coins[a]`, if any.
    pub last_coin: Row<Option<i64>>,
}

impl CoinTable {
    fn new(amount: usize) -> Self {
        Self {
            min_coins: std::iter::once(Reach::Coins(0))
                .chain(std::iter::repeat_n(Reach::Unreachable, amount))
                .collect(),
            last_coin: Row::filled(amount + 1, None),
        }
    }
}

impl fmt::Display for CoinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "min  {}", self.min_coins)?;
        write!(f, "via  [")?;
        for (i, coin) in self.last_coin.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match coin {
                Some(c) => write!(f, "{c}")?,
                None => f.write_str("-")?,
            }
        }
        f.write_str("]")
    }
}

// ============================================================================
// Results
// ============================================================================

/// Final coin change answer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoinChange {
    /// The amount can be made.
    Possible {
        /// Fewest coins needed.
        count: usize,
        /// One optimal multiset, in reconstruction order.
        coins: Vec<i64>,
    },
    /// No combination of the coins sums to the amount.
    Impossible,
}

impl CoinChange {
    /// Fewest coins, if possible.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Possible { count, .. } => Some(*count),
            Self::Impossible => None,
        }
    }
}

/// Partial answer carried on every snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoinProgress {
    /// Best count for the amount most recently decided.
    pub current: Reach,
    /// Coins collected so far during reconstruction.
    pub coins: Vec<i64>,
}

impl Default for CoinProgress {
    fn default() -> Self {
        Self {
            current: Reach::Coins(0),
            coins: Vec::new(),
        }
    }
}

impl fmt::Display for CoinProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "current {}", self.current)?;
        if !self.coins.is_empty() {
            write!(f, ", coins {:?}", self.coins)?;
        }
        Ok(())
    }
}

// ============================================================================
// Engine
// ============================================================================

fn reject(message: String) -> Error {
    Error::invalid_input(message).with_context(ErrorContext::new().with_operation("coin-change"))
}

fn validate(amount: i64, coins: &[i64]) -> Result<()> {
    if amount < 0 {
        return Err(reject(format!("amount must be non-negative, got {amount}")));
    }
    if coins.is_empty() {
        return Err(reject("at least one coin denomination is required".to_string()));
    }
    if let Some((index, coin)) = coins.iter().enumerate().find(|(_, c)| **c <= 0) {
        return Err(reject(format!("coin {index} has non-positive value {coin}")));
    }
    Ok(())
}

/// Finds the fewest coins summing to `amount`.
///
/// An unreachable amount is not an error: the run completes with
/// [`CoinChange::Impossible`].
///
/// # Errors
///
/// Returns `InvalidInput` for a negative amount, an empty coin list, or a
/// non-positive coin.
pub fn solve(amount: i64, coins: &[i64]) -> Result<CoinChangeRun> {
    validate(amount, coins)?;
    let _span = tracing::debug_span!("coin_change", amount, coins = coins.len()).entered();

    let target = to_index(amount);
    let mut rec = TraceRecorder::new("coin-change");
    let mut table = CoinTable::new(target);
    let mut progress = CoinProgress::default();

    rec.record(
        DpPhase::Initialize,
        &table,
        Focus::index(0),
        format!("Amounts 0..={amount}: dp[0] = 0, every other amount starts unreachable"),
        &progress,
    )?;

    for a in 1..=target {
        let mut best = Reach::Unreachable;
        let mut via = None;

        for &coin in coins {
            let step = to_index(coin);
            if step > a {
                continue;
            }
            let prev = read_row(&table.min_coins, a - step)?;
            let narrative = match prev {
                Reach::Coins(n) => {
                    let candidate = Reach::Coins(n + 1);
                    let text = format!(
                        "Amount {a}, coin {coin}: dp[{}] + 1 = {candidate} vs best {best}",
                        a - step
                    );
                    if candidate.beats(best) {
                        best = candidate;
                        via = Some(coin);
                    }
                    text
                }
                Reach::Unreachable => {
                    format!("Amount {a}, coin {coin}: dp[{}] is unreachable", a - step)
                }
            };
            rec.record(
                DpPhase::Comparing,
                &table,
                Focus::index(a).with(Mark::Index(a - step)),
                narrative,
                &progress,
            )?;
        }

        table.min_coins.set(a, best)?;
        table.last_coin.set(a, via)?;
        progress.current = best;

        let (phase, narrative) = match via {
            Some(coin) => (
                DpPhase::DecisionMade,
                format!("dp[{a}] = {best} using coin {coin}"),
            ),
            None => (DpPhase::Unreachable, format!("Amount {a} cannot be made")),
        };
        rec.record(phase, &table, Focus::index(a), narrative, &progress)?;
    }

    let outcome = match read_row(&table.min_coins, target)? {
        Reach::Unreachable => {
            rec.record(
                DpPhase::Complete,
                &table,
                Focus::index(target),
                format!("Amount {amount} cannot be made from {coins:?}"),
                &progress,
            )?;
            CoinChange::Impossible
        }
        Reach::Coins(count) => {
            rec.record(
                DpPhase::BacktrackStart,
                &table,
                Focus::index(target),
                format!("dp[{amount}] = {count}; follow the recorded coins back to 0"),
                &progress,
            )?;

            let mut a = target;
            while a > 0 {
                let coin = read_row(&table.last_coin, a)?.ok_or_else(|| {
                    Error::new(ErrorKind::Internal(format!(
                        "reachable amount {a} has no recorded coin"
                    )))
                })?;
                let next = a - to_index(coin);
                progress.coins.push(coin);
                rec.record(
                    DpPhase::Backtracking,
                    &table,
                    Focus::index(a).with(Mark::Index(next)),
                    format!("Take coin {coin}: amount {a} -> {next}"),
                    &progress,
                )?;
                a = next;
            }

            rec.record(
                DpPhase::Complete,
                &table,
                Focus::index(target),
                format!("{amount} = {count} coins {:?}", progress.coins),
                &progress,
            )?;
            CoinChange::Possible {
                count,
                coins: progress.coins.clone(),
            }
        }
    };

    let trace = rec.finish()?;
    tracing::debug!(count = ?outcome.count(), steps = trace.len(), "coin change solved");

    Ok(Traced::ok(outcome, trace))
}
