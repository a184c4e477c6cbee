//! Named operations and their arguments.
//!
//! A front end names an operation (`knapsack`, `skew.insert`, ...) and passes
//! `key=value` arguments. [`Operation::from_name`] turns that into a typed
//! request; [`Operation::check_limits`] bounds it by the session's
//! [`Limits`].

use std::collections::BTreeMap;
use std::fmt;

use stepwise_dp::Item;
use stepwise_foundation::{Error, ErrorContext, Result};

use crate::config::Limits;
use crate::generate::InputGenerator;

/// Every operation name a session accepts.
pub const OPERATION_NAMES: [&str; 14] = [
    "knapsack",
    "lcs",
    "coin-change",
    "house-robber",
    "skew.insert",
    "skew.extract-min",
    "skew.find-min",
    "skew.meld",
    "skew.clear",
    "binomial.insert",
    "binomial.extract-min",
    "binomial.find-min",
    "binomial.meld",
    "binomial.clear",
];

/// Largest `random=N` count accepted before any input is generated.
///
/// Session limits still apply afterwards; this only keeps generation bounded.
pub const MAX_RANDOM_COUNT: usize = 10_000;

fn reject(operation: &str, field: Option<&str>, message: impl Into<String>) -> Error {
    let mut context = ErrorContext::new().with_operation(operation);
    if let Some(field) = field {
        context = context.with_field(field);
    }
    Error::invalid_input(message).with_context(context)
}

// =============================================================================
// Arguments
// =============================================================================

/// Arguments to a named operation: `key=value` pairs plus bare tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    named: BTreeMap<String, String>,
    positional: Vec<String>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses whitespace-separated tokens.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty key or a key given twice.
    pub fn parse(text: &str) -> Result<Self> {
        let mut args = Self::new();
        for token in text.split_whitespace() {
            match token.split_once('=') {
                Some(("", _)) => {
                    return Err(Error::invalid_input(format!("missing key in '{token}'")));
                }
                Some((key, value)) => {
                    if args.named.insert(key.to_string(), value.to_string()).is_some() {
                        return Err(Error::invalid_input(format!("'{key}' given twice")));
                    }
                }
                None => args.positional.push(token.to_string()),
            }
        }
        Ok(args)
    }

    /// Builder method to add a named argument.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Builder method to add a bare token.
    #[must_use]
    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Returns a named argument.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Returns the bare tokens, in order.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Returns true if there are no arguments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }

    fn allow_only(&self, operation: &str, keys: &[&str], positional: usize) -> Result<()> {
        if let Some(key) = self.named.keys().find(|k| !keys.contains(&k.as_str())) {
            return Err(reject(
                operation,
                Some(key),
                format!("{operation} does not take '{key}'"),
            ));
        }
        if self.positional.len() > positional {
            return Err(reject(
                operation,
                None,
                format!("unexpected argument '{}'", self.positional[positional]),
            ));
        }
        Ok(())
    }

    /// A named argument, falling back to the bare token at `index`.
    fn lookup(&self, key: &str, index: usize) -> Option<&str> {
        self.get(key)
            .or_else(|| self.positional.get(index).map(String::as_str))
    }

    fn require(&self, operation: &str, key: &str, index: usize) -> Result<&str> {
        self.lookup(key, index)
            .ok_or_else(|| reject(operation, Some(key), format!("{operation} needs {key}=...")))
    }

    fn int(&self, operation: &str, key: &str, index: usize) -> Result<i64> {
        parse_int(operation, key, self.require(operation, key, index)?)
    }

    fn int_list(&self, operation: &str, key: &str, index: usize) -> Result<Vec<i64>> {
        self.require(operation, key, index)?
            .split(',')
            .filter(|piece| !piece.is_empty())
            .map(|piece| parse_int(operation, key, piece))
            .collect()
    }

    /// `random=N seed=S`, if `random` was given.
    fn random(&self, operation: &str) -> Result<Option<(usize, InputGenerator)>> {
        let Some(count) = self.get("random") else {
            return Ok(None);
        };
        let count = count.parse::<usize>().map_err(|_| {
            reject(
                operation,
                Some("random"),
                format!("random must be a count, got '{count}'"),
            )
        })?;
        if count > MAX_RANDOM_COUNT {
            return Err(reject(
                operation,
                Some("random"),
                format!("random={count} exceeds the generator cap of {MAX_RANDOM_COUNT}"),
            ));
        }
        let seed = match self.get("seed") {
            Some(seed) => seed.parse::<u64>().map_err(|_| {
                reject(
                    operation,
                    Some("seed"),
                    format!("seed must be a non-negative integer, got '{seed}'"),
                )
            })?,
            None => 0,
        };
        Ok(Some((count, InputGenerator::new(seed))))
    }
}

fn parse_int(operation: &str, key: &str, text: &str) -> Result<i64> {
    text.trim().parse::<i64>().map_err(|_| {
        reject(
            operation,
            Some(key),
            format!("{key} must be an integer, got '{text}'"),
        )
    })
}

// =============================================================================
// Operations
// =============================================================================

/// Which mergeable heap an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeapKind {
    /// The session's skew heap.
    Skew,
    /// The session's binomial queue.
    Binomial,
}

impl HeapKind {
    /// Returns the prefix used in operation names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Skew => "skew",
            Self::Binomial => "binomial",
        }
    }
}

/// An operation on one of the session's heaps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapCommand {
    /// Insert one value.
    Insert(i64),
    /// Remove and report the minimum.
    ExtractMin,
    /// Report the minimum without removing it.
    FindMin,
    /// Meld with a heap built from these values.
    Meld(Vec<i64>),
    /// Remove everything.
    Clear,
}

impl HeapCommand {
    /// Returns the suffix used in operation names.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::ExtractMin => "extract-min",
            Self::FindMin => "find-min",
            Self::Meld(_) => "meld",
            Self::Clear => "clear",
        }
    }

    /// Returns how many elements the command adds to the heap.
    #[must_use]
    pub fn added(&self) -> usize {
        match self {
            Self::Insert(_) => 1,
            Self::Meld(values) => values.len(),
            Self::ExtractMin | Self::FindMin | Self::Clear => 0,
        }
    }

    fn parse(kind: HeapKind, suffix: &str, name: &str, args: &Args) -> Result<Option<Self>> {
        let command = match suffix {
            "insert" => {
                args.allow_only(name, &["value"], 1)?;
                Self::Insert(args.int(name, "value", 0)?)
            }
            "extract-min" | "find-min" | "clear" => {
                args.allow_only(name, &[], 0)?;
                match suffix {
                    "extract-min" => Self::ExtractMin,
                    "find-min" => Self::FindMin,
                    _ => Self::Clear,
                }
            }
            "meld" => {
                args.allow_only(name, &["values", "random", "seed"], 1)?;
                match args.random(name)? {
                    Some((count, mut generator)) => Self::Meld(generator.values(count, 0, 99)),
                    None => Self::Meld(args.int_list(name, "values", 0)?),
                }
            }
            _ => return Ok(None),
        };
        tracing::trace!(heap = kind.prefix(), command = command.suffix(), "heap command parsed");
        Ok(Some(command))
    }
}

/// A fully parsed request for one engine run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// 0/1 knapsack.
    Knapsack {
        /// Bag capacity.
        capacity: i64,
        /// Candidate items.
        items: Vec<Item>,
    },
    /// Longest common subsequence.
    Lcs {
        /// First string.
        a: String,
        /// Second string.
        b: String,
    },
    /// Fewest coins for an amount.
    CoinChange {
        /// Target amount.
        amount: i64,
        /// Available denominations.
        coins: Vec<i64>,
    },
    /// Best non-adjacent sum.
    HouseRobber {
        /// Money in each house.
        houses: Vec<i64>,
    },
    /// An operation on a heap.
    Heap(HeapKind, HeapCommand),
}

impl Operation {
    /// Parses a named operation.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperation` for a name not in [`OPERATION_NAMES`], and
    /// `InvalidInput` for missing, malformed, or unexpected arguments.
    pub fn from_name(name: &str, args: &Args) -> Result<Self> {
        match name {
            "knapsack" => Self::knapsack(args),
            "lcs" => Self::lcs(args),
            "coin-change" => Self::coin_change(args),
            "house-robber" => Self::house_robber(args),
            _ => {
                let parsed = match name.split_once('.') {
                    Some(("skew", suffix)) => HeapCommand::parse(HeapKind::Skew, suffix, name, args)?
                        .map(|c| Self::Heap(HeapKind::Skew, c)),
                    Some(("binomial", suffix)) => {
                        HeapCommand::parse(HeapKind::Binomial, suffix, name, args)?
                            .map(|c| Self::Heap(HeapKind::Binomial, c))
                    }
                    _ => None,
                };
                parsed.ok_or_else(|| Error::unknown_operation(name))
            }
        }
    }

    fn knapsack(args: &Args) -> Result<Self> {
        const NAME: &str = "knapsack";
        args.allow_only(NAME, &["capacity", "weights", "values", "random", "seed"], 0)?;

        if let Some((count, mut generator)) = args.random(NAME)? {
            let items = generator.items(count);
            let capacity = match args.get("capacity") {
                Some(text) => parse_int(NAME, "capacity", text)?,
                None => (items.iter().map(|i| i.weight).sum::<i64>() / 2).max(1),
            };
            return Ok(Self::Knapsack { capacity, items });
        }

        let capacity = args.int(NAME, "capacity", usize::MAX)?;
        let weights = args.int_list(NAME, "weights", usize::MAX)?;
        let values = args.int_list(NAME, "values", usize::MAX)?;
        if weights.len() != values.len() {
            return Err(reject(
                NAME,
                Some("values"),
                format!(
                    "{} weights but {} values",
                    weights.len(),
                    values.len()
                ),
            ));
        }
        let items = weights
            .into_iter()
            .zip(values)
            .map(|(w, v)| Item::new(w, v))
            .collect();
        Ok(Self::Knapsack { capacity, items })
    }

    fn lcs(args: &Args) -> Result<Self> {
        const NAME: &str = "lcs";
        args.allow_only(NAME, &["a", "b", "random", "seed"], 2)?;

        if let Some((len, mut generator)) = args.random(NAME)? {
            let a = generator.sequence(len);
            let b = generator.sequence(len);
            return Ok(Self::Lcs { a, b });
        }

        Ok(Self::Lcs {
            a: args.require(NAME, "a", 0)?.to_string(),
            b: args.require(NAME, "b", 1)?.to_string(),
        })
    }

    fn coin_change(args: &Args) -> Result<Self> {
        const NAME: &str = "coin-change";
        args.allow_only(NAME, &["amount", "coins", "random", "seed"], 0)?;

        if let Some((count, mut generator)) = args.random(NAME)? {
            let coins = generator.coins(count.max(1));
            let amount = match args.get("amount") {
                Some(text) => parse_int(NAME, "amount", text)?,
                None => generator.value(1, 50),
            };
            return Ok(Self::CoinChange { amount, coins });
        }

        Ok(Self::CoinChange {
            amount: args.int(NAME, "amount", usize::MAX)?,
            coins: args.int_list(NAME, "coins", usize::MAX)?,
        })
    }

    fn house_robber(args: &Args) -> Result<Self> {
        const NAME: &str = "house-robber";
        args.allow_only(NAME, &["houses", "random", "seed"], 1)?;

        if let Some((count, mut generator)) = args.random(NAME)? {
            return Ok(Self::HouseRobber {
                houses: generator.values(count, 0, 20),
            });
        }

        Ok(Self::HouseRobber {
            houses: args.int_list(NAME, "houses", 0)?,
        })
    }

    /// Returns the operation's name, as accepted by [`Operation::from_name`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Knapsack { .. } => "knapsack",
            Self::Lcs { .. } => "lcs",
            Self::CoinChange { .. } => "coin-change",
            Self::HouseRobber { .. } => "house-robber",
            Self::Heap(HeapKind::Skew, command) => match command {
                HeapCommand::Insert(_) => "skew.insert",
                HeapCommand::ExtractMin => "skew.extract-min",
                HeapCommand::FindMin => "skew.find-min",
                HeapCommand::Meld(_) => "skew.meld",
                HeapCommand::Clear => "skew.clear",
            },
            Self::Heap(HeapKind::Binomial, command) => match command {
                HeapCommand::Insert(_) => "binomial.insert",
                HeapCommand::ExtractMin => "binomial.extract-min",
                HeapCommand::FindMin => "binomial.find-min",
                HeapCommand::Meld(_) => "binomial.meld",
                HeapCommand::Clear => "binomial.clear",
            },
        }
    }

    /// Checks the operation against structural limits.
    ///
    /// `heap_len` is the current size of the targeted heap and is ignored for
    /// the dynamic-programming operations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first limit exceeded.
    pub fn check_limits(&self, limits: &Limits, heap_len: usize) -> Result<()> {
        let name = self.name();
        let over = |field: &str, message: String| Err(reject(name, Some(field), message));

        match self {
            Self::Knapsack { capacity, items } => {
                if *capacity > limits.max_capacity {
                    return over(
                        "capacity",
                        format!("capacity {capacity} exceeds the limit of {}", limits.max_capacity),
                    );
                }
                if items.len() > limits.max_items {
                    return over(
                        "weights",
                        format!("{} items exceed the limit of {}", items.len(), limits.max_items),
                    );
                }
            }
            Self::Lcs { a, b } => {
                let longest = a.chars().count().max(b.chars().count());
                if longest > limits.max_sequence_len {
                    return over(
                        "a",
                        format!(
                            "a {longest}-character input exceeds the limit of {}",
                            limits.max_sequence_len
                        ),
                    );
                }
            }
            Self::CoinChange { amount, coins } => {
                if *amount > limits.max_amount {
                    return over(
                        "amount",
                        format!("amount {amount} exceeds the limit of {}", limits.max_amount),
                    );
                }
                if coins.len() > limits.max_items {
                    return over(
                        "coins",
                        format!("{} coins exceed the limit of {}", coins.len(), limits.max_items),
                    );
                }
            }
            Self::HouseRobber { houses } => {
                if houses.len() > limits.max_houses {
                    return over(
                        "houses",
                        format!("{} houses exceed the limit of {}", houses.len(), limits.max_houses),
                    );
                }
            }
            Self::Heap(_, command) => {
                let size = heap_len + command.added();
                if size > limits.max_heap_size {
                    return over(
                        "values",
                        format!(
                            "the heap would hold {size} elements, over the limit of {}",
                            limits.max_heap_size
                        ),
                    );
                }
            }
        }
        Ok(())
    }
}

fn join(values: impl IntoIterator<Item = i64>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self {
            Self::Knapsack { capacity, items } => write!(
                f,
                " capacity={capacity} weights={} values={}",
                join(items.iter().map(|i| i.weight)),
                join(items.iter().map(|i| i.value))
            ),
            Self::Lcs { a, b } => write!(f, " a={a} b={b}"),
            Self::CoinChange { amount, coins } => {
                write!(f, " amount={amount} coins={}", join(coins.iter().copied()))
            }
            Self::HouseRobber { houses } => write!(f, " houses={}", join(houses.iter().copied())),
            Self::Heap(_, HeapCommand::Insert(value)) => write!(f, " value={value}"),
            Self::Heap(_, HeapCommand::Meld(values)) => {
                write!(f, " values={}", join(values.iter().copied()))
            }
            Self::Heap(_, _) => Ok(()),
        }
    }
}
