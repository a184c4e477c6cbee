//! Configuration for playback and engine input limits.

use std::time::Duration;

use stepwise_playback::DEFAULT_INTERVAL;

// =============================================================================
// Playback
// =============================================================================

/// Configuration for automatic playback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Delay between automatic steps.
    pub interval: Duration,

    /// Whether a freshly triggered operation starts playing immediately.
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            autoplay: true,
        }
    }
}

impl PlaybackConfig {
    /// Creates a configuration that never plays on its own.
    #[must_use]
    pub fn manual() -> Self {
        Self {
            autoplay: false,
            ..Self::default()
        }
    }

    /// Builder method to set the playback interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Builder method to set the playback interval in milliseconds.
    #[must_use]
    pub fn with_interval_ms(self, millis: u64) -> Self {
        self.with_interval(Duration::from_millis(millis))
    }

    /// Builder method to set autoplay.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Structural bounds on engine inputs.
///
/// These only constrain what a session will hand to an engine; the engines
/// themselves accept anything well-formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Largest knapsack capacity.
    pub max_capacity: i64,

    /// Most knapsack items or coin denominations.
    pub max_items: usize,

    /// Largest coin change amount.
    pub max_amount: i64,

    /// Longest LCS input string, in characters.
    pub max_sequence_len: usize,

    /// Most houses in a house robber row.
    pub max_houses: usize,

    /// Most elements a heap may hold after an operation.
    pub max_heap_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_capacity: 50,
            max_items: 12,
            max_amount: 100,
            max_sequence_len: 16,
            max_houses: 20,
            max_heap_size: 64,
        }
    }
}

impl Limits {
    /// Creates limits large enough for benchmarking and batch use.
    #[must_use]
    pub fn generous() -> Self {
        Self {
            max_capacity: 10_000,
            max_items: 1_000,
            max_amount: 10_000,
            max_sequence_len: 1_000,
            max_houses: 10_000,
            max_heap_size: 100_000,
        }
    }

    /// Builder method to set the largest knapsack capacity.
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: i64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Builder method to set the most knapsack items or coin denominations.
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Builder method to set the largest coin change amount.
    #[must_use]
    pub fn with_max_amount(mut self, max_amount: i64) -> Self {
        self.max_amount = max_amount;
        self
    }

    /// Builder method to set the longest LCS input.
    #[must_use]
    pub fn with_max_sequence_len(mut self, max_sequence_len: usize) -> Self {
        self.max_sequence_len = max_sequence_len;
        self
    }

    /// Builder method to set the most houses.
    #[must_use]
    pub fn with_max_houses(mut self, max_houses: usize) -> Self {
        self.max_houses = max_houses;
        self
    }

    /// Builder method to set the largest heap size.
    #[must_use]
    pub fn with_max_heap_size(mut self, max_heap_size: usize) -> Self {
        self.max_heap_size = max_heap_size;
        self
    }
}

// =============================================================================
// Session
// =============================================================================

/// Everything a [`Session`](crate::Session) needs to know up front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Playback settings.
    pub playback: PlaybackConfig,

    /// Engine input limits.
    pub limits: Limits,
}

impl SessionConfig {
    /// Builder method to set the playback settings.
    #[must_use]
    pub fn with_playback(mut self, playback: PlaybackConfig) -> Self {
        self.playback = playback;
        self
    }

    /// Builder method to set the engine input limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
