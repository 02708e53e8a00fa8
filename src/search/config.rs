//! Configuration types for the vault race

#![allow(dead_code)]

use std::time::Duration;

/// Size of the password space; secrets and guesses live in `[0, PASSWORD_SPACE)`.
pub const PASSWORD_SPACE: u32 = 999;
/// Simulated cost of a single vault check.
pub const CHECK_DELAY: Duration = Duration::from_millis(5);
/// Number of countdown ticks the watchdog waits before forcing termination.
pub const WATCHDOG_TICKS: u32 = 10;
/// Duration of one watchdog tick.
pub const WATCHDOG_TICK: Duration = Duration::from_secs(1);

/// Traversal order of a searcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Guesses 0, 1, 2, ... up to the top of the space
    Ascending,
    /// Guesses from the top of the space down to 0
    Descending,
}

impl Direction {
    /// The `step`-th guess in this direction over a space of `space` values.
    ///
    /// Callers keep `step < space`.
    pub fn guess_at(self, step: u32, space: u32) -> u32 {
        match self {
            Direction::Ascending => step,
            Direction::Descending => space - 1 - step,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "ascending"),
            Direction::Descending => write!(f, "descending"),
        }
    }
}

/// Configuration for one race.
///
/// The defaults are the compile-time constants above. The builder methods
/// exist so tests can shrink or inflate the race; the CLI never touches them.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Number of candidate secrets
    pub space: u32,
    /// Simulated delay of each vault check
    pub check_delay: Duration,
    /// Number of watchdog countdown ticks
    pub watchdog_ticks: u32,
    /// Duration of one watchdog tick
    pub watchdog_tick: Duration,
    /// Fixed secret instead of a random one
    pub secret: Option<u32>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            space: PASSWORD_SPACE,
            check_delay: CHECK_DELAY,
            watchdog_ticks: WATCHDOG_TICKS,
            watchdog_tick: WATCHDOG_TICK,
            secret: None,
        }
    }
}

impl RaceConfig {
    pub fn with_space(mut self, space: u32) -> Self {
        self.space = space.max(1);
        self
    }

    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    pub fn with_watchdog(mut self, ticks: u32, tick: Duration) -> Self {
        self.watchdog_ticks = ticks;
        self.watchdog_tick = tick;
        self
    }

    pub fn with_secret(mut self, secret: u32) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Total time the watchdog grants the searchers.
    pub fn watchdog_budget(&self) -> Duration {
        self.watchdog_tick.saturating_mul(self.watchdog_ticks)
    }

    /// Worst-case time for one searcher to sweep the whole space.
    pub fn full_sweep(&self) -> Duration {
        self.check_delay.saturating_mul(self.space)
    }
}
