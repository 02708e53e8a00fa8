//! The race to find the vault secret
//!
//! This module provides the tasks taking part in a race:
//! - Searchers: sweep the password space ascending or descending
//! - Watchdog: ends the race when its countdown runs out
//! - Coordinator: launches every task on its own thread and joins them all

pub mod config;
pub mod parallel;
pub mod result;
pub mod searcher;

pub use config::RaceConfig;
pub use parallel::Coordinator;
pub use result::{TaskKind, Winner};

use crate::search::parallel::channel::TaskChannels;
use crate::search::result::TaskOutcome;

/// A task racing for the stop signal
pub trait Contender: Send {
    /// Which task this is; also names its thread.
    fn kind(&self) -> TaskKind;

    /// Run until the task leaves its loop.
    ///
    /// # Returns
    /// The outcome and the number of steps taken (guesses or ticks)
    fn run(&self, channels: &TaskChannels) -> (TaskOutcome, u32);
}
