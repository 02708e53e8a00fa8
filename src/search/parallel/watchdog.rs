//! Time budget enforcement for the race.

use crate::search::Contender;
use crate::search::parallel::channel::TaskChannels;
use crate::search::result::{TaskKind, TaskOutcome, WatchdogOutcome};
use std::time::Duration;
use tracing::{info, warn};

/// Counts down a fixed number of ticks and ends the race if nobody has.
pub struct Watchdog {
    ticks: u32,
    tick: Duration,
}

impl Watchdog {
    pub fn new(ticks: u32, tick: Duration) -> Self {
        info!("Prepared {}", TaskKind::Watchdog);
        Self { ticks, tick }
    }

    fn countdown(&self, channels: &TaskChannels) -> (WatchdogOutcome, u32) {
        let mut counted = 0;

        for remaining in (1..=self.ticks).rev() {
            if channels.stop.is_set() {
                break;
            }
            info!("Watchdog countdown: {}", remaining);
            if channels.interrupt.sleep(self.tick).is_err() {
                warn!("{} interrupted.", self.kind());
                return (WatchdogOutcome::Interrupted, counted);
            }
            counted += 1;
        }

        // Never overwrite: only the caller that flips the flag forces the stop.
        if channels.stop.try_set() {
            warn!("Time's up! The watchdog forced termination of the race.");
            (WatchdogOutcome::Forced, counted)
        } else {
            info!("Watchdog: a searcher already found the secret.");
            (WatchdogOutcome::AlreadyFound, counted)
        }
    }
}

impl Contender for Watchdog {
    fn kind(&self) -> TaskKind {
        TaskKind::Watchdog
    }

    fn run(&self, channels: &TaskChannels) -> (TaskOutcome, u32) {
        info!("{} started.", self.kind());
        let (outcome, counted) = self.countdown(channels);
        info!("{} finished.", self.kind());
        (TaskOutcome::Watchdog(outcome), counted)
    }
}
