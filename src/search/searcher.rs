//! Directional searchers that sweep the password space guess by guess.

use crate::search::Contender;
use crate::search::config::Direction;
use crate::search::parallel::channel::TaskChannels;
use crate::search::result::{SearchOutcome, TaskKind, TaskOutcome};
use crate::vault::Vault;
use std::sync::Arc;
use tracing::{debug, info};

/// Scans the space in one direction until it finds the secret or the race ends.
pub struct Searcher {
    direction: Direction,
    space: u32,
    vault: Arc<Vault>,
}

impl Searcher {
    pub fn new(direction: Direction, space: u32, vault: Arc<Vault>) -> Self {
        info!("Prepared {}", TaskKind::searcher(direction));
        Self {
            direction,
            space,
            vault,
        }
    }

    /// Run the sweep, returning the outcome and the number of guesses checked.
    fn sweep(&self, channels: &TaskChannels) -> (SearchOutcome, u32) {
        let name = self.kind();
        let mut checked = 0;

        for step in 0..self.space {
            if channels.stop.is_set() {
                return (SearchOutcome::Stopped, checked);
            }
            let guess = self.direction.guess_at(step, self.space);
            if channels.interrupt.is_interrupted() {
                info!("{} interrupted before guess {}", name, guess);
                return (SearchOutcome::Interrupted, checked);
            }

            let matched = self.vault.check(guess, &channels.interrupt);
            checked += 1;

            if matched {
                if channels.stop.try_set() {
                    info!("{} guessed the secret {}", name, guess);
                    return (SearchOutcome::Won(guess), checked);
                }
                debug!("{} matched {} after the race was already over", name, guess);
                return (SearchOutcome::Beaten(guess), checked);
            }
            if channels.interrupt.is_interrupted() {
                info!("{} interrupted at guess {}", name, guess);
                return (SearchOutcome::Interrupted, checked);
            }
            debug!("{} missed {}", name, guess);
        }

        (SearchOutcome::Exhausted, checked)
    }
}

impl Contender for Searcher {
    fn kind(&self) -> TaskKind {
        TaskKind::searcher(self.direction)
    }

    fn run(&self, channels: &TaskChannels) -> (TaskOutcome, u32) {
        info!("{} started ({} sweep)", self.kind(), self.direction);
        let (outcome, checked) = self.sweep(channels);
        info!("{} finished.", self.kind());
        (TaskOutcome::Search(outcome), checked)
    }
}
