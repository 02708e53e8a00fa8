//! The vault guarding the secret the searchers race to find.

use crate::search::parallel::channel::InterruptToken;
use std::time::Duration;
use tracing::info;

/// Holds the secret and answers guesses, each one at a fixed simulated cost.
#[derive(Debug)]
pub struct Vault {
    secret: u32,
    check_delay: Duration,
}

impl Vault {
    pub fn new(secret: u32, check_delay: Duration) -> Self {
        info!("Vault created with secret {}", secret);
        Self {
            secret,
            check_delay,
        }
    }

    /// Check a guess against the secret.
    ///
    /// Blocks for the check delay first. An interrupted wait counts as a
    /// wrong guess; the interrupt stays visible on `interrupt`.
    pub fn check(&self, guess: u32, interrupt: &InterruptToken) -> bool {
        if interrupt.sleep(self.check_delay).is_err() {
            return false;
        }
        guess == self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parallel::channel::interrupt_pair;
    use std::time::Instant;

    #[test]
    fn test_check_matches_only_secret() {
        let vault = Vault::new(42, Duration::ZERO);
        let (_interrupter, token) = interrupt_pair();

        assert!(vault.check(42, &token));
        assert!(!vault.check(41, &token));
        assert!(!vault.check(43, &token));
    }

    #[test]
    fn test_check_pays_the_delay() {
        let vault = Vault::new(7, Duration::from_millis(15));
        let (_interrupter, token) = interrupt_pair();

        let start = Instant::now();
        assert!(vault.check(7, &token));
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_interrupted_check_is_false() {
        let vault = Vault::new(7, Duration::from_millis(5));
        let (interrupter, token) = interrupt_pair();
        interrupter.interrupt();

        // Even the right guess fails once the wait is cut short
        assert!(!vault.check(7, &token));
        assert!(token.is_interrupted());
    }
}
