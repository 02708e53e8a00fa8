//! Error types raised by the race and its tasks.

use crate::search::TaskKind;
use thiserror::Error;

/// Errors produced while setting up or running a race.
#[derive(Error, Debug)]
pub enum RaceError {
    /// A blocking wait was interrupted from outside the task.
    ///
    /// Tasks handle this locally: they log it and leave their loop.
    #[error("task interrupted while waiting")]
    Interrupted,

    /// An injected secret does not fit inside the password space.
    #[error("secret {secret} is outside the password space [0, {space})")]
    SecretOutOfRange {
        /// The rejected secret.
        secret: u32,
        /// Size of the password space.
        space: u32,
    },

    /// The password space has no values to draw a secret from.
    #[error("password space is empty")]
    EmptySpace,

    /// The OS refused to start a task thread.
    #[error("failed to spawn {task}: {source}")]
    Spawn {
        task: TaskKind,
        #[source]
        source: std::io::Error,
    },
}

impl RaceError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RaceError::Interrupted => "task_interrupted",
            RaceError::SecretOutOfRange { .. } => "secret_out_of_range",
            RaceError::EmptySpace => "empty_space",
            RaceError::Spawn { .. } => "task_spawn_failed",
        }
    }
}
