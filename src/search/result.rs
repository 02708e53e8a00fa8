//! Race result types and per-task outcomes

#![allow(dead_code)]

use crate::search::config::Direction;
use crate::search::parallel::channel::TaskReport;
use std::time::Duration;

/// Identity of a task taking part in the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    AscendingSearcher,
    DescendingSearcher,
    Watchdog,
}

impl TaskKind {
    /// Task kind for a searcher scanning in `direction`.
    pub fn searcher(direction: Direction) -> Self {
        match direction {
            Direction::Ascending => TaskKind::AscendingSearcher,
            Direction::Descending => TaskKind::DescendingSearcher,
        }
    }

    /// Name used for the task's thread and its log lines.
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::AscendingSearcher => "AscendingSearcher",
            TaskKind::DescendingSearcher => "DescendingSearcher",
            TaskKind::Watchdog => "Watchdog",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a searcher left its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Matched the secret and performed the winning transition.
    Won(u32),
    /// Matched the secret, but the race had already been won.
    Beaten(u32),
    /// Saw the stop signal before finding anything.
    Stopped,
    /// Ran out of guesses.
    Exhausted,
    /// Interrupted from outside.
    Interrupted,
}

/// How the watchdog left its countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogOutcome {
    /// Countdown elapsed and the watchdog performed the winning transition.
    Forced,
    /// A searcher ended the race first.
    AlreadyFound,
    /// Interrupted from outside.
    Interrupted,
}

/// Outcome of any task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Search(SearchOutcome),
    Watchdog(WatchdogOutcome),
}

impl TaskOutcome {
    /// Whether this task performed the winning transition.
    pub fn is_win(&self) -> bool {
        matches!(
            self,
            TaskOutcome::Search(SearchOutcome::Won(_)) | TaskOutcome::Watchdog(WatchdogOutcome::Forced)
        )
    }
}

/// Who ended the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Searcher { task: TaskKind, guess: u32 },
    Watchdog,
}

/// Result of one race
#[derive(Debug, Clone)]
pub struct RaceResult {
    /// The secret the searchers were looking for
    pub secret: u32,
    /// Reports from every task that finished normally
    pub reports: Vec<TaskReport>,
    /// Whether the stop signal ended up set
    pub stopped: bool,
    /// Wall-clock time of the whole race
    pub elapsed: Duration,
}

impl RaceResult {
    /// The task that performed the winning transition, if any.
    pub fn winner(&self) -> Option<Winner> {
        self.reports.iter().find_map(|report| match report.outcome {
            TaskOutcome::Search(SearchOutcome::Won(guess)) => Some(Winner::Searcher {
                task: report.task,
                guess,
            }),
            TaskOutcome::Watchdog(WatchdogOutcome::Forced) => Some(Winner::Watchdog),
            _ => None,
        })
    }

    /// Number of tasks that claim the win. Never more than one.
    pub fn winner_count(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_win()).count()
    }

    /// The report of a given task, if it finished normally.
    pub fn report(&self, task: TaskKind) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.task == task)
    }
}
