//! Shared stop signal, interrupt channels and task reports for race workers.

#![allow(dead_code)]

use crate::error::RaceError;
use crate::search::result::{TaskKind, TaskOutcome};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Report sent from a task to the coordinator when it leaves its loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub task: TaskKind,
    pub outcome: TaskOutcome,
    /// Guesses checked by a searcher, or ticks counted by the watchdog.
    pub steps: u32,
}

/// Flag marking the end of the race.
///
/// It goes from `false` to `true` at most once, and only through
/// [`StopSignal::try_set`], so the caller that flips it knows it won.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the race is over.
    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Try to end the race. Returns true only for the caller that performed
    /// the transition; every later caller gets false.
    pub fn try_set(&self) -> bool {
        self.stopped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Sending half of a task's interrupt channel, held by the coordinator.
#[derive(Debug)]
pub struct Interrupter {
    interrupted: Arc<AtomicBool>,
    wake: Sender<()>,
}

impl Interrupter {
    /// Interrupt the task. Repeated calls are no-ops.
    pub fn interrupt(&self) {
        if !self.interrupted.swap(true, Ordering::SeqCst) {
            // Wake the task if it is parked in a wait right now.
            let _ = self.wake.try_send(());
        }
    }
}

/// Receiving half of a task's interrupt channel, owned by the task.
///
/// Once interrupted, the token stays interrupted: every later
/// [`InterruptToken::sleep`] fails immediately.
#[derive(Debug)]
pub struct InterruptToken {
    interrupted: Arc<AtomicBool>,
    wake: Receiver<()>,
}

impl InterruptToken {
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Block for `duration` unless interrupted first.
    pub fn sleep(&self, duration: Duration) -> Result<(), RaceError> {
        if self.is_interrupted() {
            return Err(RaceError::Interrupted);
        }
        match self.wake.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Ok(()) => Err(RaceError::Interrupted),
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody is left to interrupt us, so a plain sleep is equivalent.
                std::thread::sleep(duration);
                Ok(())
            }
        }
    }
}

/// Create a connected interrupter/token pair for one task.
pub fn interrupt_pair() -> (Interrupter, InterruptToken) {
    let interrupted = Arc::new(AtomicBool::new(false));
    // One slot is enough: the flag carries the state, the message only wakes.
    let (wake_tx, wake_rx) = bounded(1);
    (
        Interrupter {
            interrupted: Arc::clone(&interrupted),
            wake: wake_tx,
        },
        InterruptToken {
            interrupted,
            wake: wake_rx,
        },
    )
}

/// Everything a task needs to take part in the race.
pub struct TaskChannels {
    /// Send the final report to the coordinator.
    pub to_coordinator: Sender<TaskReport>,
    /// Interrupt delivered by the coordinator.
    pub interrupt: InterruptToken,
    /// Shared end-of-race flag.
    pub stop: Arc<StopSignal>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive reports from tasks.
    pub from_tasks: Receiver<TaskReport>,
    /// One interrupter per task, in task order. Shared with interrupt handles.
    pub interrupters: Arc<Vec<Interrupter>>,
    /// Shared end-of-race flag.
    pub stop: Arc<StopSignal>,
}

/// Create channels for a race with the given number of tasks.
pub fn create_channels(num_tasks: usize) -> (CoordinatorChannels, Vec<TaskChannels>) {
    let stop = Arc::new(StopSignal::new());

    // Unbounded so a finishing task never blocks on the coordinator
    let (report_tx, report_rx) = unbounded();

    let mut interrupters = Vec::with_capacity(num_tasks);
    let mut task_channels = Vec::with_capacity(num_tasks);

    for _ in 0..num_tasks {
        let (interrupter, token) = interrupt_pair();
        interrupters.push(interrupter);
        task_channels.push(TaskChannels {
            to_coordinator: report_tx.clone(),
            interrupt: token,
            stop: Arc::clone(&stop),
        });
    }

    let coordinator = CoordinatorChannels {
        from_tasks: report_rx,
        interrupters: Arc::new(interrupters),
        stop,
    };

    (coordinator, task_channels)
}
