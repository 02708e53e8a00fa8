//! Race coordinator that manages task threads.

use crate::error::RaceError;
use crate::search::Contender;
use crate::search::config::{Direction, RaceConfig};
use crate::search::parallel::channel::{
    CoordinatorChannels, Interrupter, TaskChannels, TaskReport, create_channels,
};
use crate::search::parallel::watchdog::Watchdog;
use crate::search::result::{RaceResult, TaskKind};
use crate::search::searcher::Searcher;
use crate::vault::Vault;
use rand::Rng;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Two searchers and the watchdog.
const RACE_TASKS: usize = 3;

/// Cloneable handle that interrupts every task of one race.
///
/// Obtained before the race starts, so an interrupt can never arrive
/// between spawning the tasks and wiring up the handle.
#[derive(Clone)]
pub struct InterruptHandle {
    interrupters: Arc<Vec<Interrupter>>,
}

impl InterruptHandle {
    /// Interrupt every task. Each one leaves its loop without claiming the win.
    pub fn interrupt_all(&self) {
        warn!("Interrupting all tasks");
        for interrupter in self.interrupters.iter() {
            interrupter.interrupt();
        }
    }
}

/// Sets up a race and launches its tasks.
pub struct Coordinator {
    config: RaceConfig,
    channels: CoordinatorChannels,
    task_channels: Vec<TaskChannels>,
}

impl Coordinator {
    pub fn new(config: RaceConfig) -> Self {
        let (channels, task_channels) = create_channels(RACE_TASKS);
        Self {
            config,
            channels,
            task_channels,
        }
    }

    /// Handle for interrupting this race from another thread.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            interrupters: Arc::clone(&self.channels.interrupters),
        }
    }

    fn pick_secret(&self) -> Result<u32, RaceError> {
        let space = self.config.space;
        if space == 0 {
            return Err(RaceError::EmptySpace);
        }
        match self.config.secret {
            Some(secret) if secret >= space => Err(RaceError::SecretOutOfRange { secret, space }),
            Some(secret) => Ok(secret),
            None => Ok(rand::rng().random_range(0..space)),
        }
    }

    /// Spawn every task. No task is joined before all of them are running.
    pub fn start(self) -> Result<RunningRace, RaceError> {
        let secret = self.pick_secret()?;
        let Coordinator {
            config,
            channels,
            task_channels,
        } = self;
        let start_time = Instant::now();

        let vault = Arc::new(Vault::new(secret, config.check_delay));
        let contenders: Vec<Box<dyn Contender>> = vec![
            Box::new(Searcher::new(
                Direction::Ascending,
                config.space,
                Arc::clone(&vault),
            )),
            Box::new(Searcher::new(
                Direction::Descending,
                config.space,
                Arc::clone(&vault),
            )),
            Box::new(Watchdog::new(config.watchdog_ticks, config.watchdog_tick)),
        ];
        debug!(
            "Full sweep takes up to {:?}, watchdog budget is {:?}",
            config.full_sweep(),
            config.watchdog_budget()
        );

        let mut handles: Vec<(TaskKind, JoinHandle<()>)> = Vec::with_capacity(contenders.len());

        for (contender, task) in contenders.into_iter().zip(task_channels) {
            let kind = contender.kind();
            let spawned = thread::Builder::new()
                .name(kind.name().to_string())
                .spawn(move || {
                    let (outcome, steps) = contender.run(&task);
                    let _ = task.to_coordinator.send(TaskReport {
                        task: kind,
                        outcome,
                        steps,
                    });
                });

            match spawned {
                Ok(handle) => handles.push((kind, handle)),
                Err(source) => {
                    // Bring down whatever already started before giving up
                    for interrupter in channels.interrupters.iter() {
                        interrupter.interrupt();
                    }
                    for (_, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(RaceError::Spawn { task: kind, source });
                }
            }
        }

        Ok(RunningRace {
            secret,
            handles,
            channels,
            start_time,
        })
    }

    /// Run one race to completion.
    pub fn run(self) -> Result<RaceResult, RaceError> {
        Ok(self.start()?.join())
    }
}

/// A race whose tasks are all running.
pub struct RunningRace {
    secret: u32,
    handles: Vec<(TaskKind, JoinHandle<()>)>,
    channels: CoordinatorChannels,
    start_time: Instant,
}

impl RunningRace {
    /// Wait for every task to terminate and collect their reports.
    pub fn join(self) -> RaceResult {
        for (kind, handle) in self.handles {
            if handle.join().is_err() {
                warn!("{} panicked before reporting", kind);
            }
        }

        let reports: Vec<TaskReport> = self.channels.from_tasks.try_iter().collect();
        let result = RaceResult {
            secret: self.secret,
            reports,
            stopped: self.channels.stop.is_set(),
            elapsed: self.start_time.elapsed(),
        };

        info!("The race has ended.");
        result
    }
}
