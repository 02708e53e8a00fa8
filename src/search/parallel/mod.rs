//! Parallel execution of the race.
//!
//! # Architecture
//!
//! The race consists of:
//! - A **coordinator** that spawns one thread per task and joins them all
//! - Two **searchers** and a **watchdog**, each on its own thread
//! - A shared **stop signal**, flipped once through compare-and-set
//! - **Channels** carrying task reports to the coordinator and interrupts to tasks
//!
//! # Example
//!
//! ```ignore
//! use vault_race::search::{Coordinator, RaceConfig};
//!
//! let result = Coordinator::new(RaceConfig::default().with_secret(500)).run()?;
//! assert!(result.winner().is_some());
//! ```

pub mod channel;
pub mod coordinator;
pub mod watchdog;

pub use coordinator::Coordinator;
