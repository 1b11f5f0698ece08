//! `wk-sim`: the colony tick loop for the worker_ai framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Navigate  - each worker's Navigator polls its path job and takes
//!                 one step along its route.
//!   ② Schedule  - WorkerAi::tick: overflow, targets, task tick
//!                 (parallel with the `parallel` feature).
//!   ③ Drain     - new item/tool requests are taken from each worker's
//!                 notifier.
//!   ④ Report    - observer callbacks in worker order.
//! ```
//!
//! Path searches run on one shared [`JobExecutor`][wk_executor::JobExecutor]
//! owned by the colony; dropping the colony shuts the pool down.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Steps workers on Rayon's thread pool.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut colony = ColonyBuilder::new(config, Arc::new(GridPathfinder::new(map)))
//!     .worker(agent, Miner::default())
//!     .build()?;
//! colony.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod colony;
pub mod error;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::ColonyBuilder;
pub use colony::{Colony, WorkerSlot};
pub use error::{SimError, SimResult};
pub use observer::{ColonyObserver, NoopObserver};
