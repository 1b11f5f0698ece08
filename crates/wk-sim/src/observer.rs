//! Colony observer trait for progress reporting and data collection.

use wk_agent::Agent;
use wk_behavior::{ItemRequest, TickReport};
use wk_core::Tick;

/// Callbacks invoked by [`Colony::run`][crate::Colony::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: request printer
///
/// ```rust,ignore
/// struct Requests;
///
/// impl ColonyObserver for Requests {
///     fn on_request(&mut self, request: &ItemRequest) {
///         println!("{} at {}", request, request.tick);
///     }
/// }
/// ```
pub trait ColonyObserver {
    /// Called at the very start of each tick, before any worker runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per worker per tick, in worker order, after the worker
    /// has moved and been scheduled.
    fn on_worker(&mut self, _report: &TickReport, _agent: &Agent) {}

    /// Called for every request a worker raised this tick.  A worker raises
    /// a given request once until it is resolved.
    fn on_request(&mut self, _request: &ItemRequest) {}

    /// Called at the end of each tick.
    ///
    /// `task_ticks` is the number of workers whose task tick ran.
    fn on_tick_end(&mut self, _tick: Tick, _task_ticks: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`ColonyObserver`] that does nothing.
pub struct NoopObserver;

impl ColonyObserver for NoopObserver {}
