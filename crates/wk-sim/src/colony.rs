//! The `Colony` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, info};
use wk_agent::Agent;
use wk_behavior::{ItemRequest, TaskBehavior, TickReport, WorkerAi};
use wk_core::{AgentId, ColonyConfig, Tick};
use wk_mobility::Navigator;
use wk_spatial::PathDispatcher;

use crate::{ColonyObserver, SimError, SimResult};

// ── WorkerSlot ────────────────────────────────────────────────────────────────

/// One worker: its body, its scheduler, and its movement primitive.
pub struct WorkerSlot<T: TaskBehavior> {
    pub agent: Agent,
    pub ai:    WorkerAi<T>,
    pub nav:   Navigator,
}

impl<T: TaskBehavior> WorkerSlot<T> {
    /// Move, schedule, and collect any new requests.
    fn step(&mut self, now: Tick) -> (TickReport, Vec<ItemRequest>) {
        self.nav.advance(&mut self.agent);
        let report = self.ai.tick(now, &mut self.agent, &mut self.nav);
        let requests = self.ai.core_mut().notifier.drain();
        (report, requests)
    }
}

// ── Colony ────────────────────────────────────────────────────────────────────

/// Owns every worker and the shared path pool, and drives the tick loop.
///
/// Create via [`ColonyBuilder`][crate::ColonyBuilder].
pub struct Colony<T: TaskBehavior> {
    pub config: ColonyConfig,

    /// The next tick to run.
    pub clock: Tick,

    pub(crate) workers:    Vec<WorkerSlot<T>>,
    pub(crate) dispatcher: Arc<PathDispatcher>,
}

impl<T: TaskBehavior> Colony<T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.  Returns the tick
    /// the colony stopped at.
    pub fn run<O: ColonyObserver>(&mut self, observer: &mut O) -> Tick {
        let end = Tick(self.config.total_ticks);
        info!(from = %self.clock, to = %end, "colony run started");
        while self.clock < end {
            self.step(observer);
        }
        observer.on_sim_end(self.clock);
        info!(at = %self.clock, "colony run finished");
        self.clock
    }

    /// Run exactly `n` ticks from the current position, ignoring
    /// `total_ticks`.
    pub fn run_ticks<O: ColonyObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    pub fn workers(&self) -> &[WorkerSlot<T>] {
        &self.workers
    }

    pub fn worker(&self, id: AgentId) -> Option<&WorkerSlot<T>> {
        self.workers.iter().find(|w| w.agent.id == id)
    }

    pub fn worker_mut(&mut self, id: AgentId) -> Option<&mut WorkerSlot<T>> {
        self.workers.iter_mut().find(|w| w.agent.id == id)
    }

    /// The dispatcher every navigator submits to.
    pub fn dispatcher(&self) -> &PathDispatcher {
        &self.dispatcher
    }

    /// Put a worker's task back to its starting point: needs reset,
    /// waits, outstanding requests and the current route dropped, state back
    /// to `Init`.
    pub fn restart(&mut self, id: AgentId) -> SimResult<()> {
        let slot = self.worker_mut(id).ok_or(SimError::UnknownAgent(id))?;
        slot.ai.restart(&mut slot.agent);
        slot.nav.reset();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: ColonyObserver>(&mut self, observer: &mut O) {
        let now = self.clock;
        observer.on_tick_start(now);
        let task_ticks = self.process_tick(now, observer);
        observer.on_tick_end(now, task_ticks);
        self.clock = now.next();
    }

    fn process_tick<O: ColonyObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let outcomes = step_workers(&mut self.workers, now);

        // Callbacks run in worker order regardless of how the workers were
        // stepped.
        let mut task_ticks = 0;
        for (slot, (report, requests)) in self.workers.iter().zip(outcomes) {
            if report.task_ran {
                task_ticks += 1;
            }
            observer.on_worker(&report, &slot.agent);
            for request in &requests {
                debug!(tick = %now, %request, "forwarding request");
                observer.on_request(request);
            }
        }
        task_ticks
    }
}

#[cfg(not(feature = "parallel"))]
fn step_workers<T: TaskBehavior>(workers: &mut [WorkerSlot<T>], now: Tick) -> Vec<(TickReport, Vec<ItemRequest>)> {
    workers.iter_mut().map(|w| w.step(now)).collect()
}

#[cfg(feature = "parallel")]
fn step_workers<T: TaskBehavior>(workers: &mut [WorkerSlot<T>], now: Tick) -> Vec<(TickReport, Vec<ItemRequest>)> {
    use rayon::prelude::*;

    workers.par_iter_mut().map(|w| w.step(now)).collect()
}
