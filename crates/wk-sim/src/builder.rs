//! Fluent builder for constructing a [`Colony`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use wk_agent::Agent;
use wk_behavior::{TaskBehavior, WorkerAi};
use wk_core::{ColonyConfig, Tick};
use wk_executor::JobExecutor;
use wk_mobility::Navigator;
use wk_spatial::{PathDispatcher, Pathfinder};

use crate::{Colony, SimError, SimResult, WorkerSlot};

/// Fluent builder for [`Colony<T>`].
///
/// # Required inputs
///
/// - [`ColonyConfig`]: total ticks, scheduler, pool and navigation tuning
/// - a [`Pathfinder`] shared by every worker's navigator
///
/// Workers are added one at a time with [`worker`][Self::worker]; all of them
/// run the same task type `T`.
///
/// # Example
///
/// ```rust,ignore
/// let colony = ColonyBuilder::new(config, Arc::new(GridPathfinder::new(map)))
///     .worker(miner_agent, Miner::default())
///     .worker(other_agent, Miner::default())
///     .build()?;
/// ```
pub struct ColonyBuilder<T: TaskBehavior> {
    config:     ColonyConfig,
    pathfinder: Arc<dyn Pathfinder>,
    workers:    Vec<(Agent, T)>,
}

impl<T: TaskBehavior> ColonyBuilder<T> {
    pub fn new(config: ColonyConfig, pathfinder: Arc<dyn Pathfinder>) -> Self {
        Self { config, pathfinder, workers: Vec::new() }
    }

    /// Add a worker.  Workers tick in the order they are added.
    pub fn worker(mut self, agent: Agent, task: T) -> Self {
        self.workers.push((agent, task));
        self
    }

    /// Validate the configuration, start the path pool, and return a
    /// ready-to-run [`Colony`].
    pub fn build(self) -> SimResult<Colony<T>> {
        self.config.validate()?;

        let mut seen = HashSet::new();
        for (agent, _) in &self.workers {
            if !seen.insert(agent.id) {
                return Err(SimError::DuplicateAgent(agent.id));
            }
        }

        let executor = Arc::new(JobExecutor::new(&self.config.executor)?);
        let dispatcher = Arc::new(PathDispatcher::new(executor, self.pathfinder));

        let workers: Vec<WorkerSlot<T>> = self
            .workers
            .into_iter()
            .map(|(agent, task)| WorkerSlot {
                nav: Navigator::new(agent.id, Arc::clone(&dispatcher), self.config.navigation.clone()),
                ai: WorkerAi::new(task, self.config.scheduler.clone()),
                agent,
            })
            .collect();

        info!(workers = workers.len(), total_ticks = self.config.total_ticks, "colony built");

        Ok(Colony {
            config: self.config,
            clock: Tick::ZERO,
            workers,
            dispatcher,
        })
    }
}
