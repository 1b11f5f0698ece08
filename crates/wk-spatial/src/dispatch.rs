//! Hands path jobs to the background pool and polls the results.

use std::sync::Arc;

use tracing::debug;
use wk_executor::{JobExecutor, JobHandle};

use crate::{PathJob, Pathfinder, Route, SpatialResult};

/// Outcome of polling a [`PathHandle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathPoll {
    /// Still computing.
    Pending,
    Route(Route),
    /// The search finished without finding a way.
    Unreachable,
    /// The job itself failed (panic, shutdown).  Callers treat this like
    /// `Unreachable`.
    Failed(String),
}

impl PathPoll {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, PathPoll::Pending)
    }
}

/// Pending path computation for one agent.
///
/// Dropping the handle abandons the result; the pool still finishes the
/// search and the route is discarded.
#[derive(Debug)]
pub struct PathHandle {
    job:   PathJob,
    inner: JobHandle<SpatialResult<Route>>,
}

impl PathHandle {
    /// The request this handle answers.
    #[inline]
    pub fn job(&self) -> &PathJob {
        &self.job
    }

    /// Non-blocking check.  Repeated polls after completion return the same
    /// outcome.
    pub fn poll(&self) -> PathPoll {
        match self.inner.try_get() {
            None => PathPoll::Pending,
            Some(Ok(Ok(route))) => PathPoll::Route(route),
            Some(Ok(Err(e))) if e.is_unreachable() => PathPoll::Unreachable,
            Some(Ok(Err(e))) => PathPoll::Failed(e.to_string()),
            Some(Err(e)) => PathPoll::Failed(e.to_string()),
        }
    }
}

/// Submits [`PathJob`]s to a shared [`JobExecutor`] using one
/// [`Pathfinder`].
///
/// Callers keep at most one outstanding handle per agent; the dispatcher
/// does not track them.
pub struct PathDispatcher {
    executor:   Arc<JobExecutor>,
    pathfinder: Arc<dyn Pathfinder>,
}

impl PathDispatcher {
    pub fn new(executor: Arc<JobExecutor>, pathfinder: Arc<dyn Pathfinder>) -> Self {
        Self { executor, pathfinder }
    }

    pub fn executor(&self) -> &JobExecutor {
        &self.executor
    }

    /// Queue `job` on the pool.  Never blocks the caller.
    pub fn submit(&self, job: PathJob) -> PathHandle {
        let pathfinder = Arc::clone(&self.pathfinder);
        let inner = self.executor.submit(move || pathfinder.find_path(&job));
        debug!(
            agent = %job.agent,
            job = %inner.id(),
            start = %job.start,
            goal = %job.goal,
            "path job submitted"
        );
        PathHandle { job, inner }
    }
}
