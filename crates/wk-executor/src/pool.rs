//! `JobExecutor`: elastic worker pool over a FIFO backlog.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use wk_core::{ExecutorConfig, JobId};

use crate::handle::Slot;
use crate::{JobError, JobHandle, JobResult};

// ── Queued jobs ───────────────────────────────────────────────────────────────

/// Type-erased queued job.  Either runs, or is failed without running when
/// the pool shuts down.
trait Runnable: Send {
    fn run(self: Box<Self>);
    fn abort(self: Box<Self>, err: JobError);
}

struct Queued<F, T> {
    id:   JobId,
    job:  F,
    slot: Arc<Slot<T>>,
}

impl<F, T> Runnable for Queued<F, T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    fn run(self: Box<Self>) {
        let Queued { id, job, slot } = *self;
        let result = panic::catch_unwind(AssertUnwindSafe(job)).map_err(|payload| {
            let msg = panic_message(payload.as_ref());
            warn!(job = %id, %msg, "pool job panicked");
            JobError::Panicked(msg)
        });
        slot.complete(result);
    }

    fn abort(self: Box<Self>, err: JobError) {
        self.slot.complete(Err(err));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

// ── Shared pool state ─────────────────────────────────────────────────────────

struct PoolState {
    queue:    VecDeque<Box<dyn Runnable>>,
    /// Live worker threads.
    workers:  usize,
    /// Workers currently parked waiting for work.
    idle:     usize,
    /// Threads ever spawned; used for thread names.
    spawned:  usize,
    shutdown: bool,
}

struct Shared {
    state:       Mutex<PoolState>,
    available:   Condvar,
    core:        usize,
    max:         usize,
    keep_alive:  Duration,
    thread_name: String,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── JobExecutor ───────────────────────────────────────────────────────────────

/// Bounded background pool executing submitted closures.
///
/// Shareable across threads (`Send + Sync`); wrap in an `Arc` to hand it to
/// several submitters.  Dropping the executor stops the workers once their
/// current job ends and fails every job still queued with
/// [`JobError::Shutdown`].
pub struct JobExecutor {
    shared:  Arc<Shared>,
    next_id: AtomicU64,
}

impl JobExecutor {
    /// Start the pool with `config.core_threads` permanent workers.
    pub fn new(config: &ExecutorConfig) -> JobResult<Self> {
        let core = config.core_threads.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue:    VecDeque::new(),
                workers:  0,
                idle:     0,
                spawned:  0,
                shutdown: false,
            }),
            available:   Condvar::new(),
            core,
            max:         config.max_threads.max(core),
            keep_alive:  config.keep_alive(),
            thread_name: config.thread_name.clone(),
        });

        {
            let mut state = shared.lock();
            for _ in 0..core {
                spawn_worker(&shared, &mut state).map_err(|e| JobError::Spawn(e.to_string()))?;
            }
        }
        debug!(core, max = shared.max, "job executor started");

        Ok(Self { shared, next_id: AtomicU64::new(0) })
    }

    /// Queue `job` and return a handle to its result.
    ///
    /// Never blocks.  If every worker is busy and the pool is below
    /// `max_threads`, one more worker is started.
    pub fn submit<F, T>(&self, job: F) -> JobHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut state = self.shared.lock();
        if state.shutdown {
            return JobHandle::failed(id, JobError::Shutdown);
        }

        let slot = Slot::new();
        state.queue.push_back(Box::new(Queued { id, job, slot: Arc::clone(&slot) }));

        if state.idle < state.queue.len() && state.workers < self.shared.max {
            if let Err(e) = spawn_worker(&self.shared, &mut state) {
                // Existing workers will drain the backlog eventually.
                warn!(error = %e, "could not grow job executor");
            }
        }
        drop(state);
        self.shared.available.notify_one();

        JobHandle::new(id, slot)
    }

    /// Live worker threads.
    pub fn workers(&self) -> usize {
        self.shared.lock().workers
    }

    /// Jobs waiting for a worker.
    pub fn queued(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Stop accepting jobs and fail the backlog.  Called by `Drop`.
    pub fn shutdown(&self) {
        let drained: Vec<_> = {
            let mut state = self.shared.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
            state.queue.drain(..).collect()
        };
        self.shared.available.notify_all();
        if !drained.is_empty() {
            debug!(dropped = drained.len(), "job executor shut down with queued jobs");
        }
        for job in drained {
            job.abort(JobError::Shutdown);
        }
    }
}

impl Drop for JobExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for JobExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("JobExecutor")
            .field("workers", &state.workers)
            .field("idle", &state.idle)
            .field("queued", &state.queue.len())
            .field("max", &self.shared.max)
            .finish()
    }
}

// ── Workers ───────────────────────────────────────────────────────────────────

/// Spawn one worker.  The caller holds the state lock, so the counters are
/// updated before the new thread can observe them.
fn spawn_worker(shared: &Arc<Shared>, state: &mut PoolState) -> std::io::Result<()> {
    let name = format!("{}-{}", shared.thread_name, state.spawned);
    let worker_shared = Arc::clone(shared);
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || worker_loop(&worker_shared))?;
    state.spawned += 1;
    state.workers += 1;
    debug!(thread = %name, workers = state.workers, "pool worker spawned");
    Ok(())
}

fn worker_loop(shared: &Shared) {
    while let Some(job) = next_job(shared) {
        job.run();
    }
}

/// Block until a job is available.  `None` means this worker should exit:
/// the pool shut down, or this is an extra worker that idled past
/// `keep_alive`.
fn next_job(shared: &Shared) -> Option<Box<dyn Runnable>> {
    let mut state = shared.lock();
    loop {
        if let Some(job) = state.queue.pop_front() {
            return Some(job);
        }
        if state.shutdown {
            state.workers -= 1;
            return None;
        }

        state.idle += 1;
        if state.workers > shared.core {
            let (guard, timeout) = shared
                .available
                .wait_timeout(state, shared.keep_alive)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            state.idle -= 1;
            if timeout.timed_out() && state.queue.is_empty() && state.workers > shared.core {
                state.workers -= 1;
                debug!(workers = state.workers, "idle pool worker reclaimed");
                return None;
            }
        } else {
            state = shared
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
            state.idle -= 1;
        }
    }
}
