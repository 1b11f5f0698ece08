//! Future-like result slot shared between a pool worker and the submitter.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use wk_core::JobId;

use crate::{JobError, JobResult};

pub(crate) struct Slot<T> {
    result: Mutex<Option<JobResult<T>>>,
    done:   Condvar,
}

impl<T> Slot<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self { result: Mutex::new(None), done: Condvar::new() })
    }

    /// First completion wins; later ones are ignored.
    pub(crate) fn complete(&self, result: JobResult<T>) {
        let mut guard = self.result.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            *guard = Some(result);
            self.done.notify_all();
        }
    }
}

/// Handle to one submitted job.
///
/// Dropping the handle does not cancel the job; the result is simply
/// discarded when the worker finishes.
pub struct JobHandle<T> {
    id:   JobId,
    slot: Arc<Slot<T>>,
}

impl<T> JobHandle<T> {
    pub(crate) fn new(id: JobId, slot: Arc<Slot<T>>) -> Self {
        Self { id, slot }
    }

    /// A handle that is already failed (used when the pool refuses a job).
    pub(crate) fn failed(id: JobId, err: JobError) -> Self {
        let slot = Slot::new();
        slot.complete(Err(err));
        Self { id, slot }
    }

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// `true` once the job has produced a value or failed.  Never blocks on
    /// the job.
    pub fn is_done(&self) -> bool {
        self.slot
            .result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T: Clone> JobHandle<T> {
    /// Non-blocking retrieval.  `None` while the job is pending.
    ///
    /// Idempotent: every call after completion returns the same result.
    pub fn try_get(&self) -> Option<JobResult<T>> {
        self.slot
            .result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Block up to `timeout` for the result.
    ///
    /// Returns [`JobError::Timeout`] if the job is still pending afterwards;
    /// the job keeps running and a later call may still succeed.
    pub fn wait_timeout(&self, timeout: Duration) -> JobResult<T> {
        let deadline = Instant::now() + timeout;
        let mut guard = self.slot.result.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(result) = guard.as_ref() {
                return result.clone();
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(JobError::Timeout(timeout));
            }
            guard = self
                .slot
                .done
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

impl<T> std::fmt::Debug for JobHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobHandle")
            .field("id", &self.id)
            .field("done", &self.is_done())
            .finish()
    }
}
