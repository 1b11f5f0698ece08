use std::time::Duration;

use thiserror::Error;

/// Terminal failure of a submitted job, or of the pool itself.
///
/// `Clone` so that every poll of a failed [`JobHandle`][crate::JobHandle]
/// can report the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job panicked: {0}")]
    Panicked(String),

    #[error("executor shut down before the job ran")]
    Shutdown,

    #[error("job not finished after {0:?}")]
    Timeout(Duration),

    #[error("could not spawn pool thread: {0}")]
    Spawn(String),
}

pub type JobResult<T> = Result<T, JobError>;
