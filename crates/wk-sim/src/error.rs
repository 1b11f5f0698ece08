use thiserror::Error;

use wk_core::{AgentId, WkError};
use wk_executor::JobError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("colony configuration error: {0}")]
    Config(#[from] WkError),

    #[error("could not start the path pool: {0}")]
    Executor(#[from] JobError),

    #[error("agent {0} was added twice")]
    DuplicateAgent(AgentId),

    #[error("agent {0} is not in this colony")]
    UnknownAgent(AgentId),
}

pub type SimResult<T> = Result<T, SimError>;
