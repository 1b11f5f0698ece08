use thiserror::Error;

use wk_core::AgentId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {0} has no home storage")]
    MissingHome(AgentId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
