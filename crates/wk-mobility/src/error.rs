use thiserror::Error;

use wk_core::{AgentId, BlockPos};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MobilityError {
    #[error("agent {agent} gave up on {goal} after {attempts} path attempts")]
    Unreachable { agent: AgentId, goal: BlockPos, attempts: u32 },

    #[error("path job for agent {agent} failed: {reason}")]
    JobFailed { agent: AgentId, reason: String },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
