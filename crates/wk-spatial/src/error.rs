//! Spatial-subsystem error type.

use thiserror::Error;

use wk_core::BlockPos;
use wk_executor::JobError;

/// Errors produced by `wk-spatial`.
///
/// `Clone` because path results are read through idempotent job handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: BlockPos, to: BlockPos },

    #[error("search gave up after expanding {expanded} nodes")]
    SearchLimit { expanded: usize },

    #[error("{0} is outside the map")]
    OutOfBounds(BlockPos),

    #[error("path job failed: {0}")]
    Job(#[from] JobError),
}

impl SpatialError {
    /// `true` for the outcomes a worker treats as "no way there", as opposed
    /// to a failure of the machinery computing the path.
    pub fn is_unreachable(&self) -> bool {
        !matches!(self, SpatialError::Job(_))
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
