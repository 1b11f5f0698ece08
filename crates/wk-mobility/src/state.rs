//! Per-worker navigation state.

use wk_core::BlockPos;
use wk_spatial::{PathHandle, Route};

/// Where a [`Navigator`][crate::Navigator] is in getting its worker to a
/// goal.
#[derive(Debug, Default)]
pub enum NavState {
    /// No goal.
    #[default]
    Idle,
    /// Waiting on a background path job.
    Pending {
        goal:     BlockPos,
        range:    u32,
        handle:   PathHandle,
        /// Jobs submitted for this goal so far, including this one.
        attempts: u32,
    },
    /// Walking a computed route; `next` indexes the next step.
    Following {
        goal:  BlockPos,
        range: u32,
        route: Route,
        next:  usize,
    },
    /// Gave up on `goal`; reported once by the next `move_to`.
    Unreachable { goal: BlockPos },
}

impl NavState {
    /// The goal being worked on, if any.
    pub fn goal(&self) -> Option<BlockPos> {
        match self {
            NavState::Idle => None,
            NavState::Pending { goal, .. }
            | NavState::Following { goal, .. }
            | NavState::Unreachable { goal } => Some(*goal),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, NavState::Idle)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, NavState::Pending { .. })
    }
}
