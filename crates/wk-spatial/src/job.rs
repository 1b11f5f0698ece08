//! Path requests and their results.

use wk_core::{AgentId, BlockPos};

/// Limits attached to a path request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConstraints {
    /// The route may end anywhere within this many blocks (every axis) of the
    /// goal.  Workers rarely need to stand on the goal block itself.
    pub range:     u32,
    /// Node expansions after which the search gives up.
    pub max_nodes: usize,
}

impl Default for PathConstraints {
    fn default() -> Self {
        Self { range: 0, max_nodes: 10_000 }
    }
}

/// One path computation: immutable inputs only, so it can be moved to a
/// pool thread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathJob {
    pub agent:       AgentId,
    pub start:       BlockPos,
    pub goal:        BlockPos,
    pub constraints: PathConstraints,
}

/// A computed walk: the blocks to step onto in order, excluding the start.
///
/// An empty route means the start already satisfies the goal range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub steps: Vec<BlockPos>,
}

impl Route {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no movement is needed.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    /// Where the route ends, if it moves at all.
    pub fn destination(&self) -> Option<BlockPos> {
        self.steps.last().copied()
    }
}
