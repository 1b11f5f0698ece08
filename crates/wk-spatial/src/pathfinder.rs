//! Pathfinding trait and the default grid A*.
//!
//! # Pluggability
//!
//! The dispatcher calls pathfinding via the [`Pathfinder`] trait, so an
//! application embedding workers in a real voxel world supplies its own
//! implementation.  [`GridPathfinder`] covers flat worlds and tests.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use wk_core::BlockPos;

use crate::grid::GridMap;
use crate::{PathJob, Route, SpatialError, SpatialResult};

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: searches run on pool threads while
/// the tick thread keeps submitting new jobs.
pub trait Pathfinder: Send + Sync {
    /// Compute a route satisfying `job`.
    ///
    /// A start already within `job.constraints.range` of the goal yields an
    /// empty route rather than an error.
    fn find_path(&self, job: &PathJob) -> SpatialResult<Route>;
}

// ── GridPathfinder ────────────────────────────────────────────────────────────

/// A* over a [`GridMap`] with four horizontal neighbours and unit step cost.
///
/// The heuristic is the Manhattan distance to the goal's range box, which
/// stays admissible when the route may stop short of the goal.
pub struct GridPathfinder {
    map: GridMap,
}

impl GridPathfinder {
    pub fn new(map: GridMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }
}

impl Pathfinder for GridPathfinder {
    fn find_path(&self, job: &PathJob) -> SpatialResult<Route> {
        astar(&self.map, job)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Lower bound on steps from `pos` to any block within `range` of `goal`.
#[inline]
fn heuristic(pos: BlockPos, goal: BlockPos, range: u32) -> u32 {
    pos.x.abs_diff(goal.x).saturating_sub(range) + pos.z.abs_diff(goal.z).saturating_sub(range)
}

fn astar(map: &GridMap, job: &PathJob) -> SpatialResult<Route> {
    let PathJob { start, goal, constraints, .. } = *job;
    let range = constraints.range;

    if start.within(goal, range) {
        return Ok(Route::default());
    }
    if !map.contains(start) {
        return Err(SpatialError::OutOfBounds(start));
    }

    // g[pos] = best known step count; prev[pos] = predecessor on that path.
    let mut g: HashMap<BlockPos, u32> = HashMap::new();
    let mut prev: HashMap<BlockPos, BlockPos> = HashMap::new();
    g.insert(start, 0);

    // Min-heap keyed on (f, g, pos); the position breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(u32, u32, BlockPos)>> = BinaryHeap::new();
    heap.push(Reverse((heuristic(start, goal, range), 0, start)));

    let mut expanded = 0usize;
    while let Some(Reverse((_, cost, pos))) = heap.pop() {
        if pos.within(goal, range) {
            return Ok(reconstruct(&prev, start, pos));
        }
        // Skip stale heap entries.
        if g.get(&pos).is_some_and(|&best| cost > best) {
            continue;
        }

        expanded += 1;
        if expanded > constraints.max_nodes {
            return Err(SpatialError::SearchLimit { expanded: constraints.max_nodes });
        }

        for next in pos.horizontal_neighbours() {
            if !map.is_walkable(next) {
                continue;
            }
            let next_cost = cost + 1;
            if g.get(&next).is_none_or(|&best| next_cost < best) {
                g.insert(next, next_cost);
                prev.insert(next, pos);
                heap.push(Reverse((next_cost + heuristic(next, goal, range), next_cost, next)));
            }
        }
    }

    Err(SpatialError::NoRoute { from: start, to: goal })
}

fn reconstruct(prev: &HashMap<BlockPos, BlockPos>, start: BlockPos, end: BlockPos) -> Route {
    let mut steps = vec![end];
    let mut cur = end;
    while let Some(&p) = prev.get(&cur) {
        if p == start {
            break;
        }
        steps.push(p);
        cur = p;
    }
    steps.reverse();
    Route { steps }
}
