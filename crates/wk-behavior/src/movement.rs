//! World primitives the scheduler calls but does not implement.

use wk_agent::Agent;
use wk_core::BlockPos;

/// Progress reported by [`Movement::move_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// A path is being computed in the background.
    Pathing,
    /// Following a computed path.
    Moving,
    /// Within range of the goal.
    Arrived,
    /// No path could be found.  The request has been dropped; calling
    /// `move_to` again starts a fresh attempt.
    Unreachable,
}

/// Movement and animation primitives supplied by the world.
///
/// `move_to` is polled every tick while the worker wants to be somewhere; it
/// must never block on path computation.
pub trait Movement {
    /// Keep heading for `goal` until within `range` blocks of it.
    fn move_to(&mut self, agent: &Agent, goal: BlockPos, range: u32) -> MoveStatus;

    /// One unit of "work animation" against `target`.
    fn strike(&mut self, agent: &Agent, target: BlockPos);

    /// Whether the worker counts as standing at `site`.
    fn is_at_site(&self, agent: &Agent, site: BlockPos, range: u32) -> bool {
        agent.position.within(site, range)
    }
}

/// Result of [`approach`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Approach {
    Arrived,
    Walking,
    Unreachable,
}

/// "At site, and if not, move there": the at-site check with a movement
/// request as its side effect.
pub fn approach(world: &mut dyn Movement, agent: &Agent, site: BlockPos, range: u32) -> Approach {
    if world.is_at_site(agent, site, range) {
        return Approach::Arrived;
    }
    match world.move_to(agent, site, range) {
        MoveStatus::Arrived => Approach::Arrived,
        MoveStatus::Unreachable => Approach::Unreachable,
        MoveStatus::Pathing | MoveStatus::Moving => Approach::Walking,
    }
}
