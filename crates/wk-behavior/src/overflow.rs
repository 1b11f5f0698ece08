//! Full-inventory handling: walk home and dump one slot per tick.

use tracing::{debug, warn};
use wk_agent::{Agent, transfer_slot};

use crate::{Movement, TaskBehavior, WaitEngine};

/// Whether the rest of the tick may run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverflowStatus {
    /// No overflow; continue with the target machine this tick.
    Clear,
    /// Dumping (or unable to); skip everything else this tick.
    Blocked,
}

enum DumpStep {
    Walking,
    Dumped,
    Nothing,
}

/// Tracks the inventory-full condition across ticks.
///
/// Once active, it keeps dumping until no slot is eligible, not merely until
/// one slot frees up.
#[derive(Clone, Debug, Default)]
pub struct OverflowHandler {
    active: bool,
}

impl OverflowHandler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run one tick of overflow handling before the target machine.
    pub fn step<T: TaskBehavior>(
        &mut self,
        task:  &T,
        agent: &mut Agent,
        world: &mut dyn Movement,
        wait:  &mut WaitEngine,
    ) -> OverflowStatus {
        if !self.active {
            if !agent.is_inventory_full() && !task.wants_inventory_dump(agent) {
                return OverflowStatus::Clear;
            }
            debug!(agent = %agent.id, occupied = agent.inventory.occupied(), "inventory dump started");
            self.active = true;
        }

        match dump_one(task, agent, world, wait) {
            DumpStep::Walking | DumpStep::Dumped => return OverflowStatus::Blocked,
            DumpStep::Nothing => {}
        }

        if agent.is_inventory_full() || task.wants_inventory_dump(agent) {
            debug!(agent = %agent.id, "nothing left to dump but still blocked");
            return OverflowStatus::Blocked;
        }
        debug!(agent = %agent.id, "inventory dump finished");
        self.active = false;
        OverflowStatus::Clear
    }
}

/// Walk home, then move the first slot the task does not keep into storage.
/// A stack storage cannot accept at all is dropped so the handler always
/// makes progress.
fn dump_one<T: TaskBehavior>(
    task:  &T,
    agent: &mut Agent,
    world: &mut dyn Movement,
    wait:  &mut WaitEngine,
) -> DumpStep {
    let Some(home) = agent.home_location() else {
        return DumpStep::Nothing;
    };
    // The wait guard does not run while dumping, so a recheck delay left by
    // an unreachable home is counted down here.
    if wait.is_delaying() && wait.is_waiting(agent, world) {
        return DumpStep::Walking;
    }
    if wait.walk_to(home, agent, world) {
        return DumpStep::Walking;
    }

    let Some(slot) = agent.inventory.find_first(|s| !task.is_item_kept(s)) else {
        return DumpStep::Nothing;
    };
    let moved = match agent.home.as_mut() {
        Some(storage) => transfer_slot(&mut agent.inventory, &mut storage.inventory, slot, u32::MAX),
        None => 0,
    };
    if moved == 0 {
        if let Some(lost) = agent.inventory.remove_slot(slot) {
            warn!(agent = %agent.id, stack = %lost, "home storage full, dropping stack");
        }
    }
    if agent.held_slot == Some(slot) && agent.inventory.slot(slot).is_none() {
        agent.held_slot = None;
    }
    DumpStep::Dumped
}
