//! The agent body.

use wk_core::{AgentId, BlockPos};

use crate::{HomeStorage, Inventory, ItemStack, Task, ToolKind};

/// The entity under control of a worker scheduler.
///
/// Spawned by the application; the scheduler only reads and mutates the
/// inventory, home storage contents, held slot, and (through the movement
/// primitive) the position.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:        AgentId,
    pub position:  BlockPos,
    pub inventory: Inventory,
    pub task:      Task,
    /// `None` until the worker's building exists.
    pub home:      Option<HomeStorage>,
    /// Inventory slot of the tool in hand.
    pub held_slot: Option<usize>,
}

impl Agent {
    #[inline]
    pub fn is_inventory_full(&self) -> bool {
        self.inventory.is_full()
    }

    /// Location of home storage, if the building exists.
    #[inline]
    pub fn home_location(&self) -> Option<BlockPos> {
        self.home.as_ref().map(|h| h.location)
    }

    /// The stack in hand, if any.
    pub fn held_item(&self) -> Option<&ItemStack> {
        self.held_slot.and_then(|slot| self.inventory.slot(slot))
    }

    /// Slot of the lowest-level tool of `kind` whose level is at least
    /// `required_level`, or `None` if nothing carried qualifies.
    ///
    /// Picking the weakest sufficient tool keeps better tools for harder
    /// blocks.
    pub fn most_efficient_tool_slot(&self, kind: ToolKind, required_level: u8) -> Option<usize> {
        self.inventory
            .stacks()
            .filter_map(|(slot, stack)| stack.tool_level(kind).map(|level| (slot, level)))
            .filter(|&(_, level)| level >= required_level)
            .min_by_key(|&(slot, level)| (level, slot))
            .map(|(slot, _)| slot)
    }

    /// Put the most efficient qualifying tool in hand.  Returns `false` (and
    /// leaves the hand unchanged) if none is carried.
    pub fn hold_efficient_tool(&mut self, kind: ToolKind, required_level: u8) -> bool {
        match self.most_efficient_tool_slot(kind, required_level) {
            Some(slot) => {
                self.held_slot = Some(slot);
                true
            }
            None => false,
        }
    }
}
