//! The worker's home storage (its building chest).

use wk_core::BlockPos;

use crate::Inventory;

/// A container at a fixed location that the worker withdraws from and dumps
/// into.  Only reachable when the worker stands within interaction range of
/// `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomeStorage {
    pub location:  BlockPos,
    pub inventory: Inventory,
}

impl HomeStorage {
    pub fn new(location: BlockPos, slots: usize) -> Self {
        Self { location, inventory: Inventory::new(slots) }
    }
}
