//! Fixed-size slot inventory used for both the carried inventory and home
//! storage.

use crate::{ItemKind, ItemStack};

/// A fixed number of slots, each empty or holding one [`ItemStack`].
///
/// Slot indices are stable: removing a stack leaves a hole rather than
/// shifting later slots, so "slot 3" keeps meaning the same stack across
/// ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// An empty inventory with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self { slots: vec![None; capacity] }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// `true` when no slot is empty.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices, in slot order.
    pub fn stacks(&self) -> impl Iterator<Item = (usize, &ItemStack)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|stack| (i, stack)))
    }

    /// Total units of `kind` across all slots.
    pub fn count(&self, kind: &ItemKind) -> u32 {
        self.stacks()
            .filter(|(_, s)| &s.kind == kind)
            .map(|(_, s)| s.quantity)
            .sum()
    }

    /// Index of the first slot whose stack satisfies `pred`.
    pub fn find_first(&self, mut pred: impl FnMut(&ItemStack) -> bool) -> Option<usize> {
        self.stacks().find(|(_, s)| pred(s)).map(|(i, _)| i)
    }

    /// `true` if any stack satisfies `pred`.
    pub fn any(&self, pred: impl FnMut(&ItemStack) -> bool) -> bool {
        self.find_first(pred).is_some()
    }

    /// Overwrite slot `index`.  Out-of-range indices are ignored.
    pub fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = stack.filter(|s| s.quantity > 0);
        }
    }

    /// Empty slot `index`, returning what it held.
    pub fn remove_slot(&mut self, index: usize) -> Option<ItemStack> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Take up to `amount` units out of slot `index`.
    pub fn take(&mut self, index: usize, amount: u32) -> Option<ItemStack> {
        let slot = self.slots.get_mut(index)?;
        let stack = slot.as_mut()?;
        let taken = stack.split(amount);
        if stack.quantity == 0 {
            *slot = None;
        }
        (taken.quantity > 0).then_some(taken)
    }

    /// Remove `amount` units from slot `index` and discard them.
    pub fn decrement(&mut self, index: usize, amount: u32) {
        let _ = self.take(index, amount);
    }

    /// Insert `stack`, merging into matching stacks first and then filling
    /// empty slots.
    ///
    /// Returns whatever did not fit, or `None` if everything was accepted.
    pub fn insert(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        let max = stack.max_stack();

        for existing in self.slots.iter_mut().flatten() {
            if stack.quantity == 0 {
                break;
            }
            if existing.same_item(&stack) && existing.quantity < max {
                let moved = (max - existing.quantity).min(stack.quantity);
                existing.quantity += moved;
                stack.quantity -= moved;
            }
        }

        for slot in self.slots.iter_mut() {
            if stack.quantity == 0 {
                break;
            }
            if slot.is_none() {
                *slot = Some(stack.split(max));
            }
        }

        (stack.quantity > 0).then_some(stack)
    }

    /// Units of `stack` this inventory could accept right now.
    pub fn space_for(&self, stack: &ItemStack) -> u32 {
        let max = stack.max_stack();
        self.slots
            .iter()
            .map(|slot| match slot {
                None => max,
                Some(existing) if existing.same_item(stack) => max.saturating_sub(existing.quantity),
                Some(_) => 0,
            })
            .sum()
    }
}

// ── Transfers ─────────────────────────────────────────────────────────────────

/// Move up to `max_units` out of slot `index` of `from` into `to`.
///
/// Only what `to` has room for is taken, so the source keeps the rest.
/// Returns the number of units moved.
pub fn transfer_slot(from: &mut Inventory, to: &mut Inventory, index: usize, max_units: u32) -> u32 {
    let wanted = match from.slot(index) {
        Some(stack) => to.space_for(stack).min(max_units),
        None => return 0,
    };
    if wanted == 0 {
        return 0;
    }
    match from.take(index, wanted) {
        Some(taken) => {
            let n = taken.quantity;
            match to.insert(taken) {
                None => n,
                Some(rest) => {
                    let back = rest.quantity;
                    let _ = from.insert(rest);
                    n - back
                }
            }
        }
        None => 0,
    }
}

/// Move up to `max_units` of stacks matching `pred` from `from` into `to`,
/// scanning `from` in slot order.
///
/// Units that do not fit into `to` stay in `from`.  Returns the number of
/// units moved.
pub fn transfer_matching(
    from:      &mut Inventory,
    to:        &mut Inventory,
    mut pred:  impl FnMut(&ItemStack) -> bool,
    max_units: u32,
) -> u32 {
    let mut moved = 0;
    for index in 0..from.capacity() {
        if moved >= max_units {
            break;
        }
        if from.slot(index).is_some_and(&mut pred) {
            moved += transfer_slot(from, to, index, max_units - moved);
        }
    }
    moved
}

/// Move the whole first stack matching `pred` from `from` into `to`.
///
/// Returns `true` if at least one unit moved.
pub fn transfer_first(
    from: &mut Inventory,
    to:   &mut Inventory,
    pred: impl FnMut(&ItemStack) -> bool,
) -> bool {
    match from.find_first(pred) {
        Some(index) => transfer_slot(from, to, index, u32::MAX) > 0,
        None => false,
    }
}
