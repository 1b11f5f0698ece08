//! Task descriptors and the "items needed" container.

use std::fmt;

use crate::{Inventory, ItemKind};

// ── ItemAmount / ItemNeeds ────────────────────────────────────────────────────

/// A required quantity of one item kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemAmount {
    pub kind:     ItemKind,
    pub quantity: u32,
}

impl ItemAmount {
    pub fn new(kind: impl Into<ItemKind>, quantity: u32) -> Self {
        Self { kind: kind.into(), quantity }
    }
}

impl fmt::Display for ItemAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.kind)
    }
}

/// Item kind → required quantity.
///
/// Each kind appears at most once and never with a zero quantity.  Entries
/// keep the order they were first requested in; the first entry is the one
/// the resolver works on.  Equality ignores that order.
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemNeeds {
    entries: Vec<ItemAmount>,
}

impl ItemNeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemAmount> + '_ {
        self.entries.iter()
    }

    /// Highest-priority missing entry.
    pub fn first(&self) -> Option<&ItemAmount> {
        self.entries.first()
    }

    /// Required quantity of `kind` (zero if absent).
    pub fn get(&self, kind: &ItemKind) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.kind == kind)
            .map_or(0, |e| e.quantity)
    }

    pub fn contains(&self, kind: &ItemKind) -> bool {
        self.get(kind) > 0
    }

    /// Add `quantity` of `kind`, merging with an existing entry.
    pub fn add(&mut self, kind: impl Into<ItemKind>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let kind = kind.into();
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => entry.quantity += quantity,
            None => self.entries.push(ItemAmount { kind, quantity }),
        }
    }

    /// Subtract up to `quantity` of `kind`, dropping the entry at zero.
    pub fn remove(&mut self, kind: &ItemKind, quantity: u32) {
        if let Some(pos) = self.entries.iter().position(|e| &e.kind == kind) {
            let entry = &mut self.entries[pos];
            entry.quantity = entry.quantity.saturating_sub(quantity);
            if entry.quantity == 0 {
                self.entries.remove(pos);
            }
        }
    }

    /// Multiset difference `self - inventory`: what is still missing after
    /// counting everything the inventory carries.
    pub fn missing_from(&self, inventory: &Inventory) -> ItemNeeds {
        let entries = self
            .entries
            .iter()
            .filter_map(|e| {
                let missing = e.quantity.saturating_sub(inventory.count(&e.kind));
                (missing > 0).then(|| ItemAmount { kind: e.kind.clone(), quantity: missing })
            })
            .collect();
        ItemNeeds { entries }
    }
}

impl PartialEq for ItemNeeds {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|e| other.get(&e.kind) == e.quantity)
    }
}

impl FromIterator<ItemAmount> for ItemNeeds {
    fn from_iter<I: IntoIterator<Item = ItemAmount>>(iter: I) -> Self {
        let mut needs = ItemNeeds::new();
        for amount in iter {
            needs.add(amount.kind, amount.quantity);
        }
        needs
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// The work descriptor assigned to a worker ("miner", "builder", …).
///
/// `items_needed` is written by task code when it discovers it needs
/// materials and is synchronized by the resource resolver.  It is cleared
/// once everything has been gathered and on [`restart`][Self::restart].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub name:         String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items_needed: ItemNeeds,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), items_needed: ItemNeeds::new() }
    }

    /// Forget every pending need.
    pub fn restart(&mut self) {
        self.items_needed.clear();
    }
}
