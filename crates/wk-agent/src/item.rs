//! Item and tool descriptors.

use std::fmt;

/// Stack limit for ordinary items.  Tools never stack.
pub const DEFAULT_MAX_STACK: u32 = 64;

// ── ItemKind ──────────────────────────────────────────────────────────────────

/// Name of an item type (`"cobblestone"`, `"iron_pickaxe"`, …).
///
/// Two stacks are "the same item" when their kinds compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKind(pub String);

impl ItemKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKind {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Tools ─────────────────────────────────────────────────────────────────────

/// The tool classes a worker can be asked to carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolKind {
    Shovel,
    Axe,
    Hoe,
    Rod,
    Pickaxe,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Shovel,
        ToolKind::Axe,
        ToolKind::Hoe,
        ToolKind::Rod,
        ToolKind::Pickaxe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Shovel  => "shovel",
            ToolKind::Axe     => "axe",
            ToolKind::Hoe     => "hoe",
            ToolKind::Rod     => "rod",
            ToolKind::Pickaxe => "pickaxe",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tool class and harvest level carried by a tool stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolInfo {
    pub kind:  ToolKind,
    /// Harvest level: 0 = wood/gold, 1 = stone, 2 = iron, 3 = diamond.
    pub level: u8,
}

// ── ItemStack ─────────────────────────────────────────────────────────────────

/// A quantity of one item kind occupying a single inventory slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub kind:     ItemKind,
    pub quantity: u32,
    /// `Some` for tools.  Tool stacks always hold exactly one item.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tool:     Option<ToolInfo>,
}

impl ItemStack {
    /// An ordinary (non-tool) stack.
    pub fn new(kind: impl Into<ItemKind>, quantity: u32) -> Self {
        Self { kind: kind.into(), quantity, tool: None }
    }

    /// A single tool.
    pub fn tool(kind: impl Into<ItemKind>, tool: ToolKind, level: u8) -> Self {
        Self {
            kind:     kind.into(),
            quantity: 1,
            tool:     Some(ToolInfo { kind: tool, level }),
        }
    }

    /// Largest quantity a single slot can hold for this item.
    #[inline]
    pub fn max_stack(&self) -> u32 {
        if self.tool.is_some() { 1 } else { DEFAULT_MAX_STACK }
    }

    /// `true` if both stacks are of the same item and could merge.
    #[inline]
    pub fn same_item(&self, other: &ItemStack) -> bool {
        self.kind == other.kind && self.tool == other.tool
    }

    #[inline]
    pub fn is_tool(&self, kind: ToolKind) -> bool {
        matches!(self.tool, Some(info) if info.kind == kind)
    }

    /// Harvest level if this stack is a tool of `kind`.
    #[inline]
    pub fn tool_level(&self, kind: ToolKind) -> Option<u8> {
        match self.tool {
            Some(info) if info.kind == kind => Some(info.level),
            _ => None,
        }
    }

    /// `true` for a pickaxe of at least `min_level`.
    #[inline]
    pub fn is_pickaxe_of_level(&self, min_level: u8) -> bool {
        self.tool_level(ToolKind::Pickaxe).is_some_and(|level| level >= min_level)
    }

    /// Split `amount` units off this stack (clamped to what is held).
    pub fn split(&mut self, amount: u32) -> ItemStack {
        let taken = amount.min(self.quantity);
        self.quantity -= taken;
        ItemStack { kind: self.kind.clone(), quantity: taken, tool: self.tool }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.kind)
    }
}
