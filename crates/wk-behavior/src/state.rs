//! Scheduler states.

use std::fmt;

use wk_agent::ToolKind;

/// What the worker is doing, as reported by the scheduler.
///
/// Exactly one state is current at a time.  `Task` carries the name of a
/// state defined by the concrete job (e.g. `"MINE_BLOCK"`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AiState {
    Init,
    Idle,
    NeedsItem,
    NeedsShovel,
    NeedsAxe,
    NeedsHoe,
    NeedsRod,
    NeedsPickaxe,
    Task(&'static str),
}

impl AiState {
    /// The waiting state for a missing tool of `kind`.
    pub fn needs_tool(kind: ToolKind) -> AiState {
        match kind {
            ToolKind::Shovel  => AiState::NeedsShovel,
            ToolKind::Axe     => AiState::NeedsAxe,
            ToolKind::Hoe     => AiState::NeedsHoe,
            ToolKind::Rod     => AiState::NeedsRod,
            ToolKind::Pickaxe => AiState::NeedsPickaxe,
        }
    }

    /// `true` for the `Needs*` overlay states.
    pub fn is_needs(self) -> bool {
        matches!(
            self,
            AiState::NeedsItem
                | AiState::NeedsShovel
                | AiState::NeedsAxe
                | AiState::NeedsHoe
                | AiState::NeedsRod
                | AiState::NeedsPickaxe
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AiState::Init         => "INIT",
            AiState::Idle         => "IDLE",
            AiState::NeedsItem    => "NEEDS_ITEM",
            AiState::NeedsShovel  => "NEEDS_SHOVEL",
            AiState::NeedsAxe     => "NEEDS_AXE",
            AiState::NeedsHoe     => "NEEDS_HOE",
            AiState::NeedsRod     => "NEEDS_ROD",
            AiState::NeedsPickaxe => "NEEDS_PICKAXE",
            AiState::Task(name)   => name,
        }
    }
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why normal task execution is currently suppressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorState {
    #[default]
    None,
    NeedsItem,
    NeedsShovel,
    NeedsAxe,
    NeedsHoe,
    NeedsRod,
    NeedsPickaxe,
    InventoryFull,
}

impl ErrorState {
    pub fn for_tool(kind: ToolKind) -> ErrorState {
        match kind {
            ToolKind::Shovel  => ErrorState::NeedsShovel,
            ToolKind::Axe     => ErrorState::NeedsAxe,
            ToolKind::Hoe     => ErrorState::NeedsHoe,
            ToolKind::Rod     => ErrorState::NeedsRod,
            ToolKind::Pickaxe => ErrorState::NeedsPickaxe,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == ErrorState::None
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorState::None          => "NONE",
            ErrorState::NeedsItem     => "NEEDS_ITEM",
            ErrorState::NeedsShovel   => "NEEDS_SHOVEL",
            ErrorState::NeedsAxe      => "NEEDS_AXE",
            ErrorState::NeedsHoe      => "NEEDS_HOE",
            ErrorState::NeedsRod      => "NEEDS_ROD",
            ErrorState::NeedsPickaxe  => "NEEDS_PICKAXE",
            ErrorState::InventoryFull => "INVENTORY_FULL",
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
