//! Fluent builder for [`Agent`].

use wk_core::{AgentId, BlockPos};

use crate::{Agent, HomeStorage, Inventory, ItemStack, Task};

/// Default carried-inventory size.
pub const DEFAULT_INVENTORY_SLOTS: usize = 27;

/// Builds an [`Agent`] with sensible defaults.
///
/// # Example
///
/// ```rust,ignore
/// let agent = AgentBuilder::new(AgentId(0))
///     .position(BlockPos::new(0, 64, 0))
///     .home(BlockPos::new(5, 64, 5), 27)
///     .task(Task::new("miner"))
///     .carrying(ItemStack::tool("stone_pickaxe", ToolKind::Pickaxe, 1))
///     .build();
/// ```
pub struct AgentBuilder {
    id:        AgentId,
    position:  BlockPos,
    slots:     usize,
    task:      Task,
    home:      Option<HomeStorage>,
    carried:   Vec<ItemStack>,
    stored:    Vec<ItemStack>,
}

impl AgentBuilder {
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            position: BlockPos::default(),
            slots:    DEFAULT_INVENTORY_SLOTS,
            task:     Task::default(),
            home:     None,
            carried:  Vec::new(),
            stored:   Vec::new(),
        }
    }

    pub fn position(mut self, position: BlockPos) -> Self {
        self.position = position;
        self
    }

    /// Carried-inventory slot count.
    pub fn inventory_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.task = task;
        self
    }

    /// Give the worker a home storage with `slots` slots at `location`.
    pub fn home(mut self, location: BlockPos, slots: usize) -> Self {
        self.home = Some(HomeStorage::new(location, slots));
        self
    }

    /// Start with `stack` in the carried inventory.
    pub fn carrying(mut self, stack: ItemStack) -> Self {
        self.carried.push(stack);
        self
    }

    /// Start with `stack` in home storage (ignored without a home).
    pub fn stored(mut self, stack: ItemStack) -> Self {
        self.stored.push(stack);
        self
    }

    /// Build the agent.  Stacks that do not fit are silently dropped.
    pub fn build(self) -> Agent {
        let mut inventory = Inventory::new(self.slots);
        for stack in self.carried {
            let _ = inventory.insert(stack);
        }
        let mut home = self.home;
        if let Some(home) = home.as_mut() {
            for stack in self.stored {
                let _ = home.inventory.insert(stack);
            }
        }
        Agent {
            id: self.id,
            position: self.position,
            inventory,
            task: self.task,
            home,
            held_slot: None,
        }
    }
}
