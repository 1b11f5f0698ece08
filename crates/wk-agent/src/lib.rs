//! `wk-agent`: the worker body the scheduler reads and mutates.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`item`]      | `ItemKind`, `ItemStack`, `ToolKind`, `ToolInfo`            |
//! | [`inventory`] | `Inventory` (slot array) and transfer helpers              |
//! | [`storage`]   | `HomeStorage` - the worker's building chest                |
//! | [`task`]      | `Task`, `ItemNeeds`, `ItemAmount`                          |
//! | [`agent`]     | `Agent` - position, inventory, task, home                  |
//! | [`builder`]   | `AgentBuilder` (fluent construction)                       |
//!
//! The scheduler never creates or destroys an `Agent`; it only moves items
//! between the carried inventory and home storage and updates the position
//! through the movement primitive.

pub mod agent;
pub mod builder;
pub mod inventory;
pub mod item;
pub mod storage;
pub mod task;


pub use agent::Agent;
pub use builder::{AgentBuilder, DEFAULT_INVENTORY_SLOTS};
pub use inventory::{Inventory, transfer_first, transfer_matching, transfer_slot};
pub use item::{DEFAULT_MAX_STACK, ItemKind, ItemStack, ToolInfo, ToolKind};
pub use storage::HomeStorage;
pub use task::{ItemAmount, ItemNeeds, Task};
