//! The `TaskBehavior` trait: the extension point for concrete jobs.

use wk_agent::{Agent, ItemStack};

use crate::{Target, TickContext, WorkerCore};

/// A concrete job (miner, builder, fisherman, …) plugged into the shared
/// worker scheduler.
///
/// The scheduler owns the value (inside [`WorkerCore::task`]) and composes
/// it with the base targets; nothing is inherited.
///
/// # Example
///
/// ```rust,ignore
/// struct Digger;
///
/// impl TaskBehavior for Digger {
///     fn register_targets(&self) -> Vec<Target<WorkerCore<Self>>> {
///         vec![Target::in_state(AiState::Idle, |core, ctx| {
///             if !core.check_for_tool(ToolKind::Shovel, ctx) {
///                 return Transition::Stay;
///             }
///             core.work_on_block(DIG_AT, DIG_AT, 20);
///             Transition::Goto(AiState::Task("DIG"))
///         })]
///     }
///
///     fn perform_task_tick(_core: &mut WorkerCore<Self>, _ctx: &mut TickContext<'_>) {}
/// }
/// ```
pub trait TaskBehavior: Sized + Send + 'static {
    /// Task-specific targets, evaluated after the base targets in the order
    /// returned.  Called once when the scheduler is built.
    fn register_targets(&self) -> Vec<Target<WorkerCore<Self>>> {
        Vec::new()
    }

    /// Called once per tick when no overflow, wait, or need is active and no
    /// target halted.
    fn perform_task_tick(core: &mut WorkerCore<Self>, ctx: &mut TickContext<'_>);

    /// Ask for an inventory dump before the inventory is actually full.
    fn wants_inventory_dump(&self, _agent: &Agent) -> bool {
        false
    }

    /// Stacks the overflow handler must leave in the inventory.
    fn is_item_kept(&self, _stack: &ItemStack) -> bool {
        false
    }

    /// Refresh cosmetic per-worker data (carried torches, seeds, …).  Runs
    /// every tick the target machine runs.
    fn update_render_meta(&mut self, _agent: &Agent) {}
}
