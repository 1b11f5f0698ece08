//! `wk-behavior`: the per-worker scheduler.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`state`]    | `AiState`, `ErrorState`                                      |
//! | [`target`]   | `Target`, `Guard`, `Transition`, `TargetStateMachine`        |
//! | [`context`]  | `TickContext<'a>` - the agent and world for one tick         |
//! | [`movement`] | `Movement` trait (world primitives), `MoveStatus`            |
//! | [`wait`]     | `WaitCondition`, `WaitEngine` - walk-then-work suspensions   |
//! | [`notify`]   | `RequestNotifier`, `ItemRequest` - de-duplicated requests    |
//! | [`resolver`] | `ResourceResolver` - item and tool needs                     |
//! | [`overflow`] | `OverflowHandler` - full-inventory dumping                   |
//! | [`task`]     | `TaskBehavior` - the hook trait concrete jobs implement      |
//! | [`worker`]   | `WorkerCore`, `WorkerAi`, `TickReport`                       |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                         |
//!
//! # Tick order
//!
//! Each call to [`WorkerAi::tick`] runs:
//!
//! 1. **Overflow**: while the carried inventory is full (or the task asks
//!    for a dump) the worker walks home and dumps one slot per tick.
//!    Nothing else runs.
//! 2. **Targets**, in registration order: init check, visual bookkeeping,
//!    wait engine, item needs, one guard per tool kind, then the task's own
//!    targets.  The first target that halts ends evaluation.
//! 3. **Task tick**: if no target halted, [`TaskBehavior::perform_task_tick`].
//!
//! Everything runs on the caller's thread; the only background work is path
//! computation behind the [`Movement`] implementation.

pub mod context;
pub mod error;
pub mod movement;
pub mod notify;
pub mod overflow;
pub mod resolver;
pub mod state;
pub mod target;
pub mod task;
pub mod wait;
pub mod worker;

#[cfg(test)]
mod tests;

pub use context::TickContext;
pub use error::{BehaviorError, BehaviorResult};
pub use movement::{Approach, MoveStatus, Movement, approach};
pub use notify::{ItemRequest, RequestKey, RequestNotifier};
pub use overflow::{OverflowHandler, OverflowStatus};
pub use resolver::{ItemResolution, ResourceResolver, ToolResolution};
pub use state::{AiState, ErrorState};
pub use target::{Guard, MachineOutcome, Target, TargetStateMachine, Transition};
pub use task::TaskBehavior;
pub use wait::{WaitCondition, WaitEngine, WaitStep, advance};
pub use worker::{TickReport, WorkerAi, WorkerCore};
