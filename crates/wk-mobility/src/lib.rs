//! `wk-mobility`: the movement primitive behind [`wk_behavior::Movement`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`state`]     | `NavState` - idle / pathing / following / unreachable     |
//! | [`navigator`] | `Navigator` - per-worker path requests and stepping       |
//! | [`error`]     | `MobilityError`, `MobilityResult<T>`                      |
//!
//! # Movement model (one block per tick)
//!
//! 1. The scheduler calls `Navigator::move_to(goal)` on its tick.  A new
//!    goal submits a [`PathJob`][wk_spatial::PathJob] to the shared
//!    dispatcher and reports `Pathing`; the tick thread never waits.
//! 2. The colony calls `Navigator::advance` once per tick before the
//!    scheduler.  It polls the pending handle and, once a route is in,
//!    moves the agent one block along it.
//! 3. A failed or unreachable job is retried from the current position up
//!    to `max_path_attempts` times; after that the next `move_to` for that
//!    goal reports `Unreachable` once and the navigator resets.
//!
//! A navigator holds at most one outstanding handle.  Switching goals drops
//! the old handle and its result is discarded when it arrives.

pub mod error;
pub mod navigator;
pub mod state;


pub use error::{MobilityError, MobilityResult};
pub use navigator::Navigator;
pub use state::NavState;
