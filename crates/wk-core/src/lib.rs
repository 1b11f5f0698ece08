//! `wk-core`: foundational types for the `worker_ai` framework.
//!
//! This crate is a dependency of every other `wk-*` crate.  It has no `wk-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `JobId`                                        |
//! | [`pos`]      | `BlockPos`, range checks, Manhattan distance              |
//! | [`time`]     | `Tick`                                                    |
//! | [`config`]   | `ColonyConfig`, `SchedulerConfig`, `ExecutorConfig`, …    |
//! | [`error`]    | `WkError`, `WkResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod pos;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ColonyConfig, ExecutorConfig, NavigationConfig, SchedulerConfig};
pub use error::{WkError, WkResult};
pub use ids::{AgentId, JobId};
pub use pos::BlockPos;
pub use time::Tick;
