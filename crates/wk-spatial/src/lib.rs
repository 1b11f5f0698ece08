//! `wk-spatial`: walkable grid, pathfinding, and off-thread path dispatch.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`job`]        | `PathJob`, `PathConstraints`, `Route`                    |
//! | [`grid`]       | `GridMap` - bounded walkable plane with blocked cells    |
//! | [`pathfinder`] | `Pathfinder` trait, `GridPathfinder` (A*)                |
//! | [`dispatch`]   | `PathDispatcher`, `PathHandle`, `PathPoll`               |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `PathJob` and `Route`.  |

pub mod dispatch;
pub mod error;
pub mod grid;
pub mod job;
pub mod pathfinder;


pub use dispatch::{PathDispatcher, PathHandle, PathPoll};
pub use error::{SpatialError, SpatialResult};
pub use grid::GridMap;
pub use job::{PathConstraints, PathJob, Route};
pub use pathfinder::{GridPathfinder, Pathfinder};
