//! `wk-executor`: the background pool that computes paths off the tick
//! thread.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`pool`]   | `JobExecutor` - core + elastic worker threads, FIFO backlog   |
//! | [`handle`] | `JobHandle<T>` - non-blocking poll, blocking wait with timeout|
//! | [`error`]  | `JobError`, `JobResult`                                       |
//!
//! # Threading model
//!
//! `core_threads` workers are spawned up front and live until the executor
//! is dropped.  When a job is submitted and no worker is idle, one extra
//! worker is spawned (up to `max_threads`).  Extra workers exit after
//! `keep_alive` without work.  The backlog is an unbounded FIFO.
//!
//! Jobs must not touch agent state: they receive owned request parameters
//! and hand back an owned result.  A job that panics completes its handle
//! with [`JobError::Panicked`] instead of taking the worker down.

pub mod error;
pub mod handle;
pub mod pool;


pub use error::{JobError, JobResult};
pub use handle::JobHandle;
pub use pool::JobExecutor;
