//! Configuration structs.
//!
//! Typically loaded from a JSON file by the application crate (enable the
//! `serde` feature) and passed to the colony builder.  Every struct has a
//! `Default` matching the stock worker behaviour, and missing JSON fields
//! fall back to those defaults.

use std::time::Duration;

use crate::{WkError, WkResult};

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Per-worker scheduler tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// How close (in blocks, every axis) a worker must be to a site to
    /// interact with it or to start working from a stand location.
    pub site_range: u32,

    /// Ticks to idle between two checks of an unresolved item or tool need.
    pub recheck_delay_ticks: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            site_range:          3,
            recheck_delay_ticks: 10,
        }
    }
}

// ── ExecutorConfig ────────────────────────────────────────────────────────────

/// Sizing of the background path-computation pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExecutorConfig {
    /// Threads that are never reclaimed.  At least one.
    pub core_threads: usize,

    /// Upper bound on live worker threads.
    pub max_threads: usize,

    /// Seconds an extra (non-core) thread may idle before it exits.
    pub keep_alive_secs: u64,

    /// Prefix for worker thread names (`"{prefix}-{n}"`).
    pub thread_name: String,
}

impl ExecutorConfig {
    #[inline]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            core_threads:    1,
            max_threads:     2,
            keep_alive_secs: 10,
            thread_name:     "pathfinding".to_owned(),
        }
    }
}

// ── NavigationConfig ──────────────────────────────────────────────────────────

/// Movement primitive tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigationConfig {
    /// Path jobs submitted for one goal before the navigator reports it
    /// unreachable.
    pub max_path_attempts: u32,

    /// Node budget handed to the pathfinder with every job.
    pub max_search_nodes: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_path_attempts: 3,
            max_search_nodes:  10_000,
        }
    }
}

// ── ColonyConfig ──────────────────────────────────────────────────────────────

/// Top-level configuration for a colony run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColonyConfig {
    /// Total ticks `Colony::run` simulates.
    pub total_ticks: u64,

    pub scheduler: SchedulerConfig,

    pub executor: ExecutorConfig,

    pub navigation: NavigationConfig,
}

impl ColonyConfig {
    /// Reject settings the pool or navigator cannot honour.
    pub fn validate(&self) -> WkResult<()> {
        let exec = &self.executor;
        if exec.core_threads == 0 {
            return Err(WkError::Config("executor.core_threads must be at least 1".into()));
        }
        if exec.max_threads < exec.core_threads {
            return Err(WkError::Config(format!(
                "executor.max_threads ({}) is below core_threads ({})",
                exec.max_threads, exec.core_threads
            )));
        }
        if self.navigation.max_path_attempts == 0 {
            return Err(WkError::Config("navigation.max_path_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
