//! Plain data row types written by output backends.

use wk_agent::Agent;
use wk_behavior::{ItemRequest, TickReport};

/// One worker's scheduler state and position after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerStateRow {
    pub tick:        u64,
    pub agent_id:    u32,
    pub state:       &'static str,
    pub error_state: &'static str,
    pub x:           i32,
    pub y:           i32,
    pub z:           i32,
    pub waiting:     bool,
    pub task_ran:    bool,
}

impl WorkerStateRow {
    pub fn new(report: &TickReport, agent: &Agent) -> Self {
        Self {
            tick:        report.tick.0,
            agent_id:    report.agent.0,
            state:       report.state.name(),
            error_state: report.error_state.name(),
            x:           agent.position.x,
            y:           agent.position.y,
            z:           agent.position.z,
            waiting:     report.waiting,
            task_ran:    report.task_ran,
        }
    }
}

/// A request raised by a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRow {
    pub tick:      u64,
    pub agent_id:  u32,
    /// Item or tool name.
    pub wanted:    String,
    pub quantity:  u32,
    /// Minimum harvest level; only pickaxe requests carry one.
    pub min_level: Option<u8>,
}

impl From<&ItemRequest> for RequestRow {
    fn from(request: &ItemRequest) -> Self {
        Self {
            tick:      request.tick.0,
            agent_id:  request.agent.0,
            wanted:    request.key.to_string(),
            quantity:  request.quantity,
            min_level: request.min_level,
        }
    }
}
