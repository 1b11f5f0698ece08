//! `Navigator`: implements [`Movement`] over the shared path dispatcher.

use std::sync::Arc;

use tracing::{debug, warn};
use wk_agent::Agent;
use wk_behavior::{MoveStatus, Movement};
use wk_core::{AgentId, BlockPos, NavigationConfig};
use wk_spatial::{PathConstraints, PathDispatcher, PathJob, PathPoll};

use crate::{MobilityError, NavState};

/// Movement primitive for one worker.
///
/// A goal is only pursued while the scheduler keeps asking for it: a route
/// not requested through `move_to` since the previous `advance` is dropped
/// instead of followed.
pub struct Navigator {
    agent:        AgentId,
    dispatcher:   Arc<PathDispatcher>,
    config:       NavigationConfig,
    state:        NavState,
    /// `move_to` was called since the last `advance`.
    wanted:       bool,
    strikes:      u64,
    last_strike:  Option<BlockPos>,
    last_failure: Option<MobilityError>,
}

impl Navigator {
    pub fn new(agent: AgentId, dispatcher: Arc<PathDispatcher>, config: NavigationConfig) -> Self {
        Self {
            agent,
            dispatcher,
            config,
            state: NavState::Idle,
            wanted: false,
            strikes: 0,
            last_strike: None,
            last_failure: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Work animations performed so far.
    #[inline]
    pub fn strikes(&self) -> u64 {
        self.strikes
    }

    #[inline]
    pub fn last_strike(&self) -> Option<BlockPos> {
        self.last_strike
    }

    /// Why the most recent goal was given up on, if one was.
    #[inline]
    pub fn last_failure(&self) -> Option<&MobilityError> {
        self.last_failure.as_ref()
    }

    /// Forget the current goal and any path job in flight.
    pub fn reset(&mut self) {
        self.state = NavState::Idle;
        self.wanted = false;
    }

    fn submit(&mut self, start: BlockPos, goal: BlockPos, range: u32, attempts: u32) {
        let job = PathJob {
            agent: self.agent,
            start,
            goal,
            constraints: PathConstraints { range, max_nodes: self.config.max_search_nodes },
        };
        let handle = self.dispatcher.submit(job);
        self.state = NavState::Pending { goal, range, handle, attempts };
    }

    /// Poll the pending path job and take one step along the current route.
    /// Call once per tick, before the scheduler.
    pub fn advance(&mut self, agent: &mut Agent) {
        let wanted = std::mem::take(&mut self.wanted);
        if !wanted && matches!(self.state, NavState::Pending { .. } | NavState::Following { .. }) {
            debug!(agent = %self.agent, goal = ?self.state.goal(), "goal no longer requested, dropping route");
            self.state = NavState::Idle;
            return;
        }
        match std::mem::take(&mut self.state) {
            NavState::Pending { goal, range, handle, attempts } => match handle.poll() {
                PathPoll::Pending => {
                    self.state = NavState::Pending { goal, range, handle, attempts };
                }
                PathPoll::Route(route) if route.is_trivial() => {}
                PathPoll::Route(route) => {
                    debug!(agent = %self.agent, %goal, steps = route.len(), "route ready");
                    self.state = NavState::Following { goal, range, route, next: 0 };
                }
                PathPoll::Unreachable => self.retry_or_give_up(agent.position, goal, range, attempts, None),
                PathPoll::Failed(reason) => {
                    self.retry_or_give_up(agent.position, goal, range, attempts, Some(reason))
                }
            },
            NavState::Following { goal, range, route, next } => {
                if let Some(&step) = route.steps.get(next) {
                    agent.position = step;
                }
                if next + 1 < route.len() {
                    self.state = NavState::Following { goal, range, route, next: next + 1 };
                }
            }
            other => self.state = other,
        }
    }

    fn retry_or_give_up(
        &mut self,
        from:     BlockPos,
        goal:     BlockPos,
        range:    u32,
        attempts: u32,
        failure:  Option<String>,
    ) {
        if attempts < self.config.max_path_attempts {
            debug!(agent = %self.agent, %goal, attempts, "path attempt failed, retrying");
            self.submit(from, goal, range, attempts + 1);
            return;
        }
        let err = match failure {
            Some(reason) => MobilityError::JobFailed { agent: self.agent, reason },
            None => MobilityError::Unreachable { agent: self.agent, goal, attempts },
        };
        warn!(error = %err, "giving up on goal");
        self.last_failure = Some(err);
        self.state = NavState::Unreachable { goal };
    }
}

impl Movement for Navigator {
    fn move_to(&mut self, agent: &Agent, goal: BlockPos, range: u32) -> MoveStatus {
        if agent.position.within(goal, range) {
            self.reset();
            return MoveStatus::Arrived;
        }
        self.wanted = true;
        match &self.state {
            NavState::Pending { goal: g, range: r, .. } if *g == goal && *r == range => MoveStatus::Pathing,
            NavState::Following { goal: g, range: r, .. } if *g == goal && *r == range => MoveStatus::Moving,
            NavState::Unreachable { goal: g } if *g == goal => {
                self.state = NavState::Idle;
                MoveStatus::Unreachable
            }
            _ => {
                self.submit(agent.position, goal, range, 1);
                MoveStatus::Pathing
            }
        }
    }

    fn strike(&mut self, _agent: &Agent, target: BlockPos) {
        self.strikes += 1;
        self.last_strike = Some(target);
    }
}
