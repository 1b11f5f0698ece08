//! `TickContext`: what a target sees during one tick.

use wk_agent::Agent;
use wk_core::Tick;

use crate::{AiState, Movement};

/// Mutable view of one worker for the duration of a tick.
///
/// `state` is the scheduler state at the moment the current target is
/// evaluated; the machine refreshes it before every guard.
pub struct TickContext<'a> {
    pub tick:  Tick,
    pub agent: &'a mut Agent,
    pub world: &'a mut dyn Movement,
    pub state: AiState,
}

impl<'a> TickContext<'a> {
    pub fn new(tick: Tick, agent: &'a mut Agent, world: &'a mut dyn Movement, state: AiState) -> Self {
        Self { tick, agent, world, state }
    }
}
