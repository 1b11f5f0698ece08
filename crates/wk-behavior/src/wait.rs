//! The wait/delay engine: "walk to a stand location, then work a block for
//! N ticks", or just "idle for N ticks".

use tracing::{debug, warn};
use wk_agent::Agent;
use wk_core::BlockPos;

use crate::{Approach, Movement, approach};

/// A pending suspension.
///
/// While `ticks > 0` and `stand` is set, the worker first walks to `stand`;
/// walking does not consume ticks.  Once there (or if `stand` is `None`) each
/// tick consumes one tick and strikes `work`, if set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitCondition {
    pub stand: Option<BlockPos>,
    pub work:  Option<BlockPos>,
    pub ticks: u32,
}

impl WaitCondition {
    /// Plain countdown without movement.
    pub fn delay(ticks: u32) -> Self {
        Self { stand: None, work: None, ticks }
    }

    /// Walk to `stand` and consider the wait done on arrival.
    pub fn walk(stand: BlockPos) -> Self {
        Self { stand: Some(stand), work: None, ticks: 1 }
    }
}

/// Result of advancing a condition by one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaitStep {
    /// Still heading for the stand location; countdown untouched.
    Walking(WaitCondition),
    /// One tick of work performed; countdown decremented.
    Worked(WaitCondition),
    /// Countdown exhausted; the condition should be cleared.
    Finished,
    /// The stand location cannot be reached.
    Abandoned,
}

/// Advance `cond` by one tick.
pub fn advance(cond: WaitCondition, agent: &Agent, world: &mut dyn Movement, range: u32) -> WaitStep {
    if cond.ticks == 0 {
        return WaitStep::Finished;
    }
    if let Some(stand) = cond.stand {
        match approach(world, agent, stand, range) {
            Approach::Arrived => {}
            Approach::Walking => return WaitStep::Walking(cond),
            Approach::Unreachable => return WaitStep::Abandoned,
        }
    }
    if let Some(work) = cond.work {
        world.strike(agent, work);
    }
    WaitStep::Worked(WaitCondition { ticks: cond.ticks - 1, ..cond })
}

/// Holds the worker's current [`WaitCondition`], if any.
#[derive(Clone, Debug)]
pub struct WaitEngine {
    condition: Option<WaitCondition>,
    range:     u32,
    recheck:   u32,
}

impl WaitEngine {
    /// `range` is how close the worker must stand to a stand location;
    /// `recheck` is how long to idle after a walk target turns out to be
    /// unreachable.
    pub fn new(range: u32, recheck: u32) -> Self {
        Self { condition: None, range, recheck }
    }

    #[inline]
    pub fn range(&self) -> u32 {
        self.range
    }

    #[inline]
    pub fn condition(&self) -> Option<&WaitCondition> {
        self.condition.as_ref()
    }

    /// `true` while a condition is set (without advancing it).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.condition.is_some()
    }

    /// `true` while the condition is a plain countdown with nothing to walk
    /// to or strike.
    #[inline]
    pub fn is_delaying(&self) -> bool {
        self.condition.is_some_and(|c| c.stand.is_none() && c.work.is_none())
    }

    /// Advance the current condition by one tick and report whether the
    /// worker must keep waiting.  Call exactly once per tick.
    pub fn is_waiting(&mut self, agent: &Agent, world: &mut dyn Movement) -> bool {
        let Some(cond) = self.condition else {
            return false;
        };
        match advance(cond, agent, world, self.range) {
            WaitStep::Walking(next) | WaitStep::Worked(next) => {
                self.condition = Some(next);
                true
            }
            WaitStep::Finished => {
                self.condition = None;
                false
            }
            WaitStep::Abandoned => {
                warn!(agent = %agent.id, stand = ?cond.stand, "stand location unreachable, dropping wait");
                self.condition = None;
                false
            }
        }
    }

    /// Walk to `stand`, then strike `work` for `ticks` ticks.
    pub fn work_on_block(&mut self, work: Option<BlockPos>, stand: Option<BlockPos>, ticks: u32) {
        self.condition = (ticks > 0).then_some(WaitCondition { stand, work, ticks });
    }

    /// Idle for `ticks` ticks, replacing any current condition.
    pub fn set_delay(&mut self, ticks: u32) {
        self.work_on_block(None, None, ticks);
    }

    /// Extend the current countdown by `ticks` (or start a plain delay).
    pub fn add_delay(&mut self, ticks: u32) {
        match self.condition.as_mut() {
            Some(cond) => cond.ticks = cond.ticks.saturating_add(ticks),
            None => self.set_delay(ticks),
        }
    }

    pub fn clear(&mut self) {
        self.condition = None;
    }

    /// Head for `stand`.  Returns `true` while still on the way; the caller
    /// should return immediately in that case.
    ///
    /// While walking, a one-tick condition for `stand` is installed so the
    /// wait guard keeps the worker moving on later ticks.  On arrival that
    /// condition is removed again, so the caller can act this same tick.  An
    /// unreachable `stand` installs the recheck delay instead, so the next
    /// path attempt is that many ticks away.
    pub fn walk_to(&mut self, stand: BlockPos, agent: &Agent, world: &mut dyn Movement) -> bool {
        match approach(world, agent, stand, self.range) {
            Approach::Arrived => {
                if self.condition == Some(WaitCondition::walk(stand)) {
                    self.condition = None;
                }
                false
            }
            Approach::Walking => {
                if self.condition.is_none_or(|c| c.stand != Some(stand)) {
                    debug!(agent = %agent.id, %stand, "walking to site");
                    self.condition = Some(WaitCondition::walk(stand));
                }
                true
            }
            Approach::Unreachable => {
                warn!(agent = %agent.id, %stand, retry_in = self.recheck, "site unreachable");
                self.condition = (self.recheck > 0).then_some(WaitCondition::delay(self.recheck));
                true
            }
        }
    }
}
