//! Prioritized (guard, action) targets and the machine that evaluates them.
//!
//! The target list is data: its order is the priority.  Every tick the
//! machine walks the list top to bottom; the first action that halts ends the
//! tick.  Actions earlier in the list that return [`Transition::Continue`]
//! (bookkeeping) still run on the halting tick.

use tracing::debug;

use crate::{AiState, TickContext};

/// What an action asks the machine to do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Keep evaluating later targets this tick.
    Continue,
    /// Stop evaluating and keep the current state unchanged.
    Stay,
    /// Stop evaluating and switch to the given state.
    Goto(AiState),
}

type Predicate<S> = Box<dyn Fn(&mut S, &mut TickContext<'_>) -> bool + Send + Sync>;
type Action<S> = Box<dyn Fn(&mut S, &mut TickContext<'_>) -> Transition + Send + Sync>;

/// When a target's action runs.
pub enum Guard<S> {
    /// Every tick.
    Always,
    /// Only while the machine is in this state.
    State(AiState),
    /// Whenever the predicate holds.  Predicates may have side effects (the
    /// wait engine advances inside its guard).
    When(Predicate<S>),
}

/// One prioritized rule.  `S` is the subject the closures operate on,
/// typically a [`WorkerCore`][crate::WorkerCore].
pub struct Target<S> {
    guard:  Guard<S>,
    action: Action<S>,
}

impl<S> Target<S> {
    pub fn new<A>(guard: Guard<S>, action: A) -> Self
    where
        A: Fn(&mut S, &mut TickContext<'_>) -> Transition + Send + Sync + 'static,
    {
        Self { guard, action: Box::new(action) }
    }

    /// Runs every tick.
    pub fn always<A>(action: A) -> Self
    where
        A: Fn(&mut S, &mut TickContext<'_>) -> Transition + Send + Sync + 'static,
    {
        Self::new(Guard::Always, action)
    }

    /// Runs while the machine is in `state`.
    pub fn in_state<A>(state: AiState, action: A) -> Self
    where
        A: Fn(&mut S, &mut TickContext<'_>) -> Transition + Send + Sync + 'static,
    {
        Self::new(Guard::State(state), action)
    }

    /// Runs whenever `pred` holds.
    pub fn when<P, A>(pred: P, action: A) -> Self
    where
        P: Fn(&mut S, &mut TickContext<'_>) -> bool + Send + Sync + 'static,
        A: Fn(&mut S, &mut TickContext<'_>) -> Transition + Send + Sync + 'static,
    {
        Self::new(Guard::When(Box::new(pred)), action)
    }

    fn matches(&self, subject: &mut S, ctx: &mut TickContext<'_>) -> bool {
        match &self.guard {
            Guard::Always => true,
            Guard::State(state) => ctx.state == *state,
            Guard::When(pred) => pred(subject, ctx),
        }
    }
}

/// How a machine tick ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MachineOutcome {
    /// A target halted evaluation.  `from == to` when it halted with
    /// [`Transition::Stay`] or re-entered its own state.
    Halted { from: AiState, to: AiState },
    /// Every matching target returned `Continue`.
    FellThrough,
}

impl MachineOutcome {
    #[inline]
    pub fn halted(self) -> bool {
        matches!(self, MachineOutcome::Halted { .. })
    }
}

/// Ordered target list plus the current state.
pub struct TargetStateMachine<S> {
    targets: Vec<Target<S>>,
    state:   AiState,
}

impl<S> TargetStateMachine<S> {
    /// A machine starting in [`AiState::Init`].
    pub fn new(targets: Vec<Target<S>>) -> Self {
        Self { targets, state: AiState::Init }
    }

    #[inline]
    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Append lower-priority targets.
    pub fn extend(&mut self, targets: impl IntoIterator<Item = Target<S>>) {
        self.targets.extend(targets);
    }

    /// Evaluate targets in order until one halts.  At most one action halts
    /// per call.
    pub fn tick(&mut self, subject: &mut S, ctx: &mut TickContext<'_>) -> MachineOutcome {
        for target in &self.targets {
            ctx.state = self.state;
            if !target.matches(subject, ctx) {
                continue;
            }
            match (target.action)(subject, ctx) {
                Transition::Continue => {}
                Transition::Stay => {
                    return MachineOutcome::Halted { from: self.state, to: self.state };
                }
                Transition::Goto(next) => {
                    let from = self.state;
                    if next != from {
                        debug!(agent = %ctx.agent.id, tick = %ctx.tick, %from, to = %next, "state transition");
                    }
                    self.state = next;
                    ctx.state = next;
                    return MachineOutcome::Halted { from, to: next };
                }
            }
        }
        ctx.state = self.state;
        MachineOutcome::FellThrough
    }
}
