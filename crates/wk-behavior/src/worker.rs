//! `WorkerCore` (helpers shared by all jobs) and `WorkerAi` (the scheduler).

use tracing::warn;
use wk_agent::{Agent, ItemAmount, ToolKind};
use wk_core::{AgentId, BlockPos, SchedulerConfig, Tick};

use crate::{
    AiState, BehaviorError, BehaviorResult, ErrorState, ItemResolution, MachineOutcome, Movement,
    OverflowHandler, OverflowStatus, RequestNotifier, ResourceResolver, Target,
    TargetStateMachine, TaskBehavior, TickContext, ToolResolution, Transition, WaitEngine,
};

// ── WorkerCore ────────────────────────────────────────────────────────────────

/// Scheduler state shared by the base targets and the task: wait engine,
/// resolver, notifier, overflow handler, and the task itself.
pub struct WorkerCore<T> {
    pub task:     T,
    pub wait:     WaitEngine,
    pub resolver: ResourceResolver,
    pub notifier: RequestNotifier,
    overflow:     OverflowHandler,
    config:       SchedulerConfig,
    error_state:  ErrorState,
    status_label: String,
}

impl<T: TaskBehavior> WorkerCore<T> {
    pub fn new(task: T, config: SchedulerConfig) -> Self {
        Self {
            task,
            wait:         WaitEngine::new(config.site_range, config.recheck_delay_ticks),
            resolver:     ResourceResolver::new(),
            notifier:     RequestNotifier::new(),
            overflow:     OverflowHandler::new(),
            config,
            error_state:  ErrorState::None,
            status_label: AiState::Init.to_string(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    #[inline]
    pub fn error_state(&self) -> ErrorState {
        self.error_state
    }

    /// The name-tag text, refreshed every tick the target machine runs.
    #[inline]
    pub fn status_label(&self) -> &str {
        &self.status_label
    }

    // ── Wait helpers ──────────────────────────────────────────────────────────

    /// Walk to `stand`, then strike `target` for `ticks` ticks.
    pub fn work_on_block(&mut self, target: BlockPos, stand: BlockPos, ticks: u32) {
        self.wait.work_on_block(Some(target), Some(stand), ticks);
    }

    /// Head for `stand`.  `true` while still walking: return immediately.
    pub fn walk_to_block(&mut self, stand: BlockPos, ctx: &mut TickContext<'_>) -> bool {
        self.wait.walk_to(stand, ctx.agent, ctx.world)
    }

    /// Head for home storage.  `true` while still walking, and also when the
    /// worker has no home to walk to.
    pub fn walk_to_home(&mut self, ctx: &mut TickContext<'_>) -> bool {
        match self.home(ctx) {
            Ok(home) => self.walk_to_block(home, ctx),
            Err(e) => {
                warn!(error = %e, "cannot walk home");
                true
            }
        }
    }

    /// Location of the worker's home storage.
    pub fn home(&self, ctx: &TickContext<'_>) -> BehaviorResult<BlockPos> {
        ctx.agent
            .home_location()
            .ok_or(BehaviorError::MissingHome(ctx.agent.id))
    }

    /// Idle for `ticks` ticks.
    pub fn set_delay(&mut self, ticks: u32) {
        self.wait.set_delay(ticks);
    }

    pub fn clear_work_target(&mut self) {
        self.wait.clear();
    }

    // ── Needs ─────────────────────────────────────────────────────────────────

    /// Add `items` to the task's needs.  The item guard picks them up from
    /// the next tick on.
    pub fn request_items(&mut self, ctx: &mut TickContext<'_>, items: impl IntoIterator<Item = ItemAmount>) {
        for item in items {
            ctx.agent.task.items_needed.add(item.kind, item.quantity);
        }
        self.resolver.sync_needs(&mut ctx.agent.task, &ctx.agent.inventory);
    }

    /// `true` if the inventory already holds all of `items`; otherwise they
    /// are registered as needs and `false` is returned.
    pub fn check_or_request_items(
        &mut self,
        ctx:   &mut TickContext<'_>,
        items: impl IntoIterator<Item = ItemAmount>,
    ) -> bool {
        self.request_items(ctx, items);
        !self.resolver.needs_items()
    }

    /// `true` if a `kind` tool is carried; otherwise the need is registered
    /// and the matching tool guard takes over from the next tick.
    pub fn check_for_tool(&mut self, kind: ToolKind, ctx: &TickContext<'_>) -> bool {
        self.check_tool_level(kind, 0, ctx)
    }

    /// Like [`check_for_tool`][Self::check_for_tool] for a pickaxe of at
    /// least `min_level`.
    pub fn check_for_pickaxe(&mut self, min_level: u8, ctx: &TickContext<'_>) -> bool {
        self.check_tool_level(ToolKind::Pickaxe, min_level, ctx)
    }

    fn check_tool_level(&mut self, kind: ToolKind, min_level: u8, ctx: &TickContext<'_>) -> bool {
        let carried = ctx
            .agent
            .inventory
            .any(|s| s.tool_level(kind).is_some_and(|level| level >= min_level));
        if !carried {
            self.resolver.require_tool(kind, min_level);
        }
        carried
    }

    /// Hold the weakest carried `kind` tool that still reaches
    /// `required_level`.
    pub fn hold_efficient_tool(&mut self, kind: ToolKind, required_level: u8, ctx: &mut TickContext<'_>) -> bool {
        ctx.agent.hold_efficient_tool(kind, required_level)
    }

    // ── Base target actions ───────────────────────────────────────────────────

    fn init_safety_check(&mut self, ctx: &mut TickContext<'_>) -> Transition {
        if ctx.agent.home.is_some() {
            Transition::Goto(AiState::Idle)
        } else {
            Transition::Goto(AiState::Init)
        }
    }

    fn update_visual_state(&mut self, ctx: &mut TickContext<'_>) -> Transition {
        self.status_label.clear();
        self.status_label.push_str(ctx.state.name());
        self.task.update_render_meta(ctx.agent);
        Transition::Continue
    }

    fn wait_for_needed_items(&mut self, ctx: &mut TickContext<'_>) -> Transition {
        let outcome = self.resolver.resolve_items(ctx, &mut self.wait, &mut self.notifier);
        match outcome {
            ItemResolution::Satisfied => {
                self.error_state = ErrorState::None;
                Transition::Goto(AiState::Idle)
            }
            ItemResolution::Walking | ItemResolution::Withdrew(_) => {
                self.error_state = ErrorState::NeedsItem;
                Transition::Goto(AiState::NeedsItem)
            }
            ItemResolution::Requested | ItemResolution::AlreadyRequested | ItemResolution::NoHome => {
                self.error_state = ErrorState::NeedsItem;
                self.wait.set_delay(self.config.recheck_delay_ticks);
                Transition::Goto(AiState::NeedsItem)
            }
        }
    }

    fn wait_for_tool(&mut self, kind: ToolKind, ctx: &mut TickContext<'_>) -> Transition {
        let min_level = self.resolver.required_level(kind).unwrap_or(0);
        let outcome = self
            .resolver
            .resolve_tool(kind, min_level, ctx, &mut self.wait, &mut self.notifier);
        match outcome {
            ToolResolution::Satisfied | ToolResolution::Withdrew => {
                self.error_state = ErrorState::None;
                Transition::Goto(AiState::Idle)
            }
            ToolResolution::Walking => {
                self.error_state = ErrorState::for_tool(kind);
                Transition::Goto(AiState::needs_tool(kind))
            }
            ToolResolution::Requested | ToolResolution::AlreadyRequested | ToolResolution::NoHome => {
                self.error_state = ErrorState::for_tool(kind);
                self.wait.set_delay(self.config.recheck_delay_ticks);
                Transition::Goto(AiState::needs_tool(kind))
            }
        }
    }
}

/// The targets every worker runs before its task's own, in priority order.
fn base_targets<T: TaskBehavior>() -> Vec<Target<WorkerCore<T>>> {
    let mut targets = vec![
        Target::in_state(AiState::Init, |core: &mut WorkerCore<T>, ctx| core.init_safety_check(ctx)),
        Target::always(|core: &mut WorkerCore<T>, ctx| core.update_visual_state(ctx)),
        // Halting here keeps the current state.
        Target::when(
            |core: &mut WorkerCore<T>, ctx| core.wait.is_waiting(ctx.agent, ctx.world),
            |_, _| Transition::Stay,
        ),
        Target::when(
            |core: &mut WorkerCore<T>, ctx| core.resolver.needs_items() || ctx.state == AiState::NeedsItem,
            |core: &mut WorkerCore<T>, ctx| core.wait_for_needed_items(ctx),
        ),
    ];
    for kind in ToolKind::ALL {
        let needs_state = AiState::needs_tool(kind);
        targets.push(Target::when(
            move |core: &mut WorkerCore<T>, ctx| core.resolver.needs_tool(kind) || ctx.state == needs_state,
            move |core: &mut WorkerCore<T>, ctx| core.wait_for_tool(kind, ctx),
        ));
    }
    targets
}

// ── WorkerAi ──────────────────────────────────────────────────────────────────

/// Snapshot of one worker after a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick:        Tick,
    pub agent:       AgentId,
    pub state:       AiState,
    pub error_state: ErrorState,
    /// A wait condition is pending.
    pub waiting:     bool,
    /// The task tick ran.
    pub task_ran:    bool,
}

/// The complete per-worker scheduler: overflow handling, the target machine
/// (base targets followed by the task's), and the task tick hook.
pub struct WorkerAi<T: TaskBehavior> {
    machine: TargetStateMachine<WorkerCore<T>>,
    core:    WorkerCore<T>,
}

impl<T: TaskBehavior> WorkerAi<T> {
    pub fn new(task: T, config: SchedulerConfig) -> Self {
        let mut machine = TargetStateMachine::new(base_targets::<T>());
        machine.extend(task.register_targets());
        Self { machine, core: WorkerCore::new(task, config) }
    }

    #[inline]
    pub fn state(&self) -> AiState {
        self.machine.state()
    }

    #[inline]
    pub fn core(&self) -> &WorkerCore<T> {
        &self.core
    }

    #[inline]
    pub fn core_mut(&mut self) -> &mut WorkerCore<T> {
        &mut self.core
    }

    #[inline]
    pub fn task(&self) -> &T {
        &self.core.task
    }

    /// Run one scheduler tick for `agent`.
    pub fn tick(&mut self, tick: Tick, agent: &mut Agent, world: &mut dyn Movement) -> TickReport {
        let mut task_ran = false;

        let overflow = {
            let core = &mut self.core;
            core.overflow.step(&core.task, agent, world, &mut core.wait)
        };
        match overflow {
            OverflowStatus::Blocked => self.core.error_state = ErrorState::InventoryFull,
            OverflowStatus::Clear => {
                if self.core.error_state == ErrorState::InventoryFull {
                    self.core.error_state = ErrorState::None;
                }
                let mut ctx = TickContext::new(tick, agent, world, self.machine.state());
                let outcome = self.machine.tick(&mut self.core, &mut ctx);
                if outcome == MachineOutcome::FellThrough && self.core.error_state.is_none() {
                    T::perform_task_tick(&mut self.core, &mut ctx);
                    task_ran = true;
                }
            }
        }

        TickReport {
            tick,
            agent: agent.id,
            state: self.machine.state(),
            error_state: self.core.error_state,
            waiting: self.core.wait.is_active(),
            task_ran,
        }
    }

    /// Drop all pending needs, waits, outstanding requests and any inventory
    /// dump in progress, and return to `Init`.
    pub fn restart(&mut self, agent: &mut Agent) {
        agent.task.restart();
        self.core.resolver = ResourceResolver::new();
        self.core.notifier = RequestNotifier::new();
        self.core.overflow = OverflowHandler::new();
        self.core.wait.clear();
        self.core.error_state = ErrorState::None;
        self.core.status_label = AiState::Init.to_string();
        self.machine = {
            let mut machine = TargetStateMachine::new(base_targets::<T>());
            machine.extend(self.core.task.register_targets());
            machine
        };
    }
}
