//! Unit tests for wk-behavior.

use wk_agent::{Agent, AgentBuilder, ItemAmount, ItemKind, ItemStack, ToolKind};
use wk_core::{AgentId, BlockPos, SchedulerConfig, Tick};

use crate::{
    AiState, ErrorState, MoveStatus, Movement, TaskBehavior, TickContext, TickReport, WorkerAi,
    WorkerCore,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: BlockPos = BlockPos::new(0, 64, 0);
const FAR: BlockPos = BlockPos::new(40, 64, 40);

/// Movement stub: never moves the agent itself (tests teleport it) and
/// records every call.
#[derive(Default)]
struct FakeWorld {
    goals:       Vec<BlockPos>,
    strikes:     Vec<BlockPos>,
    unreachable: bool,
}

impl Movement for FakeWorld {
    fn move_to(&mut self, _agent: &Agent, goal: BlockPos, _range: u32) -> MoveStatus {
        self.goals.push(goal);
        if self.unreachable { MoveStatus::Unreachable } else { MoveStatus::Moving }
    }

    fn strike(&mut self, _agent: &Agent, target: BlockPos) {
        self.strikes.push(target);
    }
}

/// Task that records its ticks and optionally asks for items or a pickaxe.
#[derive(Default)]
struct Chores {
    task_ticks:    u32,
    render_calls:  u32,
    items:         Option<ItemAmount>,
    pickaxe_level: Option<u8>,
    keep_tools:    bool,
    want_dump:     bool,
}

impl TaskBehavior for Chores {
    fn perform_task_tick(core: &mut WorkerCore<Self>, ctx: &mut TickContext<'_>) {
        core.task.task_ticks += 1;
        if let Some(items) = core.task.items.clone() {
            if core.check_or_request_items(ctx, [items]) {
                core.task.items = None;
            }
        }
        if let Some(level) = core.task.pickaxe_level {
            if core.check_for_pickaxe(level, ctx) {
                core.task.pickaxe_level = None;
            }
        }
    }

    fn wants_inventory_dump(&self, _agent: &Agent) -> bool {
        self.want_dump
    }

    fn is_item_kept(&self, stack: &ItemStack) -> bool {
        self.keep_tools && stack.tool.is_some()
    }

    fn update_render_meta(&mut self, _agent: &Agent) {
        self.render_calls += 1;
    }
}

fn agent_at_home() -> Agent {
    AgentBuilder::new(AgentId(1)).position(HOME).home(HOME, 10).build()
}

struct Rig<T: TaskBehavior> {
    ai:    WorkerAi<T>,
    agent: Agent,
    world: FakeWorld,
    clock: Tick,
}

impl<T: TaskBehavior> Rig<T> {
    fn new(task: T, agent: Agent) -> Self {
        Self {
            ai: WorkerAi::new(task, SchedulerConfig::default()),
            agent,
            world: FakeWorld::default(),
            clock: Tick::ZERO,
        }
    }

    fn tick(&mut self) -> TickReport {
        let report = self.ai.tick(self.clock, &mut self.agent, &mut self.world);
        self.clock = self.clock.next();
        report
    }

    fn run(&mut self, n: usize) -> Vec<TickReport> {
        (0..n).map(|_| self.tick()).collect()
    }
}

// ── Target machine ────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine_tests {
    use super::*;
    use crate::{MachineOutcome, Target, TargetStateMachine, Transition};

    type Log = Vec<&'static str>;

    fn ctx_parts() -> (Agent, FakeWorld) {
        (agent_at_home(), FakeWorld::default())
    }

    #[test]
    fn first_halting_target_ends_tick() {
        let mut machine: TargetStateMachine<Log> = TargetStateMachine::new(vec![
            Target::always(|log: &mut Log, _| {
                log.push("bookkeeping");
                Transition::Continue
            }),
            Target::always(|log: &mut Log, _| {
                log.push("halt");
                Transition::Goto(AiState::Idle)
            }),
            Target::always(|log: &mut Log, _| {
                log.push("never");
                Transition::Goto(AiState::NeedsItem)
            }),
        ]);
        let (mut agent, mut world) = ctx_parts();
        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Init);
        let mut log = Log::new();

        let outcome = machine.tick(&mut log, &mut ctx);
        assert_eq!(outcome, MachineOutcome::Halted { from: AiState::Init, to: AiState::Idle });
        assert_eq!(log, vec!["bookkeeping", "halt"]);
        assert_eq!(machine.state(), AiState::Idle);
    }

    #[test]
    fn stay_keeps_state_and_state_guard_filters() {
        let mut machine: TargetStateMachine<Log> = TargetStateMachine::new(vec![
            Target::in_state(AiState::Idle, |log: &mut Log, _| {
                log.push("idle-only");
                Transition::Continue
            }),
            Target::when(|_: &mut Log, _| true, |_, _| Transition::Stay),
        ]);
        let (mut agent, mut world) = ctx_parts();
        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Init);
        let mut log = Log::new();

        let outcome = machine.tick(&mut log, &mut ctx);
        assert_eq!(outcome, MachineOutcome::Halted { from: AiState::Init, to: AiState::Init });
        assert!(log.is_empty());
        assert_eq!(machine.state(), AiState::Init);
    }

    #[test]
    fn falls_through_when_nothing_halts() {
        let mut machine: TargetStateMachine<Log> = TargetStateMachine::new(vec![
            Target::always(|_: &mut Log, _| Transition::Continue),
            Target::when(|_: &mut Log, _| false, |_, _| Transition::Stay),
        ]);
        let (mut agent, mut world) = ctx_parts();
        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
        let outcome = machine.tick(&mut Log::new(), &mut ctx);
        assert_eq!(outcome, MachineOutcome::FellThrough);
        assert!(!outcome.halted());
    }
}

// ── Wait engine ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait_tests {
    use super::*;
    use crate::{WaitCondition, WaitEngine, WaitStep, advance};

    #[test]
    fn walking_does_not_consume_ticks() {
        let agent = agent_at_home();
        let mut world = FakeWorld::default();
        let cond = WaitCondition { stand: Some(FAR), work: Some(FAR), ticks: 5 };
        assert_eq!(advance(cond, &agent, &mut world, 3), WaitStep::Walking(cond));
        assert_eq!(world.goals, vec![FAR]);
        assert!(world.strikes.is_empty());
    }

    #[test]
    fn at_stand_strikes_and_counts_down() {
        let agent = agent_at_home();
        let mut world = FakeWorld::default();
        let work = BlockPos::new(1, 64, 0);
        let cond = WaitCondition { stand: Some(HOME), work: Some(work), ticks: 2 };

        let WaitStep::Worked(next) = advance(cond, &agent, &mut world, 3) else {
            panic!("expected work step");
        };
        assert_eq!(next.ticks, 1);
        assert_eq!(world.strikes, vec![work]);
        assert!(world.goals.is_empty());
        assert_eq!(advance(WaitCondition { ticks: 0, ..next }, &agent, &mut world, 3), WaitStep::Finished);
    }

    #[test]
    fn unreachable_stand_abandons() {
        let agent = agent_at_home();
        let mut world = FakeWorld { unreachable: true, ..FakeWorld::default() };
        let mut engine = WaitEngine::new(3, 10);
        engine.work_on_block(None, Some(FAR), 4);
        assert!(!engine.is_waiting(&agent, &mut world));
        assert!(!engine.is_active());
    }

    #[test]
    fn delay_runs_exact_ticks_then_clears() {
        let agent = agent_at_home();
        let mut world = FakeWorld::default();
        let mut engine = WaitEngine::new(3, 10);
        engine.set_delay(3);
        engine.add_delay(1);
        let waits = (0..6).filter(|_| engine.is_waiting(&agent, &mut world)).count();
        assert_eq!(waits, 4);
        assert!(engine.condition().is_none());
    }

    #[test]
    fn zero_tick_work_is_no_wait() {
        let mut engine = WaitEngine::new(3, 10);
        engine.work_on_block(Some(HOME), Some(HOME), 0);
        assert!(!engine.is_active());
    }

    #[test]
    fn walk_arrival_and_plain_delay_do_not_strike() {
        let mut agent = agent_at_home();
        let mut world = FakeWorld::default();
        let mut engine = WaitEngine::new(3, 10);

        assert!(engine.walk_to(FAR, &agent, &mut world));
        agent.position = FAR;
        while engine.is_waiting(&agent, &mut world) {}
        engine.set_delay(2);
        while engine.is_waiting(&agent, &mut world) {}
        assert!(world.strikes.is_empty());
    }

    #[test]
    fn unreachable_walk_target_installs_recheck_delay() {
        let agent = agent_at_home();
        let mut world = FakeWorld { unreachable: true, ..FakeWorld::default() };
        let mut engine = WaitEngine::new(3, 5);

        assert!(engine.walk_to(FAR, &agent, &mut world));
        assert_eq!(engine.condition(), Some(&WaitCondition::delay(5)));
        assert!(engine.is_delaying());

        let waits = (0..10).take_while(|_| engine.is_waiting(&agent, &mut world)).count();
        assert_eq!(waits, 5);
        assert_eq!(world.goals, vec![FAR]);
    }

    #[test]
    fn walk_to_installs_then_clears_on_arrival() {
        let mut agent = agent_at_home();
        let mut world = FakeWorld::default();
        let mut engine = WaitEngine::new(3, 10);

        assert!(engine.walk_to(FAR, &agent, &mut world));
        assert_eq!(engine.condition(), Some(&WaitCondition::walk(FAR)));

        agent.position = FAR;
        assert!(!engine.walk_to(FAR, &agent, &mut world));
        assert!(!engine.is_active());
    }
}

// ── Request notifier ──────────────────────────────────────────────────────────

#[cfg(test)]
mod notify_tests {
    use super::*;
    use crate::{ItemRequest, RequestKey, RequestNotifier};
    use wk_agent::ItemNeeds;

    fn req(agent: u32, item: &str) -> ItemRequest {
        ItemRequest {
            agent:     AgentId(agent),
            tick:      Tick(0),
            key:       RequestKey::Item(ItemKind::from(item)),
            quantity:  4,
            min_level: None,
        }
    }

    #[test]
    fn duplicate_requests_are_suppressed() {
        let mut n = RequestNotifier::new();
        assert!(n.request(req(1, "planks")));
        assert!(!n.request(req(1, "planks")));
        assert_eq!(n.drain().len(), 1);
        assert!(n.drain().is_empty());
    }

    #[test]
    fn keyed_per_agent_and_item() {
        let mut n = RequestNotifier::new();
        assert!(n.request(req(1, "planks")));
        assert!(n.request(req(2, "planks")));
        assert!(n.request(req(1, "torch")));
        assert_eq!(n.outstanding_count(), 3);
    }

    #[test]
    fn resolve_rearms() {
        let mut n = RequestNotifier::new();
        n.request(req(1, "planks"));
        let key = RequestKey::Item(ItemKind::from("planks"));
        assert!(n.resolve(AgentId(1), &key));
        assert!(n.request(req(1, "planks")));
    }

    #[test]
    fn retain_items_drops_satisfied_needs() {
        let mut n = RequestNotifier::new();
        n.request(req(1, "planks"));
        n.request(req(1, "torch"));
        n.request(req(2, "planks"));
        let mut needs = ItemNeeds::new();
        needs.add("torch", 1);

        n.retain_items(AgentId(1), &needs);
        assert!(!n.is_outstanding(AgentId(1), &RequestKey::Item(ItemKind::from("planks"))));
        assert!(n.is_outstanding(AgentId(1), &RequestKey::Item(ItemKind::from("torch"))));
        assert!(n.is_outstanding(AgentId(2), &RequestKey::Item(ItemKind::from("planks"))));
    }

    #[test]
    fn display_names_tool_level() {
        let r = ItemRequest {
            agent:     AgentId(3),
            tick:      Tick(0),
            key:       RequestKey::Tool(ToolKind::Pickaxe),
            quantity:  1,
            min_level: Some(2),
        };
        assert_eq!(r.to_string(), "AgentId(3) needs a pickaxe of at least level 2");
    }
}

// ── Resource resolver ─────────────────────────────────────────────────────────

#[cfg(test)]
mod resolver_tests {
    use super::*;
    use crate::{ItemResolution, RequestNotifier, ResourceResolver, ToolResolution, WaitEngine};

    fn x() -> ItemKind {
        ItemKind::from("x")
    }

    #[test]
    fn withdraws_only_what_is_missing() {
        let mut agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .carrying(ItemStack::new("x", 2))
            .stored(ItemStack::new("x", 10))
            .build();
        agent.task.items_needed.add("x", 5);
        let mut world = FakeWorld::default();
        let mut resolver = ResourceResolver::new();
        let mut wait = WaitEngine::new(3, 10);
        let mut notifier = RequestNotifier::new();

        {
            let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
            let outcome = resolver.resolve_items(&mut ctx, &mut wait, &mut notifier);
            assert_eq!(outcome, ItemResolution::Withdrew(3));
        }
        assert_eq!(agent.inventory.count(&x()), 5);
        assert_eq!(agent.home.as_ref().unwrap().inventory.count(&x()), 7);

        let remaining = resolver.sync_needs(&mut agent.task, &agent.inventory);
        assert!(remaining.is_empty());
        assert!(agent.task.items_needed.is_empty());
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn missing_item_is_requested_once() {
        let mut agent = agent_at_home();
        agent.task.items_needed.add("x", 5);
        let mut world = FakeWorld::default();
        let mut resolver = ResourceResolver::new();
        let mut wait = WaitEngine::new(3, 10);
        let mut notifier = RequestNotifier::new();

        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
        assert_eq!(resolver.resolve_items(&mut ctx, &mut wait, &mut notifier), ItemResolution::Requested);
        assert_eq!(
            resolver.resolve_items(&mut ctx, &mut wait, &mut notifier),
            ItemResolution::AlreadyRequested
        );
        assert_eq!(notifier.drain().len(), 1);
    }

    #[test]
    fn walks_home_before_withdrawing() {
        let mut agent = AgentBuilder::new(AgentId(1))
            .position(FAR)
            .home(HOME, 10)
            .stored(ItemStack::new("x", 10))
            .build();
        agent.task.items_needed.add("x", 1);
        let mut world = FakeWorld::default();
        let mut resolver = ResourceResolver::new();
        let mut wait = WaitEngine::new(3, 10);
        let mut notifier = RequestNotifier::new();

        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
        assert_eq!(resolver.resolve_items(&mut ctx, &mut wait, &mut notifier), ItemResolution::Walking);
        assert!(wait.is_active());
        assert_eq!(world.goals, vec![HOME]);
    }

    #[test]
    fn low_level_pickaxe_does_not_qualify() {
        let mut agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .carrying(ItemStack::tool("stone_pickaxe", ToolKind::Pickaxe, 1))
            .build();
        let mut world = FakeWorld::default();
        let mut resolver = ResourceResolver::new();
        let mut wait = WaitEngine::new(3, 10);
        let mut notifier = RequestNotifier::new();

        let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
        let outcome = resolver.resolve_tool(ToolKind::Pickaxe, 2, &mut ctx, &mut wait, &mut notifier);
        assert_eq!(outcome, ToolResolution::Requested);
        assert_eq!(resolver.required_level(ToolKind::Pickaxe), Some(2));

        let outcome = resolver.resolve_tool(ToolKind::Pickaxe, 1, &mut ctx, &mut wait, &mut notifier);
        assert_eq!(outcome, ToolResolution::Satisfied);
        assert!(!resolver.needs_tool(ToolKind::Pickaxe));
    }

    #[test]
    fn tool_is_taken_from_storage() {
        let mut agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .stored(ItemStack::tool("iron_axe", ToolKind::Axe, 2))
            .build();
        let mut world = FakeWorld::default();
        let mut resolver = ResourceResolver::new();
        let mut wait = WaitEngine::new(3, 10);
        let mut notifier = RequestNotifier::new();

        {
            let mut ctx = TickContext::new(Tick(0), &mut agent, &mut world, AiState::Idle);
            let outcome = resolver.resolve_tool(ToolKind::Axe, 0, &mut ctx, &mut wait, &mut notifier);
            assert_eq!(outcome, ToolResolution::Withdrew);
        }
        assert!(agent.inventory.any(|s| s.is_tool(ToolKind::Axe)));
        assert!(agent.home.as_ref().unwrap().inventory.is_empty());
    }
}

// ── Overflow handler ──────────────────────────────────────────────────────────

#[cfg(test)]
mod overflow_tests {
    use super::*;

    fn fill(agent: &mut Agent, kinds: &[&str]) {
        for (i, kind) in kinds.iter().enumerate() {
            agent.inventory.set_slot(i, Some(ItemStack::new(*kind, 10)));
        }
    }

    #[test]
    fn three_slots_take_three_ticks() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .inventory_slots(3)
            .build();
        let mut rig = Rig::new(Chores::default(), agent);
        assert_eq!(rig.tick().state, AiState::Idle);

        fill(&mut rig.agent, &["dirt", "sand", "gravel"]);
        let reports = rig.run(4);
        for r in &reports[..3] {
            assert_eq!(r.error_state, ErrorState::InventoryFull);
            assert!(!r.task_ran);
        }
        assert_eq!(reports[3].error_state, ErrorState::None);
        assert!(reports[3].task_ran);
        assert!(rig.agent.inventory.is_empty());
        assert_eq!(rig.agent.home.as_ref().unwrap().inventory.occupied(), 3);
    }

    #[test]
    fn kept_tools_stay_in_inventory() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .inventory_slots(3)
            .build();
        let chores = Chores { keep_tools: true, ..Chores::default() };
        let mut rig = Rig::new(chores, agent);
        rig.tick();

        rig.agent.inventory.set_slot(0, Some(ItemStack::tool("iron_pickaxe", ToolKind::Pickaxe, 2)));
        rig.agent.inventory.set_slot(1, Some(ItemStack::new("stone", 10)));
        rig.agent.inventory.set_slot(2, Some(ItemStack::new("stone", 10)));
        let reports = rig.run(3);
        assert!(reports[..2].iter().all(|r| r.error_state == ErrorState::InventoryFull));
        assert!(reports[2].task_ran);
        assert_eq!(rig.agent.inventory.occupied(), 1);
        assert!(rig.agent.inventory.slot(0).is_some_and(|s| s.is_tool(ToolKind::Pickaxe)));
    }

    #[test]
    fn full_storage_drops_stack() {
        let mut agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 1)
            .inventory_slots(1)
            .build();
        agent.home.as_mut().unwrap().inventory.set_slot(0, Some(ItemStack::new("dirt", 64)));
        let mut rig = Rig::new(Chores::default(), agent);
        rig.tick();

        fill(&mut rig.agent, &["sand"]);
        let reports = rig.run(2);
        assert_eq!(reports[0].error_state, ErrorState::InventoryFull);
        assert!(rig.agent.inventory.is_empty());
        assert_eq!(reports[1].error_state, ErrorState::None);
    }

    #[test]
    fn walks_home_before_dumping() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(FAR)
            .home(HOME, 10)
            .inventory_slots(1)
            .build();
        let mut rig = Rig::new(Chores::default(), agent);
        rig.tick();
        fill(&mut rig.agent, &["sand"]);

        let reports = rig.run(3);
        assert!(reports.iter().all(|r| r.error_state == ErrorState::InventoryFull));
        assert!(rig.agent.inventory.is_full());
        assert!(rig.world.goals.iter().all(|&g| g == HOME));
        assert_eq!(rig.world.goals.len(), 3);

        rig.agent.position = HOME;
        assert_eq!(rig.tick().error_state, ErrorState::InventoryFull);
        assert!(rig.agent.inventory.is_empty());
        assert!(rig.tick().task_ran);
    }

    #[test]
    fn unreachable_home_is_retried_after_recheck_delay() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(FAR)
            .home(HOME, 10)
            .inventory_slots(1)
            .build();
        let mut rig = Rig::new(Chores::default(), agent);
        rig.tick();
        fill(&mut rig.agent, &["sand"]);
        rig.world.unreachable = true;

        // One attempt, ten ticks of recheck delay, then the next attempt.
        let reports = rig.run(22);
        assert!(reports.iter().all(|r| r.error_state == ErrorState::InventoryFull));
        assert_eq!(rig.world.goals, vec![HOME, HOME]);
        assert!(rig.agent.inventory.is_full());
    }

    #[test]
    fn requested_dump_runs_without_full_inventory() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .carrying(ItemStack::new("coal", 5))
            .build();
        let mut rig = Rig::new(Chores { want_dump: true, ..Chores::default() }, agent);
        let r = rig.tick();
        assert_eq!(r.error_state, ErrorState::InventoryFull);
        assert!(rig.agent.inventory.is_empty());

        rig.ai.core_mut().task.want_dump = false;
        assert_eq!(rig.tick().error_state, ErrorState::None);
    }
}

// ── WorkerAi ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod worker_tests {
    use super::*;
    use crate::{Target, Transition};

    #[test]
    fn init_waits_for_home() {
        let agent = AgentBuilder::new(AgentId(1)).position(HOME).build();
        let mut rig = Rig::new(Chores::default(), agent);
        for r in rig.run(5) {
            assert_eq!(r.state, AiState::Init);
            assert!(!r.task_ran);
        }

        rig.agent.home = Some(wk_agent::HomeStorage::new(HOME, 10));
        assert_eq!(rig.tick().state, AiState::Idle);
        assert!(rig.tick().task_ran);
    }

    #[test]
    fn bookkeeping_runs_every_machine_tick() {
        let mut rig = Rig::new(Chores::default(), agent_at_home());
        rig.run(4);
        assert_eq!(rig.ai.task().render_calls, 3);
        assert_eq!(rig.ai.task().task_ticks, 3);
        assert_eq!(rig.ai.core().status_label(), "IDLE");
    }

    #[test]
    fn item_need_resolves_from_storage() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(HOME)
            .home(HOME, 10)
            .carrying(ItemStack::new("x", 2))
            .stored(ItemStack::new("x", 10))
            .build();
        let chores = Chores { items: Some(ItemAmount::new("x", 5)), ..Chores::default() };
        let mut rig = Rig::new(chores, agent);

        assert_eq!(rig.tick().state, AiState::Idle);
        assert!(rig.tick().task_ran);

        let r = rig.tick();
        assert_eq!(r.state, AiState::NeedsItem);
        assert_eq!(r.error_state, ErrorState::NeedsItem);
        assert_eq!(rig.agent.inventory.count(&ItemKind::from("x")), 5);

        let r = rig.tick();
        assert_eq!(r.state, AiState::Idle);
        assert_eq!(r.error_state, ErrorState::None);

        assert!(rig.tick().task_ran);
        assert!(rig.ai.task().items.is_none());
        assert!(rig.ai.core_mut().notifier.drain().is_empty());
    }

    #[test]
    fn pickaxe_need_requests_once_then_converges() {
        let agent = AgentBuilder::new(AgentId(1))
            .position(FAR)
            .home(HOME, 10)
            .carrying(ItemStack::tool("stone_pickaxe", ToolKind::Pickaxe, 1))
            .build();
        let chores = Chores { pickaxe_level: Some(2), ..Chores::default() };
        let mut rig = Rig::new(chores, agent);
        rig.run(2);

        // Still walking home: no request yet, state pinned.
        for r in rig.run(20) {
            assert_eq!(r.state, AiState::NeedsPickaxe);
            assert!(!r.task_ran);
        }
        assert!(rig.ai.core_mut().notifier.drain().is_empty());

        rig.agent.position = HOME;
        for r in rig.run(40) {
            assert_eq!(r.state, AiState::NeedsPickaxe);
        }
        let requests = rig.ai.core_mut().notifier.drain();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].min_level, Some(2));

        rig.agent
            .home
            .as_mut()
            .unwrap()
            .inventory
            .insert(ItemStack::tool("iron_pickaxe", ToolKind::Pickaxe, 2));
        let ticks_to_idle = (1..=15).find(|_| rig.tick().state == AiState::Idle);
        assert!(ticks_to_idle.is_some_and(|n| n <= 11));
        assert!(rig.agent.inventory.any(|s| s.is_pickaxe_of_level(2)));

        assert!(rig.tick().task_ran);
        assert!(rig.ai.task().pickaxe_level.is_none());
    }

    /// Task that walks to a far block and strikes it three times.
    struct Mine;

    const ORE: BlockPos = BlockPos::new(41, 64, 40);

    impl TaskBehavior for Mine {
        fn register_targets(&self) -> Vec<Target<WorkerCore<Self>>> {
            vec![
                Target::in_state(AiState::Idle, |core: &mut WorkerCore<Self>, _| {
                    core.work_on_block(ORE, FAR, 3);
                    Transition::Goto(AiState::Task("MINE"))
                }),
                Target::in_state(AiState::Task("MINE"), |_: &mut WorkerCore<Self>, _| {
                    Transition::Goto(AiState::Idle)
                }),
            ]
        }

        fn perform_task_tick(_core: &mut WorkerCore<Self>, _ctx: &mut TickContext<'_>) {}
    }

    #[test]
    fn state_is_pinned_while_walking_to_stand() {
        let mut rig = Rig::new(Mine, agent_at_home());
        assert_eq!(rig.tick().state, AiState::Idle);
        assert_eq!(rig.tick().state, AiState::Task("MINE"));

        for r in rig.run(10) {
            assert_eq!(r.state, AiState::Task("MINE"));
            assert!(r.waiting);
        }
        assert!(rig.world.strikes.is_empty());

        rig.agent.position = FAR;
        for r in rig.run(3) {
            assert_eq!(r.state, AiState::Task("MINE"));
        }
        assert_eq!(rig.world.strikes, vec![ORE; 3]);

        let r = rig.tick();
        assert_eq!(r.state, AiState::Idle);
        assert!(!r.waiting);
    }

    #[test]
    fn unreachable_storage_spaces_out_item_fetches() {
        let agent = AgentBuilder::new(AgentId(1)).position(FAR).home(HOME, 10).build();
        let chores = Chores { items: Some(ItemAmount::new("x", 1)), ..Chores::default() };
        let mut rig = Rig::new(chores, agent);
        rig.world.unreachable = true;
        rig.run(2);
        assert!(rig.world.goals.is_empty());

        let reports = rig.run(22);
        assert!(reports.iter().all(|r| r.state == AiState::NeedsItem && !r.task_ran));
        assert_eq!(rig.world.goals, vec![HOME, HOME]);
    }

    #[test]
    fn restart_during_dump_stops_dumping() {
        let agent = AgentBuilder::new(AgentId(1)).position(FAR).home(HOME, 10).build();
        let mut rig = Rig::new(Chores { want_dump: true, ..Chores::default() }, agent);
        assert_eq!(rig.tick().error_state, ErrorState::InventoryFull);
        assert_eq!(rig.world.goals, vec![HOME]);

        rig.ai.restart(&mut rig.agent);
        assert_eq!(rig.ai.core().status_label(), "INIT");
        rig.ai.core_mut().task.want_dump = false;

        let r = rig.tick();
        assert_eq!(r.state, AiState::Idle);
        assert_eq!(r.error_state, ErrorState::None);
        assert!(!r.waiting);
        assert_eq!(rig.world.goals, vec![HOME]);
    }

    #[test]
    fn restart_returns_to_init() {
        let mut rig = Rig::new(Chores { items: Some(ItemAmount::new("x", 1)), ..Chores::default() }, agent_at_home());
        rig.run(3);
        assert_eq!(rig.ai.state(), AiState::NeedsItem);

        rig.ai.restart(&mut rig.agent);
        assert_eq!(rig.ai.state(), AiState::Init);
        assert!(rig.agent.task.items_needed.is_empty());
        assert!(!rig.ai.core().resolver.needs_items());
    }
}
