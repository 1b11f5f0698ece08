//! Integration tests for wk-sim.

use std::sync::Arc;
use std::time::Duration;

use wk_agent::{Agent, AgentBuilder, ItemAmount};
use wk_behavior::{AiState, ItemRequest, TaskBehavior, TickContext, TickReport, WorkerCore};
use wk_core::{AgentId, BlockPos, ColonyConfig, ExecutorConfig, Tick};
use wk_spatial::{GridMap, GridPathfinder};

use crate::{ColonyBuilder, ColonyObserver, NoopObserver, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: BlockPos = BlockPos::new(0, 64, 0);
const STAND: BlockPos = BlockPos::new(10, 64, 0);
const SITE: BlockPos = BlockPos::new(11, 64, 0);

fn config(total_ticks: u64) -> ColonyConfig {
    ColonyConfig { total_ticks, ..ColonyConfig::default() }
}

fn pathfinder() -> Arc<GridPathfinder> {
    Arc::new(GridPathfinder::new(GridMap::new(64, (-5, -5), (20, 5))))
}

fn worker(id: u32) -> Agent {
    AgentBuilder::new(AgentId(id)).position(HOME).home(HOME, 10).build()
}

/// Walks to `STAND`, works `SITE` for three ticks, then records completion.
#[derive(Default)]
struct Digger {
    started:  bool,
    finished: bool,
}

impl TaskBehavior for Digger {
    fn perform_task_tick(core: &mut WorkerCore<Self>, _ctx: &mut TickContext<'_>) {
        if !core.task.started {
            core.task.started = true;
            core.work_on_block(SITE, STAND, 3);
        } else {
            core.task.finished = true;
        }
    }
}

/// Keeps asking for planks nobody has.
#[derive(Default)]
struct Carpenter;

impl TaskBehavior for Carpenter {
    fn perform_task_tick(core: &mut WorkerCore<Self>, ctx: &mut TickContext<'_>) {
        core.check_or_request_items(ctx, [ItemAmount::new("plank", 4)]);
    }
}

#[derive(Default)]
struct Recorder {
    starts:   u64,
    reports:  Vec<TickReport>,
    requests: Vec<ItemRequest>,
    ended_at: Option<Tick>,
    ran:      usize,
}

impl ColonyObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }

    fn on_worker(&mut self, report: &TickReport, _agent: &Agent) {
        self.reports.push(report.clone());
    }

    fn on_request(&mut self, request: &ItemRequest) {
        self.requests.push(request.clone());
    }

    fn on_tick_end(&mut self, _tick: Tick, task_ticks: usize) {
        self.ran += task_ticks;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── ColonyBuilder validation ──────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let colony = ColonyBuilder::new(config(10), pathfinder())
            .worker(worker(1), Digger::default())
            .worker(worker(2), Digger::default())
            .build()
            .unwrap();
        assert_eq!(colony.workers().len(), 2);
        assert_eq!(colony.clock, Tick::ZERO);
        assert!(colony.dispatcher().executor().workers() >= 1);
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = ColonyConfig {
            executor: ExecutorConfig { core_threads: 0, ..ExecutorConfig::default() },
            ..config(10)
        };
        let result = ColonyBuilder::<Digger>::new(bad, pathfinder()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn duplicate_agent_rejected() {
        let result = ColonyBuilder::new(config(10), pathfinder())
            .worker(worker(1), Digger::default())
            .worker(worker(1), Digger::default())
            .build();
        assert!(matches!(result, Err(SimError::DuplicateAgent(AgentId(1)))));
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_total_ticks() {
        let mut colony = ColonyBuilder::new(config(12), pathfinder())
            .worker(worker(1), Carpenter)
            .worker(worker(2), Carpenter)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        assert_eq!(colony.run(&mut rec), Tick(12));
        assert_eq!(rec.starts, 12);
        assert_eq!(rec.reports.len(), 24);
        assert_eq!(rec.ended_at, Some(Tick(12)));

        // Reports arrive in worker order every tick.
        assert_eq!(rec.reports[0].agent, AgentId(1));
        assert_eq!(rec.reports[1].agent, AgentId(2));
        assert_eq!(rec.reports[23].tick, Tick(11));
    }

    #[test]
    fn run_ticks_ignores_total() {
        let mut colony = ColonyBuilder::new(config(2), pathfinder())
            .worker(worker(1), Carpenter)
            .build()
            .unwrap();
        colony.run_ticks(5, &mut NoopObserver);
        assert_eq!(colony.clock, Tick(5));
    }

    #[test]
    fn requests_are_forwarded_once() {
        let mut colony = ColonyBuilder::new(config(60), pathfinder())
            .worker(worker(1), Carpenter)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        colony.run(&mut rec);

        assert_eq!(rec.requests.len(), 1);
        assert_eq!(rec.requests[0].agent, AgentId(1));
        assert_eq!(rec.requests[0].quantity, 4);
        assert!(rec.reports.iter().skip(3).all(|r| r.state == AiState::NeedsItem));
    }

    #[test]
    fn worker_walks_to_stand_and_works() {
        let mut colony = ColonyBuilder::new(config(0), pathfinder())
            .worker(worker(1), Digger::default())
            .build()
            .unwrap();

        for _ in 0..2_000 {
            colony.run_ticks(1, &mut NoopObserver);
            if colony.workers()[0].ai.task().finished {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }

        let slot = colony.worker(AgentId(1)).unwrap();
        assert!(slot.ai.task().finished);
        assert!(slot.agent.position.within(STAND, 3));
        assert_eq!(slot.nav.strikes(), 3);
        assert_eq!(slot.nav.last_strike(), Some(SITE));
    }

    #[test]
    fn restart_returns_worker_to_init() {
        let mut colony = ColonyBuilder::new(config(0), pathfinder())
            .worker(worker(1), Carpenter)
            .build()
            .unwrap();
        colony.run_ticks(5, &mut NoopObserver);
        assert_eq!(colony.workers()[0].ai.state(), AiState::NeedsItem);

        colony.restart(AgentId(1)).unwrap();
        assert_eq!(colony.workers()[0].ai.state(), AiState::Init);
        assert!(matches!(colony.restart(AgentId(9)), Err(SimError::UnknownAgent(_))));
    }

    #[test]
    fn restart_mid_walk_drops_route() {
        let mut colony = ColonyBuilder::new(config(0), pathfinder())
            .worker(worker(1), Digger::default())
            .build()
            .unwrap();
        colony.run_ticks(3, &mut NoopObserver);
        assert!(!colony.workers()[0].nav.state().is_idle());

        colony.restart(AgentId(1)).unwrap();
        assert!(colony.workers()[0].nav.state().is_idle());
        let at = colony.workers()[0].agent.position;
        colony.run_ticks(5, &mut NoopObserver);
        assert_eq!(colony.workers()[0].agent.position, at);
    }
}
