//! colony: four miners working a walled quarry.
//!
//! Each miner needs a stone-or-better pickaxe and a torch per ore block.
//! The miners start differently equipped so every resolver path shows up in
//! one run: one carries a pickaxe, one has to fetch it from storage, one
//! has nothing and raises a request, and one carries a weak pickaxe with a
//! better one stored.  Mined cobblestone fills the small inventories and is
//! dumped back home by the overflow handler.
//!
//! ```text
//! cargo run -p colony -- [config.json] [output_dir]
//! RUST_LOG=debug cargo run -p colony
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wk_agent::{Agent, AgentBuilder, ItemAmount, ItemStack, ToolKind};
use wk_behavior::{
    AiState, ItemRequest, TaskBehavior, TickContext, TickReport, Target, Transition, WorkerCore,
};
use wk_core::{AgentId, BlockPos, ColonyConfig, Tick};
use wk_output::{ColonyOutputObserver, CsvWriter, OutputWriter};
use wk_sim::{ColonyBuilder, ColonyObserver};
use wk_spatial::{GridMap, GridPathfinder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64   = 7;
const MINERS:          u32   = 4;
const ORES_PER_MINER:  usize = 6;
const MINE_TICKS:      u32   = 5;
const PICKAXE_LEVEL:   u8    = 1;
const INVENTORY_SLOTS: usize = 6;
const STORAGE_SLOTS:   usize = 27;
const Y:               i32   = 64;

const TORCH:       &str = "torch";
const COBBLESTONE: &str = "cobblestone";
const MINING:      AiState = AiState::Task("MINING");

// ── Miner task ────────────────────────────────────────────────────────────────

/// Mines its ore list one block at a time, standing west of each block.
struct Miner {
    ores:     Vec<BlockPos>,
    current:  Option<BlockPos>,
    mined:    u32,
    /// Pickaxe held and a torch carried as of the last task tick.
    equipped: bool,
}

impl Miner {
    fn new(ores: Vec<BlockPos>) -> Self {
        Self { ores, current: None, mined: 0, equipped: false }
    }

    fn stand_for(ore: BlockPos) -> BlockPos {
        ore.offset(-1, 0, 0)
    }
}

impl TaskBehavior for Miner {
    fn register_targets(&self) -> Vec<Target<WorkerCore<Self>>> {
        vec![
            Target::when(
                |core: &mut WorkerCore<Self>, ctx| {
                    ctx.state == AiState::Idle && core.task.equipped && !core.task.ores.is_empty()
                },
                |core: &mut WorkerCore<Self>, _| {
                    let Some(ore) = core.task.ores.pop() else {
                        return Transition::Continue;
                    };
                    core.task.current = Some(ore);
                    core.work_on_block(ore, Miner::stand_for(ore), MINE_TICKS);
                    Transition::Goto(MINING)
                },
            ),
            Target::in_state(MINING, |core: &mut WorkerCore<Self>, ctx| {
                let range = core.config().site_range;
                if let Some(ore) = core.task.current.take() {
                    if ctx.agent.position.within(Miner::stand_for(ore), range) {
                        finish_block(&mut core.task, ctx.agent, ore);
                    } else {
                        debug!(agent = %ctx.agent.id, %ore, "left ore unmined");
                    }
                }
                core.task.equipped = false;
                Transition::Goto(AiState::Idle)
            }),
        ]
    }

    fn perform_task_tick(core: &mut WorkerCore<Self>, ctx: &mut TickContext<'_>) {
        if !core.check_for_pickaxe(PICKAXE_LEVEL, ctx) {
            return;
        }
        if !core.hold_efficient_tool(ToolKind::Pickaxe, PICKAXE_LEVEL, ctx) {
            return;
        }
        if !core.check_or_request_items(ctx, [ItemAmount::new(TORCH, 1)]) {
            return;
        }
        if core.task.ores.is_empty() {
            core.set_delay(core.config().recheck_delay_ticks * 5);
            return;
        }
        core.task.equipped = true;
    }

    fn is_item_kept(&self, stack: &ItemStack) -> bool {
        stack.tool.is_some() || stack.kind.as_str() == TORCH
    }
}

fn finish_block(miner: &mut Miner, agent: &mut Agent, ore: BlockPos) {
    if let Some(slot) = agent.inventory.find_first(|s| s.kind.as_str() == TORCH) {
        agent.inventory.decrement(slot, 1);
    }
    if let Some(rest) = agent.inventory.insert(ItemStack::new(COBBLESTONE, 48)) {
        debug!(agent = %agent.id, lost = rest.quantity, "no room for cobblestone");
    }
    miner.mined += 1;
    info!(agent = %agent.id, %ore, mined = miner.mined, "ore mined");
}

// ── World ─────────────────────────────────────────────────────────────────────

/// 32×32 quarry floor with a wall down the middle, open at both ends.
fn quarry() -> GridMap {
    let mut map = GridMap::new(Y, (0, 0), (31, 31));
    map.wall_x(16, 3, 28);
    map
}

fn ore_layout(map: &GridMap, rng: &mut SmallRng) -> Vec<Vec<BlockPos>> {
    (0..MINERS)
        .map(|_| {
            let mut ores = Vec::with_capacity(ORES_PER_MINER);
            while ores.len() < ORES_PER_MINER {
                let ore = BlockPos::new(rng.gen_range(18..31), Y, rng.gen_range(0..32));
                if map.is_walkable(Miner::stand_for(ore)) && !ores.contains(&ore) {
                    ores.push(ore);
                }
            }
            ores
        })
        .collect()
}

fn miner(id: u32) -> Agent {
    let home = BlockPos::new(2, Y, 4 + 6 * id as i32);
    let builder = AgentBuilder::new(AgentId(id))
        .position(home)
        .inventory_slots(INVENTORY_SLOTS)
        .home(home, STORAGE_SLOTS)
        .stored(ItemStack::new(TORCH, 3));
    match id {
        0 => builder.carrying(ItemStack::tool("stone_pickaxe", ToolKind::Pickaxe, 1)),
        1 => builder.stored(ItemStack::tool("iron_pickaxe", ToolKind::Pickaxe, 2)),
        2 => builder,
        _ => builder
            .carrying(ItemStack::tool("wooden_pickaxe", ToolKind::Pickaxe, 0))
            .stored(ItemStack::tool("stone_pickaxe", ToolKind::Pickaxe, 1)),
    }
    .build()
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the CSV observer and keeps a few totals for the summary.
struct Summary<W: OutputWriter> {
    inner:      ColonyOutputObserver<W>,
    requests:   Vec<ItemRequest>,
    task_ticks: usize,
    blocked:    usize,
}

impl<W: OutputWriter> ColonyObserver for Summary<W> {
    fn on_worker(&mut self, report: &TickReport, agent: &Agent) {
        if !report.error_state.is_none() {
            self.blocked += 1;
        }
        self.inner.on_worker(report, agent);
    }

    fn on_request(&mut self, request: &ItemRequest) {
        self.requests.push(request.clone());
        self.inner.on_request(request);
    }

    fn on_tick_end(&mut self, tick: Tick, task_ticks: usize) {
        self.task_ticks += task_ticks;
        self.inner.on_tick_end(tick, task_ticks);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<ColonyConfig> {
    let Some(path) = path else {
        return Ok(ColonyConfig { total_ticks: 600, ..ColonyConfig::default() });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from("output/colony"), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    info!(total_ticks = config.total_ticks, miners = MINERS, seed = SEED, "starting colony");

    let map = quarry();
    let mut rng = SmallRng::seed_from_u64(SEED);
    let layouts = ore_layout(&map, &mut rng);

    let mut builder = ColonyBuilder::new(config, Arc::new(GridPathfinder::new(map)));
    for (id, ores) in (0..MINERS).zip(layouts) {
        builder = builder.worker(miner(id), Miner::new(ores));
    }
    let mut colony = builder.build()?;

    let writer = CsvWriter::new(&output_dir)?;
    let mut observer = Summary {
        inner:      ColonyOutputObserver::new(writer),
        requests:   Vec::new(),
        task_ticks: 0,
        blocked:    0,
    };

    let started = Instant::now();
    let final_tick = colony.run(&mut observer);
    let elapsed = started.elapsed();

    if let Some(e) = observer.inner.take_error() {
        return Err(e).context("writing output");
    }

    println!();
    println!("Ran {} ticks in {:.2?}", final_tick.0, elapsed);
    println!("Task ticks: {}  |  blocked worker-ticks: {}", observer.task_ticks, observer.blocked);
    for slot in colony.workers() {
        let home = slot.agent.home.as_ref().map_or(0, |h| h.inventory.count(&COBBLESTONE.into()));
        println!(
            "  {}  mined {:>2}  state {:<14} cobblestone at home {:>4}",
            slot.agent.id,
            slot.ai.task().mined,
            slot.ai.state().name(),
            home,
        );
    }
    println!("Requests raised: {}", observer.requests.len());
    for request in &observer.requests {
        println!("  {} at {}", request, request.tick);
    }
    println!("Output written to {}", output_dir.display());
    Ok(())
}
