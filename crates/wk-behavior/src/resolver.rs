//! Item and tool needs: compare what the task requires with what the worker
//! carries, fetch the difference from home storage, and request what storage
//! lacks.
//!
//! Every operation is safe to poll each tick: repeated calls with nothing
//! changed issue no new requests.

use std::collections::BTreeMap;

use tracing::debug;
use wk_agent::{
    Inventory, ItemNeeds, ItemStack, Task, ToolKind, transfer_first, transfer_matching,
};

use crate::{ItemRequest, RequestKey, RequestNotifier, TickContext, WaitEngine};

/// Outcome of [`ResourceResolver::resolve_items`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemResolution {
    /// Nothing is missing; the task's needs have been cleared.
    Satisfied,
    /// On the way to home storage, or idling before the next attempt after
    /// storage proved unreachable.
    Walking,
    /// Took this many units of the first missing item out of storage.
    Withdrew(u32),
    /// Storage lacks the item; a request was issued.
    Requested,
    /// Storage lacks the item; the request is still outstanding.
    AlreadyRequested,
    /// The worker has no home storage to fetch from.
    NoHome,
}

/// Outcome of [`ResourceResolver::resolve_tool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToolResolution {
    /// A qualifying tool is carried.
    Satisfied,
    Walking,
    /// A qualifying tool was taken out of storage.
    Withdrew,
    Requested,
    AlreadyRequested,
    NoHome,
}

/// Per-worker need tracking.
#[derive(Clone, Debug, Default)]
pub struct ResourceResolver {
    currently_needed: ItemNeeds,
    /// Tool kinds still missing, with the minimum level required.
    tools: BTreeMap<ToolKind, u8>,
}

/// `true` if `stack` is a tool of `kind` at `min_level` or better.
#[inline]
fn qualifies(stack: &ItemStack, kind: ToolKind, min_level: u8) -> bool {
    stack.tool_level(kind).is_some_and(|level| level >= min_level)
}

impl ResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Items ─────────────────────────────────────────────────────────────────

    /// Recompute `task.items_needed - inventory`.  If nothing is missing the
    /// task's stored needs are cleared as well.
    pub fn sync_needs(&mut self, task: &mut Task, inventory: &Inventory) -> &ItemNeeds {
        self.currently_needed = task.items_needed.missing_from(inventory);
        if self.currently_needed.is_empty() {
            task.items_needed.clear();
        }
        &self.currently_needed
    }

    /// Items still missing as of the last sync.
    #[inline]
    pub fn currently_needed(&self) -> &ItemNeeds {
        &self.currently_needed
    }

    #[inline]
    pub fn needs_items(&self) -> bool {
        !self.currently_needed.is_empty()
    }

    /// Drop every item need (task restart).
    pub fn clear_items(&mut self) {
        self.currently_needed.clear();
    }

    /// Work on the first missing item: walk home, withdraw up to the missing
    /// amount, or request it once.
    pub fn resolve_items(
        &mut self,
        ctx:      &mut TickContext<'_>,
        wait:     &mut WaitEngine,
        notifier: &mut RequestNotifier,
    ) -> ItemResolution {
        let agent_id = ctx.agent.id;
        self.sync_needs(&mut ctx.agent.task, &ctx.agent.inventory);
        notifier.retain_items(agent_id, &self.currently_needed);

        let Some(first) = self.currently_needed.first().cloned() else {
            return ItemResolution::Satisfied;
        };
        let Some(home) = ctx.agent.home_location() else {
            return ItemResolution::NoHome;
        };
        if wait.walk_to(home, ctx.agent, ctx.world) {
            return ItemResolution::Walking;
        }

        let agent = &mut *ctx.agent;
        let moved = match agent.home.as_mut() {
            Some(storage) => transfer_matching(
                &mut storage.inventory,
                &mut agent.inventory,
                |s| s.kind == first.kind && s.tool.is_none(),
                first.quantity,
            ),
            None => 0,
        };
        if moved > 0 {
            debug!(agent = %agent_id, item = %first.kind, moved, "withdrew from storage");
            return ItemResolution::Withdrew(moved);
        }

        let issued = notifier.request(ItemRequest {
            agent:     agent_id,
            tick:      ctx.tick,
            key:       RequestKey::Item(first.kind),
            quantity:  first.quantity,
            min_level: None,
        });
        if issued { ItemResolution::Requested } else { ItemResolution::AlreadyRequested }
    }

    // ── Tools ─────────────────────────────────────────────────────────────────

    /// Record that a tool of `kind` at `min_level` or better is required.
    pub fn require_tool(&mut self, kind: ToolKind, min_level: u8) {
        self.tools.insert(kind, min_level);
    }

    #[inline]
    pub fn needs_tool(&self, kind: ToolKind) -> bool {
        self.tools.contains_key(&kind)
    }

    /// Minimum level of an outstanding need for `kind`.
    #[inline]
    pub fn required_level(&self, kind: ToolKind) -> Option<u8> {
        self.tools.get(&kind).copied()
    }

    /// Resolve the need for a `kind` tool of at least `min_level`: carried,
    /// then fetched from storage, then requested once.
    ///
    /// A carried tool below `min_level` does not count.
    pub fn resolve_tool(
        &mut self,
        kind:      ToolKind,
        min_level: u8,
        ctx:       &mut TickContext<'_>,
        wait:      &mut WaitEngine,
        notifier:  &mut RequestNotifier,
    ) -> ToolResolution {
        let agent_id = ctx.agent.id;
        let key = RequestKey::Tool(kind);

        if ctx.agent.inventory.any(|s| qualifies(s, kind, min_level)) {
            self.tools.remove(&kind);
            notifier.resolve(agent_id, &key);
            return ToolResolution::Satisfied;
        }
        self.require_tool(kind, min_level);

        let Some(home) = ctx.agent.home_location() else {
            return ToolResolution::NoHome;
        };
        if wait.walk_to(home, ctx.agent, ctx.world) {
            return ToolResolution::Walking;
        }

        let agent = &mut *ctx.agent;
        let withdrew = match agent.home.as_mut() {
            Some(storage) => transfer_first(&mut storage.inventory, &mut agent.inventory, |s| {
                qualifies(s, kind, min_level)
            }),
            None => false,
        };
        if withdrew {
            debug!(agent = %agent_id, tool = %kind, min_level, "took tool from storage");
            self.tools.remove(&kind);
            notifier.resolve(agent_id, &key);
            return ToolResolution::Withdrew;
        }

        let issued = notifier.request(ItemRequest {
            agent:     agent_id,
            tick:      ctx.tick,
            key,
            quantity:  1,
            min_level: (kind == ToolKind::Pickaxe).then_some(min_level),
        });
        if issued { ToolResolution::Requested } else { ToolResolution::AlreadyRequested }
    }
}
