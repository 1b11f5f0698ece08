//! De-duplicated "please bring me X" requests.

use std::collections::HashSet;
use std::fmt;

use tracing::info;
use wk_agent::{ItemKind, ItemNeeds, ToolKind};
use wk_core::{AgentId, Tick};

/// What is being asked for.  Requests are de-duplicated per
/// `(agent, RequestKey)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Item(ItemKind),
    Tool(ToolKind),
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKey::Item(kind) => write!(f, "{kind}"),
            RequestKey::Tool(kind) => write!(f, "{kind}"),
        }
    }
}

/// A user-facing request raised by a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRequest {
    pub agent:     AgentId,
    pub tick:      Tick,
    pub key:       RequestKey,
    /// Units still missing (1 for tools).
    pub quantity:  u32,
    /// Minimum tool level, when the tool kind has levels that matter.
    pub min_level: Option<u8>,
}

impl fmt::Display for ItemRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, self.min_level) {
            (RequestKey::Tool(kind), Some(level)) => {
                write!(f, "{} needs a {kind} of at least level {level}", self.agent)
            }
            (RequestKey::Tool(kind), None) => write!(f, "{} needs a {kind}", self.agent),
            (RequestKey::Item(kind), _) => {
                write!(f, "{} needs {}x {kind}", self.agent, self.quantity)
            }
        }
    }
}

/// Tracks outstanding requests and queues new ones for delivery.
///
/// A request is issued at most once while its key stays outstanding;
/// [`resolve`][Self::resolve] re-arms it.
#[derive(Debug, Default)]
pub struct RequestNotifier {
    outstanding: HashSet<(AgentId, RequestKey)>,
    pending:     Vec<ItemRequest>,
}

impl RequestNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `request` unless the same key is already outstanding for that
    /// agent.  Returns `true` if it was newly issued.
    pub fn request(&mut self, request: ItemRequest) -> bool {
        if !self.outstanding.insert((request.agent, request.key.clone())) {
            return false;
        }
        info!(agent = %request.agent, tick = %request.tick, what = %request.key, "{request}");
        self.pending.push(request);
        true
    }

    /// Clear the outstanding flag for `key`.  Returns `true` if it was set.
    pub fn resolve(&mut self, agent: AgentId, key: &RequestKey) -> bool {
        self.outstanding.remove(&(agent, key.clone()))
    }

    /// Clear every outstanding item request of `agent` that `needs` no longer
    /// lists.  Tool requests are untouched.
    pub fn retain_items(&mut self, agent: AgentId, needs: &ItemNeeds) {
        self.outstanding.retain(|(a, key)| match key {
            RequestKey::Item(kind) if *a == agent => needs.contains(kind),
            _ => true,
        });
    }

    pub fn is_outstanding(&self, agent: AgentId, key: &RequestKey) -> bool {
        self.outstanding.contains(&(agent, key.clone()))
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    /// Take every request issued since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<ItemRequest> {
        std::mem::take(&mut self.pending)
    }
}
