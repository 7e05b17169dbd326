//! `HookRegistry` — publish/subscribe callbacks keyed by activity kind.
//!
//! External collaborators (pathogen models, contact tracing, loggers)
//! register closures against specific activity kinds; the engine fires them
//! at commit time (start), stop time, and when a kind's cooldown expires.
//! Keying by kind keeps the engine decoupled from subscriber internals —
//! nothing here knows who is listening.
//!
//! Proposal sources are *not* routed through this registry; they receive the
//! same events through their trait's notification hooks.

use acs_core::{ActivityId, AgentId, Tick};
use acs_state::StopRecord;

/// Callback fired with the agents an event applies to.
pub type AgentsHook = Box<dyn FnMut(&[AgentId], Tick)>;
/// Callback fired with the stop records of completed/preempted runs.
pub type StopHook = Box<dyn FnMut(&[StopRecord], Tick)>;

/// Per-activity-kind subscriber lists.
pub struct HookRegistry {
    on_start:   Vec<Vec<AgentsHook>>,
    on_stop:    Vec<Vec<StopHook>>,
    on_unblock: Vec<Vec<AgentsHook>>,
}

impl HookRegistry {
    /// Empty registry for `kind_count` registered kinds.
    pub fn new(kind_count: usize) -> Self {
        Self {
            on_start:   (0..kind_count).map(|_| Vec::new()).collect(),
            on_stop:    (0..kind_count).map(|_| Vec::new()).collect(),
            on_unblock: (0..kind_count).map(|_| Vec::new()).collect(),
        }
    }

    /// Subscribe to starts of `kind`.
    pub fn on_start(&mut self, kind: ActivityId, hook: AgentsHook) {
        self.on_start[kind.index()].push(hook);
    }

    /// Subscribe to stops of `kind`.
    pub fn on_stop(&mut self, kind: ActivityId, hook: StopHook) {
        self.on_stop[kind.index()].push(hook);
    }

    /// Subscribe to cooldown expiry of `kind`.
    pub fn on_unblock(&mut self, kind: ActivityId, hook: AgentsHook) {
        self.on_unblock[kind.index()].push(hook);
    }

    // ── Firing (engine-internal) ──────────────────────────────────────────

    pub(crate) fn fire_start(&mut self, kind: ActivityId, agents: &[AgentId], tick: Tick) {
        for hook in &mut self.on_start[kind.index()] {
            hook(agents, tick);
        }
    }

    pub(crate) fn fire_stop(&mut self, kind: ActivityId, stops: &[StopRecord], tick: Tick) {
        for hook in &mut self.on_stop[kind.index()] {
            hook(stops, tick);
        }
    }

    pub(crate) fn fire_unblock(&mut self, kind: ActivityId, agents: &[AgentId], tick: Tick) {
        for hook in &mut self.on_unblock[kind.index()] {
            hook(agents, tick);
        }
    }
}
