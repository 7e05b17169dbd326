//! Per-agent queue sets: planned, postponed, triggered, interrupted.
//!
//! Each agent carries four bounded queues built on the same
//! [`RequestRing`][crate::RequestRing]:
//!
//! | Queue       | Order | Holds                                            |
//! |-------------|-------|--------------------------------------------------|
//! | planned     | FIFO  | long-horizon requests gated on `start_tick`      |
//! | postponed   | FIFO  | requests that lost resource arbitration          |
//! | triggered   | FIFO  | urgent/reactive requests bypassing the time gate |
//! | interrupted | LIFO  | preempted runs awaiting resume                   |

use acs_core::AgentId;

use crate::{ActivityRequest, RequestRing};

/// The four bounded queues of one agent.
#[derive(Clone, Debug)]
pub struct QueueSet {
    pub planned:     RequestRing,
    pub postponed:   RequestRing,
    pub triggered:   RequestRing,
    pub interrupted: RequestRing,
}

impl QueueSet {
    fn new(depth: usize) -> Self {
        Self {
            planned:     RequestRing::new(depth),
            postponed:   RequestRing::new(depth),
            triggered:   RequestRing::new(depth),
            interrupted: RequestRing::new(depth),
        }
    }

    /// `true` if no queue holds any request.
    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
            && self.postponed.is_empty()
            && self.triggered.is_empty()
            && self.interrupted.is_empty()
    }
}

/// All agents' queue sets, indexed by `AgentId`.
///
/// Allocated once at setup; the shared depth comes from
/// `EngineConfig::queue_depth` (default 15).
pub struct AgentQueues {
    sets:  Vec<QueueSet>,
    depth: usize,
}

impl AgentQueues {
    /// Allocate queue sets for `agent_count` agents with the given depth.
    pub fn new(agent_count: usize, depth: usize) -> Self {
        Self {
            sets: (0..agent_count).map(|_| QueueSet::new(depth)).collect(),
            depth,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.sets.len()
    }

    /// Shared view of one agent's queues.
    #[inline]
    pub fn get(&self, agent: AgentId) -> &QueueSet {
        &self.sets[agent.index()]
    }

    /// Mutable view of one agent's queues.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut QueueSet {
        &mut self.sets[agent.index()]
    }

    // ── Convenience push helpers ──────────────────────────────────────────

    /// Enqueue a long-horizon request; returns any evicted entry.
    pub fn push_planned(&mut self, agent: AgentId, req: ActivityRequest) -> Option<ActivityRequest> {
        self.sets[agent.index()].planned.push(req)
    }

    /// Enqueue an arbitration loser for retry; returns any evicted entry.
    pub fn push_postponed(&mut self, agent: AgentId, req: ActivityRequest) -> Option<ActivityRequest> {
        self.sets[agent.index()].postponed.push(req)
    }

    /// Enqueue an urgent/reactive request; returns any evicted entry.
    pub fn push_triggered(&mut self, agent: AgentId, req: ActivityRequest) -> Option<ActivityRequest> {
        self.sets[agent.index()].triggered.push(req)
    }

    /// Push a preempted run onto the resume stack; returns any evicted entry.
    pub fn push_interrupted(&mut self, agent: AgentId, req: ActivityRequest) -> Option<ActivityRequest> {
        self.sets[agent.index()].interrupted.push(req)
    }
}
