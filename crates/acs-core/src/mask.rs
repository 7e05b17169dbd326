//! `AgentMask` — a dense boolean selection over the agent population.
//!
//! Proposal sources communicate "which agents" through masks: the engine
//! hands each source the mask of agents still unresolved this tick, and the
//! source answers with the subset it wants to propose for.  A plain
//! `Vec<bool>` wrapper keeps the API explicit without pulling in a bitset
//! crate; population sizes here make the memory difference irrelevant.

use crate::AgentId;

/// A per-agent boolean mask, indexed by `AgentId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentMask {
    bits: Vec<bool>,
}

impl AgentMask {
    /// An all-false mask over `count` agents.
    pub fn none(count: usize) -> Self {
        Self { bits: vec![false; count] }
    }

    /// An all-true mask over `count` agents.
    pub fn all(count: usize) -> Self {
        Self { bits: vec![true; count] }
    }

    /// Build a mask from an explicit agent list.
    pub fn from_agents(count: usize, agents: &[AgentId]) -> Self {
        let mut mask = Self::none(count);
        for &a in agents {
            mask.bits[a.index()] = true;
        }
        mask
    }

    /// Population size this mask covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> bool {
        self.bits[agent.index()]
    }

    #[inline]
    pub fn set(&mut self, agent: AgentId, value: bool) {
        self.bits[agent.index()] = value;
    }

    /// `true` if at least one agent is selected.
    pub fn any(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    /// Number of selected agents.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Selected agents in ascending index order.
    ///
    /// Ascending order is load-bearing: the first-come arbitration rule
    /// grants contended resources to the lowest-indexed requester, and that
    /// ordering originates here.
    pub fn agents(&self) -> Vec<AgentId> {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| AgentId(i as u32))
            .collect()
    }

    /// In-place union with `other`.
    ///
    /// # Panics
    /// Panics if the masks cover different population sizes.
    pub fn union(&mut self, other: &AgentMask) {
        assert_eq!(self.bits.len(), other.bits.len(), "mask length mismatch");
        for (a, &b) in self.bits.iter_mut().zip(&other.bits) {
            *a |= b;
        }
    }

    /// In-place intersection with `other`.
    ///
    /// # Panics
    /// Panics if the masks cover different population sizes.
    pub fn intersect(&mut self, other: &AgentMask) {
        assert_eq!(self.bits.len(), other.bits.len(), "mask length mismatch");
        for (a, &b) in self.bits.iter_mut().zip(&other.bits) {
            *a &= b;
        }
    }
}
