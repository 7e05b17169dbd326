//! `AgentRngs` — per-agent deterministic RNG pool.
//!
//! Kept separate from [`ActivityStateTable`][crate::ActivityStateTable] so
//! the engine can hand proposal sources `&mut AgentRngs` alongside a shared
//! `&` view of the rest of the world state without fighting the borrow
//! checker.

use acs_core::{AgentId, AgentRng};

/// Per-agent deterministic RNG state.
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
