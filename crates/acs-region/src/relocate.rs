//! The `Relocator` trait — the engine's seam to the movement collaborator.
//!
//! Relocation is a *staging precondition*: the engine moves agents to a
//! request's target region before committing the activity, and any agent the
//! relocator fails to move is excluded from the start.  An engine built
//! without a relocator degrades gracefully — location checks are skipped and
//! requests are treated as always permitted.

use acs_core::{AgentId, CoreResult, RegionId};

use crate::RegionTable;

/// Moves agents between regions on the engine's behalf.
///
/// Implementations may refuse some or all of the agents (doors locked,
/// capacity reached, mid-journey); the returned list holds exactly the
/// agents that ended up in `dest`.  The implementation is responsible for
/// keeping `table` occupancy consistent with whatever it moved.
pub trait Relocator {
    fn move_agents(
        &mut self,
        table:  &mut RegionTable,
        agents: &[AgentId],
        dest:   RegionId,
    ) -> CoreResult<Vec<AgentId>>;
}

/// Reference relocator: teleports every requested agent directly.
///
/// Suitable for tests and for simulations whose movement model resolves
/// within one tick.
pub struct DirectRelocator;

impl Relocator for DirectRelocator {
    fn move_agents(
        &mut self,
        table:  &mut RegionTable,
        agents: &[AgentId],
        dest:   RegionId,
    ) -> CoreResult<Vec<AgentId>> {
        table.move_agents(agents, dest)
    }
}
