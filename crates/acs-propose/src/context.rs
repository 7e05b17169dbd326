//! Read-only engine state passed to every proposal-source callback.

use acs_core::{AgentId, RegionId, SimClock, Tick};
use acs_region::RegionTable;
use acs_state::ActivityStateTable;

/// A read-only snapshot of the scheduling state, built once per tick by the
/// engine and shared (immutably) across all proposal-source queries.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's collect phase.  The
/// engine never allows mutable access to these structures while a
/// `ScheduleContext` is live.
pub struct ScheduleContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Clock for wall-time arithmetic (hour-of-day, tick/hour conversion).
    pub clock: &'a SimClock,

    /// Every agent's per-kind activity state.
    pub table: &'a ActivityStateTable,

    /// The location tree, occupancy, and each agent's current region.
    pub regions: &'a RegionTable,
}

impl<'a> ScheduleContext<'a> {
    /// Build a new context for a single tick.
    #[inline]
    pub fn new(
        tick:    Tick,
        clock:   &'a SimClock,
        table:   &'a ActivityStateTable,
        regions: &'a RegionTable,
    ) -> Self {
        Self { tick, clock, table, regions }
    }

    /// The region `agent` currently occupies.
    #[inline]
    pub fn region_of(&self, agent: AgentId) -> RegionId {
        self.regions.region_of(agent)
    }

    /// Hour of day (0–23) at the current tick.
    #[inline]
    pub fn hour_of_day(&self) -> u32 {
        self.clock.hour_of_day(self.tick)
    }
}
