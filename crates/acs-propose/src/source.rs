//! The `ProposalSource` trait — the main extension point for activity
//! planners.
//!
//! Sources are polled every tick in ascending [`z_order`][ProposalSource::z_order]
//! (lower = higher priority, consulted first); an agent satisfied by an
//! earlier source is excluded from the masks handed to later sources within
//! the same tick.

use acs_core::{ActivityId, AgentId, AgentMask, RegionId, Tick};
use acs_queue::ActivityRequest;
use acs_state::{AgentRngs, StopRecord};

use crate::ScheduleContext;

/// Pluggable per-tick activity proposer.
///
/// Only the three query methods are required.  The notification hooks have
/// no-op defaults so simple sources don't need to implement them.
///
/// # Contract
///
/// - [`has_new_activity`][Self::has_new_activity] must return a mask that is
///   a subset of `eligible` (the engine intersects defensively, but a source
///   flagging ineligible agents is wasting its own work).
/// - [`get_new_activity`][Self::get_new_activity] must return exactly
///   `agents.len()` entries, aligned index-for-index; the engine treats a
///   length mismatch as a broken invariant and aborts the tick.
/// - All per-agent randomness must come from the supplied [`AgentRngs`] so
///   results are independent of source consultation order.
/// - Queries must not perform blocking I/O; they run inside the tick.
pub trait ProposalSource {
    /// Consultation rank: lower value = consulted earlier.
    fn z_order(&self) -> u32;

    /// Which of the `eligible` agents does this source want to propose for
    /// this tick?
    fn has_new_activity(&mut self, ctx: &ScheduleContext<'_>, eligible: &AgentMask) -> AgentMask;

    /// Build one request per listed agent.  `None` entries decline that
    /// agent (it remains eligible for later sources).
    fn get_new_activity(
        &mut self,
        agents: &[AgentId],
        ctx:    &ScheduleContext<'_>,
        rngs:   &mut AgentRngs,
    ) -> Vec<Option<ActivityRequest>>;

    // ── Notification hooks (defaults: ignore) ─────────────────────────────

    /// An activity of `kind` started for `agents` at `tick`.
    fn on_activity_started(&mut self, _agents: &[AgentId], _kind: ActivityId, _tick: Tick) {}

    /// Activities stopped this tick (natural completion, preemption, or
    /// forced stop).
    fn on_activity_stopped(&mut self, _stops: &[StopRecord], _tick: Tick) {}

    /// `agents` relocated into `region` during staging this tick.
    fn on_region_enter(&mut self, _agents: &[AgentId], _region: RegionId, _tick: Tick) {}

    /// `agents` relocated out of `region` during staging this tick.
    fn on_region_exit(&mut self, _agents: &[AgentId], _region: RegionId, _tick: Tick) {}

    /// `region` dropped to zero occupants during staging this tick.
    fn on_region_empty(&mut self, _region: RegionId, _tick: Tick) {}
}
