//! `EngineObserver` — per-tick instrumentation seam.
//!
//! Observers see the tick boundary events (start, stops, end-of-tick
//! summary) without participating in scheduling.  Output writers, progress
//! reporters, and test probes all attach here.  All methods default to
//! no-ops so an observer implements only what it needs.

use acs_core::Tick;
use acs_state::StopRecord;

/// Aggregate counters for one completed tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: Tick,
    /// Activities committed this tick.
    pub started: usize,
    /// Runs stopped this tick (completion, preemption, or forced stop).
    pub stopped: usize,
    /// Requests that lost resource arbitration and moved to the postponed
    /// queue.
    pub postponed: usize,
    /// Requests parked in a wait slot pending zero occupancy.
    pub parked: usize,
    /// Queue entries silently evicted by capacity pressure.
    pub evicted: usize,
    /// Regions blocked at tick end.
    pub blocked_regions: usize,
}

/// Passive per-tick listener.
pub trait EngineObserver {
    /// The tick is about to run.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// All runs stopped during this tick, in stop order.  Called once per
    /// tick, after commit, only when at least one run stopped.
    fn on_stops(&mut self, _tick: Tick, _stops: &[StopRecord]) {}

    /// The tick finished; `summary` aggregates what happened.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// The run's tick budget is exhausted.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// The do-nothing observer.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
