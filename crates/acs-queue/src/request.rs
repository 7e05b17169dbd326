//! `ActivityRequest` — the value type proposal sources and queues trade in.
//!
//! A request describes one proposed run of an activity: which kind, where,
//! for how long, how the target location is contended for, and whether the
//! run may be preempted.  Requests are copied by value into queues and the
//! state table; they own nothing and carry a monotonically increasing
//! [`DescriptorId`] purely for traceability.

use acs_core::{ActivityId, DescriptorId, RegionId, Tick};

// ── BlockingMode ──────────────────────────────────────────────────────────────

/// How an activity contends for its target location.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockingMode {
    /// No resource check at all.
    #[default]
    None,
    /// Marks the location blocked for *new* blocking requests but tolerates
    /// occupants already scheduled to co-locate.  Same-tick contenders are
    /// arbitrated first-come (lowest agent index wins); losers are postponed.
    Shared,
    /// Granted only while the target location has zero occupants.  Losers
    /// are not postponed; they are re-evaluated against live occupancy every
    /// future tick.
    Wait,
    /// Reserved: evict all other occupants before granting exclusive use.
    /// Not implemented — arbitration reports it as unsupported rather than
    /// silently degrading to `Shared`.
    Rejecting,
}

// ── ActivityRequest ───────────────────────────────────────────────────────────

/// One proposed run of an activity.
///
/// Built via [`RequestTemplate`] by proposal sources; the engine stamps the
/// `descriptor_id` when the request enters the tick pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRequest {
    /// The activity kind to run.  Never `ActivityId::NONE`.
    pub kind: ActivityId,

    /// Earliest tick the run may start.  `Tick::ZERO` = immediately.
    /// Only the planned queue time-gates on this; triggered requests bypass it.
    pub start_tick: Tick,

    /// Planned duration in ticks.  0 = open-ended (runs until stopped).
    pub duration: u32,

    /// Priority rank: lower value = more urgent.  A request preempts a
    /// running activity only if its rank is strictly lower and the running
    /// activity is interruptable.
    pub priority: u32,

    /// Cooldown applied at start: the kind cannot start again for this many
    /// ticks after the run ends.
    pub block_for: u32,

    /// Target region, or `RegionId::INVALID` for location-free activities.
    pub location: RegionId,

    /// Resource-contention discipline for `location`.
    pub blocks_location: BlockingMode,

    /// Also lock the target's parent; granting then requires every sibling
    /// of the target to be free, and locks them as a side effect.
    pub blocks_parent: bool,

    /// `false` marks the run non-preemptable once started.
    pub interruptable: bool,

    /// Monotonic stamp assigned by the engine.  Preserved verbatim when an
    /// interrupted run is reconstructed for the resume stack.
    pub descriptor_id: DescriptorId,
}

impl ActivityRequest {
    /// The remaining-duration copy pushed to the interrupted stack when this
    /// run is preempted after `elapsed` ticks.
    ///
    /// Keeps the original `descriptor_id` so a resumed run is traceable to
    /// the request that first started it.
    pub fn remainder(&self, elapsed: u32) -> ActivityRequest {
        let mut rest = self.clone();
        rest.duration = self.duration.saturating_sub(elapsed);
        rest
    }

    /// `true` once `now` has reached the request's start gate.
    #[inline]
    pub fn is_due(&self, now: Tick) -> bool {
        now >= self.start_tick
    }
}

// ── RequestTemplate ───────────────────────────────────────────────────────────

/// Builder-style constructor for [`ActivityRequest`].
///
/// Proposal sources keep a template per activity and stamp out requests with
/// per-agent variations; `descriptor_id` stays zero until the engine assigns
/// the real stamp.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestTemplate {
    request: ActivityRequest,
}

impl RequestTemplate {
    /// A minimal request: immediate, open-ended, lowest urgency, no resource
    /// check, interruptable.
    pub fn new(kind: ActivityId) -> Self {
        Self {
            request: ActivityRequest {
                kind,
                start_tick:      Tick::ZERO,
                duration:        0,
                priority:        u32::MAX,
                block_for:       0,
                location:        RegionId::INVALID,
                blocks_location: BlockingMode::None,
                blocks_parent:   false,
                interruptable:   true,
                descriptor_id:   DescriptorId(0),
            },
        }
    }

    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.request.start_tick = tick;
        self
    }

    pub fn duration(mut self, ticks: u32) -> Self {
        self.request.duration = ticks;
        self
    }

    pub fn priority(mut self, rank: u32) -> Self {
        self.request.priority = rank;
        self
    }

    pub fn block_for(mut self, ticks: u32) -> Self {
        self.request.block_for = ticks;
        self
    }

    pub fn location(mut self, region: RegionId) -> Self {
        self.request.location = region;
        self
    }

    pub fn blocks_location(mut self, mode: BlockingMode) -> Self {
        self.request.blocks_location = mode;
        self
    }

    pub fn blocks_parent(mut self, yes: bool) -> Self {
        self.request.blocks_parent = yes;
        self
    }

    pub fn interruptable(mut self, yes: bool) -> Self {
        self.request.interruptable = yes;
        self
    }

    pub fn build(self) -> ActivityRequest {
        self.request
    }
}
