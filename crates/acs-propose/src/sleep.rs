//! `SleepSource` — time-of-day driven sleep proposer.
//!
//! Every agent gets a personal sleep window (bed hour and duration) sampled
//! once at setup from its own RNG.  While the wall clock is inside an
//! agent's window and the agent is not already asleep, the source emits a
//! high-rank, full-duration, non-interruptable request — sleep is not
//! time-sliceable, so a shortened or preemptable night is never proposed.
//!
//! The request carries a cooldown (`block_for`) covering the rest of the
//! day, so an agent that wakes mid-window doesn't immediately fall asleep
//! again.

use acs_core::{AgentId, AgentMask, RegionId};
use acs_queue::{ActivityRequest, BlockingMode, RequestTemplate};
use acs_state::AgentRngs;

use crate::{ProposalSource, ScheduleContext};

/// Per-agent sampled sleep window, in hours of day.
#[derive(Copy, Clone, Debug)]
struct SleepWindow {
    /// Hour of day (0–23) the agent goes to bed.
    bed_hour: u32,
    /// Hours of sleep per night.
    duration_hours: u32,
}

impl SleepWindow {
    /// `true` if `hour` falls inside the (possibly midnight-wrapping) window.
    fn contains(&self, hour: u32) -> bool {
        (hour + 24 - self.bed_hour) % 24 < self.duration_hours
    }
}

/// Configuration for [`SleepSource`] window sampling.
#[derive(Copy, Clone, Debug)]
pub struct SleepConfig {
    /// Inclusive range of bed hours to sample from, e.g. `(21, 24)` for
    /// bedtimes between 21:00 and 23:00.
    pub bed_hour_range: (u32, u32),
    /// Inclusive-exclusive range of sleep durations in hours, e.g. `(6, 10)`.
    pub duration_hours_range: (u32, u32),
    /// Priority rank of emitted requests.  Low value = preempts most things.
    pub priority: u32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            bed_hour_range:       (21, 24),
            duration_hours_range: (6, 10),
            priority:             1,
        }
    }
}

/// Proposes one non-interruptable sleep run per agent per night.
pub struct SleepSource {
    z_order: u32,
    kind:    acs_core::ActivityId,
    config:  SleepConfig,
    windows: Vec<SleepWindow>,
    /// Where each agent sleeps (`RegionId::INVALID` = wherever it is).
    sleep_location: Vec<RegionId>,
}

impl SleepSource {
    /// Sample every agent's window up front from its own RNG, so the source
    /// is deterministic and stateless from then on.
    pub fn new(
        z_order:     u32,
        kind:        acs_core::ActivityId,
        agent_count: usize,
        config:      SleepConfig,
        rngs:        &mut AgentRngs,
    ) -> Self {
        let windows = (0..agent_count as u32)
            .map(|i| {
                let rng = rngs.get_mut(AgentId(i));
                SleepWindow {
                    bed_hour:       rng.gen_range(config.bed_hour_range.0..config.bed_hour_range.1)
                        % 24,
                    duration_hours: rng
                        .gen_range(config.duration_hours_range.0..config.duration_hours_range.1),
                }
            })
            .collect();
        Self {
            z_order,
            kind,
            config,
            windows,
            sleep_location: vec![RegionId::INVALID; agent_count],
        }
    }

    /// Assign a fixed sleeping place (bedroom) for one agent.
    pub fn set_sleep_location(&mut self, agent: AgentId, region: RegionId) {
        self.sleep_location[agent.index()] = region;
    }
}

impl ProposalSource for SleepSource {
    fn z_order(&self) -> u32 {
        self.z_order
    }

    fn has_new_activity(&mut self, ctx: &ScheduleContext<'_>, eligible: &AgentMask) -> AgentMask {
        let hour = ctx.hour_of_day();
        let mut wanted = AgentMask::none(eligible.len());
        for agent in eligible.agents() {
            if ctx.table.current(agent) == self.kind {
                continue; // already asleep
            }
            if self.windows[agent.index()].contains(hour) {
                wanted.set(agent, true);
            }
        }
        wanted
    }

    fn get_new_activity(
        &mut self,
        agents: &[AgentId],
        ctx:    &ScheduleContext<'_>,
        _rngs:  &mut AgentRngs,
    ) -> Vec<Option<ActivityRequest>> {
        agents
            .iter()
            .map(|&agent| {
                let window = self.windows[agent.index()];
                let duration = ctx.clock.ticks_for_hours(window.duration_hours as u64) as u32;
                // Cooldown covers the rest of the day so a woken agent does
                // not re-enter bed until the next night.
                let cooldown =
                    ctx.clock.ticks_for_hours((24 - window.duration_hours) as u64) as u32;
                Some(
                    RequestTemplate::new(self.kind)
                        .duration(duration)
                        .priority(self.config.priority)
                        .block_for(cooldown)
                        .location(self.sleep_location[agent.index()])
                        .blocks_location(BlockingMode::None)
                        .interruptable(false)
                        .build(),
                )
            })
            .collect()
    }
}
