//! `DefaultActivitySource` — per-region fallback activity.
//!
//! Some regions define a default behavior (rest at home, queue at the
//! clinic).  This source proposes that default whenever an eligible agent is
//! idle inside such a region, and re-proposes on entry so freshly relocated
//! agents pick the default up immediately instead of idling a tick.

use acs_core::{AgentId, AgentMask, RegionId, Tick};
use acs_queue::{ActivityRequest, RequestTemplate};
use acs_state::AgentRngs;
use rustc_hash::FxHashMap;

use crate::{ProposalSource, ScheduleContext};

/// Proposes each region's registered default activity for idle occupants.
pub struct DefaultActivitySource {
    z_order: u32,
    /// Region → request template for the region's default activity.
    defaults: FxHashMap<RegionId, RequestTemplate>,
    /// Agents that entered a defaulting region since the last query.
    just_entered: Vec<bool>,
}

impl DefaultActivitySource {
    pub fn new(z_order: u32, agent_count: usize) -> Self {
        Self {
            z_order,
            defaults: FxHashMap::default(),
            just_entered: vec![false; agent_count],
        }
    }

    /// Register `template` as the default activity of `region`.
    ///
    /// The template's location is overwritten with `region` at proposal time,
    /// so a single template can serve many regions.
    pub fn set_default(&mut self, region: RegionId, template: RequestTemplate) {
        self.defaults.insert(region, template);
    }

    fn default_for(&self, region: RegionId) -> Option<&RequestTemplate> {
        self.defaults.get(&region)
    }
}

impl ProposalSource for DefaultActivitySource {
    fn z_order(&self) -> u32 {
        self.z_order
    }

    fn has_new_activity(&mut self, ctx: &ScheduleContext<'_>, eligible: &AgentMask) -> AgentMask {
        let mut wanted = AgentMask::none(eligible.len());
        for agent in eligible.agents() {
            let region = ctx.region_of(agent);
            if self.default_for(region).is_none() {
                continue;
            }
            if ctx.table.is_idle(agent) || self.just_entered[agent.index()] {
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
                self.just_entered[agent.index()] = false;
                let region = ctx.region_of(agent);
                self.default_for(region).map(|template| {
                    template.clone().location(region).build()
                })
            })
            .collect()
    }

    fn on_region_enter(&mut self, agents: &[AgentId], region: RegionId, _tick: Tick) {
        if !self.defaults.contains_key(&region) {
            return;
        }
        for &agent in agents {
            self.just_entered[agent.index()] = true;
        }
    }
}
