//! `LocationActivitySource` — pick among the activities a region offers.
//!
//! Regions advertise a menu of activities (cook in the kitchen, watch TV in
//! the living room).  When an eligible agent is idle and its region offers
//! something, this source picks uniformly at random from the menu using the
//! agent's own RNG, so the draw is reproducible regardless of how many other
//! sources ran first.

use acs_core::{AgentId, AgentMask, RegionId};
use acs_queue::{ActivityRequest, RequestTemplate};
use acs_state::AgentRngs;
use rustc_hash::FxHashMap;

use crate::{ProposalSource, ScheduleContext};

/// Proposes a uniformly random activity from the agent's current region.
pub struct LocationActivitySource {
    z_order: u32,
    /// Region → menu of offered activities.
    offers: FxHashMap<RegionId, Vec<RequestTemplate>>,
}

impl LocationActivitySource {
    pub fn new(z_order: u32) -> Self {
        Self {
            z_order,
            offers: FxHashMap::default(),
        }
    }

    /// Add `template` to the menu of `region`.
    pub fn add_offer(&mut self, region: RegionId, template: RequestTemplate) {
        self.offers.entry(region).or_default().push(template);
    }
}

impl ProposalSource for LocationActivitySource {
    fn z_order(&self) -> u32 {
        self.z_order
    }

    fn has_new_activity(&mut self, ctx: &ScheduleContext<'_>, eligible: &AgentMask) -> AgentMask {
        let mut wanted = AgentMask::none(eligible.len());
        for agent in eligible.agents() {
            if !ctx.table.is_idle(agent) {
                continue;
            }
            let region = ctx.region_of(agent);
            if self.offers.get(&region).is_some_and(|menu| !menu.is_empty()) {
                wanted.set(agent, true);
            }
        }
        wanted
    }

    fn get_new_activity(
        &mut self,
        agents: &[AgentId],
        ctx:    &ScheduleContext<'_>,
        rngs:   &mut AgentRngs,
    ) -> Vec<Option<ActivityRequest>> {
        agents
            .iter()
            .map(|&agent| {
                let region = ctx.region_of(agent);
                let menu = self.offers.get(&region)?;
                let rng = rngs.get_mut(agent);
                let template = rng.choose(menu)?;
                Some(template.clone().location(region).build())
            })
            .collect()
    }
}
