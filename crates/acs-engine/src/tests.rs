//! Unit tests for acs-engine.

use std::cell::RefCell;
use std::rc::Rc;

use acs_core::{ActivityId, ActivityRegistry, AgentId, AgentMask, EngineConfig, RegionId, Tick};
use acs_propose::{ProposalSource, ScheduleContext};
use acs_queue::{ActivityRequest, BlockingMode, RequestTemplate};
use acs_region::DirectRelocator;
use acs_state::{AgentRngs, StopRecord};

use crate::{Engine, EngineBuilder, EngineError, EngineObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

const REST: ActivityId = ActivityId(1);
const COOK: ActivityId = ActivityId(2);
const ALARM: ActivityId = ActivityId(3);

const HOUSE: RegionId = RegionId(1);
const KITCHEN: RegionId = RegionId(2);
const BEDROOM: RegionId = RegionId(3);

fn registry() -> ActivityRegistry {
    let mut registry = ActivityRegistry::new();
    registry.register("rest").unwrap();
    registry.register("cook").unwrap();
    registry.register("alarm").unwrap();
    registry
}

fn config(total_ticks: u64) -> EngineConfig {
    EngineConfig {
        total_ticks,
        ..EngineConfig::default()
    }
}

/// Engine with direct relocation over universe → house → {kitchen, bedroom}.
fn located_engine(agents: usize) -> Engine<DirectRelocator> {
    EngineBuilder::new(config(100), registry(), agents)
        .region_rows(&[
            (HOUSE, RegionId::UNIVERSE),
            (KITCHEN, HOUSE),
            (BEDROOM, HOUSE),
        ])
        .unwrap()
        .relocator(DirectRelocator)
        .build()
        .unwrap()
}

/// Engine without a relocator: location arbitration disabled.
fn bare_engine(agents: usize) -> Engine<DirectRelocator> {
    EngineBuilder::new(config(100), registry(), agents)
        .build()
        .unwrap()
}

/// Emits pre-scripted requests at fixed ticks; declines everyone else.
struct ScriptSource {
    z:      u32,
    script: Vec<(Tick, AgentId, ActivityRequest)>,
}

impl ScriptSource {
    fn new(z: u32) -> Self {
        Self { z, script: Vec::new() }
    }

    fn at(mut self, tick: u64, agent: AgentId, request: ActivityRequest) -> Self {
        self.script.push((Tick(tick), agent, request));
        self
    }
}

impl ProposalSource for ScriptSource {
    fn z_order(&self) -> u32 {
        self.z
    }

    fn has_new_activity(&mut self, ctx: &ScheduleContext<'_>, eligible: &AgentMask) -> AgentMask {
        let mut wanted = AgentMask::none(eligible.len());
        for (tick, agent, _) in &self.script {
            if *tick == ctx.tick && eligible.get(*agent) {
                wanted.set(*agent, true);
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
            .map(|a| {
                self.script
                    .iter()
                    .find(|(tick, agent, _)| *tick == ctx.tick && agent == a)
                    .map(|(_, _, request)| request.clone())
            })
            .collect()
    }
}

// ── Staging and preemption ────────────────────────────────────────────────────

#[cfg(test)]
mod staging {
    use super::*;

    #[test]
    fn triggered_request_starts_same_tick() {
        let mut engine = bare_engine(1);
        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(5).build())
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
        assert_eq!(engine.table().elapsed(AgentId(0), REST), 1);
    }

    #[test]
    fn planned_request_waits_for_its_start_tick() {
        let mut engine = bare_engine(1);
        engine
            .plan(
                AgentId(0),
                RequestTemplate::new(REST)
                    .start_tick(Tick(2))
                    .duration(5)
                    .build(),
            )
            .unwrap();

        engine.tick_once().unwrap(); // T0: gated
        assert!(engine.table().is_idle(AgentId(0)));
        engine.tick_once().unwrap(); // T1: gated
        assert!(engine.table().is_idle(AgentId(0)));
        engine.tick_once().unwrap(); // T2: due
        assert_eq!(engine.table().current(AgentId(0)), REST);
    }

    #[test]
    fn run_completes_after_planned_duration() {
        let mut engine = bare_engine(1);
        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(3).build())
            .unwrap();
        engine.run_ticks(3).unwrap(); // T0 start, elapsed reaches 3 at end of T2
        assert_eq!(engine.table().elapsed(AgentId(0), REST), 3);
        assert!(!engine.table().is_idle(AgentId(0)));

        engine.tick_once().unwrap(); // T3 pre-step stops it
        assert!(engine.table().is_idle(AgentId(0)));
        assert_eq!(engine.table().accumulated(AgentId(0), REST), 3);
    }

    #[test]
    fn strictly_more_urgent_request_preempts() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(10).priority(5).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM).duration(2).priority(0).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), ALARM);
        // Only one kind in progress at a time.
        assert!(!engine.table().in_progress(AgentId(0), REST));
    }

    #[test]
    fn equal_priority_does_not_preempt() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(10).priority(5).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(COOK).duration(2).priority(5).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
        // The refused request stays queued for later.
        assert_eq!(engine.queues().get(AgentId(0)).triggered.len(), 1);
    }

    #[test]
    fn non_interruptable_run_resists_any_priority() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST)
                    .duration(10)
                    .priority(5)
                    .interruptable(false)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM).duration(2).priority(0).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
    }

    #[test]
    fn duplicate_of_current_kind_is_dropped() {
        let mut engine = bare_engine(1);
        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(10).build())
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(10).priority(0).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        // Still the original run, and the duplicate is gone.
        assert_eq!(engine.table().elapsed(AgentId(0), REST), 2);
        assert!(engine.queues().get(AgentId(0)).triggered.is_empty());
    }
}

// ── Resume after preemption ───────────────────────────────────────────────────

#[cfg(test)]
mod resume {
    use super::*;

    #[test]
    fn preempted_run_resumes_with_its_remainder() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(50).priority(5).build(),
            )
            .unwrap();
        engine.run_ticks(20).unwrap(); // elapsed 20 of 50

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM).duration(3).priority(0).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        assert_eq!(engine.table().current(AgentId(0)), ALARM);

        let parked = engine
            .queues()
            .get(AgentId(0))
            .interrupted
            .peek_back()
            .unwrap();
        assert_eq!(parked.kind, REST);
        assert_eq!(parked.duration, 30);
        let original = parked.descriptor_id;

        // The alarm finishes in the pre-step three ticks later and the rest
        // resumes within the same tick.
        engine.run_ticks(3).unwrap();
        assert_eq!(engine.table().current(AgentId(0)), REST);
        assert_eq!(engine.table().duration(AgentId(0), REST), 30);
        assert_eq!(engine.active_request(AgentId(0)).unwrap().descriptor_id, original);
        assert!(engine.queues().get(AgentId(0)).interrupted.is_empty());

        // Total rest time across both runs is the originally planned 50.
        engine.run_ticks(30).unwrap();
        engine.tick_once().unwrap();
        assert!(engine.table().is_idle(AgentId(0)));
        assert_eq!(engine.table().accumulated(AgentId(0), REST), 50);
    }

    #[test]
    fn interruptions_resume_newest_first() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(20).priority(9).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(COOK).duration(20).priority(5).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM).duration(2).priority(0).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        assert_eq!(engine.table().current(AgentId(0)), ALARM);
        assert_eq!(engine.queues().get(AgentId(0)).interrupted.len(), 2);

        // Alarm ends two ticks later; the cook (newest interruption) resumes
        // first, the rest stays stacked beneath it.
        engine.run_ticks(2).unwrap();
        assert_eq!(engine.table().current(AgentId(0)), COOK);
        assert_eq!(engine.queues().get(AgentId(0)).interrupted.len(), 1);
        assert_eq!(
            engine
                .queues()
                .get(AgentId(0))
                .interrupted
                .peek_back()
                .unwrap()
                .kind,
            REST
        );
    }
}

// ── Cooldowns ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cooldowns {
    use super::*;

    #[test]
    fn block_for_gates_the_restart() {
        let mut engine = bare_engine(1);
        let request = RequestTemplate::new(REST).duration(2).block_for(3).build();
        engine.trigger(AgentId(0), request.clone()).unwrap();

        engine.tick_once().unwrap(); // T0: start
        engine.run_ticks(2).unwrap(); // T2 pre-step stops it
        assert!(engine.table().is_idle(AgentId(0)));
        assert_eq!(engine.table().blocked_for(AgentId(0), REST), 3);

        engine.trigger(AgentId(0), request).unwrap();
        engine.tick_once().unwrap(); // T3: cooldown 2
        assert!(engine.table().is_idle(AgentId(0)));
        engine.tick_once().unwrap(); // T4: cooldown 1
        assert!(engine.table().is_idle(AgentId(0)));
        engine.tick_once().unwrap(); // T5: cooldown expires, restart
        assert_eq!(engine.table().current(AgentId(0)), REST);
    }

    #[test]
    fn unblock_hook_fires_when_cooldown_expires() {
        let mut engine = bare_engine(1);
        let unblocked: Rc<RefCell<Vec<Tick>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let unblocked = Rc::clone(&unblocked);
            engine.hooks_mut().on_unblock(
                REST,
                Box::new(move |agents, tick| {
                    assert_eq!(agents, [AgentId(0)]);
                    unblocked.borrow_mut().push(tick);
                }),
            );
        }

        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(1).block_for(2).build(),
            )
            .unwrap();
        engine.run_ticks(4).unwrap(); // stop at T1, cooldown 2 → 1 → 0 at T3

        assert_eq!(*unblocked.borrow(), vec![Tick(3)]);
    }
}

// ── Location contention ───────────────────────────────────────────────────────

#[cfg(test)]
mod contention {
    use super::*;

    fn shared_cook(duration: u32) -> ActivityRequest {
        RequestTemplate::new(COOK)
            .duration(duration)
            .location(KITCHEN)
            .blocks_location(BlockingMode::Shared)
            .build()
    }

    #[test]
    fn first_come_goes_to_the_lowest_agent_index() {
        let mut engine = located_engine(8);
        engine.trigger(AgentId(3), shared_cook(5)).unwrap();
        engine.trigger(AgentId(7), shared_cook(5)).unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(3)), COOK);
        assert!(engine.table().is_idle(AgentId(7)));
        assert_eq!(engine.queues().get(AgentId(7)).postponed.len(), 1);
        assert!(engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());
    }

    #[test]
    fn postponed_loser_starts_once_the_winner_finishes() {
        let mut engine = located_engine(8);
        engine.trigger(AgentId(3), shared_cook(5)).unwrap();
        engine.trigger(AgentId(7), shared_cook(5)).unwrap();
        engine.tick_once().unwrap();

        // The winner finishes in the pre-step of T5; the loser's postponed
        // request is re-arbitrated the same tick and wins.
        engine.run_ticks(5).unwrap();
        assert!(engine.table().is_idle(AgentId(3)));
        assert_eq!(engine.table().current(AgentId(7)), COOK);
        assert!(engine.queues().get(AgentId(7)).postponed.is_empty());
    }

    #[test]
    fn wait_mode_parks_until_the_region_empties() {
        let mut engine = located_engine(2);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(COOK)
                    .duration(10)
                    .priority(5)
                    .location(KITCHEN)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        assert_eq!(engine.regions().region_of(AgentId(0)), KITCHEN);

        engine
            .trigger(
                AgentId(1),
                RequestTemplate::new(REST)
                    .duration(5)
                    .location(KITCHEN)
                    .blocks_location(BlockingMode::Wait)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        assert!(engine.table().is_idle(AgentId(1)));
        assert!(engine.waiting_request(AgentId(1)).is_some());

        // Pull the occupant out with a more urgent activity elsewhere; the
        // parked request sees zero occupancy the same tick (agent 0 is
        // resolved first) and claims the kitchen.
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM)
                    .duration(5)
                    .priority(0)
                    .location(BEDROOM)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.regions().region_of(AgentId(0)), BEDROOM);
        assert_eq!(engine.table().current(AgentId(1)), REST);
        assert_eq!(engine.regions().region_of(AgentId(1)), KITCHEN);
        assert!(engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());
        assert!(engine.waiting_request(AgentId(1)).is_none());
    }

    #[test]
    fn lock_released_once_the_region_empties() {
        let mut engine = located_engine(3);
        // Agent 0 holds the kitchen lock; agent 1 co-locates without one.
        engine.trigger(AgentId(0), shared_cook(2)).unwrap();
        engine
            .trigger(
                AgentId(1),
                RequestTemplate::new(REST).duration(3).location(KITCHEN).build(),
            )
            .unwrap();
        engine.run_ticks(2).unwrap();
        assert!(engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());

        // The holder finishes (pre-step of T2) with agent 1 still inside:
        // the lock is held back, then released as the agents move on.
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(ALARM).duration(10).location(BEDROOM).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        engine
            .trigger(
                AgentId(1),
                RequestTemplate::new(ALARM).duration(10).location(BEDROOM).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.regions().occupancy(KITCHEN).unwrap(), 0);
        assert!(!engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());

        // A fresh shared claim on the now-empty kitchen starts same tick.
        engine.trigger(AgentId(2), shared_cook(2)).unwrap();
        engine.tick_once().unwrap();
        assert_eq!(engine.table().current(AgentId(2)), COOK);
        assert!(engine.queues().get(AgentId(2)).postponed.is_empty());
        assert!(engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());
    }

    #[test]
    fn blocks_parent_locks_the_whole_neighbourhood() {
        let mut engine = located_engine(2);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(COOK)
                    .duration(10)
                    .location(KITCHEN)
                    .blocks_location(BlockingMode::Shared)
                    .blocks_parent(true)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        for region in [KITCHEN, HOUSE, BEDROOM] {
            assert!(
                engine.locks().is_blocked(engine.regions(), region).unwrap(),
                "{region} should be blocked"
            );
        }

        // A shared request on the locked sibling is postponed.
        engine
            .trigger(
                AgentId(1),
                RequestTemplate::new(REST)
                    .duration(5)
                    .location(BEDROOM)
                    .blocks_location(BlockingMode::Shared)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();
        assert!(engine.table().is_idle(AgentId(1)));
        assert_eq!(engine.queues().get(AgentId(1)).postponed.len(), 1);

        // The holder finishing (pre-step of T10) releases kitchen, sibling,
        // and parent; the postponed request then claims the bedroom the
        // same tick.
        engine.run_ticks(9).unwrap();
        assert_eq!(engine.table().current(AgentId(1)), REST);
        assert!(!engine.locks().is_blocked(engine.regions(), HOUSE).unwrap());
        assert!(!engine.locks().is_blocked(engine.regions(), KITCHEN).unwrap());
        assert!(engine.locks().is_blocked(engine.regions(), BEDROOM).unwrap());
    }

    #[test]
    fn rejecting_mode_is_reported_unsupported() {
        let mut engine = located_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST)
                    .location(KITCHEN)
                    .blocks_location(BlockingMode::Rejecting)
                    .build(),
            )
            .unwrap();
        let err = engine.tick_once().unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedBlockingMode));
    }

    #[test]
    fn without_a_relocator_location_checks_are_skipped() {
        let mut engine = bare_engine(1);
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST)
                    .duration(5)
                    .location(KITCHEN)
                    .blocks_location(BlockingMode::Shared)
                    .build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
        assert_eq!(engine.locks().blocked_count(), 0);
        // Nobody moved: the agent is still in the universe.
        assert_eq!(engine.regions().region_of(AgentId(0)), RegionId::UNIVERSE);
    }
}

// ── Request injection ─────────────────────────────────────────────────────────

#[cfg(test)]
mod injection {
    use super::*;

    #[test]
    fn none_kind_requests_are_refused() {
        let mut engine = bare_engine(1);
        let err = engine
            .trigger(AgentId(0), RequestTemplate::new(ActivityId::NONE).build())
            .unwrap_err();
        assert!(matches!(err, EngineError::NoneKindRequest));
    }

    #[test]
    fn unregistered_kinds_are_refused() {
        let mut engine = bare_engine(1);
        let err = engine
            .trigger(AgentId(0), RequestTemplate::new(ActivityId(9)).build())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(acs_core::CoreError::UnknownActivity(ActivityId(9)))
        ));
    }

    #[test]
    fn descriptor_stamps_are_monotonic() {
        let mut engine = bare_engine(1);
        let request = RequestTemplate::new(REST).start_tick(Tick(50)).build();
        engine.plan(AgentId(0), request.clone()).unwrap();
        engine.plan(AgentId(0), request).unwrap();

        let stamps: Vec<u64> = engine
            .queues()
            .get(AgentId(0))
            .planned
            .iter()
            .map(|r| r.descriptor_id.0)
            .collect();
        assert_eq!(stamps, vec![1, 2]);
    }

    #[test]
    fn full_queue_evicts_the_oldest_plan() {
        let config = EngineConfig {
            queue_depth: 2,
            total_ticks: 10,
            ..EngineConfig::default()
        };
        let mut engine = EngineBuilder::new(config, registry(), 1).build().unwrap();
        for _ in 0..3 {
            engine
                .plan(AgentId(0), RequestTemplate::new(REST).start_tick(Tick(50)).build())
                .unwrap();
        }
        let stamps: Vec<u64> = engine
            .queues()
            .get(AgentId(0))
            .planned
            .iter()
            .map(|r| r.descriptor_id.0)
            .collect();
        assert_eq!(stamps, vec![2, 3]);
    }

    #[test]
    fn forced_stop_releases_the_agent() {
        let mut engine = bare_engine(1);
        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(10).build())
            .unwrap();
        engine.run_ticks(4).unwrap();

        let stops = engine.stop(&[AgentId(0)]).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].kind, REST);
        assert_eq!(stops[0].elapsed, 4);
        assert!(engine.table().is_idle(AgentId(0)));
    }
}

// ── Proposal sources ──────────────────────────────────────────────────────────

#[cfg(test)]
mod sources {
    use super::*;

    #[test]
    fn lower_z_order_wins_the_agent() {
        let low = ScriptSource::new(1).at(
            0,
            AgentId(0),
            RequestTemplate::new(REST).duration(5).build(),
        );
        let high = ScriptSource::new(2).at(
            0,
            AgentId(0),
            RequestTemplate::new(COOK).duration(5).build(),
        );

        // Attached out of order; the builder sorts by z-order.
        let mut engine = EngineBuilder::new(config(10), registry(), 1)
            .source(Box::new(high))
            .source(Box::new(low))
            .build()
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
        assert!(engine.queues().get(AgentId(0)).planned.is_empty());
    }

    #[test]
    fn later_sources_still_get_undeclined_agents() {
        let low = ScriptSource::new(1).at(
            0,
            AgentId(0),
            RequestTemplate::new(REST).duration(5).build(),
        );
        let high = ScriptSource::new(2).at(
            0,
            AgentId(1),
            RequestTemplate::new(COOK).duration(5).build(),
        );

        let mut engine = EngineBuilder::new(config(10), registry(), 2)
            .source(Box::new(low))
            .source(Box::new(high))
            .build()
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(engine.table().current(AgentId(0)), REST);
        assert_eq!(engine.table().current(AgentId(1)), COOK);
    }

    #[test]
    fn proposal_length_mismatch_aborts_the_tick() {
        struct BadSource;
        impl ProposalSource for BadSource {
            fn z_order(&self) -> u32 {
                0
            }
            fn has_new_activity(
                &mut self,
                _ctx:     &ScheduleContext<'_>,
                eligible: &AgentMask,
            ) -> AgentMask {
                AgentMask::all(eligible.len())
            }
            fn get_new_activity(
                &mut self,
                _agents: &[AgentId],
                _ctx:    &ScheduleContext<'_>,
                _rngs:   &mut AgentRngs,
            ) -> Vec<Option<ActivityRequest>> {
                Vec::new()
            }
        }

        let mut engine = EngineBuilder::new(config(10), registry(), 2)
            .source(Box::new(BadSource))
            .build()
            .unwrap();
        let err = engine.tick_once().unwrap_err();
        assert!(matches!(err, EngineError::ProposalLengthMismatch { expected: 2, got: 0 }));
    }

    #[test]
    fn sources_are_notified_of_starts_and_stops() {
        struct NotingSource {
            started: Rc<RefCell<usize>>,
            stopped: Rc<RefCell<usize>>,
        }
        impl ProposalSource for NotingSource {
            fn z_order(&self) -> u32 {
                0
            }
            fn has_new_activity(
                &mut self,
                _ctx:     &ScheduleContext<'_>,
                eligible: &AgentMask,
            ) -> AgentMask {
                AgentMask::none(eligible.len())
            }
            fn get_new_activity(
                &mut self,
                _agents: &[AgentId],
                _ctx:    &ScheduleContext<'_>,
                _rngs:   &mut AgentRngs,
            ) -> Vec<Option<ActivityRequest>> {
                Vec::new()
            }
            fn on_activity_started(&mut self, agents: &[AgentId], kind: ActivityId, _tick: Tick) {
                assert_eq!(kind, REST);
                *self.started.borrow_mut() += agents.len();
            }
            fn on_activity_stopped(&mut self, stops: &[StopRecord], _tick: Tick) {
                *self.stopped.borrow_mut() += stops.len();
            }
        }

        let started = Rc::new(RefCell::new(0));
        let stopped = Rc::new(RefCell::new(0));
        let mut engine = EngineBuilder::new(config(10), registry(), 1)
            .source(Box::new(NotingSource {
                started: Rc::clone(&started),
                stopped: Rc::clone(&stopped),
            }))
            .build()
            .unwrap();

        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(2).build())
            .unwrap();
        engine.run_ticks(3).unwrap();

        assert_eq!(*started.borrow(), 1);
        assert_eq!(*stopped.borrow(), 1);
    }

    #[test]
    fn sources_are_notified_of_region_traffic() {
        struct RegionNoter {
            enters:  Rc<RefCell<Vec<(RegionId, Vec<AgentId>)>>>,
            exits:   Rc<RefCell<Vec<(RegionId, Vec<AgentId>)>>>,
            empties: Rc<RefCell<Vec<RegionId>>>,
        }
        impl ProposalSource for RegionNoter {
            fn z_order(&self) -> u32 {
                0
            }
            fn has_new_activity(
                &mut self,
                _ctx:     &ScheduleContext<'_>,
                eligible: &AgentMask,
            ) -> AgentMask {
                AgentMask::none(eligible.len())
            }
            fn get_new_activity(
                &mut self,
                _agents: &[AgentId],
                _ctx:    &ScheduleContext<'_>,
                _rngs:   &mut AgentRngs,
            ) -> Vec<Option<ActivityRequest>> {
                Vec::new()
            }
            fn on_region_enter(&mut self, agents: &[AgentId], region: RegionId, _tick: Tick) {
                self.enters.borrow_mut().push((region, agents.to_vec()));
            }
            fn on_region_exit(&mut self, agents: &[AgentId], region: RegionId, _tick: Tick) {
                self.exits.borrow_mut().push((region, agents.to_vec()));
            }
            fn on_region_empty(&mut self, region: RegionId, _tick: Tick) {
                self.empties.borrow_mut().push(region);
            }
        }

        let enters = Rc::new(RefCell::new(Vec::new()));
        let exits = Rc::new(RefCell::new(Vec::new()));
        let empties = Rc::new(RefCell::new(Vec::new()));
        let mut engine = EngineBuilder::new(config(100), registry(), 1)
            .region_rows(&[
                (HOUSE, RegionId::UNIVERSE),
                (KITCHEN, HOUSE),
                (BEDROOM, HOUSE),
            ])
            .unwrap()
            .relocator(DirectRelocator)
            .source(Box::new(RegionNoter {
                enters:  Rc::clone(&enters),
                exits:   Rc::clone(&exits),
                empties: Rc::clone(&empties),
            }))
            .build()
            .unwrap();

        // The lone agent leaves the universe root for the kitchen...
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(COOK).duration(2).location(KITCHEN).build(),
            )
            .unwrap();
        engine.run_ticks(3).unwrap(); // cook stops in the pre-step of T2

        // ...then moves on to the bedroom, emptying the kitchen behind it.
        engine
            .trigger(
                AgentId(0),
                RequestTemplate::new(REST).duration(2).location(BEDROOM).build(),
            )
            .unwrap();
        engine.tick_once().unwrap();

        assert_eq!(
            *enters.borrow(),
            vec![(KITCHEN, vec![AgentId(0)]), (BEDROOM, vec![AgentId(0)])]
        );
        assert_eq!(
            *exits.borrow(),
            vec![(RegionId::UNIVERSE, vec![AgentId(0)]), (KITCHEN, vec![AgentId(0)])]
        );
        assert_eq!(*empties.borrow(), vec![RegionId::UNIVERSE, KITCHEN]);
    }
}

// ── Hooks and observers ───────────────────────────────────────────────────────

#[cfg(test)]
mod instrumentation {
    use super::*;

    #[test]
    fn start_and_stop_hooks_fire_per_kind() {
        let mut engine = bare_engine(1);
        let starts = Rc::new(RefCell::new(0usize));
        let stops: Rc<RefCell<Vec<StopRecord>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let starts = Rc::clone(&starts);
            engine.hooks_mut().on_start(
                REST,
                Box::new(move |agents, _tick| *starts.borrow_mut() += agents.len()),
            );
            let stops = Rc::clone(&stops);
            engine.hooks_mut().on_stop(
                REST,
                Box::new(move |records, _tick| stops.borrow_mut().extend_from_slice(records)),
            );
        }

        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(2).build())
            .unwrap();
        engine.run_ticks(3).unwrap();

        assert_eq!(*starts.borrow(), 1);
        let recorded = stops.borrow();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].elapsed, 2);
        assert_eq!(recorded[0].planned, 2);
    }

    #[test]
    fn observers_see_tick_summaries() {
        struct Probe {
            summaries: Rc<RefCell<Vec<TickSummary>>>,
            stops:     Rc<RefCell<usize>>,
            run_ended: Rc<RefCell<bool>>,
        }
        impl EngineObserver for Probe {
            fn on_stops(&mut self, _tick: Tick, stops: &[StopRecord]) {
                *self.stops.borrow_mut() += stops.len();
            }
            fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
                self.summaries.borrow_mut().push(summary.clone());
            }
            fn on_run_end(&mut self, _final_tick: Tick) {
                *self.run_ended.borrow_mut() = true;
            }
        }

        let summaries = Rc::new(RefCell::new(Vec::new()));
        let stops = Rc::new(RefCell::new(0));
        let run_ended = Rc::new(RefCell::new(false));
        let mut engine = EngineBuilder::new(config(4), registry(), 1)
            .observer(Box::new(Probe {
                summaries: Rc::clone(&summaries),
                stops:     Rc::clone(&stops),
                run_ended: Rc::clone(&run_ended),
            }))
            .build()
            .unwrap();

        engine
            .trigger(AgentId(0), RequestTemplate::new(REST).duration(2).build())
            .unwrap();
        engine.run().unwrap();

        let summaries = summaries.borrow();
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].started, 1);
        assert_eq!(summaries[2].stopped, 1); // pre-step of T2
        assert_eq!(*stops.borrow(), 1);
        assert!(*run_ended.borrow());
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn refuses_an_empty_registry() {
        let err = EngineBuilder::new(config(10), ActivityRegistry::new(), 1)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn refuses_zero_queue_depth() {
        let config = EngineConfig {
            queue_depth: 0,
            ..EngineConfig::default()
        };
        let err = EngineBuilder::new(config, registry(), 1).build().err().unwrap();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn refuses_an_undersized_rng_pool() {
        let err = EngineBuilder::new(config(10), registry(), 4)
            .rngs(AgentRngs::new(2, 1))
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            EngineError::CountMismatch { expected: 4, got: 2, .. }
        ));
    }
}

// ── Steady state ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod steady_state {
    use super::*;

    /// Proposes a 5-tick rest for any idle agent, forever.
    struct AlwaysRest;
    impl ProposalSource for AlwaysRest {
        fn z_order(&self) -> u32 {
            0
        }
        fn has_new_activity(
            &mut self,
            ctx:      &ScheduleContext<'_>,
            eligible: &AgentMask,
        ) -> AgentMask {
            let mut wanted = AgentMask::none(eligible.len());
            for agent in eligible.agents() {
                if ctx.table.is_idle(agent) {
                    wanted.set(agent, true);
                }
            }
            wanted
        }
        fn get_new_activity(
            &mut self,
            agents: &[AgentId],
            _ctx:   &ScheduleContext<'_>,
            _rngs:  &mut AgentRngs,
        ) -> Vec<Option<ActivityRequest>> {
            agents
                .iter()
                .map(|_| Some(RequestTemplate::new(REST).duration(5).build()))
                .collect()
        }
    }

    #[test]
    fn back_to_back_runs_account_for_every_tick() {
        let mut engine = EngineBuilder::new(config(50), registry(), 10)
            .source(Box::new(AlwaysRest))
            .build()
            .unwrap();
        engine.run().unwrap();

        for i in 0..10u32 {
            let agent = AgentId(i);
            // Runs abut seamlessly: a finished rest is replaced within the
            // same tick, so every one of the 50 ticks was spent resting.
            assert_eq!(engine.table().accumulated(agent, REST), 50);
            assert_eq!(engine.table().current(agent), REST);
            assert!(engine.table().elapsed(agent, REST) <= engine.table().duration(agent, REST));
            assert_eq!(engine.table().blocked_for(agent, REST), 0);
        }
    }
}
