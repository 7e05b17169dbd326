//! The `Engine` — the five-phase tick loop.
//!
//! Each tick runs:
//!
//! 1. **Pre-step** — decrement cooldowns (firing unblock hooks for kinds
//!    that reach zero) and stop runs that completed their planned duration.
//! 2. **Collect** — poll proposal sources in ascending z-order; accepted
//!    proposals are stamped with a descriptor and enqueued.
//! 3. **Resolve** — per agent, in ascending index order, attempt to stage
//!    one request from the wait slot, resume stack, postponed, triggered,
//!    and planned queues, in that order.  Ascending agent order makes
//!    first-come arbitration deterministic: the lowest-indexed contender
//!    sees the resource free and locks it; later ones see it blocked.
//! 4. **Commit** — staging a request stops any preempted run (pushing its
//!    remainder onto the resume stack) and starts the new one atomically.
//!    Commit is folded into staging so lock side effects are visible to the
//!    next agent within the same tick.
//! 5. **Post-step** — advance elapsed/accumulated counters and the clock.
//!
//! Notifications to sources and hooks are deferred to the end of the tick so
//! listeners observe a consistent post-commit world.

use std::mem;

use acs_core::{ActivityId, ActivityRegistry, AgentId, AgentMask, EngineConfig, RegionId, SimClock, Tick};
use acs_propose::{ProposalSource, ScheduleContext};
use acs_queue::{ActivityRequest, AgentQueues, BlockingMode};
use acs_region::{LockRegistry, RegionTable, Relocator};
use acs_state::{ActivityStateTable, AgentRngs, StopRecord};
use rustc_hash::FxHashMap;

use crate::{EngineError, EngineObserver, EngineResult, HookRegistry, TickSummary};

// ── Staging ───────────────────────────────────────────────────────────────────

/// What became of one staging attempt.
///
/// Non-`Staged` outcomes return the request so the caller can route it; a
/// failed attempt has no side effects on locks, occupancy, or state.
enum StageOutcome {
    /// Committed: the activity is running as of this tick.
    Staged,
    /// Startable later but not now (cooldown running, or a higher-priority
    /// run holds the agent).  Stays where it came from.
    NotReady(ActivityRequest),
    /// Lost shared arbitration or was refused relocation; retried from the
    /// postponed queue.
    Postponed(ActivityRequest),
    /// Wait-blocked: the target still has occupants.  Parked for per-tick
    /// re-evaluation.
    Parked(ActivityRequest),
    /// Redundant (the agent is already running this kind); discarded.
    Dropped,
}

/// Everything that happened during one tick, accumulated for end-of-tick
/// notification.
#[derive(Default)]
struct TickEvents {
    started:   Vec<(AgentId, ActivityId)>,
    stops:     Vec<StopRecord>,
    entries:   Vec<(AgentId, RegionId)>,
    exits:     Vec<(AgentId, RegionId)>,
    emptied:   Vec<RegionId>,
    postponed: usize,
    parked:    usize,
    evicted:   usize,
}

impl TickEvents {
    fn note_eviction(&mut self, evicted: Option<ActivityRequest>) {
        if evicted.is_some() {
            self.evicted += 1;
        }
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The activity scheduler.  Built via
/// [`EngineBuilder`][crate::EngineBuilder]; owns all simulation state.
///
/// Without a relocator the engine degrades gracefully: location arbitration
/// and relocation are skipped entirely and every request is treated as
/// location-permitted.
pub struct Engine<R: Relocator> {
    config:    EngineConfig,
    clock:     SimClock,
    registry:  ActivityRegistry,
    table:     ActivityStateTable,
    rngs:      AgentRngs,
    queues:    AgentQueues,
    regions:   RegionTable,
    locks:     LockRegistry,
    sources:   Vec<Box<dyn ProposalSource>>,
    observers: Vec<Box<dyn EngineObserver>>,
    relocator: Option<R>,
    hooks:     HookRegistry,

    /// The request behind each agent's in-progress run.
    active: Vec<Option<ActivityRequest>>,
    /// One wait-blocked request per agent, re-evaluated every tick.
    waiting: Vec<Option<ActivityRequest>>,
    /// Lock releases held back because co-occupants were still inside the
    /// holder's region; retried as the population thins.
    deferred_releases: Vec<(AgentId, ActivityRequest)>,
    /// Monotonic descriptor stamp; 0 is reserved for "unstamped".
    next_descriptor: u64,
}

impl<R: Relocator> Engine<R> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        config:    EngineConfig,
        registry:  ActivityRegistry,
        table:     ActivityStateTable,
        rngs:      AgentRngs,
        queues:    AgentQueues,
        regions:   RegionTable,
        sources:   Vec<Box<dyn ProposalSource>>,
        observers: Vec<Box<dyn EngineObserver>>,
        relocator: Option<R>,
    ) -> Self {
        let agent_count = table.agent_count();
        let kind_count = registry.len();
        Self {
            clock: config.make_clock(),
            locks: LockRegistry::new(&regions),
            hooks: HookRegistry::new(kind_count),
            active: (0..agent_count).map(|_| None).collect(),
            waiting: (0..agent_count).map(|_| None).collect(),
            deferred_releases: Vec::new(),
            next_descriptor: 1,
            config,
            registry,
            table,
            rngs,
            queues,
            regions,
            sources,
            observers,
            relocator,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn registry(&self) -> &ActivityRegistry {
        &self.registry
    }

    pub fn table(&self) -> &ActivityStateTable {
        &self.table
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    pub fn queues(&self) -> &AgentQueues {
        &self.queues
    }

    /// The request behind the agent's current run, if the run was started by
    /// this engine.
    pub fn active_request(&self, agent: AgentId) -> Option<&ActivityRequest> {
        self.active[agent.index()].as_ref()
    }

    /// The agent's parked wait-blocked request, if any.
    pub fn waiting_request(&self, agent: AgentId) -> Option<&ActivityRequest> {
        self.waiting[agent.index()].as_ref()
    }

    /// Register start/stop/unblock callbacks.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    // ── Request injection ─────────────────────────────────────────────────

    /// Inject an urgent request for `agent`.  Triggered requests bypass the
    /// `start_tick` gate and are resolved before planned ones.
    pub fn trigger(&mut self, agent: AgentId, request: ActivityRequest) -> EngineResult<()> {
        let request = self.admit(request)?;
        let _ = self.queues.push_triggered(agent, request);
        Ok(())
    }

    /// Inject a long-horizon request for `agent`, time-gated on its
    /// `start_tick`.
    pub fn plan(&mut self, agent: AgentId, request: ActivityRequest) -> EngineResult<()> {
        let request = self.admit(request)?;
        let _ = self.queues.push_planned(agent, request);
        Ok(())
    }

    /// Validate and descriptor-stamp an externally supplied request.
    fn admit(&mut self, mut request: ActivityRequest) -> EngineResult<ActivityRequest> {
        if request.kind == ActivityId::NONE {
            return Err(EngineError::NoneKindRequest);
        }
        if request.kind.index() >= self.registry.len() {
            return Err(EngineError::Core(acs_core::CoreError::UnknownActivity(
                request.kind,
            )));
        }
        request.descriptor_id = self.stamp();
        Ok(request)
    }

    fn stamp(&mut self) -> acs_core::DescriptorId {
        let id = acs_core::DescriptorId(self.next_descriptor);
        self.next_descriptor += 1;
        id
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Run until the configured tick budget is exhausted.
    pub fn run(&mut self) -> EngineResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick_once()?;
        }
        let final_tick = self.clock.current_tick;
        for observer in &mut self.observers {
            observer.on_run_end(final_tick);
        }
        Ok(())
    }

    /// Run exactly `n` more ticks.
    pub fn run_ticks(&mut self, n: u64) -> EngineResult<()> {
        for _ in 0..n {
            self.tick_once()?;
        }
        Ok(())
    }

    /// Execute one full tick.
    pub fn tick_once(&mut self) -> EngineResult<()> {
        let now = self.clock.current_tick;
        for observer in &mut self.observers {
            observer.on_tick_start(now);
        }

        let mut events = TickEvents::default();

        // Phase 1: cooldowns and natural completions.
        let unblocked = self.table.tick_cooldowns();
        self.fire_unblocks(&unblocked, now);
        let done = self.table.finished_agents();
        self.stop_agents_inner(&done, now, &mut events)?;
        self.retry_deferred_releases()?;

        // Phases 2–4: collect, then resolve/commit per agent.  Sources are
        // taken out of `self` so they can borrow the world read-only while
        // being polled mutably.
        let mut sources = mem::take(&mut self.sources);
        let outcome = self
            .collect(&mut sources, now, &mut events)
            .and_then(|()| self.resolve(now, &mut events));
        if outcome.is_ok() {
            Self::notify_sources(&mut sources, now, &events);
        }
        self.sources = sources;
        outcome?;

        self.fire_hooks(now, &events);
        if !events.stops.is_empty() {
            for observer in &mut self.observers {
                observer.on_stops(now, &events.stops);
            }
        }

        // Phase 5: advance counters and the clock.
        self.table.advance();
        let summary = TickSummary {
            tick:            now,
            started:         events.started.len(),
            stopped:         events.stops.len(),
            postponed:       events.postponed,
            parked:          events.parked,
            evicted:         events.evicted,
            blocked_regions: self.locks.blocked_count(),
        };
        for observer in &mut self.observers {
            observer.on_tick_end(now, &summary);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Phase 2: collect ──────────────────────────────────────────────────

    fn collect(
        &mut self,
        sources: &mut [Box<dyn ProposalSource>],
        now:     Tick,
        events:  &mut TickEvents,
    ) -> EngineResult<()> {
        let agent_count = self.table.agent_count();
        let mut eligible = AgentMask::all(agent_count);

        for source in sources.iter_mut() {
            if !eligible.any() {
                break;
            }
            let ctx = ScheduleContext::new(now, &self.clock, &self.table, &self.regions);
            let mut wanted = source.has_new_activity(&ctx, &eligible);
            wanted.intersect(&eligible);
            if !wanted.any() {
                continue;
            }
            let agents = wanted.agents();
            let proposals = source.get_new_activity(&agents, &ctx, &mut self.rngs);
            if proposals.len() != agents.len() {
                return Err(EngineError::ProposalLengthMismatch {
                    expected: agents.len(),
                    got:      proposals.len(),
                });
            }
            for (&agent, proposal) in agents.iter().zip(proposals) {
                let Some(mut request) = proposal else { continue };
                if request.kind == ActivityId::NONE {
                    return Err(EngineError::NoneKindRequest);
                }
                request.descriptor_id = self.stamp();
                eligible.set(agent, false);
                let evicted = self.queues.push_planned(agent, request);
                events.note_eviction(evicted);
            }
        }
        Ok(())
    }

    // ── Phase 3/4: resolve and commit ─────────────────────────────────────

    fn resolve(&mut self, now: Tick, events: &mut TickEvents) -> EngineResult<()> {
        let agent_count = self.table.agent_count();

        for i in 0..agent_count {
            let agent = AgentId(i as u32);
            let mut staged = false;

            // Wait slot first: the longest-standing claim on a contended
            // resource gets the earliest look at this tick's occupancy.
            if let Some(request) = self.waiting[i].take() {
                match self.try_stage(agent, request, now, false, events)? {
                    StageOutcome::Staged => staged = true,
                    StageOutcome::Parked(request) | StageOutcome::NotReady(request) => {
                        self.waiting[i] = Some(request);
                        events.parked += 1;
                    }
                    StageOutcome::Postponed(request) => {
                        let evicted = self.queues.push_postponed(agent, request);
                        events.note_eviction(evicted);
                        events.postponed += 1;
                    }
                    StageOutcome::Dropped => {}
                }
            }

            // Resume stack: newest interruption first, idle agents only.
            // Non-staged outcomes leave the run on the stack for next tick.
            if !staged && self.table.is_idle(agent) {
                let candidate = self.queues.get(agent).interrupted.peek_back().cloned();
                if let Some(request) = candidate {
                    match self.try_stage(agent, request, now, true, events)? {
                        StageOutcome::Staged => {
                            self.queues.get_mut(agent).interrupted.pop_back();
                            staged = true;
                        }
                        StageOutcome::Dropped => {
                            self.queues.get_mut(agent).interrupted.pop_back();
                        }
                        StageOutcome::NotReady(_)
                        | StageOutcome::Postponed(_)
                        | StageOutcome::Parked(_) => {}
                    }
                }
            }

            if !staged {
                staged = self.resolve_queue(agent, QueueLane::Postponed, now, events)?;
            }
            if !staged {
                staged = self.resolve_queue(agent, QueueLane::Triggered, now, events)?;
            }
            if !staged {
                self.resolve_queue(agent, QueueLane::Planned, now, events)?;
            }
        }
        Ok(())
    }

    /// Attempt to stage the front entry of one FIFO lane.  Returns `true`
    /// if the agent committed an activity.
    fn resolve_queue(
        &mut self,
        agent:  AgentId,
        lane:   QueueLane,
        now:    Tick,
        events: &mut TickEvents,
    ) -> EngineResult<bool> {
        let candidate = {
            let set = self.queues.get(agent);
            let ring = match lane {
                QueueLane::Postponed => &set.postponed,
                QueueLane::Triggered => &set.triggered,
                QueueLane::Planned => &set.planned,
            };
            ring.peek_front().cloned()
        };
        let Some(request) = candidate else {
            return Ok(false);
        };
        // Only the planned lane time-gates; triggered and postponed entries
        // are already overdue by definition.
        if lane == QueueLane::Planned && !request.is_due(now) {
            return Ok(false);
        }

        match self.try_stage(agent, request, now, false, events)? {
            StageOutcome::Staged => {
                self.pop_lane(agent, lane);
                Ok(true)
            }
            StageOutcome::Dropped => {
                self.pop_lane(agent, lane);
                Ok(false)
            }
            StageOutcome::NotReady(_) => Ok(false),
            StageOutcome::Postponed(request) => {
                // Arbitration losers migrate to the postponed lane; entries
                // already there just stay put.
                if lane != QueueLane::Postponed {
                    self.pop_lane(agent, lane);
                    let evicted = self.queues.push_postponed(agent, request);
                    events.note_eviction(evicted);
                }
                events.postponed += 1;
                Ok(false)
            }
            StageOutcome::Parked(request) => {
                // The wait slot holds one request; with it occupied the
                // entry stays queued and retries later.
                if self.waiting[agent.index()].is_none() {
                    self.pop_lane(agent, lane);
                    self.waiting[agent.index()] = Some(request);
                }
                events.parked += 1;
                Ok(false)
            }
        }
    }

    fn pop_lane(&mut self, agent: AgentId, lane: QueueLane) {
        let set = self.queues.get_mut(agent);
        match lane {
            QueueLane::Postponed => set.postponed.pop_front(),
            QueueLane::Triggered => set.triggered.pop_front(),
            QueueLane::Planned => set.planned.pop_front(),
        };
    }

    /// The staging pipeline: preemption gate → cooldown gate → location
    /// arbitration → relocation → lock side effects → commit.
    ///
    /// All checks precede all mutations, so every non-`Staged` outcome
    /// leaves the world untouched.
    fn try_stage(
        &mut self,
        agent:   AgentId,
        request: ActivityRequest,
        now:     Tick,
        resume:  bool,
        events:  &mut TickEvents,
    ) -> EngineResult<StageOutcome> {
        let current = self.table.current(agent);
        if current == request.kind {
            return Ok(StageOutcome::Dropped);
        }

        // Preemption gate: a running activity yields only to a strictly
        // more urgent request, and only if it is interruptable.
        if current != ActivityId::NONE {
            let preemptable = match &self.active[agent.index()] {
                Some(active) => active.interruptable && request.priority < active.priority,
                // A run started by poking the table directly carries no
                // request metadata; treat it as freely preemptable.
                None => true,
            };
            if !preemptable {
                return Ok(StageOutcome::NotReady(request));
            }
        }

        // Cooldown gate.  Resumed runs are continuations of an already
        // granted start, so their own cooldown does not re-apply.
        if !resume && self.table.blocked_for(agent, request.kind) > 0 {
            return Ok(StageOutcome::NotReady(request));
        }

        // Location arbitration and relocation only run when the engine
        // tracks locations at all.
        let located = self.relocator.is_some() && request.location != RegionId::INVALID;
        if located {
            match request.blocks_location {
                BlockingMode::Rejecting => return Err(EngineError::UnsupportedBlockingMode),
                BlockingMode::None => {}
                BlockingMode::Shared => {
                    if self.locks.is_blocked(&self.regions, request.location)? {
                        return Ok(StageOutcome::Postponed(request));
                    }
                }
                BlockingMode::Wait => {
                    let occupancy = self.regions.occupancy(request.location)?;
                    let already_inside = self.regions.region_of(agent) == request.location;
                    let others = occupancy - u32::from(already_inside);
                    if others > 0 || self.locks.is_blocked(&self.regions, request.location)? {
                        return Ok(StageOutcome::Parked(request));
                    }
                }
            }
            if request.blocks_parent && request.blocks_location != BlockingMode::None {
                for sibling in self.regions.siblings(request.location)? {
                    if self.locks.is_blocked(&self.regions, sibling)? {
                        return Ok(match request.blocks_location {
                            BlockingMode::Wait => StageOutcome::Parked(request),
                            _ => StageOutcome::Postponed(request),
                        });
                    }
                }
            }

            // Relocation is a staging precondition: an agent the relocator
            // cannot deliver does not start the activity.
            let origin = self.regions.region_of(agent);
            if origin != request.location {
                let moved = match self.relocator.as_mut() {
                    Some(relocator) => {
                        relocator.move_agents(&mut self.regions, &[agent], request.location)?
                    }
                    None => Vec::new(),
                };
                if !moved.contains(&agent) {
                    return Ok(StageOutcome::Postponed(request));
                }
                events.entries.push((agent, request.location));
                events.exits.push((agent, origin));
                if self.regions.occupancy(origin)? == 0 {
                    events.emptied.push(origin);
                }
                // The departure may have thinned a region whose lock release
                // was held back; free it before any later agent arbitrates.
                self.retry_deferred_releases()?;
            }

            // Grant-time lock side effects, visible to every later agent
            // arbitrated this same tick.
            if request.blocks_location != BlockingMode::None {
                self.locks.block(&self.regions, &[request.location])?;
                if request.blocks_parent {
                    let parent = self.regions.parent(request.location)?;
                    let siblings = self.regions.siblings(request.location)?;
                    self.locks.block(&self.regions, &[parent])?;
                    self.locks.block(&self.regions, &siblings)?;
                }
            }
        }

        // Commit.  A preempted run's remainder goes to the resume stack
        // with its original descriptor.
        if current != ActivityId::NONE {
            if let Some(old) = self.active[agent.index()].take() {
                let elapsed = self.table.elapsed(agent, old.kind);
                let evicted = self.queues.push_interrupted(agent, old.remainder(elapsed));
                events.note_eviction(evicted);
                events.stops.extend(self.table.stop_activity(now, &[agent]));
                self.release_locks(agent, &old)?;
            } else {
                events.stops.extend(self.table.stop_activity(now, &[agent]));
            }
        }
        self.table.start_activity(
            &[agent],
            request.kind,
            now,
            request.duration,
            request.block_for,
            request.location,
        );
        events.started.push((agent, request.kind));
        self.active[agent.index()] = Some(request);
        Ok(StageOutcome::Staged)
    }

    // ── Stopping ──────────────────────────────────────────────────────────

    /// Force-stop the listed agents' current activities, firing stop hooks
    /// and source notifications immediately.
    pub fn stop(&mut self, agents: &[AgentId]) -> EngineResult<Vec<StopRecord>> {
        let now = self.clock.current_tick;
        let mut events = TickEvents::default();
        self.stop_agents_inner(agents, now, &mut events)?;

        let mut sources = mem::take(&mut self.sources);
        Self::notify_sources(&mut sources, now, &events);
        self.sources = sources;
        self.fire_hooks(now, &events);

        if !events.stops.is_empty() {
            for observer in &mut self.observers {
                observer.on_stops(now, &events.stops);
            }
        }
        Ok(events.stops)
    }

    fn stop_agents_inner(
        &mut self,
        agents: &[AgentId],
        now:    Tick,
        events: &mut TickEvents,
    ) -> EngineResult<()> {
        for &agent in agents {
            let request = self.active[agent.index()].take();
            events.stops.extend(self.table.stop_activity(now, &[agent]));
            if let Some(request) = request {
                self.release_locks(agent, &request)?;
            }
        }
        Ok(())
    }

    /// Release the locks a finished run held.
    ///
    /// Only safe once the population of the holder's region has dropped to
    /// the holder alone (or the holder has left); with co-located agents
    /// still inside, the release is deferred and retried as agents depart.
    fn release_locks(&mut self, agent: AgentId, request: &ActivityRequest) -> EngineResult<()> {
        if self.relocator.is_none()
            || request.location == RegionId::INVALID
            || request.blocks_location == BlockingMode::None
        {
            return Ok(());
        }
        if self.regions.occupancy(request.location)? > 1
            && self.regions.region_of(agent) == request.location
        {
            self.deferred_releases.push((agent, request.clone()));
            return Ok(());
        }

        self.locks.clear(&self.regions, request.location)?;
        if request.blocks_parent {
            for sibling in self.regions.siblings(request.location)? {
                self.locks.clear(&self.regions, sibling)?;
            }
        }
        let parent = self.regions.parent(request.location)?;
        if parent != request.location && self.locks.is_blocked(&self.regions, parent)? {
            self.locks.try_unblock(&self.regions, parent)?;
        }
        Ok(())
    }

    /// Re-run deferred lock releases; still-gated entries re-defer
    /// themselves.
    fn retry_deferred_releases(&mut self) -> EngineResult<()> {
        if self.deferred_releases.is_empty() {
            return Ok(());
        }
        let deferred = mem::take(&mut self.deferred_releases);
        for (agent, request) in deferred {
            self.release_locks(agent, &request)?;
        }
        Ok(())
    }

    // ── Notification fan-out ──────────────────────────────────────────────

    fn notify_sources(sources: &mut [Box<dyn ProposalSource>], now: Tick, events: &TickEvents) {
        if !events.stops.is_empty() {
            for source in sources.iter_mut() {
                source.on_activity_stopped(&events.stops, now);
            }
        }
        for (kind, agents) in group_by_key(&events.started) {
            for source in sources.iter_mut() {
                source.on_activity_started(&agents, kind, now);
            }
        }
        for (region, agents) in group_by_key(&events.exits) {
            for source in sources.iter_mut() {
                source.on_region_exit(&agents, region, now);
            }
        }
        for (region, agents) in group_by_key(&events.entries) {
            for source in sources.iter_mut() {
                source.on_region_enter(&agents, region, now);
            }
        }
        for &region in &events.emptied {
            for source in sources.iter_mut() {
                source.on_region_empty(region, now);
            }
        }
    }

    fn fire_hooks(&mut self, now: Tick, events: &TickEvents) {
        for (kind, agents) in group_by_key(&events.started) {
            self.hooks.fire_start(kind, &agents, now);
        }
        let stops_by_kind: Vec<(ActivityId, Vec<StopRecord>)> = {
            let mut map: FxHashMap<ActivityId, Vec<StopRecord>> = FxHashMap::default();
            for stop in &events.stops {
                map.entry(stop.kind).or_default().push(stop.clone());
            }
            let mut grouped: Vec<_> = map.into_iter().collect();
            grouped.sort_unstable_by_key(|(kind, _)| *kind);
            grouped
        };
        for (kind, stops) in stops_by_kind {
            self.hooks.fire_stop(kind, &stops, now);
        }
    }

    fn fire_unblocks(&mut self, unblocked: &[(AgentId, ActivityId)], now: Tick) {
        for (kind, agents) in group_by_key(unblocked) {
            self.hooks.fire_unblock(kind, &agents, now);
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq)]
enum QueueLane {
    Postponed,
    Triggered,
    Planned,
}

/// Group `(agent, key)` pairs into per-key agent lists, keys ascending.
fn group_by_key<K: Copy + Ord + std::hash::Hash>(pairs: &[(AgentId, K)]) -> Vec<(K, Vec<AgentId>)> {
    let mut map: FxHashMap<K, Vec<AgentId>> = FxHashMap::default();
    for &(agent, key) in pairs {
        map.entry(key).or_default().push(agent);
    }
    let mut grouped: Vec<_> = map.into_iter().collect();
    grouped.sort_unstable_by_key(|(key, _)| *key);
    grouped
}
