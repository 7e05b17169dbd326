//! `ActivityStateTable` — dense per-agent, per-activity-kind state.
//!
//! # Layout
//!
//! One flat column-major buffer per field, indexed `agent * kinds + kind`:
//!
//! ```text
//! duration: [ a0k0, a0k1, … a0kK | a1k0, a1k1, … a1kK | … ]
//! ```
//!
//! Each agent's whole row is contiguous, so per-agent scans (find the
//! in-progress kind, decrement cooldowns) are cache-friendly.  All accessors
//! bounds-check through [`ActivityStateTable::idx`]; out-of-range agents or
//! kinds are a programming error and panic.
//!
//! # Invariants
//!
//! - At most one kind per agent has `in_progress` set — cached in `current`
//!   and maintained exclusively by [`start_activity`][ActivityStateTable::start_activity]
//!   / [`stop_activity`][ActivityStateTable::stop_activity].
//! - `elapsed <= duration` whenever `duration > 0`.
//! - `blocked_for` never decrements while the kind is in progress.

use acs_core::{ActivityId, AgentId, RegionId, Tick};

// ── StateField ────────────────────────────────────────────────────────────────

/// The per-(agent, kind) fields held by the table.
///
/// Used by the generic [`get`][ActivityStateTable::get] /
/// [`set`][ActivityStateTable::set] selector API; hot paths use the typed
/// accessors instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateField {
    /// Tick at which the current run of this kind started.
    Start,
    /// Planned duration in ticks.  0 = open-ended.
    Duration,
    /// Ticks elapsed in the current run.
    Elapsed,
    /// Lifetime ticks spent in this kind, across all runs.
    Accumulated,
    /// 1 while this kind is the agent's current activity.
    InProgress,
    /// Cooldown: ticks until this kind may start again.
    BlockedFor,
    /// Region the current run takes place in (`RegionId::INVALID` = none).
    Location,
}

// ── StopRecord ────────────────────────────────────────────────────────────────

/// Snapshot of an activity at the moment it was stopped.
///
/// Produced by [`ActivityStateTable::stop_activity`] so the engine can fire
/// stop hooks and the diary can log the completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopRecord {
    pub agent:    AgentId,
    pub kind:     ActivityId,
    /// Tick the run started.
    pub start:    Tick,
    /// Ticks actually spent (the `elapsed` counter at stop time).
    pub elapsed:  u32,
    /// Planned duration of the run (0 = open-ended).
    pub planned:  u32,
    pub location: RegionId,
}

// ── ActivityStateTable ────────────────────────────────────────────────────────

/// Dense storage for every agent's state in every registered activity kind.
///
/// Allocated once at population-size-determined setup and lives for the run.
pub struct ActivityStateTable {
    agent_count: usize,
    kind_count:  usize,

    start:       Vec<Tick>,
    duration:    Vec<u32>,
    elapsed:     Vec<u32>,
    accumulated: Vec<u32>,
    in_progress: Vec<bool>,
    blocked_for: Vec<u32>,
    location:    Vec<RegionId>,

    /// Per-agent cache of the single in-progress kind
    /// (`ActivityId::NONE` = idle).
    current: Vec<ActivityId>,
}

impl ActivityStateTable {
    /// Allocate a table for `agent_count` agents and `kind_count` registered
    /// kinds (including the reserved none-kind at id 0).
    pub fn new(agent_count: usize, kind_count: usize) -> Self {
        assert!(kind_count >= 1, "kind_count must include the none-kind");
        let cells = agent_count * kind_count;
        Self {
            agent_count,
            kind_count,
            start:       vec![Tick::ZERO; cells],
            duration:    vec![0; cells],
            elapsed:     vec![0; cells],
            accumulated: vec![0; cells],
            in_progress: vec![false; cells],
            blocked_for: vec![0; cells],
            location:    vec![RegionId::INVALID; cells],
            current:     vec![ActivityId::NONE; agent_count],
        }
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    #[inline]
    pub fn kind_count(&self) -> usize {
        self.kind_count
    }

    /// Flat index of `(agent, kind)`.
    ///
    /// # Panics
    /// Panics if either index is out of range — upstream handed us a broken
    /// id, which must fail fast rather than alias another agent's row.
    #[inline]
    fn idx(&self, agent: AgentId, kind: ActivityId) -> usize {
        assert!(agent.index() < self.agent_count, "agent {agent} out of range");
        assert!(kind.index() < self.kind_count, "kind {kind} out of range");
        agent.index() * self.kind_count + kind.index()
    }

    // ── Current-activity cache ────────────────────────────────────────────

    /// The agent's single in-progress kind, or `ActivityId::NONE` when idle.
    #[inline]
    pub fn current(&self, agent: AgentId) -> ActivityId {
        self.current[agent.index()]
    }

    /// `true` if the agent has no in-progress activity.
    #[inline]
    pub fn is_idle(&self, agent: AgentId) -> bool {
        self.current(agent) == ActivityId::NONE
    }

    /// Mask-shaped view: all agents with no in-progress activity.
    pub fn idle_agents(&self) -> Vec<AgentId> {
        (0..self.agent_count as u32)
            .map(AgentId)
            .filter(|&a| self.is_idle(a))
            .collect()
    }

    // ── Typed accessors (hot paths) ───────────────────────────────────────

    #[inline]
    pub fn start_tick(&self, agent: AgentId, kind: ActivityId) -> Tick {
        self.start[self.idx(agent, kind)]
    }

    #[inline]
    pub fn duration(&self, agent: AgentId, kind: ActivityId) -> u32 {
        self.duration[self.idx(agent, kind)]
    }

    #[inline]
    pub fn elapsed(&self, agent: AgentId, kind: ActivityId) -> u32 {
        self.elapsed[self.idx(agent, kind)]
    }

    #[inline]
    pub fn accumulated(&self, agent: AgentId, kind: ActivityId) -> u32 {
        self.accumulated[self.idx(agent, kind)]
    }

    #[inline]
    pub fn in_progress(&self, agent: AgentId, kind: ActivityId) -> bool {
        self.in_progress[self.idx(agent, kind)]
    }

    #[inline]
    pub fn blocked_for(&self, agent: AgentId, kind: ActivityId) -> u32 {
        self.blocked_for[self.idx(agent, kind)]
    }

    #[inline]
    pub fn location(&self, agent: AgentId, kind: ActivityId) -> RegionId {
        self.location[self.idx(agent, kind)]
    }

    // ── Generic selector API ──────────────────────────────────────────────

    /// Read `field` for one `(agent, kind)` cell as a plain integer.
    ///
    /// Booleans read as 0/1; locations read as the raw region index.
    pub fn value(&self, field: StateField, agent: AgentId, kind: ActivityId) -> u64 {
        let i = self.idx(agent, kind);
        match field {
            StateField::Start       => self.start[i].0,
            StateField::Duration    => self.duration[i] as u64,
            StateField::Elapsed     => self.elapsed[i] as u64,
            StateField::Accumulated => self.accumulated[i] as u64,
            StateField::InProgress  => self.in_progress[i] as u64,
            StateField::BlockedFor  => self.blocked_for[i] as u64,
            StateField::Location    => self.location[i].0 as u64,
        }
    }

    /// Write `field` for one `(agent, kind)` cell from a plain integer.
    pub fn set_value(&mut self, field: StateField, agent: AgentId, kind: ActivityId, value: u64) {
        let i = self.idx(agent, kind);
        match field {
            StateField::Start       => self.start[i] = Tick(value),
            StateField::Duration    => self.duration[i] = value as u32,
            StateField::Elapsed     => self.elapsed[i] = value as u32,
            StateField::Accumulated => self.accumulated[i] = value as u32,
            StateField::InProgress  => self.in_progress[i] = value != 0,
            StateField::BlockedFor  => self.blocked_for[i] = value as u32,
            StateField::Location    => self.location[i] = RegionId(value as u32),
        }
    }

    /// Read `field` at one kind for an explicit agent list.
    pub fn get(&self, field: StateField, kind: ActivityId, agents: &[AgentId]) -> Vec<u64> {
        agents.iter().map(|&a| self.value(field, a, kind)).collect()
    }

    /// Read `field` at one kind for every agent.
    pub fn get_all(&self, field: StateField, kind: ActivityId) -> Vec<u64> {
        (0..self.agent_count as u32)
            .map(|a| self.value(field, AgentId(a), kind))
            .collect()
    }

    /// Heterogeneous read: each agent paired with its own kind.
    ///
    /// # Panics
    /// Panics if `agents` and `kinds` differ in length — a length mismatch
    /// means the caller's selection arrays are out of sync, which is a broken
    /// invariant upstream and must fail fast.
    pub fn get_for(
        &self,
        field:  StateField,
        agents: &[AgentId],
        kinds:  &[ActivityId],
    ) -> Vec<u64> {
        assert_eq!(
            agents.len(),
            kinds.len(),
            "agent/kind selector length mismatch"
        );
        agents
            .iter()
            .zip(kinds)
            .map(|(&a, &k)| self.value(field, a, k))
            .collect()
    }

    /// Write `field` at one kind for an explicit agent list.
    pub fn set(&mut self, field: StateField, kind: ActivityId, agents: &[AgentId], value: u64) {
        for &a in agents {
            self.set_value(field, a, kind, value);
        }
    }

    /// Heterogeneous write: each agent paired with its own kind.
    ///
    /// # Panics
    /// Panics on selector length mismatch (see [`get_for`][Self::get_for]).
    pub fn set_for(
        &mut self,
        field:  StateField,
        agents: &[AgentId],
        kinds:  &[ActivityId],
        value:  u64,
    ) {
        assert_eq!(
            agents.len(),
            kinds.len(),
            "agent/kind selector length mismatch"
        );
        for (&a, &k) in agents.iter().zip(kinds) {
            self.set_value(field, a, k, value);
        }
    }

    // ── Lifecycle operations ──────────────────────────────────────────────

    /// Atomically start `kind` for every agent in `agents`.
    ///
    /// Sets `in_progress`, `start`, `duration`, `blocked_for`, and `location`
    /// and updates the per-agent current cache.
    ///
    /// # Panics
    /// Panics if any agent already has an in-progress activity — the caller
    /// must stop the old activity first (the commit phase does).
    pub fn start_activity(
        &mut self,
        agents:    &[AgentId],
        kind:      ActivityId,
        now:       Tick,
        duration:  u32,
        block_for: u32,
        location:  RegionId,
    ) {
        for &agent in agents {
            assert!(
                self.is_idle(agent),
                "start_activity: agent {agent} already active"
            );
            let i = self.idx(agent, kind);
            self.in_progress[i] = true;
            self.start[i] = now;
            self.duration[i] = duration;
            self.elapsed[i] = 0;
            self.blocked_for[i] = block_for;
            self.location[i] = location;
            self.current[agent.index()] = kind;
        }
    }

    /// Stop each agent's *current* activity, whichever kind it is.
    ///
    /// Resets `in_progress`, `start`, `duration`, `elapsed`, and `location`
    /// to their zero/sentinel values and returns one [`StopRecord`] per agent
    /// that actually had something running.  `accumulated` persists for the
    /// run; `blocked_for` persists as the post-activity cooldown.
    ///
    /// Agents with no current activity are skipped (a stop on an idle agent
    /// is a no-op, not an error).
    pub fn stop_activity(&mut self, _now: Tick, agents: &[AgentId]) -> Vec<StopRecord> {
        let mut stopped = Vec::new();
        for &agent in agents {
            let kind = self.current(agent);
            if kind == ActivityId::NONE {
                continue;
            }
            let i = self.idx(agent, kind);
            stopped.push(StopRecord {
                agent,
                kind,
                start:    self.start[i],
                elapsed:  self.elapsed[i],
                planned:  self.duration[i],
                location: self.location[i],
            });
            self.in_progress[i] = false;
            self.start[i] = Tick::ZERO;
            self.duration[i] = 0;
            self.elapsed[i] = 0;
            self.location[i] = RegionId::INVALID;
            self.current[agent.index()] = ActivityId::NONE;
        }
        stopped
    }

    // ── Per-tick bookkeeping ──────────────────────────────────────────────

    /// Decrement every non-active cooldown by one tick.
    ///
    /// In-progress kinds are skipped (`blocked_for` never moves while the
    /// activity runs).  Returns the `(agent, kind)` pairs whose cooldown
    /// reached zero this tick so the engine can fire unblock hooks.
    pub fn tick_cooldowns(&mut self) -> Vec<(AgentId, ActivityId)> {
        let mut unblocked = Vec::new();
        for agent in 0..self.agent_count {
            for kind in 0..self.kind_count {
                let i = agent * self.kind_count + kind;
                if self.blocked_for[i] > 0 && !self.in_progress[i] {
                    self.blocked_for[i] -= 1;
                    if self.blocked_for[i] == 0 {
                        unblocked.push((AgentId(agent as u32), ActivityId(kind as u16)));
                    }
                }
            }
        }
        unblocked
    }

    /// Agents whose current activity has run its full planned duration
    /// (`elapsed == duration > 0`).
    pub fn finished_agents(&self) -> Vec<AgentId> {
        (0..self.agent_count as u32)
            .map(AgentId)
            .filter(|&a| {
                let kind = self.current(a);
                if kind == ActivityId::NONE {
                    return false;
                }
                let i = a.index() * self.kind_count + kind.index();
                self.duration[i] > 0 && self.elapsed[i] >= self.duration[i]
            })
            .collect()
    }

    /// Advance `elapsed` and `accumulated` by one tick for every in-progress
    /// activity.
    ///
    /// `elapsed` saturates at `duration` when a duration is set, preserving
    /// the `elapsed <= duration` invariant; open-ended runs (duration 0)
    /// count up freely.
    pub fn advance(&mut self) {
        for agent in 0..self.agent_count {
            let kind = self.current[agent];
            if kind == ActivityId::NONE {
                continue;
            }
            let i = agent * self.kind_count + kind.index();
            if self.duration[i] == 0 || self.elapsed[i] < self.duration[i] {
                self.elapsed[i] += 1;
            }
            self.accumulated[i] += 1;
        }
    }
}
