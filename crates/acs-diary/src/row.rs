//! Plain data row types written by diary backends.

/// One completed (or preempted) activity run of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryRow {
    pub id: u32,
    /// Registered kind name, e.g. `"sleep"`.
    pub activity: String,
    /// Tick the run started.
    pub start: u64,
    /// Ticks actually spent in the run; less than planned when the run was
    /// preempted.
    pub duration: u32,
    /// Raw region index, `u32::MAX` for location-free runs.
    pub location: u32,
}

/// Summary statistics for one engine tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:            u64,
    pub unix_time_secs:  i64,
    pub started:         u64,
    pub stopped:         u64,
    pub postponed:       u64,
    pub parked:          u64,
    pub evicted:         u64,
    pub blocked_regions: u64,
}
