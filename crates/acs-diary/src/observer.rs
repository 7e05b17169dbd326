//! `EngineOutputObserver<W>` — bridges `EngineObserver` to a `DiaryWriter`.

use acs_core::{ActivityRegistry, EngineConfig, Tick};
use acs_engine::{EngineObserver, TickSummary};
use acs_state::StopRecord;

use crate::row::{DiaryRow, TickSummaryRow};
use crate::writer::DiaryWriter;
use crate::OutputError;

/// An [`EngineObserver`] that turns stop records into diary rows and tick
/// summaries into summary rows, written to any [`DiaryWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `engine.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct EngineOutputObserver<W: DiaryWriter> {
    writer:             W,
    kind_names:         Vec<String>,
    start_unix_secs:    i64,
    tick_duration_secs: u32,
    last_error:         Option<OutputError>,
}

impl<W: DiaryWriter> EngineOutputObserver<W> {
    /// Create an observer backed by `writer`.
    ///
    /// Kind names are snapshotted from `registry` so rows carry readable
    /// activity names; `config` supplies the wall-clock conversion.
    pub fn new(writer: W, registry: &ActivityRegistry, config: &EngineConfig) -> Self {
        let kind_names = registry
            .kinds()
            .iter()
            .map(|kind| kind.name.clone())
            .collect();
        Self {
            writer,
            kind_names,
            start_unix_secs:    config.start_unix_secs,
            tick_duration_secs: config.tick_duration_secs,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    fn diary_row(&self, stop: &StopRecord) -> DiaryRow {
        let activity = self
            .kind_names
            .get(stop.kind.index())
            .cloned()
            .unwrap_or_else(|| stop.kind.to_string());
        DiaryRow {
            id: stop.agent.0,
            activity,
            start: stop.start.0,
            duration: stop.elapsed,
            location: stop.location.0,
        }
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: DiaryWriter> EngineObserver for EngineOutputObserver<W> {
    fn on_stops(&mut self, _tick: Tick, stops: &[StopRecord]) {
        let rows: Vec<DiaryRow> = stops.iter().map(|s| self.diary_row(s)).collect();
        let result = self.writer.write_diary(&rows);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:            tick.0,
            unix_time_secs:  self.unix_time(tick),
            started:         summary.started as u64,
            stopped:         summary.stopped as u64,
            postponed:       summary.postponed as u64,
            parked:          summary.parked as u64,
            evicted:         summary.evicted as u64,
            blocked_regions: summary.blocked_regions as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
