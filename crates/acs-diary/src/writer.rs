//! The `DiaryWriter` trait implemented by all backend writers.

use crate::{DiaryRow, OutputResult, TickSummaryRow};

/// Backend sink for diary rows and tick summaries.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`EngineOutputObserver::take_error`][crate::EngineOutputObserver::take_error].
pub trait DiaryWriter {
    /// Write a batch of completed-run rows.
    fn write_diary(&mut self, rows: &[DiaryRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
