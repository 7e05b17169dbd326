//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `activity_diary.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::DiaryWriter;
use crate::{DiaryRow, OutputResult, TickSummaryRow};

/// Writes the activity diary and per-tick summaries to two CSV files.
pub struct CsvWriter {
    diary:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut diary = Writer::from_path(dir.join("activity_diary.csv"))?;
        diary.write_record(["id", "activity", "start", "duration", "location"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "unix_time_secs",
            "started",
            "stopped",
            "postponed",
            "parked",
            "evicted",
            "blocked_regions",
        ])?;

        Ok(Self {
            diary,
            summaries,
            finished: false,
        })
    }
}

impl DiaryWriter for CsvWriter {
    fn write_diary(&mut self, rows: &[DiaryRow]) -> OutputResult<()> {
        for row in rows {
            self.diary.write_record(&[
                row.id.to_string(),
                row.activity.clone(),
                row.start.to_string(),
                row.duration.to_string(),
                row.location.to_string(),
            ])?;
        }
        // One batch per tick; flushing here keeps the file whole-rows-only
        // even if the process dies mid-run.
        self.diary.flush()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.started.to_string(),
            row.stopped.to_string(),
            row.postponed.to_string(),
            row.parked.to_string(),
            row.evicted.to_string(),
            row.blocked_regions.to_string(),
        ])?;
        self.summaries.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.diary.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
