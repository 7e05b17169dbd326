//! `acs-diary` — activity diary output for the acs engine.
//!
//! Every stopped run (completed, preempted, or force-stopped) becomes one
//! diary row; every tick produces one summary row.  The CSV backend writes:
//!
//! | File                 | One row per               |
//! |----------------------|---------------------------|
//! | `activity_diary.csv` | stopped activity run      |
//! | `tick_summaries.csv` | engine tick               |
//!
//! Backends implement [`DiaryWriter`] and are driven by
//! [`EngineOutputObserver`], which implements `acs_engine::EngineObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use acs_diary::{CsvWriter, EngineOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let observer = EngineOutputObserver::new(writer, &registry, &config);
//! let mut engine = builder.observer(Box::new(observer)).build().unwrap();
//! engine.run().unwrap();
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EngineOutputObserver;
pub use row::{DiaryRow, TickSummaryRow};
pub use writer::DiaryWriter;
