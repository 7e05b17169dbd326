//! `acs-propose` — proposal sources for the acs engine.
//!
//! # Crate layout
//!
//! | Module                | Contents                                       |
//! |-----------------------|------------------------------------------------|
//! | [`source`]            | `ProposalSource` trait                         |
//! | [`context`]           | `ScheduleContext` (read-only tick snapshot)    |
//! | [`default_activity`]  | `DefaultActivitySource`                        |
//! | [`location_activity`] | `LocationActivitySource`                       |
//! | [`sleep`]             | `SleepSource`, `SleepConfig`                   |
//!
//! # z-order (summary)
//!
//! The engine consults sources in ascending `z_order` each tick; agents
//! satisfied by an earlier source are withheld from later ones.  The
//! reference sources are conventionally ranked sleep (lowest value) →
//! default activity → location activity, but ranks are plain integers the
//! application assigns.

pub mod context;
pub mod default_activity;
pub mod location_activity;
pub mod sleep;
pub mod source;


pub use context::ScheduleContext;
pub use default_activity::DefaultActivitySource;
pub use location_activity::LocationActivitySource;
pub use sleep::{SleepConfig, SleepSource};
pub use source::ProposalSource;
