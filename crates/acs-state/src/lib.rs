//! `acs-state` — dense per-agent activity state for the acs engine.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`table`] | `ActivityStateTable`, `StateField`, `StopRecord`           |
//! | [`rngs`]  | `AgentRngs` (per-agent RNG pool)                           |
//!
//! # Storage model (summary)
//!
//! The table is a set of flat column-major buffers, one per field, indexed
//! `agent * kind_count + kind`.  The single in-progress kind per agent is
//! cached in a per-agent `current` array and is only ever changed by
//! `start_activity` / `stop_activity`, which keeps the
//! one-active-activity-per-agent invariant local to two functions.

pub mod rngs;
pub mod table;


pub use rngs::AgentRngs;
pub use table::{ActivityStateTable, StateField, StopRecord};
