//! `acs-core` — foundational types for the acs activity-scheduling engine.
//!
//! This crate is a dependency of every other `acs-*` crate.  It intentionally
//! has no `acs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `RegionId`, `ActivityId`, `DescriptorId`      |
//! | [`time`]     | `Tick`, `SimClock`, `EngineConfig`                       |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)                |
//! | [`registry`] | `ActivityRegistry`, `ActivityKind`                       |
//! | [`mask`]     | `AgentMask` (dense per-agent selection)                  |
//! | [`error`]    | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod mask;
pub mod registry;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActivityId, AgentId, DescriptorId, RegionId};
pub use mask::AgentMask;
pub use registry::{ActivityKind, ActivityRegistry};
pub use rng::{AgentRng, SimRng};
pub use time::{EngineConfig, SimClock, Tick};
