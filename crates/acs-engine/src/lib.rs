//! `acs-engine` — the tick-loop orchestrator of the acs scheduler.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`engine`]   | `Engine` (five-phase tick loop)                       |
//! | [`builder`]  | `EngineBuilder` (validated assembly)                  |
//! | [`events`]   | `HookRegistry` (per-kind start/stop/unblock hooks)    |
//! | [`observer`] | `EngineObserver`, `NoopObserver`, `TickSummary`       |
//! | [`error`]    | `EngineError`, `EngineResult`                         |
//!
//! # Tick loop (summary)
//!
//! Every tick: pre-step (cooldowns, completions) → collect (poll proposal
//! sources by z-order) → resolve (per agent, ascending index: wait slot →
//! resume stack → postponed → triggered → planned) → commit (stop preempted
//! runs, start winners, apply lock side effects) → post-step (advance
//! counters and the clock).  The whole loop is single-threaded and
//! deterministic for a given seed and source set.

pub mod builder;
pub mod engine;
pub mod error;
pub mod events;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use events::{AgentsHook, HookRegistry, StopHook};
pub use observer::{EngineObserver, NoopObserver, TickSummary};
