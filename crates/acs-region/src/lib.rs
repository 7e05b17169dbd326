//! `acs-region` — the scheduler's view of the location tree.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`table`]    | `RegionTable`, `RegionRow` (tree + occupancy)           |
//! | [`locks`]    | `LockRegistry` (blocked bits, hierarchical unblock)     |
//! | [`relocate`] | `Relocator` trait, `DirectRelocator`                    |
//!
//! # Blocking model (summary)
//!
//! A blocked bit per region records which locations are held by a running
//! activity.  Blocking is explicit (grant-time side effect); unblocking is
//! gated: a region clears only when all of its children are clear, and the
//! check then recurses up any blocked ancestor chain.  The engine only
//! reconsiders the chain when the departing region's population has dropped
//! to ≤ 1 — the holder leaving is enough to decide locally without scanning
//! siblings.

pub mod locks;
pub mod relocate;
pub mod table;

#[cfg(test)]
mod tests;

pub use locks::LockRegistry;
pub use relocate::{DirectRelocator, Relocator};
pub use table::{RegionRow, RegionTable};
