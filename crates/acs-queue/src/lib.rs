//! `acs-queue` — activity request descriptors and bounded per-agent queues.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`request`] | `ActivityRequest`, `BlockingMode`, `RequestTemplate`    |
//! | [`ring`]    | `RequestRing` (fixed-depth, silent-eviction buffer)     |
//! | [`queues`]  | `QueueSet`, `AgentQueues`                               |
//!
//! # Capacity model (summary)
//!
//! Every queue has a fixed depth shared across the population.  Pushing into
//! a full queue evicts exactly one entry — the oldest for FIFO use, the
//! deepest for the LIFO resume stack (the same slot either way) — and
//! preserves the order of the rest.  Eviction is silent by design: dropped
//! requests are an accepted steady-state outcome of contention, never an
//! error.

pub mod queues;
pub mod request;
pub mod ring;


pub use queues::{AgentQueues, QueueSet};
pub use request::{ActivityRequest, BlockingMode, RequestTemplate};
pub use ring::RequestRing;
