//! Base error type for the `acs-*` crates.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{ActivityId, AgentId, RegionId};

/// The top-level error type for `acs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("region {0} not found")]
    RegionNotFound(RegionId),

    #[error("activity kind {0} is not registered")]
    UnknownActivity(ActivityId),

    #[error("activity kind {0:?} is already registered")]
    DuplicateActivity(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `acs-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
