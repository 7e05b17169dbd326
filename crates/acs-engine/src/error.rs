use acs_core::CoreError;
use thiserror::Error;

/// Errors that abort the current tick.
///
/// Contention never appears here: losing arbitration, postponement, and
/// queue eviction are expected steady-state outcomes observable through
/// queue state.  These variants all mark broken invariants or unsupported
/// configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("proposal source returned {got} requests for {expected} agents")]
    ProposalLengthMismatch { expected: usize, got: usize },

    #[error("request uses the reserved `none` activity kind")]
    NoneKindRequest,

    #[error("blocking mode `rejecting` is not supported")]
    UnsupportedBlockingMode,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type EngineResult<T> = Result<T, EngineError>;
