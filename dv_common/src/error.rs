//! Transition error taxonomy.
//!
//! All variants are locally recoverable: a rejected transition leaves
//! the vehicle state untouched and the supervisor simply re-evaluates
//! its guards on the next cycle.

use thiserror::Error;

use crate::state::AsState;

/// Why a requested state transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Raw state value outside the enumerated range.
    #[error("invalid target state value {0}")]
    InvalidTarget(u8),

    /// Desired state equals the current state.
    #[error("already in state {0:?}")]
    NoOp(AsState),

    /// The accessibility graph forbids this edge.
    #[error("transition {from:?} -> {to:?} is not permitted")]
    Unreachable {
        /// State the vehicle was in when the request was made.
        from: AsState,
        /// Requested target state.
        to: AsState,
    },
}
