//! Contract Checking
//!
//! Central dispatcher for precondition, postcondition, and invariant checks.
//! Every guarded operation in the crate funnels its checks through [`dispatch`],
//! so the mapping from contract kind to error is decided in exactly one place.

use thiserror::Error;
use tracing::warn;

/// The three points in an operation where a contract can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// Caller-side obligation checked on entry. A violation means the
    /// arguments or the receiver state made the call illegal.
    Precondition,
    /// Implementation-side obligation checked on exit. A violation means
    /// the method ran but failed to deliver its guarantee.
    Postcondition,
    /// Structural property that must hold between operations. A violation
    /// means the object's internal state is no longer trustworthy.
    Invariant,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Precondition => write!(f, "precondition"),
            ContractKind::Postcondition => write!(f, "postcondition"),
            ContractKind::Invariant => write!(f, "invariant"),
        }
    }
}

/// A failed contract check.
///
/// Carries the kind of check that failed and a message describing the
/// condition that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} violated: {message}")]
pub struct ContractViolation {
    pub kind: ContractKind,
    pub message: String,
}

impl ContractViolation {
    pub fn new(kind: ContractKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Evaluate a contract condition and raise a [`ContractViolation`] if it
/// does not hold.
///
/// Violations are logged at `warn` before being returned, so a failing
/// contract is visible even when the caller swallows the error.
pub fn dispatch(
    kind: ContractKind,
    holds: bool,
    message: impl Into<String>,
) -> Result<(), ContractViolation> {
    if holds {
        return Ok(());
    }
    Err(violated(kind, message))
}

/// Build a violation directly, for checks whose failure is detected by
/// pattern matching (a missing map entry, a wrong enum variant) rather
/// than a boolean condition. Logs like [`dispatch`] does.
pub fn violated(kind: ContractKind, message: impl Into<String>) -> ContractViolation {
    let message = message.into();
    warn!(kind = %kind, %message, "contract check failed");
    ContractViolation::new(kind, message)
}

/// Check a precondition.
pub fn require(holds: bool, message: impl Into<String>) -> Result<(), ContractViolation> {
    dispatch(ContractKind::Precondition, holds, message)
}

/// Check a postcondition.
pub fn ensure(holds: bool, message: impl Into<String>) -> Result<(), ContractViolation> {
    dispatch(ContractKind::Postcondition, holds, message)
}

/// Check a class invariant.
pub fn invariant(holds: bool, message: impl Into<String>) -> Result<(), ContractViolation> {
    dispatch(ContractKind::Invariant, holds, message)
}
