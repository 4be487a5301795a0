//! Error types for the name and tree system.

use crate::contract::{ContractKind, ContractViolation};
use thiserror::Error;

/// Errors raised by tree operations.
///
/// Contract violations pass through unchanged. Service failures wrap the
/// error that made a high-level operation fail, keeping the original fault
/// reachable through the source chain.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    #[error("service failure: {message}")]
    Service {
        message: String,
        #[source]
        cause: Box<TreeError>,
    },
}

impl TreeError {
    /// Wrap `cause` as a service failure.
    ///
    /// If `cause` is itself a service failure it is unwound to its root
    /// first, so re-raising across recursion levels never stacks wrappers.
    pub fn service(message: impl Into<String>, cause: TreeError) -> TreeError {
        let mut root = cause;
        while let TreeError::Service { cause, .. } = root {
            root = *cause;
        }
        TreeError::Service {
            message: message.into(),
            cause: Box::new(root),
        }
    }

    /// The deepest error in the chain.
    pub fn root_cause(&self) -> &TreeError {
        let mut current = self;
        while let TreeError::Service { cause, .. } = current {
            current = cause;
        }
        current
    }

    /// The contract kind at the root of the chain, if the root is a
    /// contract violation.
    pub fn contract_kind(&self) -> Option<ContractKind> {
        match self.root_cause() {
            TreeError::Contract(violation) => Some(violation.kind),
            TreeError::Service { .. } => None,
        }
    }
}
