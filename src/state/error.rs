use thiserror::Error;

use crate::{registry::Property, support::constraint::ConstraintError};

/// A value that could not be written to a state variable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteError {
    #[error("cannot assign a {found} to {property}, expected a {expected}")]
    Dimension {
        property: Property,
        expected: &'static str,
        found: &'static str,
    },

    #[error("vapor fraction must lie in [0, 1], got {value}")]
    Quality {
        value: f64,
        source: ConstraintError,
    },
}

/// Errors raised by [`State`](super::State) operations.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("cannot swap input {input} for {replacement}: {reason}")]
    Swap {
        input: Property,
        replacement: Property,
        reason: &'static str,
    },

    #[error("unknown calculated property: {name}")]
    UnknownCalculated { name: String },

    /// The resolution strategy returned an error.
    #[error("resolving state {name} failed")]
    Resolve {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
