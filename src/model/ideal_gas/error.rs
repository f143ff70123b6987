use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::{
    state::WriteError, support::constraint::ConstraintError, thermals::HeatCapacityError,
};

/// Errors that can occur while resolving an ideal gas state.
#[derive(Debug, Error)]
pub enum IdealGasError {
    /// A reference value violates its constraint.
    #[error("invalid reference {context}")]
    Reference {
        context: &'static str,
        source: ConstraintError,
    },

    /// The `Cp` parameter is not a usable heat capacity.
    #[error("invalid heat capacity")]
    HeatCapacity(#[from] HeatCapacityError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best property residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
