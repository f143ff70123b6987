//! Resolution strategies.
//!
//! A strategy implements [`Resolve`]: given the inputs and parameters of a
//! state, it computes and writes every other state variable.

pub mod ideal_gas;

pub use ideal_gas::{IdealGas, IdealGasError, IdealGasReference, InversionConfig};

use crate::{
    report::Format,
    state::{Resolver, State},
};

/// Computes the full thermodynamic state from two inputs.
///
/// Implementors declare the parameter names they need and, optionally,
/// extra properties they can derive from a complete state.
pub trait Resolve: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Names of attributes that must be supplied before resolving.
    fn parameters(&self) -> &[&'static str] {
        &[]
    }

    /// Extra properties derived from a state on request.
    fn calculated(&self) -> &[Calculated<Self>] {
        &[]
    }

    /// Computes the remaining state variables from the state's inputs.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` if the inputs cannot be
    /// resolved, for example an unsupported pair. Computed values should only
    /// be written through `state`.
    ///
    /// # Errors
    ///
    /// Returns an error for failures the caller must see, such as a solver
    /// breakdown.
    fn resolve(&self, state: &mut Resolver<'_, Self>) -> Result<bool, Self::Error>;
}

/// A strategy-defined property computed from a state.
pub struct Calculated<M> {
    pub name: &'static str,
    pub unit: &'static str,
    pub format: Format,
    /// Returns `None` when the state lacks what the property needs.
    pub compute: fn(&M, &State<M>) -> Option<f64>,
}
