//! Numeric invariants checked at the edges of the state machine.
//!
//! Resolution strategies and the write channel reject values that cannot
//! describe a physical state: a non-positive absolute temperature or pressure,
//! or a vapor fraction outside `[0, 1]`. Each rule is a zero-sized marker type
//! implementing [`Constraint<T>`]:
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`UnitInterval`]: closed unit interval `0 ≤ x ≤ 1`
//!
//! ```
//! use thermostate::support::constraint::{Constraint, ConstraintError, UnitInterval};
//!
//! assert!(UnitInterval::check(&0.35).is_ok());
//! assert_eq!(UnitInterval::check(&1.2), Err(ConstraintError::AboveMaximum));
//! ```

mod strictly_positive;
mod unit_interval;

use thiserror::Error;

pub use strictly_positive::StrictlyPositive;
pub use unit_interval::UnitInterval;

/// A numeric rule a value must satisfy.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// The way a value violated a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}
