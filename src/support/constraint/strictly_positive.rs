use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Marker for values that must be greater than zero.
///
/// Absolute temperatures, pressures and molar volumes handed to a strategy are
/// checked against this rule before any property is derived from them.
///
/// ```
/// use thermostate::support::constraint::{Constraint, StrictlyPositive};
/// use uom::si::{f64::Pressure, pressure::kilopascal};
///
/// assert!(StrictlyPositive::check(&101.325).is_ok());
/// assert!(StrictlyPositive::check(&Pressure::new::<kilopascal>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

    #[test]
    fn floats() {
        assert!(StrictlyPositive::check(&1e-300).is_ok());
        assert_eq!(StrictlyPositive::check(&0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::check(&-4.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::check(&f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn temperatures() {
        let t = ThermodynamicTemperature::new::<kelvin>(300.0);
        assert!(StrictlyPositive::check(&t.get::<kelvin>()).is_ok());

        let t = ThermodynamicTemperature::new::<kelvin>(0.0);
        assert!(StrictlyPositive::check(&t.get::<kelvin>()).is_err());
    }
}
