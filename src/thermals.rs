//! Ideal-gas heat capacity and the property changes it implies.
//!
//! Heat capacities are polynomials in absolute temperature,
//! `cp(T) = a + b T + c T² + d T³` in J/(mol·K), or a constant.

use thiserror::Error;
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::{
    gas_constant::R_SI,
    support::units::{MolarEnthalpy, MolarEntropy, MolarGasConstant},
    value::Attribute,
};

/// Conventional parameter name for a heat capacity attribute.
pub const HEAT_CAPACITY: &str = "Cp";

/// An ideal-gas molar heat capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatCapacity {
    /// A temperature-independent value in J/(mol·K).
    Constant(f64),

    /// `a + b T + c T² + d T³`, with `T` in kelvin.
    Polynomial { a: f64, b: f64, c: f64, d: f64 },
}

impl HeatCapacity {
    /// Coefficients `[a, b, c, d]`; a constant has only `a` set.
    #[must_use]
    pub const fn coefficients(&self) -> [f64; 4] {
        match *self {
            Self::Constant(a) => [a, 0.0, 0.0, 0.0],
            Self::Polynomial { a, b, c, d } => [a, b, c, d],
        }
    }

    /// Heat capacity at `t` kelvin.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        let [a, b, c, d] = self.coefficients();
        a + t * (b + t * (c + t * d))
    }

    /// `∫ cp dT` from `t1` to `t2`, in J/mol.
    #[must_use]
    pub fn enthalpy_change(&self, t1: f64, t2: f64) -> f64 {
        let [a, b, c, d] = self.coefficients();
        let span = |n: i32| t2.powi(n) - t1.powi(n);
        a * span(1) + b / 2.0 * span(2) + c / 3.0 * span(3) + d / 4.0 * span(4)
    }

    /// `∫ cp / T dT` from `t1` to `t2`, in J/(mol·K).
    #[must_use]
    pub fn entropy_change(&self, t1: f64, t2: f64) -> f64 {
        let [a, b, c, d] = self.coefficients();
        let span = |n: i32| t2.powi(n) - t1.powi(n);
        a * (t2 / t1).ln() + b * span(1) + c / 2.0 * span(2) + d / 3.0 * span(3)
    }
}

impl From<f64> for HeatCapacity {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<[f64; 4]> for HeatCapacity {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self::Polynomial { a, b, c, d }
    }
}

/// Returned when a value cannot be read as a heat capacity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatCapacityError {
    #[error("heat capacity needs 1 or 4 coefficients, got {count}")]
    Coefficients { count: usize },

    #[error("heat capacity is missing coefficient {key}")]
    MissingCoefficient { key: &'static str },

    #[error("heat capacity must be numeric, got {found:?}")]
    NotNumeric { found: String },
}

impl TryFrom<&[f64]> for HeatCapacity {
    type Error = HeatCapacityError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        match *value {
            [a] => Ok(Self::Constant(a)),
            [a, b, c, d] => Ok(Self::Polynomial { a, b, c, d }),
            _ => Err(HeatCapacityError::Coefficients { count: value.len() }),
        }
    }
}

impl TryFrom<&Attribute> for HeatCapacity {
    type Error = HeatCapacityError;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        match value {
            Attribute::Scalar(a) => Ok(Self::Constant(*a)),
            Attribute::Coefficients(c) => Self::try_from(c.as_slice()),
            Attribute::Keyed(_) => {
                let coefficient = |key: &'static str| {
                    value
                        .get(key)
                        .ok_or(HeatCapacityError::MissingCoefficient { key })
                };
                Ok(Self::Polynomial {
                    a: coefficient("a")?,
                    b: coefficient("b")?,
                    c: coefficient("c")?,
                    d: coefficient("d")?,
                })
            }
            Attribute::Empty | Attribute::Text(_) => Err(HeatCapacityError::NotNumeric {
                found: value.to_string(),
            }),
        }
    }
}

/// Ideal-gas enthalpy change between two temperatures.
///
/// ```
/// use thermostate::thermals::delta_h_ig;
/// use uom::si::{f64::ThermodynamicTemperature, molar_energy::joule_per_mole,
///     thermodynamic_temperature::kelvin};
///
/// let t = ThermodynamicTemperature::new::<kelvin>;
/// let dh = delta_h_ig(t(300.0), t(400.0), 30.0);
/// assert!((dh.get::<joule_per_mole>() - 3000.0).abs() < 1e-9);
/// ```
pub fn delta_h_ig(
    t1: ThermodynamicTemperature,
    t2: ThermodynamicTemperature,
    cp: impl Into<HeatCapacity>,
) -> MolarEnthalpy {
    let dh = cp.into().enthalpy_change(t1.get::<kelvin>(), t2.get::<kelvin>());
    MolarEnthalpy::new::<joule_per_mole>(dh)
}

/// Ideal-gas entropy change between two states.
pub fn delta_s_ig(
    t1: ThermodynamicTemperature,
    p1: Pressure,
    t2: ThermodynamicTemperature,
    p2: Pressure,
    cp: impl Into<HeatCapacity>,
) -> MolarEntropy {
    let r = MolarGasConstant::new::<joule_per_kelvin_mole>(R_SI);
    delta_s_ig_with(t1, p1, t2, p2, cp, r)
}

/// [`delta_s_ig`] with an explicit gas constant.
pub fn delta_s_ig_with(
    t1: ThermodynamicTemperature,
    p1: Pressure,
    t2: ThermodynamicTemperature,
    p2: Pressure,
    cp: impl Into<HeatCapacity>,
    r: MolarGasConstant,
) -> MolarEntropy {
    let thermal = cp
        .into()
        .entropy_change(t1.get::<kelvin>(), t2.get::<kelvin>());
    let mechanical =
        r.get::<joule_per_kelvin_mole>() * (p2.get::<pascal>() / p1.get::<pascal>()).ln();
    MolarEntropy::new::<joule_per_kelvin_mole>(thermal - mechanical)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::megapascal;

    fn kelvin_of(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(t)
    }

    #[test]
    fn constant_enthalpy_change() {
        let dh = delta_h_ig(kelvin_of(300.0), kelvin_of(400.0), 30.0);
        assert_relative_eq!(dh.get::<joule_per_mole>(), 3000.0);
    }

    #[test]
    fn constant_entropy_change() {
        let ds = delta_s_ig(
            kelvin_of(300.0),
            Pressure::new::<megapascal>(10.0),
            kelvin_of(400.0),
            Pressure::new::<megapascal>(20.0),
            30.0,
        );
        assert_relative_eq!(ds.get::<joule_per_kelvin_mole>(), 2.867_315_85, epsilon = 1e-6);
    }

    #[test]
    fn polynomial_integrals() {
        let cp = HeatCapacity::from([1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(cp.at(2.0), 1.0 + 4.0 + 12.0 + 32.0);
        assert_relative_eq!(cp.enthalpy_change(1.0, 2.0), 1.0 + 3.0 + 7.0 + 15.0);
        assert_relative_eq!(
            cp.entropy_change(1.0, 2.0),
            2.0_f64.ln() + 2.0 + 4.5 + 28.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn reversed_path_negates_change() {
        let cp = HeatCapacity::from([29.0, 1.0e-3, -2.0e-6, 1.0e-9]);
        assert_relative_eq!(
            cp.enthalpy_change(300.0, 500.0),
            -cp.enthalpy_change(500.0, 300.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn reads_attributes() {
        assert_eq!(
            HeatCapacity::try_from(&Attribute::Scalar(29.1)),
            Ok(HeatCapacity::Constant(29.1))
        );
        assert_eq!(
            HeatCapacity::try_from(&Attribute::from([1.0, 2.0, 3.0, 4.0])),
            Ok(HeatCapacity::Polynomial {
                a: 1.0,
                b: 2.0,
                c: 3.0,
                d: 4.0
            })
        );
        assert_eq!(
            HeatCapacity::try_from(&Attribute::from([1.0, 2.0])),
            Err(HeatCapacityError::Coefficients { count: 2 })
        );
        assert_eq!(
            HeatCapacity::try_from(&Attribute::from([
                ("a", 1.0),
                ("b", 2.0),
                ("c", 3.0),
                ("d", 4.0)
            ])),
            Ok(HeatCapacity::from([1.0, 2.0, 3.0, 4.0]))
        );
        assert_eq!(
            HeatCapacity::try_from(&Attribute::from([("a", 1.0), ("b", 2.0), ("d", 4.0)])),
            Err(HeatCapacityError::MissingCoefficient { key: "c" })
        );
        assert!(matches!(
            HeatCapacity::try_from(&Attribute::from("air")),
            Err(HeatCapacityError::NotNumeric { .. })
        ));
    }
}
