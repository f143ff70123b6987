//! Values accepted by the state write channel.
//!
//! A [`Value`] is either a raw number, read in the default unit of the target
//! variable, or a [`uom`] quantity, converted into that unit. An
//! [`Attribute`] is a parameter or auxiliary value stored verbatim.

use std::{collections::BTreeMap, fmt};

use uom::si::{
    f64::{MolarVolume, Pressure, Ratio, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    molar_volume::cubic_meter_per_mole,
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

use crate::{
    registry::Property,
    state::WriteError,
    support::{
        constraint::{Constraint, UnitInterval},
        units::{MolarEnthalpy, MolarEntropy},
    },
};

/// A value written to a state variable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    /// No value; writing it is always a no-op.
    #[default]
    Empty,
    /// A bare magnitude in the variable's default unit.
    Number(f64),
    Temperature(ThermodynamicTemperature),
    Pressure(Pressure),
    MolarVolume(MolarVolume),
    /// A molar enthalpy or internal energy.
    MolarEnergy(MolarEnthalpy),
    MolarEntropy(MolarEntropy),
    Ratio(Ratio),
}

impl Value {
    /// Name of the dimension carried by this value.
    #[must_use]
    pub const fn dimension(&self) -> &'static str {
        match self {
            Self::Empty => "nothing",
            Self::Number(_) => "number",
            Self::Temperature(_) => "temperature",
            Self::Pressure(_) => "pressure",
            Self::MolarVolume(_) => "molar volume",
            Self::MolarEnergy(_) => "molar energy",
            Self::MolarEntropy(_) => "molar entropy",
            Self::Ratio(_) => "ratio",
        }
    }

    /// Returns `true` if writing this value must be ignored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<ThermodynamicTemperature> for Value {
    fn from(value: ThermodynamicTemperature) -> Self {
        Self::Temperature(value)
    }
}

impl From<Pressure> for Value {
    fn from(value: Pressure) -> Self {
        Self::Pressure(value)
    }
}

impl From<MolarVolume> for Value {
    fn from(value: MolarVolume) -> Self {
        Self::MolarVolume(value)
    }
}

impl From<MolarEnthalpy> for Value {
    fn from(value: MolarEnthalpy) -> Self {
        Self::MolarEnergy(value)
    }
}

impl From<MolarEntropy> for Value {
    fn from(value: MolarEntropy) -> Self {
        Self::MolarEntropy(value)
    }
}

impl From<Ratio> for Value {
    fn from(value: Ratio) -> Self {
        Self::Ratio(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl Property {
    /// Converts `value` into a magnitude in this variable's default unit.
    ///
    /// Returns `Ok(None)` for [`Value::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Dimension`] if the quantity has the wrong
    /// dimension, or [`WriteError::Quality`] if a vapor fraction falls outside
    /// `[0, 1]`.
    pub fn normalize(self, value: Value) -> Result<Option<f64>, WriteError> {
        let magnitude = match (self, value) {
            (_, Value::Empty) => return Ok(None),
            (_, Value::Number(n)) => n,
            (Self::Temperature, Value::Temperature(t)) => t.get::<kelvin>(),
            (Self::Pressure, Value::Pressure(p)) => p.get::<pascal>(),
            (Self::Volume, Value::MolarVolume(v)) => v.get::<cubic_meter_per_mole>(),
            (Self::Enthalpy | Self::InternalEnergy, Value::MolarEnergy(e)) => {
                e.get::<joule_per_mole>()
            }
            (Self::Entropy, Value::MolarEntropy(s)) => s.get::<joule_per_kelvin_mole>(),
            (Self::Quality, Value::Ratio(x)) => x.get::<ratio>(),
            (property, value) => {
                return Err(WriteError::Dimension {
                    property,
                    expected: property.dimension(),
                    found: value.dimension(),
                });
            }
        };

        if self == Self::Quality {
            UnitInterval::check(&magnitude)
                .map_err(|source| WriteError::Quality { value: magnitude, source })?;
        }

        Ok(Some(magnitude))
    }
}

/// A parameter or auxiliary value attached to a state by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Attribute {
    /// No value; writing it is always a no-op.
    #[default]
    Empty,
    Scalar(f64),
    /// An ordered coefficient list, such as a heat capacity polynomial.
    Coefficients(Vec<f64>),
    /// Named coefficients, such as `a` through `d` of a heat capacity.
    Keyed(BTreeMap<String, f64>),
    Text(String),
}

impl Attribute {
    /// Returns `true` for [`Attribute::Empty`] and empty containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Scalar(_) => false,
            Self::Coefficients(c) => c.is_empty(),
            Self::Keyed(k) => k.is_empty(),
            Self::Text(t) => t.is_empty(),
        }
    }

    /// Returns the named coefficient, if this is keyed and holds `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        match self {
            Self::Keyed(k) => k.get(key).copied(),
            _ => None,
        }
    }

    /// Returns the scalar value, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Scalar(x) => write!(f, "{x}"),
            Self::Coefficients(c) => {
                f.write_str("[")?;
                for (i, x) in c.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
            Self::Keyed(k) => {
                f.write_str("{")?;
                for (i, (key, x)) in k.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {x}")?;
                }
                f.write_str("}")
            }
            Self::Text(t) => f.write_str(t),
        }
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Attribute {
    fn from(value: Vec<f64>) -> Self {
        Self::Coefficients(value)
    }
}

impl<const N: usize> From<[f64; N]> for Attribute {
    fn from(value: [f64; N]) -> Self {
        Self::Coefficients(value.to_vec())
    }
}

impl From<BTreeMap<String, f64>> for Attribute {
    fn from(value: BTreeMap<String, f64>) -> Self {
        Self::Keyed(value)
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Attribute {
    fn from(value: [(&str, f64); N]) -> Self {
        Self::Keyed(value.into_iter().map(|(k, x)| (k.to_owned(), x)).collect())
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Attribute>> From<Option<T>> for Attribute {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        molar_energy::kilojoule_per_mole, pressure::atmosphere,
        thermodynamic_temperature::degree_celsius,
    };

    #[test]
    fn raw_numbers_use_default_units() {
        assert_eq!(Property::Temperature.normalize(300.into()), Ok(Some(300.0)));
        assert_eq!(
            Property::Pressure.normalize(101_325.0.into()),
            Ok(Some(101_325.0))
        );
    }

    #[test]
    fn quantities_are_converted() {
        let t = ThermodynamicTemperature::new::<degree_celsius>(27.0);
        let k = Property::Temperature.normalize(t.into()).unwrap().unwrap();
        assert_relative_eq!(k, 300.15, epsilon = 1e-9);

        let p = Pressure::new::<atmosphere>(1.0);
        let pa = Property::Pressure.normalize(p.into()).unwrap().unwrap();
        assert_relative_eq!(pa, 101_325.0, epsilon = 1e-6);

        let h = MolarEnthalpy::new::<kilojoule_per_mole>(1.5);
        let j = Property::InternalEnergy.normalize(h.into()).unwrap().unwrap();
        assert_relative_eq!(j, 1500.0);
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let p = Pressure::new::<pascal>(1.0);
        let err = Property::Temperature.normalize(p.into()).unwrap_err();
        assert_eq!(
            err,
            WriteError::Dimension {
                property: Property::Temperature,
                expected: "temperature",
                found: "pressure",
            }
        );
    }

    #[test]
    fn empty_values_normalize_to_nothing() {
        assert_eq!(Property::Volume.normalize(Value::Empty), Ok(None));
        assert_eq!(Property::Volume.normalize(None::<f64>.into()), Ok(None));
    }

    #[test]
    fn quality_outside_unit_interval_is_rejected() {
        assert!(Property::Quality.normalize(0.25.into()).is_ok());
        assert!(matches!(
            Property::Quality.normalize(1.5.into()),
            Err(WriteError::Quality { .. })
        ));
    }

    #[test]
    fn empty_attributes() {
        assert!(Attribute::Empty.is_empty());
        assert!(Attribute::from(Vec::<f64>::new()).is_empty());
        assert!(Attribute::from("").is_empty());
        assert!(!Attribute::from(0.0).is_empty());
        assert_eq!(Attribute::from([1.0, 2.5]).to_string(), "[1, 2.5]");
        assert!(Attribute::Keyed(BTreeMap::new()).is_empty());
    }

    #[test]
    fn keyed_attributes() {
        let keyed = Attribute::from([("b", 2.0), ("a", 1.5)]);
        assert_eq!(keyed.to_string(), "{a: 1.5, b: 2}");
        assert_eq!(keyed.get("a"), Some(1.5));
        assert_eq!(keyed.get("c"), None);
        assert_eq!(keyed.as_scalar(), None);
    }

    proptest! {
        #[test]
        fn celsius_and_kelvin_agree(t in 1.0_f64..5000.0) {
            let raw = Property::Temperature.normalize(t.into()).unwrap().unwrap();
            let celsius = ThermodynamicTemperature::new::<degree_celsius>(t - 273.15);
            let converted = Property::Temperature.normalize(celsius.into()).unwrap().unwrap();
            prop_assert!((raw - converted).abs() <= 1e-9 * t.max(1.0));
        }
    }
}
