//! The universal gas constant in selectable pressure and volume units.

use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::molar_heat_capacity::joule_per_kelvin_mole;

use crate::{report::format::general, support::units::MolarGasConstant};

/// Universal gas constant in J/(mol·K).
pub const R_SI: f64 = 8.314_462_618;

/// Returned when a unit name is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unsupported pressure unit: {unit}")]
    Pressure { unit: String },

    #[error("unsupported volume unit: {unit}")]
    Volume { unit: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureUnit {
    #[default]
    Pascal,
    Kilopascal,
    Megapascal,
    Bar,
    Atmosphere,
}

impl PressureUnit {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pascal => "Pa",
            Self::Kilopascal => "kPa",
            Self::Megapascal => "MPa",
            Self::Bar => "bar",
            Self::Atmosphere => "atm",
        }
    }

    /// Magnitude of one pascal in this unit.
    #[must_use]
    pub const fn per_pascal(self) -> f64 {
        match self {
            Self::Pascal => 1.0,
            Self::Kilopascal => 1.0e-3,
            Self::Megapascal => 1.0e-6,
            Self::Bar => 1.0e-5,
            Self::Atmosphere => 1.0 / 101_325.0,
        }
    }
}

impl FromStr for PressureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pa" => Ok(Self::Pascal),
            "kpa" => Ok(Self::Kilopascal),
            "mpa" => Ok(Self::Megapascal),
            "bar" => Ok(Self::Bar),
            "atm" => Ok(Self::Atmosphere),
            _ => Err(UnitError::Pressure { unit: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeUnit {
    #[default]
    CubicMeter,
    Liter,
    CubicCentimeter,
}

impl VolumeUnit {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::CubicMeter => "m3",
            Self::Liter => "L",
            Self::CubicCentimeter => "cm3",
        }
    }

    /// Magnitude of one cubic meter in this unit.
    #[must_use]
    pub const fn per_cubic_meter(self) -> f64 {
        match self {
            Self::CubicMeter => 1.0,
            Self::Liter => 1.0e3,
            Self::CubicCentimeter => 1.0e6,
        }
    }
}

impl FromStr for VolumeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m3" => Ok(Self::CubicMeter),
            "l" => Ok(Self::Liter),
            "cm3" => Ok(Self::CubicCentimeter),
            _ => Err(UnitError::Volume { unit: s.to_owned() }),
        }
    }
}

/// The gas constant expressed in `(pressure·volume)/(mol·K)`.
///
/// ```
/// use thermostate::gas_constant::GasConstant;
///
/// let r = GasConstant::new("bar", "L").unwrap();
/// assert!((r.value() - 0.08314462618).abs() < 1e-12);
/// assert_eq!(r.to_string(), "0.0831446 (bar-L)/(mol-K)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GasConstant {
    pressure_unit: PressureUnit,
    volume_unit: VolumeUnit,
}

impl GasConstant {
    /// Parses unit names case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a [`UnitError`] naming the first unsupported unit.
    pub fn new(pressure_unit: &str, volume_unit: &str) -> Result<Self, UnitError> {
        Ok(Self::with_units(pressure_unit.parse()?, volume_unit.parse()?))
    }

    #[must_use]
    pub const fn with_units(pressure_unit: PressureUnit, volume_unit: VolumeUnit) -> Self {
        Self {
            pressure_unit,
            volume_unit,
        }
    }

    #[must_use]
    pub const fn pressure_unit(&self) -> PressureUnit {
        self.pressure_unit
    }

    #[must_use]
    pub const fn volume_unit(&self) -> VolumeUnit {
        self.volume_unit
    }

    /// Conversion factor from the SI value.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.pressure_unit.per_pascal() * self.volume_unit.per_cubic_meter()
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        R_SI * self.factor()
    }

    /// The gas constant as a typed SI quantity.
    #[must_use]
    pub fn si() -> MolarGasConstant {
        MolarGasConstant::new::<joule_per_kelvin_mole>(R_SI)
    }
}

impl fmt::Display for GasConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{})/(mol-K)",
            general(self.value(), 6),
            self.pressure_unit.symbol(),
            self.volume_unit.symbol()
        )
    }
}
