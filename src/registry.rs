//! The fixed set of recognized state variables.
//!
//! Everything here is process-wide constant data: the ordered primary
//! variables, their default units and their display formats. A raw number
//! written to a state is always read in the default unit of its variable.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::report::Format;

/// A tracked state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Temperature `T`, in kelvin.
    Temperature,
    /// Pressure `P`, in pascal.
    Pressure,
    /// Molar volume `v`, in m³/mol.
    Volume,
    /// Molar entropy `s`, in J/(mol·K).
    Entropy,
    /// Molar enthalpy `h`, in J/mol.
    Enthalpy,
    /// Molar internal energy `u`, in J/mol.
    InternalEnergy,
    /// Vapor fraction `x`, dimensionless.
    Quality,
}

/// Primary state variables in reporting order.
///
/// Any two distinct members of this list specify a state.
pub const STATE_VARIABLES: [Property; 6] = [
    Property::Temperature,
    Property::Pressure,
    Property::Volume,
    Property::Entropy,
    Property::Enthalpy,
    Property::InternalEnergy,
];

/// Every variable cleared on invalidation and compared by deltas.
///
/// This is [`STATE_VARIABLES`] plus the vapor fraction, which is never counted
/// as an input.
pub const TRACKED_VARIABLES: [Property; 7] = [
    Property::Temperature,
    Property::Pressure,
    Property::Volume,
    Property::Entropy,
    Property::Enthalpy,
    Property::InternalEnergy,
    Property::Quality,
];

/// Symbol of the derived pressure-volume product.
pub const PV_SYMBOL: &str = "Pv";

/// Unit of the derived pressure-volume product.
pub const PV_UNIT: &str = "J/mol";

/// Display format of the derived pressure-volume product.
pub const PV_FORMAT: Format = Format::general(6);

impl Property {
    /// Number of tracked variables.
    pub(crate) const COUNT: usize = TRACKED_VARIABLES.len();

    /// Short symbol used in reports and parsing (`"T"`, `"P"`, ...).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Temperature => "T",
            Self::Pressure => "P",
            Self::Volume => "v",
            Self::Entropy => "s",
            Self::Enthalpy => "h",
            Self::InternalEnergy => "u",
            Self::Quality => "x",
        }
    }

    /// Symbol of the default unit; raw numbers are read in this unit.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "Pa",
            Self::Volume => "m^3/mol",
            Self::Entropy => "J/mol-K",
            Self::Enthalpy | Self::InternalEnergy => "J/mol",
            Self::Quality => "",
        }
    }

    /// Name of the physical dimension accepted by this variable.
    #[must_use]
    pub const fn dimension(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Volume => "molar volume",
            Self::Entropy => "molar entropy",
            Self::Enthalpy | Self::InternalEnergy => "molar energy",
            Self::Quality => "ratio",
        }
    }

    /// Display format used by reports.
    #[must_use]
    pub const fn format(self) -> Format {
        match self {
            Self::Temperature | Self::Pressure | Self::Quality => Format::general(5),
            Self::Volume | Self::Entropy | Self::Enthalpy | Self::InternalEnergy => {
                Format::general(6)
            }
        }
    }

    /// Returns `true` for the six variables that may act as inputs.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        !matches!(self, Self::Quality)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when a name is not a recognized state variable symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown state variable: {name}")]
pub struct UnknownProperty {
    pub name: String,
}

impl FromStr for Property {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TRACKED_VARIABLES
            .into_iter()
            .find(|p| p.symbol() == s)
            .ok_or_else(|| UnknownProperty { name: s.to_owned() })
    }
}
