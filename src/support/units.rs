//! Extensions to [`uom`].
//!
//! State variables are stored per mole of substance. [`uom`] ships molar energy
//! and molar heat capacity quantities, but the names read poorly next to
//! thermodynamic state variables. This module provides aliases named after the
//! properties they hold:
//!
//! ```
//! use thermostate::support::units::MolarEnthalpy;
//! use uom::si::molar_energy::{joule_per_mole, kilojoule_per_mole};
//!
//! let h = MolarEnthalpy::new::<kilojoule_per_mole>(2.5);
//! assert_eq!(h.get::<joule_per_mole>(), 2500.0);
//! ```

mod quantities;

pub use quantities::{MolarEnthalpy, MolarEntropy, MolarGasConstant, MolarInternalEnergy};
