//! # Thermostate
//!
//! Reactive thermodynamic state tracking for pure substances.
//!
//! A [`State`] holds the six primary state variables (`T`, `P`, `v`, `s`,
//! `h`, `u`) and the vapor fraction `x`. The first two primary variables a
//! caller supplies become the state's inputs; once both are known, along with
//! every parameter the strategy declares, the strategy computes the rest.
//! Changing an input later invalidates the derived values and resolves again.
//!
//! ## Crate layout
//!
//! - [`state`]: The state container, its write protocol and reports.
//! - [`model`]: The [`Resolve`] trait and the [`IdealGas`] strategy.
//! - [`registry`]: The recognized state variables, their units and formats.
//! - [`value`]: Values accepted by the write channel.
//! - [`report`]: Aligned plain-text property reports.
//! - [`thermals`]: Ideal-gas heat capacity integrals.
//! - [`gas_constant`]: The gas constant in selectable units.
//! - [`tex`]: LaTeX formatting helpers.
//! - [`support`]: Supporting utilities shared across modules.
//!
//! ## Example
//!
//! ```
//! use thermostate::{IdealGas, Property, State, StateVariables};
//! use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
//!
//! let mut state = State::new(IdealGas::standard());
//! state.set_attribute("Cp", [28.9, 1.9e-3, 0.0, 0.0]).unwrap();
//! state
//!     .set(Property::Temperature, ThermodynamicTemperature::new::<degree_celsius>(80.0))
//!     .unwrap();
//! state.set(Property::Pressure, 5.0e5).unwrap();
//!
//! assert!(state.is_complete());
//! assert!(state.enthalpy().is_some());
//! println!("{}", state.report(&["Z"], &["Cp"]));
//! ```

pub mod gas_constant;
pub mod model;
pub mod registry;
pub mod report;
pub mod state;
pub mod support;
pub mod tex;
pub mod thermals;
pub mod value;

pub use model::{IdealGas, Resolve};
pub use registry::Property;
pub use state::{State, StateError, StateVariables};
pub use value::{Attribute, Value};
