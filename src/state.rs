//! The reactive thermodynamic state container.
//!
//! A [`State`] records which two primary variables were supplied as inputs
//! and, in [`Mode::Tracked`], asks its resolution strategy to fill in the
//! rest as soon as the inputs and every declared parameter are known.
//! Changing an input or parameter later invalidates everything computed
//! from the old values and triggers a fresh resolution.

mod builder;
mod delta;
mod error;
mod record;
mod report;
mod resolver;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;

use tracing::{debug, warn};
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
    model::Resolve,
    registry::{Property, TRACKED_VARIABLES},
    support::units::{MolarEnthalpy, MolarEntropy, MolarInternalEnergy},
    value::{Attribute, Value},
};

pub use builder::StateBuilder;
pub use delta::Delta;
pub use error::{StateError, WriteError};
pub use record::{Mode, Status};
pub use resolver::Resolver;

use record::Record;

/// Name given to states that were not named explicitly.
pub const DEFAULT_NAME: &str = "ThermodynamicState";

/// Read access to state variables.
///
/// Implementors only supply [`StateVariables::magnitude`]; the typed getters
/// wrap magnitudes in their default units.
pub trait StateVariables {
    /// Magnitude of `property` in its default unit, if known.
    fn magnitude(&self, property: Property) -> Option<f64>;

    fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.magnitude(Property::Temperature)
            .map(ThermodynamicTemperature::new::<kelvin>)
    }

    fn pressure(&self) -> Option<Pressure> {
        self.magnitude(Property::Pressure)
            .map(Pressure::new::<pascal>)
    }

    fn volume(&self) -> Option<MolarVolume> {
        self.magnitude(Property::Volume)
            .map(MolarVolume::new::<cubic_meter_per_mole>)
    }

    fn entropy(&self) -> Option<MolarEntropy> {
        self.magnitude(Property::Entropy)
            .map(MolarEntropy::new::<joule_per_kelvin_mole>)
    }

    fn enthalpy(&self) -> Option<MolarEnthalpy> {
        self.magnitude(Property::Enthalpy)
            .map(MolarEnthalpy::new::<joule_per_mole>)
    }

    fn internal_energy(&self) -> Option<MolarInternalEnergy> {
        self.magnitude(Property::InternalEnergy)
            .map(MolarInternalEnergy::new::<joule_per_mole>)
    }

    fn quality(&self) -> Option<Ratio> {
        self.magnitude(Property::Quality).map(Ratio::new::<ratio>)
    }

    /// The pressure-volume product, in J/mol.
    fn pv_magnitude(&self) -> Option<f64> {
        Some(self.magnitude(Property::Pressure)? * self.magnitude(Property::Volume)?)
    }

    fn pv(&self) -> Option<MolarEnthalpy> {
        self.pv_magnitude().map(MolarEnthalpy::new::<joule_per_mole>)
    }
}

/// A thermodynamic state of a pure substance.
///
/// The first two distinct primary variables written become the state's
/// inputs. Further writes to non-input variables are stored as-is and never
/// displace an input; use [`State::swap_input`] to change which variables
/// are inputs.
///
/// ```
/// use thermostate::{model::IdealGas, registry::Property, state::{State, StateVariables}};
///
/// let mut state = State::new(IdealGas::standard());
/// state.set_attribute("Cp", 29.1).unwrap();
/// state.set(Property::Temperature, 300.0).unwrap();
/// assert!(!state.is_complete());
///
/// state.set(Property::Pressure, 101_325.0).unwrap();
/// assert!(state.is_complete());
/// assert!(state.volume().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct State<M> {
    model: M,
    record: Record<M>,
}

impl<M: Resolve> State<M> {
    /// Creates an empty [`Mode::Tracked`] state.
    pub fn new(model: M) -> Self {
        Self::with_mode(model, Mode::Tracked)
    }

    /// Creates an empty [`Mode::Manual`] state.
    pub fn manual(model: M) -> Self {
        Self::with_mode(model, Mode::Manual)
    }

    pub fn builder(model: M) -> StateBuilder<M> {
        StateBuilder::new(model)
    }

    pub(crate) fn with_mode(model: M, mode: Mode) -> Self {
        let parameterized = model.parameters().is_empty();
        let record = Record::new(DEFAULT_NAME.to_owned(), mode, parameterized);
        Self { model, record }
    }

    /// Writes a state variable.
    ///
    /// Raw numbers are read in the variable's default unit and quantities are
    /// converted into it. An empty value is ignored. In tracked mode the
    /// write follows the input rules and may trigger resolution.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Write`] if the value cannot be normalized, in
    /// which case the state is unchanged, or [`StateError::Resolve`] if the
    /// triggered resolution fails.
    pub fn set(&mut self, property: Property, value: impl Into<Value>) -> Result<(), StateError> {
        let Some(magnitude) = property.normalize(value.into())? else {
            debug!(state = %self.record.name, %property, "ignoring empty write");
            return Ok(());
        };

        let changed = self.record.write(property, magnitude);
        if changed && self.record.mode == Mode::Tracked && !self.record.flags.calculating {
            self.try_resolve()?;
        }
        Ok(())
    }

    /// Writes a named attribute.
    ///
    /// A name matching a state variable symbol is routed to [`State::set`].
    /// A name the strategy declares as a parameter follows the parameter
    /// rules: it invalidates the state and may trigger resolution. Any other
    /// name is stored as an auxiliary attribute with no side effects.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Write`] if a state variable is given a
    /// non-numeric attribute, or [`StateError::Resolve`] if the triggered
    /// resolution fails.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: impl Into<Attribute>,
    ) -> Result<(), StateError> {
        let value = value.into();
        if value.is_empty() {
            debug!(state = %self.record.name, name, "ignoring empty attribute");
            return Ok(());
        }

        if let Ok(property) = name.parse::<Property>() {
            return match value.as_scalar() {
                Some(magnitude) => self.set(property, magnitude),
                None => Err(WriteError::Dimension {
                    property,
                    expected: property.dimension(),
                    found: "non-numeric attribute",
                }
                .into()),
            };
        }

        match self.record.mode {
            Mode::Manual => {
                self.record.attributes.insert(name.to_owned(), value);
            }
            Mode::Tracked => {
                let parameters = self.model.parameters();
                let changed = self.record.assign_attribute(name, value, parameters);
                if changed && !self.record.flags.calculating {
                    self.try_resolve()?;
                }
            }
        }
        Ok(())
    }

    /// Replaces input `input` with `replacement`, which must already hold a
    /// value and must not already be an input.
    ///
    /// Values are left untouched. The next write to either input invalidates
    /// against the new pair.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Swap`] if any precondition fails, in which case
    /// the inputs are unchanged.
    pub fn swap_input(&mut self, input: Property, replacement: Property) -> Result<(), StateError> {
        self.record.swap(input, replacement)
    }

    /// Runs resolution now.
    ///
    /// In tracked mode this is the same guarded attempt a write makes: it
    /// returns `Ok(true)` right away if the state is already complete and
    /// `Ok(false)` if inputs or parameters are missing. In manual mode the
    /// strategy always runs.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Resolve`] if the strategy fails.
    pub fn resolve(&mut self) -> Result<bool, StateError> {
        match self.record.mode {
            Mode::Tracked => self.try_resolve(),
            Mode::Manual => self.run_resolution(),
        }
    }

    pub(crate) fn try_resolve(&mut self) -> Result<bool, StateError> {
        let flags = self.record.flags;
        if flags.complete {
            return Ok(true);
        }
        if !(flags.specified && flags.parameterized) {
            debug!(
                state = %self.record.name,
                specified = flags.specified,
                parameterized = flags.parameterized,
                "state not ready for resolution"
            );
            return Ok(false);
        }
        self.run_resolution()
    }

    fn run_resolution(&mut self) -> Result<bool, StateError> {
        debug!(state = %self.record.name, inputs = ?self.record.inputs, "resolving state");

        self.record.flags.calculating = true;
        let outcome = self.model.resolve(&mut Resolver::new(&mut self.record));
        self.record.flags.calculating = false;

        let tracked = self.record.mode == Mode::Tracked;
        match outcome {
            Ok(true) => {
                if tracked {
                    self.record.flags.complete = true;
                }
                debug!(state = %self.record.name, "state resolved");
                Ok(true)
            }
            Ok(false) => {
                warn!(state = %self.record.name, inputs = ?self.record.inputs, "state could not be resolved");
                if tracked {
                    self.record.invalidate();
                }
                Ok(false)
            }
            Err(source) => {
                warn!(state = %self.record.name, error = %source, "resolution failed");
                if tracked {
                    self.record.invalidate();
                }
                Err(StateError::Resolve {
                    name: self.record.name.clone(),
                    source: Box::new(source),
                })
            }
        }
    }

    /// Evaluates a strategy-defined calculated property.
    ///
    /// In tracked mode the value is memoized until the next invalidation.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownCalculated`] if the strategy declares no
    /// property called `name`.
    pub fn calculated(&mut self, name: &str) -> Result<Option<f64>, StateError> {
        let Some(entry) = self.model.calculated().iter().find(|c| c.name == name) else {
            return Err(StateError::UnknownCalculated {
                name: name.to_owned(),
            });
        };
        let (key, compute) = (entry.name, entry.compute);

        if self.record.mode == Mode::Manual {
            return Ok(compute(&self.model, self));
        }
        if let Some(value) = self.record.calculated.get(key) {
            return Ok(Some(*value));
        }

        let value = compute(&self.model, self);
        if let Some(value) = value {
            self.record.calculated.insert(key, value);
        }
        Ok(value)
    }

    /// Returns `other - self` for every variable both states hold.
    #[must_use]
    pub fn delta<N>(&self, other: &State<N>) -> Delta {
        Delta::between(self, other)
    }
}

impl<M> State<M> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.record.name = name.into();
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.record.mode
    }

    /// The resolution strategy.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.record.attributes.get(name)
    }

    /// Current inputs in insertion order; empty in manual mode.
    #[must_use]
    pub fn inputs(&self) -> &[Property] {
        &self.record.inputs
    }

    /// Returns `true` once two inputs are recorded.
    #[must_use]
    pub fn is_specified(&self) -> bool {
        self.record.flags.specified
    }

    /// Returns `true` once every declared parameter has been supplied.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        self.record.flags.parameterized
    }

    #[must_use]
    pub fn is_calculating(&self) -> bool {
        self.record.flags.calculating
    }

    /// Returns `true` if resolution succeeded since the last invalidation.
    ///
    /// Always `false` in manual mode.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.record.flags.complete
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.record.status()
    }

    /// The liquid sub-state of a saturated state.
    #[must_use]
    pub fn liquid(&self) -> Option<&State<M>> {
        self.record.phases.as_deref().map(|phases| &phases.liquid)
    }

    /// The vapor sub-state of a saturated state.
    #[must_use]
    pub fn vapor(&self) -> Option<&State<M>> {
        self.record.phases.as_deref().map(|phases| &phases.vapor)
    }
}

impl<M> StateVariables for State<M> {
    fn magnitude(&self, property: Property) -> Option<f64> {
        self.record.magnitude(property)
    }
}

impl<M> fmt::Display for State<M> {
    /// Formats as `State(name: T*=300 K, P*=101325 Pa, ...)`, marking inputs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({}: ", self.record.name)?;
        let mut first = true;
        for property in TRACKED_VARIABLES {
            let Some(value) = self.record.magnitude(property) else {
                continue;
            };
            if !first {
                f.write_str(", ")?;
            }
            first = false;

            let marker = if self.record.inputs.contains(&property) {
                "*"
            } else {
                ""
            };
            write!(f, "{property}{marker}={value}")?;
            let unit = property.unit();
            if !unit.is_empty() {
                write!(f, " {unit}")?;
            }
        }
        f.write_str(")")
    }
}
