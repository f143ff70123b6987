use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    registry::{Property, TRACKED_VARIABLES},
    value::Attribute,
};

use super::{State, StateError};

/// How a [`State`] treats writes, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Writes are tracked as inputs and drive automatic resolution.
    #[default]
    Tracked,

    /// Writes are normalized and stored, nothing else.
    ///
    /// Resolution only happens through an explicit [`State::resolve`] call,
    /// and the strategy sees every populated primary variable as an input.
    Manual,
}

/// Position of a state in its input lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No input has been supplied.
    Empty,
    /// One input has been supplied.
    Partial,
    /// Two inputs are known but the state has not been resolved.
    Unresolved,
    /// Resolution succeeded since the last invalidation.
    Complete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub(crate) specified: bool,
    pub(crate) parameterized: bool,
    pub(crate) calculating: bool,
    pub(crate) complete: bool,
}

/// Liquid and vapor sub-states of a saturated state.
#[derive(Debug, Clone)]
pub(crate) struct Phases<M> {
    pub(crate) liquid: State<M>,
    pub(crate) vapor: State<M>,
}

/// Everything a state owns except its model.
///
/// Kept apart from the model so a strategy can borrow the model immutably
/// while it writes into the record.
#[derive(Debug, Clone)]
pub(crate) struct Record<M> {
    pub(crate) name: String,
    pub(crate) mode: Mode,
    values: [Option<f64>; Property::COUNT],
    pub(crate) inputs: Vec<Property>,
    pub(crate) attributes: BTreeMap<String, Attribute>,
    parameters_specified: Vec<String>,
    pub(crate) calculated: BTreeMap<&'static str, f64>,
    pub(crate) flags: Flags,
    pub(crate) phases: Option<Box<Phases<M>>>,
}

impl<M> Record<M> {
    pub(crate) fn new(name: String, mode: Mode, parameterized: bool) -> Self {
        Self {
            name,
            mode,
            values: [None; Property::COUNT],
            inputs: Vec::with_capacity(2),
            attributes: BTreeMap::new(),
            parameters_specified: Vec::new(),
            calculated: BTreeMap::new(),
            flags: Flags {
                parameterized,
                ..Flags::default()
            },
            phases: None,
        }
    }

    pub(crate) fn magnitude(&self, property: Property) -> Option<f64> {
        self.values[property.index()]
    }

    /// Stores a magnitude with no tracking.
    pub(crate) fn store(&mut self, property: Property, magnitude: f64) {
        trace!(state = %self.name, %property, magnitude, "storing state variable");
        self.values[property.index()] = Some(magnitude);
    }

    /// Writes through the mode-appropriate channel.
    ///
    /// Returns `false` if the write left the record unchanged.
    pub(crate) fn write(&mut self, property: Property, magnitude: f64) -> bool {
        match self.mode {
            Mode::Manual => {
                self.store(property, magnitude);
                true
            }
            Mode::Tracked => self.assign(property, magnitude),
        }
    }

    /// Applies the input-tracking rules to a tracked-mode write.
    ///
    /// A new variable becomes an input while fewer than two are recorded.
    /// Writing an input invalidates everything computed from the old pair,
    /// unless the input already holds exactly this value.
    fn assign(&mut self, property: Property, magnitude: f64) -> bool {
        if !property.is_primary() {
            self.store(property, magnitude);
            return true;
        }

        let was_input = self.inputs.contains(&property);
        if was_input && self.magnitude(property) == Some(magnitude) {
            trace!(state = %self.name, %property, "input already holds this value");
            return false;
        }

        self.store(property, magnitude);

        if !was_input && self.inputs.len() < 2 {
            debug!(state = %self.name, %property, "adding input variable");
            self.inputs.push(property);
        }

        if self.inputs.contains(&property) {
            self.invalidate();
        }

        self.flags.specified = self.inputs.len() == 2;
        true
    }

    /// Stores a named attribute, treating declared parameters specially.
    ///
    /// Returns `true` if a parameter changed and resolution may be attempted.
    pub(crate) fn assign_attribute(
        &mut self,
        name: &str,
        value: Attribute,
        parameters: &[&'static str],
    ) -> bool {
        if !parameters.iter().any(|p| *p == name) {
            trace!(state = %self.name, name, "storing auxiliary attribute");
            self.attributes.insert(name.to_owned(), value);
            return false;
        }

        if self.attributes.get(name) == Some(&value) {
            trace!(state = %self.name, name, "parameter already holds this value");
            return false;
        }

        debug!(state = %self.name, name, "setting parameter");
        self.attributes.insert(name.to_owned(), value);
        self.invalidate();

        if !self.parameters_specified.iter().any(|p| p == name) {
            self.parameters_specified.push(name.to_owned());
        }
        self.flags.parameterized = parameters
            .iter()
            .all(|p| self.parameters_specified.iter().any(|s| s == p));
        true
    }

    /// Clears computed variables, memoized values and phases; keeps inputs.
    pub(crate) fn invalidate(&mut self) {
        debug!(state = %self.name, inputs = ?self.inputs, "invalidating computed state");
        self.flags.complete = false;
        self.calculated.clear();
        for property in TRACKED_VARIABLES {
            if !self.inputs.contains(&property) {
                self.values[property.index()] = None;
            }
        }
        self.phases = None;
    }

    pub(crate) fn swap(
        &mut self,
        input: Property,
        replacement: Property,
    ) -> Result<(), StateError> {
        let reject = |reason| StateError::Swap {
            input,
            replacement,
            reason,
        };

        if self.mode == Mode::Manual {
            return Err(reject("inputs are not tracked in manual mode"));
        }
        if !replacement.is_primary() {
            return Err(reject("the replacement cannot act as an input"));
        }
        let Some(position) = self.inputs.iter().position(|p| *p == input) else {
            return Err(reject("the variable to replace is not an input"));
        };
        if self.inputs.contains(&replacement) {
            return Err(reject("the replacement is already an input"));
        }
        if self.magnitude(replacement).is_none() {
            return Err(reject("the replacement has no value"));
        }

        self.inputs.remove(position);
        self.inputs.push(replacement);
        debug!(
            state = %self.name,
            %input,
            %replacement,
            inputs = ?self.inputs,
            "swapped input variable"
        );
        Ok(())
    }

    /// Primary variables holding a value, in registry order.
    pub(crate) fn populated(&self) -> Vec<Property> {
        TRACKED_VARIABLES
            .into_iter()
            .filter(|p| p.is_primary() && self.magnitude(*p).is_some())
            .collect()
    }

    /// Variables a strategy should treat as its inputs.
    pub(crate) fn resolution_inputs(&self) -> Vec<Property> {
        match self.mode {
            Mode::Tracked => self.inputs.clone(),
            Mode::Manual => self.populated(),
        }
    }

    pub(crate) fn status(&self) -> Status {
        let count = match self.mode {
            Mode::Tracked => self.inputs.len(),
            Mode::Manual => self.populated().len(),
        };
        match count {
            _ if self.flags.complete => Status::Complete,
            0 => Status::Empty,
            1 => Status::Partial,
            _ => Status::Unresolved,
        }
    }
}
