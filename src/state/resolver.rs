use crate::{
    registry::Property,
    value::{Attribute, Value},
};

use super::{
    Mode, State, StateVariables, WriteError,
    record::{Phases, Record},
};

/// Write access to a state handed to its strategy during resolution.
///
/// Writes made here never trigger a nested resolution. Writing a variable
/// that is not an input simply stores it; strategies should not rewrite
/// their own inputs.
pub struct Resolver<'a, M> {
    record: &'a mut Record<M>,
}

impl<'a, M> Resolver<'a, M> {
    pub(crate) fn new(record: &'a mut Record<M>) -> Self {
        Self { record }
    }

    /// Name of the state being resolved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.record.mode
    }

    /// Variables to resolve from.
    ///
    /// In tracked mode these are the recorded inputs in insertion order. In
    /// manual mode every populated primary variable is returned.
    #[must_use]
    pub fn inputs(&self) -> Vec<Property> {
        self.record.resolution_inputs()
    }

    /// The input pair, if exactly two inputs are known.
    #[must_use]
    pub fn pair(&self) -> Option<(Property, Property)> {
        match self.inputs().as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.record.attributes.get(name)
    }

    /// Writes a computed variable.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the value cannot be normalized.
    pub fn set(&mut self, property: Property, value: impl Into<Value>) -> Result<(), WriteError> {
        if let Some(magnitude) = property.normalize(value.into())? {
            self.record.write(property, magnitude);
        }
        Ok(())
    }

    /// Attaches liquid and vapor sub-states to a saturated state.
    pub fn set_phases(&mut self, liquid: State<M>, vapor: State<M>) {
        self.record.phases = Some(Box::new(Phases { liquid, vapor }));
    }
}

impl<M> StateVariables for Resolver<'_, M> {
    fn magnitude(&self, property: Property) -> Option<f64> {
        self.record.magnitude(property)
    }
}
