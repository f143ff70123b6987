use crate::{
    model::Resolve,
    registry::Property,
    value::{Attribute, Value},
};

use super::{Mode, State, StateError};

enum Write {
    Variable(Property, Value),
    Attribute(String, Attribute),
}

/// Builds a [`State`] from writes applied in a fixed order.
///
/// Writes run in the order they were added, exactly as if each had been made
/// on the finished state, so the first two primary variables become inputs.
///
/// ```
/// use thermostate::{model::IdealGas, registry::Property, state::State};
///
/// let state = State::builder(IdealGas::standard())
///     .name("inlet")
///     .with(Property::Temperature, 350.0)
///     .with(Property::Pressure, 2.0e5)
///     .with_attribute("Cp", 29.1)
///     .build()
///     .unwrap();
///
/// assert!(state.is_complete());
/// assert_eq!(state.name(), "inlet");
/// ```
pub struct StateBuilder<M> {
    model: M,
    name: Option<String>,
    mode: Mode,
    writes: Vec<Write>,
}

impl<M: Resolve> StateBuilder<M> {
    pub(crate) fn new(model: M) -> Self {
        Self {
            model,
            name: None,
            mode: Mode::Tracked,
            writes: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds a [`Mode::Manual`] state.
    #[must_use]
    pub fn manual(mut self) -> Self {
        self.mode = Mode::Manual;
        self
    }

    #[must_use]
    pub fn with(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.writes.push(Write::Variable(property, value.into()));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.writes.push(Write::Attribute(name.into(), value.into()));
        self
    }

    /// Applies every write, then attempts resolution once more.
    ///
    /// # Errors
    ///
    /// Returns the first [`StateError`] raised by a write or by resolution.
    pub fn build(self) -> Result<State<M>, StateError> {
        let mut state = State::with_mode(self.model, self.mode);
        if let Some(name) = self.name {
            state.set_name(name);
        }

        for write in self.writes {
            match write {
                Write::Variable(property, value) => state.set(property, value)?,
                Write::Attribute(name, value) => state.set_attribute(&name, value)?,
            }
        }

        if state.mode() == Mode::Tracked {
            state.try_resolve()?;
        }
        Ok(state)
    }
}
