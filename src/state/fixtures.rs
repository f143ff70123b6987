//! Strategies used by the state tests.

use std::cell::Cell;

use thiserror::Error;

use crate::{
    model::{Calculated, Resolve},
    registry::Property,
    report::Format,
    value::Attribute,
};

use super::{Resolver, State, StateError, StateVariables, WriteError};

pub(crate) const R: f64 = 8.314_462_618;
pub(crate) const H_REF: f64 = 1_000.0;
pub(crate) const S_REF: f64 = 10.0;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum TestGasError {
    #[error("pressure must be positive")]
    NonPositivePressure,
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// An ideal gas with constant reference enthalpy and entropy.
///
/// Resolves from any pair drawn from `T`, `P` and `v`. An optional parameter
/// `a` turns the enthalpy into `H_REF + a (T - 298.15)`. Temperatures above
/// 1000 K are reported as unresolvable and non-positive pressures as errors.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestGas {
    pub(crate) parameters: &'static [&'static str],
    pub(crate) resolutions: Cell<usize>,
    pub(crate) evaluations: Cell<usize>,
}

impl TestGas {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_parameters(parameters: &'static [&'static str]) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }
}

const TEST_GAS_CALCULATED: &[Calculated<TestGas>] = &[Calculated {
    name: "RT",
    unit: "J/mol",
    format: Format::general(6),
    compute: gas_constant_times_temperature,
}];

fn gas_constant_times_temperature(gas: &TestGas, state: &State<TestGas>) -> Option<f64> {
    gas.evaluations.set(gas.evaluations.get() + 1);
    Some(R * state.magnitude(Property::Temperature)?)
}

impl Resolve for TestGas {
    type Error = TestGasError;

    fn parameters(&self) -> &[&'static str] {
        self.parameters
    }

    fn calculated(&self) -> &[Calculated<Self>] {
        TEST_GAS_CALCULATED
    }

    fn resolve(&self, state: &mut Resolver<'_, Self>) -> Result<bool, TestGasError> {
        self.resolutions.set(self.resolutions.get() + 1);

        let Some((first, second)) = state.pair() else {
            return Ok(false);
        };
        let is_input = |p: Property| p == first || p == second;
        let given = |p: Property| state.magnitude(p).filter(|_| is_input(p));

        let (t, p) = match (
            given(Property::Temperature),
            given(Property::Pressure),
            given(Property::Volume),
        ) {
            (Some(t), Some(p), _) => (t, p),
            (Some(t), None, Some(v)) => (t, R * t / v),
            (None, Some(p), Some(v)) => (p * v / R, p),
            _ => return Ok(false),
        };

        if p <= 0.0 {
            return Err(TestGasError::NonPositivePressure);
        }
        if t > 1000.0 {
            return Ok(false);
        }

        let a = state
            .attribute("a")
            .and_then(Attribute::as_scalar)
            .unwrap_or(0.0);
        let h = H_REF + a * (t - 298.15);

        for (property, value) in [
            (Property::Temperature, t),
            (Property::Pressure, p),
            (Property::Volume, R * t / p),
            (Property::Entropy, S_REF),
            (Property::Enthalpy, h),
            (Property::InternalEnergy, h - R * t),
        ] {
            if !is_input(property) {
                state.set(property, value)?;
            }
        }
        Ok(true)
    }
}

pub(crate) const V_LIQUID: f64 = 1.0e-5;
pub(crate) const V_VAPOR: f64 = 1.0e-2;
pub(crate) const H_VAPOR: f64 = 40_000.0;

/// A saturated two-phase fluid resolved by the lever rule from `(T, v)`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Lever;

impl Lever {
    fn phase(name: &str, t: f64, p: f64, v: f64, h: f64) -> Result<State<Self>, StateError> {
        State::builder(Self)
            .manual()
            .name(name)
            .with(Property::Temperature, t)
            .with(Property::Pressure, p)
            .with(Property::Volume, v)
            .with(Property::Enthalpy, h)
            .build()
    }
}

impl Resolve for Lever {
    type Error = StateError;

    fn resolve(&self, state: &mut Resolver<'_, Self>) -> Result<bool, StateError> {
        let (Some(t), Some(v)) = (
            state.magnitude(Property::Temperature),
            state.magnitude(Property::Volume),
        ) else {
            return Ok(false);
        };
        if !(V_LIQUID..=V_VAPOR).contains(&v) {
            return Ok(false);
        }

        let x = (v - V_LIQUID) / (V_VAPOR - V_LIQUID);
        let p = 1_000.0 * t;
        state.set(Property::Pressure, p)?;
        state.set(Property::Quality, x)?;
        state.set(Property::Enthalpy, x * H_VAPOR)?;

        let liquid = Self::phase("liquid", t, p, V_LIQUID, 0.0)?;
        let vapor = Self::phase("vapor", t, p, V_VAPOR, H_VAPOR)?;
        state.set_phases(liquid, vapor);
        Ok(true)
    }
}
