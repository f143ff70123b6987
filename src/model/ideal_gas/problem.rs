//! Problem formulation for inverting a property for temperature.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::{gas_constant::R_SI, thermals::HeatCapacity};

use super::{IdealGas, IdealGasError};

/// A known property value that fixes the temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Target {
    Enthalpy(f64),
    InternalEnergy(f64),
    Entropy { entropy: f64, pressure: f64 },
    EntropyAtVolume { entropy: f64, volume: f64 },
}

impl Target {
    fn goal(self) -> f64 {
        match self {
            Self::Enthalpy(h) | Self::InternalEnergy(h) => h,
            Self::Entropy { entropy, .. } | Self::EntropyAtVolume { entropy, .. } => entropy,
        }
    }

    fn evaluate(self, gas: &IdealGas, cp: &HeatCapacity, t: f64) -> f64 {
        match self {
            Self::Enthalpy(_) => gas.enthalpy(cp, t),
            Self::InternalEnergy(_) => gas.enthalpy(cp, t) - R_SI * t,
            Self::Entropy { pressure, .. } => gas.entropy(cp, t, pressure),
            Self::EntropyAtVolume { volume, .. } => gas.entropy(cp, t, R_SI * t / volume),
        }
    }
}

/// Raised when a trial temperature yields a non-finite property value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("property is not finite at {temperature} K")]
pub(super) struct InversionError {
    temperature: f64,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Evaluation {
    temperature: f64,
    value: f64,
}

/// Model adapter evaluating the target property at a trial temperature.
pub(super) struct PropertyModel<'a> {
    gas: &'a IdealGas,
    cp: &'a HeatCapacity,
    target: Target,
}

impl Model for PropertyModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = Evaluation;
    type Error = InversionError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let temperature = input.get::<kelvin>();
        let value = self.target.evaluate(self.gas, self.cp, temperature);
        if !value.is_finite() {
            return Err(InversionError { temperature });
        }
        Ok(Evaluation { temperature, value })
    }
}

/// Computes the residual as `evaluated - goal`.
pub(super) struct InversionProblem {
    goal: f64,
}

impl EquationProblem<1> for InversionProblem {
    type Input = ThermodynamicTemperature;
    type Output = Evaluation;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.value - self.goal])
    }
}

/// Finds the temperature at which `target` holds, in kelvin.
///
/// # Errors
///
/// Returns [`IdealGasError`] if the bracket does not contain a solution or
/// the solver fails to converge.
pub(super) fn solve_temperature(
    gas: &IdealGas,
    cp: &HeatCapacity,
    target: Target,
) -> Result<f64, IdealGasError> {
    let config = gas.config();
    let model = PropertyModel { gas, cp, target };
    let problem = InversionProblem {
        goal: target.goal(),
    };

    let solution = bisection::solve(
        &model,
        &problem,
        config.bracket(),
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Non-finite values only arise far above any root since every
            // target grows with temperature.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(IdealGasError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.temperature)
}
