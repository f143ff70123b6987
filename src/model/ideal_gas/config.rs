use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Solver configuration for temperature inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionConfig {
    /// Lower end of the temperature search bracket.
    pub min_temperature: ThermodynamicTemperature,

    /// Upper end of the temperature search bracket.
    pub max_temperature: ThermodynamicTemperature,

    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the temperature search variable.
    pub temp_tol: TemperatureInterval,

    /// Absolute tolerance for the property residual, in the target's
    /// default unit.
    pub residual_tol: f64,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            min_temperature: ThermodynamicTemperature::new::<kelvin>(1.0),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(6000.0),
            max_iters: 200,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-10),
            residual_tol: 1e-9,
        }
    }
}

impl InversionConfig {
    pub(super) fn bracket(&self) -> [f64; 2] {
        [
            self.min_temperature.get::<kelvin>(),
            self.max_temperature.get::<kelvin>(),
        ]
    }

    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}
