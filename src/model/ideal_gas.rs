//! Ideal gas resolution with a temperature-dependent heat capacity.
//!
//! Properties are measured from a reference state `(T_ref, P_ref)` where the
//! enthalpy and entropy take given values:
//!
//! - `h = h_ref + ∫ cp dT`
//! - `u = h - R T`
//! - `s = s_ref + ∫ cp / T dT - R ln(P / P_ref)`
//! - `v = R T / P`
//!
//! The heat capacity comes from the state's `Cp` parameter. Temperatures not
//! given directly (or through `P v = R T`) are found by bisection.

mod config;
mod error;
mod problem;

pub use config::InversionConfig;
pub use error::IdealGasError;

use tracing::{debug, warn};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    molar_energy::joule_per_mole,
    molar_heat_capacity::joule_per_kelvin_mole,
    pressure::{bar, pascal},
    thermodynamic_temperature::kelvin,
};

use crate::{
    gas_constant::R_SI,
    registry::Property,
    report::Format,
    state::{Resolver, State, StateVariables},
    support::{
        constraint::{Constraint, StrictlyPositive},
        units::{MolarEnthalpy, MolarEntropy},
    },
    thermals::{HEAT_CAPACITY, HeatCapacity},
};

use super::{Calculated, Resolve};

use problem::Target;

/// The state at which enthalpy and entropy take their reference values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: MolarEnthalpy,
    pub entropy: MolarEntropy,
}

impl IdealGasReference {
    /// 298.15 K and 1 bar, with zero enthalpy and entropy.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(298.15),
            pressure: Pressure::new::<bar>(1.0),
            enthalpy: MolarEnthalpy::new::<joule_per_mole>(0.0),
            entropy: MolarEntropy::new::<joule_per_kelvin_mole>(0.0),
        }
    }
}

impl Default for IdealGasReference {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ideal gas resolution strategy.
///
/// Declares the single parameter `Cp`. Any input pair that fixes both
/// temperature and pressure resolves; pairs drawn only from `T`, `h` and `u`
/// do not, since those depend on temperature alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    t_ref: f64,
    p_ref: f64,
    h_ref: f64,
    s_ref: f64,
    config: InversionConfig,
}

impl IdealGas {
    /// Creates a strategy measured from `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`IdealGasError::Reference`] if the reference temperature or
    /// pressure is not strictly positive.
    pub fn new(reference: IdealGasReference) -> Result<Self, IdealGasError> {
        let t_ref = reference.temperature.get::<kelvin>();
        let p_ref = reference.pressure.get::<pascal>();
        StrictlyPositive::check(&t_ref).map_err(|source| IdealGasError::Reference {
            context: "temperature",
            source,
        })?;
        StrictlyPositive::check(&p_ref).map_err(|source| IdealGasError::Reference {
            context: "pressure",
            source,
        })?;

        Ok(Self {
            t_ref,
            p_ref,
            h_ref: reference.enthalpy.get::<joule_per_mole>(),
            s_ref: reference.entropy.get::<joule_per_kelvin_mole>(),
            config: InversionConfig::default(),
        })
    }

    /// Creates a strategy measured from [`IdealGasReference::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            t_ref: 298.15,
            p_ref: 1.0e5,
            h_ref: 0.0,
            s_ref: 0.0,
            config: InversionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: InversionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &InversionConfig {
        &self.config
    }

    /// Molar enthalpy at `t` kelvin, in J/mol.
    #[must_use]
    pub fn enthalpy(&self, cp: &HeatCapacity, t: f64) -> f64 {
        self.h_ref + cp.enthalpy_change(self.t_ref, t)
    }

    /// Molar entropy at `t` kelvin and `p` pascal, in J/(mol·K).
    #[must_use]
    pub fn entropy(&self, cp: &HeatCapacity, t: f64, p: f64) -> f64 {
        self.s_ref + cp.entropy_change(self.t_ref, t) - R_SI * (p / self.p_ref).ln()
    }

    /// Pressure at which the entropy at `t` kelvin equals `s`, in pascal.
    #[must_use]
    pub fn pressure_from_entropy(&self, cp: &HeatCapacity, t: f64, s: f64) -> f64 {
        self.p_ref * ((self.s_ref + cp.entropy_change(self.t_ref, t) - s) / R_SI).exp()
    }

    fn temperature(&self, known: &Known, cp: &HeatCapacity) -> Result<Option<f64>, IdealGasError> {
        if let Some(t) = known.t {
            return Ok(Some(t));
        }
        if let (Some(p), Some(v)) = (known.p, known.v) {
            return Ok(Some(p * v / R_SI));
        }

        let target = match (known.h, known.u, known.s) {
            (Some(h), _, _) => Target::Enthalpy(h),
            (_, Some(u), _) => Target::InternalEnergy(u),
            (_, _, Some(entropy)) => match (known.p, known.v) {
                (Some(pressure), _) => Target::Entropy { entropy, pressure },
                (_, Some(volume)) => Target::EntropyAtVolume { entropy, volume },
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        problem::solve_temperature(self, cp, target).map(Some)
    }

    fn pressure(&self, known: &Known, cp: &HeatCapacity, t: f64) -> Option<f64> {
        if let Some(p) = known.p {
            return Some(p);
        }
        if let Some(v) = known.v {
            return Some(R_SI * t / v);
        }
        known.s.map(|s| self.pressure_from_entropy(cp, t, s))
    }
}

impl Default for IdealGas {
    fn default() -> Self {
        Self::standard()
    }
}

/// Input values of the pair being resolved.
#[derive(Debug, Default)]
struct Known {
    t: Option<f64>,
    p: Option<f64>,
    v: Option<f64>,
    s: Option<f64>,
    h: Option<f64>,
    u: Option<f64>,
}

impl Known {
    fn from_pair(state: &Resolver<'_, IdealGas>, pair: [Property; 2]) -> Self {
        let mut known = Self::default();
        for property in pair {
            let value = state.magnitude(property);
            match property {
                Property::Temperature => known.t = value,
                Property::Pressure => known.p = value,
                Property::Volume => known.v = value,
                Property::Entropy => known.s = value,
                Property::Enthalpy => known.h = value,
                Property::InternalEnergy => known.u = value,
                Property::Quality => {}
            }
        }
        known
    }
}

const CALCULATED: &[Calculated<IdealGas>] = &[
    Calculated {
        name: "cp",
        unit: "J/mol-K",
        format: Format::general(6),
        compute: isobaric_heat_capacity,
    },
    Calculated {
        name: "cv",
        unit: "J/mol-K",
        format: Format::general(6),
        compute: isochoric_heat_capacity,
    },
    Calculated {
        name: "Z",
        unit: "",
        format: Format::general(6),
        compute: compressibility,
    },
];

fn isobaric_heat_capacity(_gas: &IdealGas, state: &State<IdealGas>) -> Option<f64> {
    let cp = HeatCapacity::try_from(state.attribute(HEAT_CAPACITY)?).ok()?;
    Some(cp.at(state.magnitude(Property::Temperature)?))
}

fn isochoric_heat_capacity(gas: &IdealGas, state: &State<IdealGas>) -> Option<f64> {
    Some(isobaric_heat_capacity(gas, state)? - R_SI)
}

fn compressibility(_gas: &IdealGas, state: &State<IdealGas>) -> Option<f64> {
    Some(state.pv_magnitude()? / (R_SI * state.magnitude(Property::Temperature)?))
}

impl Resolve for IdealGas {
    type Error = IdealGasError;

    fn parameters(&self) -> &[&'static str] {
        &[HEAT_CAPACITY]
    }

    fn calculated(&self) -> &[Calculated<Self>] {
        CALCULATED
    }

    fn resolve(&self, state: &mut Resolver<'_, Self>) -> Result<bool, Self::Error> {
        let Some((first, second)) = state.pair() else {
            debug!(state = state.name(), "ideal gas needs exactly two inputs");
            return Ok(false);
        };
        let Some(cp) = state
            .attribute(HEAT_CAPACITY)
            .map(HeatCapacity::try_from)
            .transpose()?
        else {
            debug!(state = state.name(), "heat capacity not supplied");
            return Ok(false);
        };

        let known = Known::from_pair(state, [first, second]);
        let Some(t) = self.temperature(&known, &cp)? else {
            warn!(state = state.name(), %first, %second, "pair does not fix temperature");
            return Ok(false);
        };
        let Some(p) = self.pressure(&known, &cp, t) else {
            warn!(state = state.name(), %first, %second, "pair does not fix pressure");
            return Ok(false);
        };
        if StrictlyPositive::check(&t).is_err() || StrictlyPositive::check(&p).is_err() {
            warn!(state = state.name(), t, p, "non-physical temperature or pressure");
            return Ok(false);
        }

        let h = self.enthalpy(&cp, t);
        let computed = [
            (Property::Temperature, t),
            (Property::Pressure, p),
            (Property::Volume, R_SI * t / p),
            (Property::Entropy, self.entropy(&cp, t, p)),
            (Property::Enthalpy, h),
            (Property::InternalEnergy, h - R_SI * t),
        ];
        for (property, value) in computed {
            if property != first && property != second {
                state.set(property, value)?;
            }
        }

        debug!(state = state.name(), t, p, "ideal gas state resolved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::state::{StateError, Status};

    const CP: f64 = 29.1;

    fn gas_state(first: (Property, f64), second: (Property, f64)) -> State<IdealGas> {
        State::builder(IdealGas::standard())
            .with_attribute(HEAT_CAPACITY, CP)
            .with(first.0, first.1)
            .with(second.0, second.1)
            .build()
            .unwrap()
    }

    fn reference_state() -> State<IdealGas> {
        gas_state((Property::Temperature, 400.0), (Property::Pressure, 2.0e5))
    }

    #[test]
    fn temperature_and_pressure() {
        let state = reference_state();
        assert!(state.is_complete());

        let h = CP * (400.0 - 298.15);
        let s = CP * (400.0_f64 / 298.15).ln() - R_SI * 2.0_f64.ln();
        assert_relative_eq!(state.magnitude(Property::Enthalpy).unwrap(), h, epsilon = 1e-9);
        assert_relative_eq!(state.magnitude(Property::Entropy).unwrap(), s, epsilon = 1e-12);
        assert_relative_eq!(
            state.magnitude(Property::InternalEnergy).unwrap(),
            h - R_SI * 400.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            state.magnitude(Property::Volume).unwrap(),
            R_SI * 400.0 / 2.0e5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn every_fixing_pair_recovers_the_state() {
        let reference = reference_state();
        let value = |p| reference.magnitude(p).unwrap();

        let pairs = [
            (Property::Temperature, Property::Volume),
            (Property::Pressure, Property::Volume),
            (Property::Temperature, Property::Entropy),
            (Property::Pressure, Property::Enthalpy),
            (Property::Pressure, Property::InternalEnergy),
            (Property::Volume, Property::Enthalpy),
            (Property::Volume, Property::InternalEnergy),
            (Property::Pressure, Property::Entropy),
            (Property::Volume, Property::Entropy),
            (Property::Enthalpy, Property::Entropy),
            (Property::InternalEnergy, Property::Entropy),
        ];
        for (a, b) in pairs {
            let state = gas_state((a, value(a)), (b, value(b)));
            assert!(state.is_complete(), "pair ({a}, {b}) did not resolve");
            assert_relative_eq!(
                state.magnitude(Property::Temperature).unwrap(),
                400.0,
                max_relative = 1e-8
            );
            assert_relative_eq!(
                state.magnitude(Property::Pressure).unwrap(),
                2.0e5,
                max_relative = 1e-8
            );
        }
    }

    #[test]
    fn temperature_only_pairs_do_not_resolve() {
        let reference = reference_state();
        let value = |p| reference.magnitude(p).unwrap();

        for (a, b) in [
            (Property::Temperature, Property::Enthalpy),
            (Property::Temperature, Property::InternalEnergy),
            (Property::Enthalpy, Property::InternalEnergy),
        ] {
            let state = gas_state((a, value(a)), (b, value(b)));
            assert_eq!(state.status(), Status::Unresolved, "pair ({a}, {b})");
            assert_eq!(state.magnitude(Property::Volume), None);
        }
    }

    #[test]
    fn waits_for_heat_capacity() {
        let mut state = State::new(IdealGas::standard());
        state.set(Property::Temperature, 300.0).unwrap();
        state.set(Property::Pressure, 1.0e5).unwrap();
        assert!(!state.is_parameterized());
        assert_eq!(state.magnitude(Property::Volume), None);

        state.set_attribute(HEAT_CAPACITY, [29.0, 1.0e-3, 0.0, 0.0]).unwrap();
        assert!(state.is_complete());
        let h = 29.0 * 1.85 + 0.5e-3 * (300.0_f64.powi(2) - 298.15_f64.powi(2));
        assert_relative_eq!(state.magnitude(Property::Enthalpy).unwrap(), h, epsilon = 1e-9);
    }

    #[test]
    fn malformed_heat_capacity_is_an_error() {
        let mut state = State::new(IdealGas::standard());
        state.set(Property::Temperature, 300.0).unwrap();
        state.set(Property::Pressure, 1.0e5).unwrap();

        let err = state.set_attribute(HEAT_CAPACITY, [1.0, 2.0]).unwrap_err();
        assert!(matches!(err, StateError::Resolve { .. }));
        assert!(!state.is_complete());
    }

    #[test]
    fn calculated_properties() {
        let mut state = reference_state();

        assert_relative_eq!(state.calculated("cp").unwrap().unwrap(), CP);
        assert_relative_eq!(state.calculated("cv").unwrap().unwrap(), CP - R_SI);
        assert_relative_eq!(state.calculated("Z").unwrap().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn custom_reference() {
        let reference = IdealGasReference {
            enthalpy: MolarEnthalpy::new::<joule_per_mole>(500.0),
            ..IdealGasReference::standard()
        };
        let gas = IdealGas::new(reference).unwrap();
        assert_relative_eq!(gas.enthalpy(&HeatCapacity::Constant(CP), 298.15), 500.0);

        let invalid = IdealGasReference {
            pressure: Pressure::new::<pascal>(0.0),
            ..IdealGasReference::standard()
        };
        assert!(matches!(
            IdealGas::new(invalid),
            Err(IdealGasError::Reference {
                context: "pressure",
                ..
            })
        ));
    }

    #[test]
    fn standard_matches_standard_reference() {
        let gas = IdealGas::new(IdealGasReference::standard()).unwrap();
        assert_eq!(gas, IdealGas::standard());
    }

    #[test]
    fn entropy_inverts_to_pressure() {
        let gas = IdealGas::standard();
        let cp = HeatCapacity::Constant(CP);
        let s = gas.entropy(&cp, 350.0, 3.0e5);
        assert_relative_eq!(
            gas.pressure_from_entropy(&cp, 350.0, s),
            3.0e5,
            max_relative = 1e-12
        );
    }
}
