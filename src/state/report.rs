use std::collections::BTreeMap;

use crate::{
    model::Resolve,
    registry::{PV_FORMAT, PV_SYMBOL, PV_UNIT, Property, STATE_VARIABLES},
    report::{CP_FORMATS, Format, ReportValue, StateReporter},
    thermals::{HEAT_CAPACITY, HeatCapacity},
};

use super::{State, StateVariables};

const QUALITY_NOTE: &str = "mass fraction vapor";

struct Field {
    value: ReportValue,
    unit: Option<&'static str>,
    format: Option<Format>,
}

impl<M: Resolve> State<M> {
    /// Renders the state as an aligned text report.
    ///
    /// Lists the primary variables and `Pv`, then `additional_fields`
    /// (calculated properties or attributes), then the named `parameters`,
    /// with a heat capacity packed into its coefficients. A saturated state
    /// also lists the liquid and vapor values of every field except `T` and
    /// `P`, suffixed `L` and `V`. Unknown values are omitted.
    #[must_use]
    pub fn report(&self, additional_fields: &[&str], parameters: &[&str]) -> String {
        let mut fields: Vec<&str> = STATE_VARIABLES.iter().map(|p| p.symbol()).collect();
        fields.push(PV_SYMBOL);
        for field in additional_fields {
            if !fields.contains(field) {
                fields.push(field);
            }
        }

        let mut reporter = StateReporter::new();
        for field in &fields {
            self.add_field(&mut reporter, field, field);
        }

        for name in parameters {
            let Some(value) = self.attribute(name) else {
                continue;
            };
            match HeatCapacity::try_from(value) {
                Ok(cp) if *name == HEAT_CAPACITY => reporter.pack_cp(&cp, &CP_FORMATS),
                _ => reporter.add_property(name, value, None, None),
            }
        }

        let mut notes = BTreeMap::new();
        if let Some(x) = self.magnitude(Property::Quality) {
            let quality = Property::Quality;
            reporter.add_property(quality.symbol(), x, None, Some(quality.format()));
            notes.insert(quality.symbol(), QUALITY_NOTE);

            if x > 0.0 && x < 1.0 {
                let phases = [("L", self.liquid()), ("V", self.vapor())];
                for (suffix, phase) in phases {
                    let Some(phase) = phase else { continue };
                    for field in &fields {
                        if matches!(*field, "T" | "P") {
                            continue;
                        }
                        phase.add_field(&mut reporter, field, &format!("{field}{suffix}"));
                    }
                }
            }
        }

        reporter.report_with_notes(&notes)
    }

    fn add_field(&self, reporter: &mut StateReporter, field: &str, label: &str) {
        if let Some(Field {
            value,
            unit,
            format,
        }) = self.field(field)
        {
            reporter.add_property(label, value, unit, format);
        }
    }

    fn field(&self, name: &str) -> Option<Field> {
        if name == PV_SYMBOL {
            return Some(Field {
                value: self.pv_magnitude()?.into(),
                unit: Some(PV_UNIT),
                format: Some(PV_FORMAT),
            });
        }

        if let Ok(property) = name.parse::<Property>() {
            return Some(Field {
                value: self.magnitude(property)?.into(),
                unit: Some(property.unit()),
                format: Some(property.format()),
            });
        }

        if let Some(entry) = self.model.calculated().iter().find(|c| c.name == name) {
            let value = match self.record.calculated.get(entry.name) {
                Some(value) => *value,
                None => (entry.compute)(&self.model, self)?,
            };
            return Some(Field {
                value: value.into(),
                unit: Some(entry.unit),
                format: Some(entry.format),
            });
        }

        self.attribute(name).map(|value| Field {
            value: value.into(),
            unit: None,
            format: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        registry::Property,
        state::{
            State,
            fixtures::{Lever, TestGas, V_LIQUID, V_VAPOR},
        },
    };

    #[test]
    fn lists_primary_variables_and_pv() {
        let state = State::builder(TestGas::new())
            .with(Property::Temperature, 300.0)
            .with(Property::Pressure, 100_000.0)
            .build()
            .unwrap();
        let report = state.report(&[], &[]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "T  =   300 K");
        assert_eq!(lines[1], "P  =  100000 Pa");
        assert!(lines[2].starts_with("v  =  0.0249434"));
        assert_eq!(lines[3], "s  =     10 J/mol-K");
        assert_eq!(lines[4], "h  =   1000 J/mol");
        assert!(lines[6].starts_with("Pv =  2494.34"));
    }

    #[test]
    fn omits_unknown_values() {
        let mut state = State::new(TestGas::new());
        state.set(Property::Temperature, 300.0).unwrap();

        assert_eq!(state.report(&[], &[]), "T =   300 K");
    }

    #[test]
    fn includes_calculated_fields_and_parameters() {
        let mut state = State::builder(TestGas::new())
            .with(Property::Temperature, 300.0)
            .with(Property::Pressure, 100_000.0)
            .build()
            .unwrap();
        state.set_attribute("Cp", [29.0, 1.0e-3, 0.0, 0.0]).unwrap();
        state.set_attribute("label", "inlet").unwrap();

        let report = state.report(&["RT"], &["Cp", "label", "missing"]);
        assert!(report.contains("\nRT    =  2494.34 J/mol"));
        assert!(report.contains("\nCpa   = 29.00 J/mol-K"));
        assert!(report.contains("\nCpb   = 1.000e-03 J/mol-K^2"));
        assert!(report.ends_with("\nlabel = inlet"));
        assert!(!report.contains("missing"));
    }

    #[test]
    fn keyed_heat_capacity_packs_like_a_list() {
        let mut state = State::builder(TestGas::new())
            .with(Property::Temperature, 300.0)
            .with(Property::Pressure, 100_000.0)
            .build()
            .unwrap();
        state.set_attribute("Cp", [29.0, 1.0e-3, 0.0, 0.0]).unwrap();
        let listed = state.report(&[], &["Cp"]);

        state
            .set_attribute("Cp", [("a", 29.0), ("b", 1.0e-3), ("c", 0.0), ("d", 0.0)])
            .unwrap();
        let keyed = state.report(&[], &["Cp"]);

        assert!(keyed.contains("\nCpa = 29.00 J/mol-K"));
        assert_eq!(keyed, listed);
    }

    #[test]
    fn saturated_states_list_phase_values() {
        let v = 0.25 * V_LIQUID + 0.75 * V_VAPOR;
        let state = State::builder(Lever)
            .with(Property::Temperature, 373.15)
            .with(Property::Volume, v)
            .build()
            .unwrap();
        let report = state.report(&[], &[]);

        assert!(report.contains("x   =  0.75 (mass fraction vapor)"));
        assert!(report.contains("vL  =  1e-05 m^3/mol"));
        assert!(report.contains("vV  =   0.01 m^3/mol"));
        assert!(report.contains("hV  =  40000 J/mol"));
        assert!(!report.contains("TL"));
        assert!(report.contains("PvV = "));
    }
}
