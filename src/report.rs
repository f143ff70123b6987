//! Plain-text property reports.
//!
//! A [`StateReporter`] collects named values in insertion order and renders
//! them as aligned `name = value unit` lines.

pub(crate) mod format;

use std::collections::BTreeMap;

pub use format::Format;

use crate::{thermals::HeatCapacity, value::Attribute};

/// Units of the packed heat capacity coefficients `a` through `d`.
pub const CP_UNITS: [&str; 4] = ["J/mol-K", "J/mol-K^2", "J/mol-K^3", "J/mol-K^4"];

/// Formats used for packed heat capacity coefficients.
pub const CP_FORMATS: [Format; 4] = [
    Format::Fixed { precision: 2 },
    Format::Scientific { precision: 3 },
    Format::Scientific { precision: 3 },
    Format::Scientific { precision: 3 },
];

/// A reported value.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Attribute> for ReportValue {
    fn from(value: &Attribute) -> Self {
        match value.as_scalar() {
            Some(x) => Self::Number(x),
            None => Self::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    value: ReportValue,
    unit: Option<String>,
    format: Option<Format>,
}

impl Item {
    fn new(value: ReportValue, unit: Option<&str>, format: Option<Format>) -> Self {
        Self {
            value,
            unit: unit.filter(|u| !u.is_empty()).map(str::to_owned),
            format,
        }
    }

    fn render(&self) -> String {
        let value = match (&self.value, self.format) {
            (ReportValue::Number(x), Some(format)) => format.render(*x),
            (ReportValue::Number(x), None) => x.to_string(),
            (ReportValue::Text(text), _) => text.clone(),
        };
        match &self.unit {
            Some(unit) => format!("{value} {unit}"),
            None => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Single(Item),
    Multiple(Vec<Item>),
}

/// Collects named values and renders them as an aligned report.
///
/// ```
/// use thermostate::report::{Format, StateReporter};
///
/// let mut reporter = StateReporter::new();
/// reporter.add_property("T", 300.0, Some("K"), Some(Format::general(5)));
/// reporter.add_property("Pv", 2494.34, Some("J/mol"), None);
/// assert_eq!(reporter.report(), "T  =   300 K\nPv = 2494.34 J/mol");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateReporter {
    properties: Vec<(String, Entry)>,
}

impl StateReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-valued property, replacing any existing one in place.
    pub fn add_property(
        &mut self,
        name: &str,
        value: impl Into<ReportValue>,
        unit: Option<&str>,
        format: Option<Format>,
    ) {
        let entry = Entry::Single(Item::new(value.into(), unit, format));
        match self.position(name) {
            Some(index) => self.properties[index].1 = entry,
            None => self.properties.push((name.to_owned(), entry)),
        }
    }

    /// Appends a value to a property, making it multi-valued.
    pub fn add_value_to_property(
        &mut self,
        name: &str,
        value: impl Into<ReportValue>,
        unit: Option<&str>,
        format: Option<Format>,
    ) {
        let item = Item::new(value.into(), unit, format);
        let Some(index) = self.position(name) else {
            self.properties
                .push((name.to_owned(), Entry::Multiple(vec![item])));
            return;
        };

        let entry = &mut self.properties[index].1;
        let items = match std::mem::replace(entry, Entry::Multiple(Vec::new())) {
            Entry::Single(first) => vec![first, item],
            Entry::Multiple(mut items) => {
                items.push(item);
                items
            }
        };
        *entry = Entry::Multiple(items);
    }

    /// The value of `name`; `index` selects among multiple values.
    #[must_use]
    pub fn get_value(&self, name: &str, index: usize) -> Option<&ReportValue> {
        let (_, entry) = &self.properties[self.position(name)?];
        match entry {
            Entry::Single(item) => Some(&item.value),
            Entry::Multiple(items) => items.get(index).map(|item| &item.value),
        }
    }

    /// Adds a heat capacity: `Cp` for a constant, `Cpa` through `Cpd` for a
    /// polynomial.
    pub fn pack_cp(&mut self, cp: &HeatCapacity, formats: &[Format; 4]) {
        match *cp {
            HeatCapacity::Constant(a) => {
                self.add_value_to_property("Cp", a, Some(CP_UNITS[0]), Some(formats[0]));
            }
            HeatCapacity::Polynomial { .. } => {
                let labels = ["a", "b", "c", "d"];
                for (i, value) in cp.coefficients().into_iter().enumerate() {
                    let name = format!("Cp{}", labels[i]);
                    self.add_value_to_property(&name, value, Some(CP_UNITS[i]), Some(formats[i]));
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Renders every property on its own line.
    #[must_use]
    pub fn report(&self) -> String {
        self.report_with_notes(&BTreeMap::new())
    }

    /// Renders every property, appending `(note)` to annotated names.
    #[must_use]
    pub fn report_with_notes(&self, notes: &BTreeMap<&str, &str>) -> String {
        let width = self
            .properties
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);

        let lines: Vec<String> = self
            .properties
            .iter()
            .map(|(name, entry)| {
                let mut line = format!("{name:<width$}");
                let items = match entry {
                    Entry::Single(item) => std::slice::from_ref(item),
                    Entry::Multiple(items) => items.as_slice(),
                };
                for item in items {
                    line.push_str(" = ");
                    line.push_str(&item.render());
                }
                if let Some(note) = notes.get(name.as_str()) {
                    line.push_str(" (");
                    line.push_str(note);
                    line.push(')');
                }
                line.trim_end().to_owned()
            })
            .collect();
        lines.join("\n")
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|(n, _)| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_names() {
        let mut reporter = StateReporter::new();
        reporter.add_property("T", 300.0, Some("K"), Some(Format::general(5)));
        reporter.add_property("Cpa", 29.0, Some("J/mol-K"), Some(CP_FORMATS[0]));
        reporter.add_property("note", "dry air", None, None);

        assert_eq!(
            reporter.report(),
            "T    =   300 K\nCpa  = 29.00 J/mol-K\nnote = dry air"
        );
    }

    #[test]
    fn replacing_keeps_position() {
        let mut reporter = StateReporter::new();
        reporter.add_property("a", 1.0, None, None);
        reporter.add_property("b", 2.0, None, None);
        reporter.add_property("a", 3.0, None, None);

        assert_eq!(reporter.len(), 2);
        assert_eq!(reporter.report(), "a = 3\nb = 2");
    }

    #[test]
    fn multiple_values() {
        let mut reporter = StateReporter::new();
        reporter.add_property("Cp", 29.0, Some("J/mol-K"), None);
        reporter.add_value_to_property("Cp", 30.5, Some("J/mol-K"), None);

        assert_eq!(reporter.get_value("Cp", 1), Some(&ReportValue::Number(30.5)));
        assert_eq!(reporter.get_value("Cp", 2), None);
        assert_eq!(reporter.get_value("missing", 0), None);
        assert_eq!(reporter.report(), "Cp = 29 J/mol-K = 30.5 J/mol-K");
    }

    #[test]
    fn packs_polynomial_heat_capacity() {
        let mut reporter = StateReporter::new();
        reporter.pack_cp(&HeatCapacity::from([29.0, 1.5e-3, 0.0, -2.0e-9]), &CP_FORMATS);

        assert_eq!(
            reporter.report(),
            "Cpa = 29.00 J/mol-K\n\
             Cpb = 1.500e-03 J/mol-K^2\n\
             Cpc = 0.000e+00 J/mol-K^3\n\
             Cpd = -2.000e-09 J/mol-K^4"
        );
    }

    #[test]
    fn notes_follow_values() {
        let mut reporter = StateReporter::new();
        reporter.add_property("x", 0.25, None, Some(Format::general(5)));
        let notes = BTreeMap::from([("x", "mass fraction vapor")]);

        assert_eq!(
            reporter.report_with_notes(&notes),
            "x =  0.25 (mass fraction vapor)"
        );
    }
}
