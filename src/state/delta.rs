use crate::registry::{Property, TRACKED_VARIABLES};

use super::StateVariables;

/// Differences `other - self` between two states.
///
/// A variable appears only when both states hold a value for it. The
/// pressure-volume product is included when both states can form it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delta {
    changes: Vec<(Property, f64)>,
    pv: Option<f64>,
}

impl Delta {
    pub(crate) fn between(from: &impl StateVariables, to: &impl StateVariables) -> Self {
        let changes = TRACKED_VARIABLES
            .into_iter()
            .filter_map(|p| Some((p, to.magnitude(p)? - from.magnitude(p)?)))
            .collect();
        let pv = to
            .pv_magnitude()
            .zip(from.pv_magnitude())
            .map(|(to, from)| to - from);
        Self { changes, pv }
    }

    /// Change in `property`, if both states hold it.
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        self.changes
            .iter()
            .find_map(|(p, d)| (*p == property).then_some(*d))
    }

    /// Change in the pressure-volume product, in J/mol.
    #[must_use]
    pub fn pv(&self) -> Option<f64> {
        self.pv
    }

    /// Iterates over the variable changes in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.changes.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.pv.is_none()
    }
}
