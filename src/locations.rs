//! Location Cost Table
//!
//! A two-level `state -> LGA -> cost` map of delivery fee overrides. Keys are
//! kept exactly as entered: "Lagos" and "lagos" are different states.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    delivery::Destination,
    validation::{ValidationError, non_negative, require_text},
};

/// One leaf of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCost {
    /// State name.
    pub state: String,

    /// Local Government Area within the state.
    pub lga: String,

    /// Delivery cost in minor units.
    pub cost: u64,
}

impl LocationCost {
    /// Validate admin input into a leaf.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when `state` or `lga` is blank or `cost` is negative.
    pub fn new(
        state: impl Into<String>,
        lga: impl Into<String>,
        cost: i64,
    ) -> Result<Self, ValidationError> {
        let state = state.into();
        let lga = lga.into();

        require_text("state", &state)?;
        require_text("lga", &lga)?;

        let cost = non_negative("cost", cost)?;

        Ok(Self { state, lga, cost })
    }

    /// The destination this leaf prices.
    pub fn destination(&self) -> Destination {
        Destination::new(self.state.clone(), self.lga.clone())
    }
}

/// Delivery cost overrides keyed by state, then LGA.
///
/// A state is present only while it has at least one LGA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCostTable {
    costs: BTreeMap<String, BTreeMap<String, u64>>,
}

impl LocationCostTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact lookup. `None` means "no override", which is distinct from a zero cost.
    pub fn cost(&self, state: &str, lga: &str) -> Option<u64> {
        self.costs.get(state)?.get(lga).copied()
    }

    /// Lookup by destination.
    pub fn cost_for(&self, destination: &Destination) -> Option<u64> {
        self.cost(&destination.state, &destination.lga)
    }

    /// States with at least one LGA, in lexicographic order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.costs.keys().map(String::as_str)
    }

    /// LGAs under `state`, in lexicographic order. Empty if the state is absent.
    pub fn lgas<'a>(&'a self, state: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.costs
            .get(state)
            .into_iter()
            .flat_map(|lgas| lgas.keys().map(String::as_str))
    }

    /// Insert or replace the cost for one leaf, creating the state branch if needed.
    ///
    /// Returns the previous cost, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank keys or a negative cost. The table is
    /// unchanged on error.
    pub fn upsert(
        &mut self,
        state: &str,
        lga: &str,
        cost: i64,
    ) -> Result<Option<u64>, ValidationError> {
        let leaf = LocationCost::new(state, lga, cost)?;

        Ok(self.insert(leaf))
    }

    /// Insert an already validated leaf.
    pub fn insert(&mut self, leaf: LocationCost) -> Option<u64> {
        self.costs
            .entry(leaf.state)
            .or_default()
            .insert(leaf.lga, leaf.cost)
    }

    /// Remove one leaf, pruning the state if it was its last LGA.
    ///
    /// Returns the removed cost, or `None` when the leaf did not exist.
    pub fn remove(&mut self, state: &str, lga: &str) -> Option<u64> {
        let lgas = self.costs.get_mut(state)?;
        let removed = lgas.remove(lga);

        if lgas.is_empty() {
            self.costs.remove(state);
        }

        removed
    }

    /// Every leaf, ordered by `(state, lga)`.
    pub fn locations(&self) -> Vec<LocationCost> {
        self.costs
            .iter()
            .flat_map(|(state, lgas)| {
                lgas.iter().map(move |(lga, cost)| LocationCost {
                    state: state.clone(),
                    lga: lga.clone(),
                    cost: *cost,
                })
            })
            .collect()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.costs.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no leaves.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl FromIterator<LocationCost> for LocationCostTable {
    fn from_iter<I: IntoIterator<Item = LocationCost>>(iter: I) -> Self {
        let mut table = Self::new();

        for leaf in iter {
            table.insert(leaf);
        }

        table
    }
}
