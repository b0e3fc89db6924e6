//! Delivery Costs Models

use std::str::FromStr;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mealbox::{
    locations::LocationCost,
    validation::{ValidationError, require_text},
};

use crate::fields::{as_text, read_field};

/// Read operations selectable with `?action=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeliveryCostsAction {
    States,
    Lgas,
    Cost,
    AllLocations,
}

impl FromStr for DeliveryCostsAction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "states" => Ok(Self::States),
            "lgas" => Ok(Self::Lgas),
            "cost" => Ok(Self::Cost),
            "all-locations" => Ok(Self::AllLocations),
            other => Err(ValidationError::Invalid {
                field: "action",
                reason: format!(
                    "expected one of states, lgas, cost, all-locations; got {other:?}"
                ),
            }),
        }
    }
}

/// One location and its delivery cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationCostResponse {
    /// State name
    pub state: String,

    /// Local Government Area
    pub lga: String,

    /// Delivery cost in kobo
    pub cost: u64,
}

impl From<LocationCost> for LocationCostResponse {
    fn from(location: LocationCost) -> Self {
        Self {
            state: location.state,
            lga: location.lga,
            cost: location.cost,
        }
    }
}

/// Cost lookup for one location. `cost` is null when no override exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CostLookupResponse {
    /// State name
    pub state: String,

    /// Local Government Area
    pub lga: String,

    /// Override cost in kobo, if any
    pub cost: Option<u64>,
}

/// The location a delete removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemovedLocationResponse {
    /// State name
    pub state: String,

    /// Local Government Area
    pub lga: String,
}

/// Payload of `GET /delivery-costs`, shaped by the requested action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum DeliveryCostsData {
    /// State or LGA names.
    Names(Vec<String>),

    /// Every location.
    Locations(Vec<LocationCostResponse>),

    /// A single lookup.
    Cost(CostLookupResponse),
}

/// Body for adding or updating a location.
///
/// Fields are read loosely so a wrongly typed value is reported by name.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationCostRequest {
    /// Admin making the change
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,

    /// State name
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub state: Option<Value>,

    /// Local Government Area
    #[serde(default)]
    #[salvo(schema(value_type = Option<String>))]
    pub lga: Option<Value>,

    /// Delivery cost in kobo, zero or more
    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub cost: Option<Value>,
}

impl LocationCostRequest {
    /// Unpack the required fields, naming the first one that is missing or mistyped.
    pub(crate) fn into_parts(self) -> Result<(String, String, i64), ValidationError> {
        let state = read_field(self.state, "state", "a string", as_text)?.unwrap_or_default();
        let lga = read_field(self.lga, "lga", "a string", as_text)?.unwrap_or_default();

        require_text("state", &state)?;
        require_text("lga", &lga)?;

        let cost = read_field(self.cost, "cost", "an integer", Value::as_i64)?
            .ok_or(ValidationError::Missing { field: "cost" })?;

        Ok((state, lga, cost))
    }
}
