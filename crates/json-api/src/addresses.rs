//! Delivery address bodies shared by order, checkout and email endpoints.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use mealbox::{delivery::DeliveryAddress, validation::ValidationError};

/// Delivery destination and contact details.
///
/// Absent fields deserialize as blank so validation can name them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddressBody {
    /// Recipient name
    pub name: String,

    /// Recipient email
    pub email: String,

    /// Recipient phone number
    pub phone: String,

    /// Street address
    pub street: String,

    /// City
    pub city: String,

    /// State
    pub state: String,

    /// Local Government Area
    pub lga: String,
}

impl AddressBody {
    /// Validate into a domain address, naming the first missing field.
    pub(crate) fn into_address(self) -> Result<DeliveryAddress, ValidationError> {
        let address = DeliveryAddress::from(self);

        address.validate()?;

        Ok(address)
    }
}

impl From<AddressBody> for DeliveryAddress {
    fn from(body: AddressBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            street: body.street,
            city: body.city,
            state: body.state,
            lga: body.lga,
        }
    }
}

impl From<DeliveryAddress> for AddressBody {
    fn from(address: DeliveryAddress) -> Self {
        Self {
            name: address.name,
            email: address.email,
            phone: address.phone,
            street: address.street,
            city: address.city,
            state: address.state,
            lga: address.lga,
        }
    }
}
