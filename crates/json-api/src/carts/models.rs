//! Cart Models

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mealbox::carts::{Cart, CartItem};

/// A cart line with its price snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub id: String,
    pub recipe_id: Uuid,
    pub name: String,

    /// Unit price in kobo when the line was added
    pub price: u64,
    pub quantity: u32,
    pub packaging: Option<String>,
    pub image_url: Option<String>,

    /// `price * quantity`
    pub line_total: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            line_total: item.line_total(),
            id: item.id,
            recipe_id: item.recipe_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            packaging: item.packaging,
            image_url: item.image_url,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals in kobo
    pub subtotal: u64,

    /// Total units across all lines
    pub item_count: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            id: cart.id,
            user_id: cart.user_id,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

fn one() -> u32 {
    1
}

/// Body of `POST /carts/{user}/items`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub recipe_id: Uuid,

    /// Defaults to one
    #[serde(default = "one")]
    pub quantity: u32,

    #[serde(default)]
    pub packaging: Option<String>,
}

/// Body of `PUT /carts/{user}/items/{item}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// A line from a browser-held guest cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestCartItemBody {
    /// Line id, generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub recipe_id: Uuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl GuestCartItemBody {
    pub(crate) fn into_item(self, at: Timestamp) -> CartItem {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("{}-{}", self.recipe_id, at.as_millisecond()));

        CartItem {
            id,
            recipe_id: self.recipe_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            packaging: self.packaging,
            image_url: self.image_url,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Body of `POST /carts/{user}/merge`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct MergeCartRequest {
    pub items: Vec<GuestCartItemBody>,
}
