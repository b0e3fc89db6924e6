//! Recipe Models

use uuid::Uuid;

/// Recipe Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub uuid: Uuid,
    pub name: String,
    pub price: u64,
    pub image_url: Option<String>,
}
