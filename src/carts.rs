//! Carts
//!
//! Pre-order selections. Each line snapshots the recipe's name and price at the
//! time it was added; later recipe price changes do not reach existing lines.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No line with this id.
    #[error("cart item {0} not found")]
    ItemNotFound(String),
}

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Synthetic id: `{recipe_id}-{created_at in milliseconds}`.
    pub id: String,

    /// Recipe the line refers to.
    pub recipe_id: Uuid,

    /// Recipe name when added.
    pub name: String,

    /// Unit price in minor units when added.
    pub price: u64,

    /// Number of units, at least one.
    pub quantity: u32,

    /// Chosen packaging option, if any.
    pub packaging: Option<String>,

    /// Display image.
    pub image_url: Option<String>,

    /// When the line was added.
    pub created_at: Timestamp,

    /// When the line last changed.
    pub updated_at: Timestamp,
}

impl CartItem {
    fn same_selection(&self, recipe_id: Uuid, packaging: Option<&str>) -> bool {
        self.recipe_id == recipe_id && self.packaging.as_deref() == packaging
    }

    /// `price * quantity`, saturating.
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// A line to add, with its snapshot values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    /// Recipe to add.
    pub recipe_id: Uuid,

    /// Recipe name snapshot.
    pub name: String,

    /// Unit price snapshot.
    pub price: u64,

    /// Units to add.
    pub quantity: u32,

    /// Packaging option.
    pub packaging: Option<String>,

    /// Display image.
    pub image_url: Option<String>,
}

/// A cart owned by an account, or by an anonymous session when `user_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart id.
    pub id: Uuid,

    /// Owning account.
    pub user_id: Option<Uuid>,

    /// Lines in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    pub fn new(id: Uuid, user_id: Option<Uuid>) -> Self {
        Self {
            id,
            user_id,
            items: Vec::new(),
        }
    }

    /// Add a line, or increase the quantity of the line with the same recipe and packaging.
    ///
    /// Returns the resulting line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `item.quantity` is zero.
    pub fn add_item(&mut self, item: NewCartItem, at: Timestamp) -> Result<CartItem, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.same_selection(item.recipe_id, item.packaging.as_deref()))
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            existing.updated_at = at;

            return Ok(existing.clone());
        }

        let line = CartItem {
            id: self.next_item_id(item.recipe_id, at),
            recipe_id: item.recipe_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            packaging: item.packaging,
            image_url: item.image_url,
            created_at: at,
            updated_at: at,
        };

        self.items.push(line.clone());

        Ok(line)
    }

    fn next_item_id(&self, recipe_id: Uuid, at: Timestamp) -> String {
        let base = format!("{recipe_id}-{}", at.as_millisecond());
        let taken = |id: &str| self.items.iter().any(|line| line.id == id);

        if !taken(base.as_str()) {
            return base;
        }

        (1_u32..)
            .map(|suffix| format!("{base}-{suffix}"))
            .find(|id| !taken(id.as_str()))
            .unwrap_or(base)
    }

    /// Set a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for zero, or [`CartError::ItemNotFound`].
    pub fn set_quantity(
        &mut self,
        item_id: &str,
        quantity: u32,
        at: Timestamp,
    ) -> Result<CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;

        line.quantity = quantity;
        line.updated_at = at;

        Ok(line.clone())
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when no line has `item_id`.
    pub fn remove_item(&mut self, item_id: &str) -> Result<CartItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|line| line.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;

        Ok(self.items.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals, from the price snapshots.
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total, line| total.saturating_add(line.line_total()))
    }

    /// Total number of units across lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recipe ids, one entry per line, in line order.
    pub fn recipe_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|line| line.recipe_id).collect()
    }

    /// Fold a guest cart's lines into this one.
    ///
    /// Lines matching on recipe and packaging have their quantities summed and keep
    /// this cart's price snapshot. Other guest lines are appended as they are.
    /// Guest lines with a zero quantity are ignored.
    pub fn merge_guest_items(&mut self, guest: Vec<CartItem>, at: Timestamp) {
        for line in guest.into_iter().filter(|line| line.quantity > 0) {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|existing| existing.same_selection(line.recipe_id, line.packaging.as_deref()))
            {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                existing.updated_at = at;
                continue;
            }

            let id = if self.items.iter().any(|existing| existing.id == line.id) {
                self.next_item_id(line.recipe_id, at)
            } else {
                line.id
            };

            self.items.push(CartItem { id, ..line });
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn at(value: &str) -> TestResult<Timestamp> {
        Ok(value.parse()?)
    }

    fn jollof(recipe_id: Uuid, quantity: u32) -> NewCartItem {
        NewCartItem {
            recipe_id,
            name: "Jollof Rice Kit".to_string(),
            price: 2_500,
            quantity,
            packaging: Some("family".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn add_item_builds_synthetic_id() -> TestResult {
        let recipe = Uuid::now_v7();
        let added_at = at("2026-03-01T10:00:00Z")?;
        let mut cart = Cart::new(Uuid::now_v7(), None);

        let line = cart.add_item(jollof(recipe, 1), added_at)?;

        assert_eq!(line.id, format!("{recipe}-{}", added_at.as_millisecond()));
        assert_eq!(cart.items.len(), 1);

        Ok(())
    }

    #[test]
    fn add_same_selection_increases_quantity() -> TestResult {
        let recipe = Uuid::now_v7();
        let mut cart = Cart::new(Uuid::now_v7(), None);

        cart.add_item(jollof(recipe, 1), at("2026-03-01T10:00:00Z")?)?;
        let line = cart.add_item(jollof(recipe, 2), at("2026-03-01T10:05:00Z")?)?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.updated_at, at("2026-03-01T10:05:00Z")?);

        Ok(())
    }

    #[test]
    fn different_packaging_is_a_separate_line() -> TestResult {
        let recipe = Uuid::now_v7();
        let added_at = at("2026-03-01T10:00:00Z")?;
        let mut cart = Cart::new(Uuid::now_v7(), None);

        cart.add_item(jollof(recipe, 1), added_at)?;
        let single = cart.add_item(
            NewCartItem {
                packaging: None,
                ..jollof(recipe, 1)
            },
            added_at,
        )?;

        assert_eq!(cart.items.len(), 2);
        assert_ne!(cart.items.first().map(|line| &line.id), Some(&single.id));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        let mut cart = Cart::new(Uuid::now_v7(), None);

        let result = cart.add_item(jollof(Uuid::now_v7(), 0), at("2026-03-01T10:00:00Z")?);

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_and_remove() -> TestResult {
        let mut cart = Cart::new(Uuid::now_v7(), None);
        let line = cart.add_item(jollof(Uuid::now_v7(), 1), at("2026-03-01T10:00:00Z")?)?;

        cart.set_quantity(&line.id, 4, at("2026-03-01T10:01:00Z")?)?;
        assert_eq!(cart.item_count(), 4);

        assert_eq!(
            cart.set_quantity(&line.id, 0, at("2026-03-01T10:02:00Z")?),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(
            cart.set_quantity("missing", 1, at("2026-03-01T10:02:00Z")?),
            Err(CartError::ItemNotFound("missing".to_string()))
        );

        cart.remove_item(&line.id)?;
        assert!(cart.is_empty());
        assert_eq!(
            cart.remove_item(&line.id),
            Err(CartError::ItemNotFound(line.id))
        );

        Ok(())
    }

    #[test]
    fn subtotal_uses_price_snapshots() -> TestResult {
        let mut cart = Cart::new(Uuid::now_v7(), None);
        let added_at = at("2026-03-01T10:00:00Z")?;

        cart.add_item(jollof(Uuid::now_v7(), 2), added_at)?;
        cart.add_item(
            NewCartItem {
                price: 1_000,
                ..jollof(Uuid::now_v7(), 1)
            },
            added_at,
        )?;

        assert_eq!(cart.subtotal(), 6_000);
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert_eq!(cart.subtotal(), 0);

        Ok(())
    }

    #[test]
    fn merge_sums_matching_lines_and_keeps_account_price() -> TestResult {
        let shared = Uuid::now_v7();
        let guest_only = Uuid::now_v7();
        let mut account = Cart::new(Uuid::now_v7(), Some(Uuid::now_v7()));
        let mut guest = Cart::new(Uuid::now_v7(), None);

        account.add_item(jollof(shared, 1), at("2026-03-01T10:00:00Z")?)?;
        guest.add_item(
            NewCartItem {
                price: 9_999,
                ..jollof(shared, 2)
            },
            at("2026-03-01T09:00:00Z")?,
        )?;
        guest.add_item(jollof(guest_only, 1), at("2026-03-01T09:00:00Z")?)?;

        account.merge_guest_items(guest.items, at("2026-03-01T11:00:00Z")?);

        assert_eq!(account.items.len(), 2);
        let Some(merged) = account.items.iter().find(|line| line.recipe_id == shared) else {
            panic!("shared line missing after merge");
        };
        assert_eq!(merged.quantity, 3);
        assert_eq!(merged.price, 2_500);
        assert!(account.items.iter().any(|line| line.recipe_id == guest_only));

        Ok(())
    }

    #[test]
    fn colliding_ids_get_a_suffix() -> TestResult {
        let recipe = Uuid::now_v7();
        let added_at = at("2026-03-01T10:00:00Z")?;
        let mut cart = Cart::new(Uuid::now_v7(), None);

        let first = cart.add_item(jollof(recipe, 1), added_at)?;
        let second = cart.add_item(
            NewCartItem {
                packaging: Some("single".to_string()),
                ..jollof(recipe, 1)
            },
            added_at,
        )?;

        assert_eq!(second.id, format!("{}-1", first.id));

        Ok(())
    }
}
