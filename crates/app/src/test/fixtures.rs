//! Test data builders.

use mealbox::delivery::DeliveryAddress;
use sqlx::{PgPool, query};
use uuid::Uuid;

use crate::domain::orders::models::{NewOrder, OrderLine, PaymentReceipt};

pub(crate) fn address() -> DeliveryAddress {
    DeliveryAddress {
        name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+2348000000000".to_string(),
        street: "12 Allen Avenue".to_string(),
        city: "Ikeja".to_string(),
        state: "Lagos".to_string(),
        lga: "Ikeja".to_string(),
    }
}

pub(crate) fn new_order(user_id: Option<Uuid>) -> NewOrder {
    NewOrder {
        user_id,
        lines: vec![OrderLine {
            recipe_id: Uuid::now_v7(),
            name: "Jollof Rice Kit".to_string(),
            quantity: 2,
            price: 2_500,
        }],
        amount: 5_675,
        address: address(),
        payment: PaymentReceipt {
            reference: format!("mbx-{}", Uuid::now_v7().simple()),
            status: "success".to_string(),
        },
    }
}

/// Insert a user row directly, returning its id.
pub(crate) async fn insert_user(pool: &PgPool, email: &str, role: &str) -> Result<Uuid, sqlx::Error> {
    let uuid = Uuid::now_v7();

    query("INSERT INTO users (uuid, name, email, role) VALUES ($1, $2, $3, $4)")
        .bind(uuid)
        .bind("Test User")
        .bind(email)
        .bind(role)
        .execute(pool)
        .await?;

    Ok(uuid)
}
