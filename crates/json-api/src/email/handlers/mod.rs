//! Email Handlers

use salvo::http::StatusCode;

use crate::responses::ApiError;

pub(crate) mod contact;
pub(crate) mod order_notification;
pub(crate) mod order_status_update;

fn send_failed(what: &str) -> ApiError {
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to send {what}"),
    )
}
