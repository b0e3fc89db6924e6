//! Contact Form Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use mealbox::notifications::Notification;

use crate::{
    email::{
        handlers::send_failed,
        models::{ContactRequest, EmailSentResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Contact Form Handler
///
/// Forwards a visitor's message to every admin.
#[endpoint(tags("email"), summary = "Send Contact Message")]
#[tracing::instrument(name = "email.contact", skip(json, depot), err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<ContactRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<EmailSentResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let message = json.into_inner().into_message()?;

    if !app
        .notifier
        .send_to_admins(&Notification::ContactForm(message))
        .await
    {
        return Err(send_failed("contact message"));
    }

    info!("forwarded contact message");

    Ok(ApiResponse::ok(
        "Message sent",
        EmailSentResponse {
            customer_notified: false,
            admins_notified: true,
        },
    ))
}
