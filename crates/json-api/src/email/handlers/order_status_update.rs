//! Order Status Update Email Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use mealbox::notifications::Notification;

use crate::{
    email::{
        handlers::send_failed,
        models::{EmailSentResponse, StatusUpdateEmailRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Order Status Update Email Handler
#[endpoint(tags("email"), summary = "Send Status Update Email")]
pub(crate) async fn handler(
    json: JsonBody<StatusUpdateEmailRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<EmailSentResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let (recipient, update) = json.into_inner().into_update()?;

    let sent = app
        .notifier
        .send(&Notification::StatusUpdate(update), vec![recipient])
        .await;

    if !sent {
        return Err(send_failed("status update"));
    }

    Ok(ApiResponse::ok(
        "Status update email sent",
        EmailSentResponse {
            customer_notified: true,
            admins_notified: false,
        },
    ))
}
