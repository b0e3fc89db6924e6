//! Error Catcher
//!
//! Requests that fail before a handler writes a body, such as an unparseable
//! payload or an unknown route, still answer with the JSON error envelope.

use salvo::{
    catcher::Catcher,
    http::{ParseError, ResBody},
    prelude::*,
};

use crate::responses::ErrorResponse;

fn describe(body: &ResBody, status: StatusCode) -> String {
    let ResBody::Error(error) = body else {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    };

    match error
        .cause
        .as_deref()
        .and_then(|cause| cause.downcast_ref::<ParseError>())
    {
        Some(ParseError::SerdeJson(source)) => format!("Invalid request body: {source}"),
        Some(ParseError::EmptyBody) => "Request body is required".to_string(),
        Some(source) => format!("Invalid request: {source}"),
        None => error.brief.clone(),
    }
}

#[handler]
async fn render_json_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    if !(status.is_client_error() || status.is_server_error()) {
        return;
    }

    if !(res.body.is_none() || res.body.is_error()) {
        return;
    }

    let message = describe(&res.body, status);

    res.status_code(status);
    res.render(Json(ErrorResponse {
        success: false,
        message,
    }));

    ctrl.skip_rest();
}

/// Catcher rendering unhandled errors as `{ "success": false, "message": ... }`.
pub(crate) fn json_catcher() -> Catcher {
    Catcher::default().hoop(render_json_error)
}
