use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use devfeed_core::ContactForm;
use feed_logging::feed_debug;
use serde_json::json;

use crate::{ContactRelay, RelayError};

pub const CONTACT_PATH: &str = "/api/contact";

/// Router exposing `POST /api/contact`.
pub fn contact_router(relay: ContactRelay) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .with_state(relay)
}

async fn submit_contact(
    State(relay): State<ContactRelay>,
    body: Bytes,
) -> Response {
    // The body is read as JSON whatever its content type.
    let form: ContactForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(err) => {
            feed_debug!("rejecting contact body: {}", err);
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match relay.submit(&form).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Message sent successfully" })),
        )
            .into_response(),
        Err(RelayError::Validation(err)) => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message"),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
