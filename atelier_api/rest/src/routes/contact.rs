use std::sync::Arc;

use atelier_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use atelier_models::contact::{ContactField, ContactSubmissionDraft};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};

use super::error;
use crate::models::{
    contact::{ApiContactValidationError, ApiFieldViolation},
    ApiStatus,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ContactSubmissionDraft>, JsonRejection>,
) -> Response {
    let draft = match payload {
        Ok(Json(draft)) => draft,
        // a body that does not even deserialize (e.g. a wrong-typed field)
        // is a schema violation like any other
        Err(rejection) => return malformed_body(&rejection),
    };

    // revalidate on the server regardless of what the client claims to
    // have checked
    let submission = match draft.validate() {
        Ok(submission) => submission,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiContactValidationError::from(err)),
            )
                .into_response();
        }
    };

    match service.submit(submission).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(ApiStatus {
                success: true,
                message: "Message sent successfully",
            }),
        )
            .into_response(),
        Err(ContactSubmitError::Storage(err)) => {
            tracing::error!("failed to store contact message: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
        Err(ContactSubmitError::Other(err)) => {
            tracing::error!("failed to handle contact submission: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
    }
}

/// Answers a body rejected by the JSON extractor with the validation
/// envelope. The serde error text is only scanned for the offending field
/// name; none of it reaches the caller.
fn malformed_body(rejection: &JsonRejection) -> Response {
    let detail = rejection.body_text();
    let errors = [
        (ContactField::Name, "Name must be a string"),
        (ContactField::Email, "Email must be a string"),
        (ContactField::Message, "Message must be a string"),
        (ContactField::Phone, "Phone number must be a string"),
        (ContactField::Company, "Company must be a string"),
    ]
    .into_iter()
    .filter(|(field, _)| {
        detail
            .split_once("target type: ")
            .is_some_and(|(_, rest)| rest.starts_with(&format!("{field}:")))
    })
    .map(|(field, message)| ApiFieldViolation {
        field: field.as_str(),
        message,
    })
    .collect();

    (
        StatusCode::BAD_REQUEST,
        Json(ApiContactValidationError {
            success: false,
            message: "Validation error",
            errors,
        }),
    )
        .into_response()
}
