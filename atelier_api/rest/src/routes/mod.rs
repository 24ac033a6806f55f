use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiStatus;

pub mod contact;
pub mod health;

pub(crate) fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn error(code: StatusCode, message: &'static str) -> Response {
    (
        code,
        Json(ApiStatus {
            success: false,
            message,
        }),
    )
        .into_response()
}
