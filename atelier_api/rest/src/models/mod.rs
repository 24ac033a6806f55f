use serde::Serialize;

pub mod contact;

/// Envelope of every non-validation response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiStatus {
    pub success: bool,
    pub message: &'static str,
}
