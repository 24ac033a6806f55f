use atelier_models::contact::{ContactValidationError, FieldViolation};
use serde::Serialize;

/// Body of the 400 response for a submission that failed schema validation.
#[derive(Debug, Clone, Serialize)]
pub struct ApiContactValidationError {
    pub success: bool,
    pub message: &'static str,
    pub errors: Vec<ApiFieldViolation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiFieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl From<ContactValidationError> for ApiContactValidationError {
    fn from(err: ContactValidationError) -> Self {
        Self {
            success: false,
            message: "Validation error",
            errors: err.violations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FieldViolation> for ApiFieldViolation {
    fn from(violation: FieldViolation) -> Self {
        Self {
            field: violation.field.as_str(),
            message: violation.message,
        }
    }
}
