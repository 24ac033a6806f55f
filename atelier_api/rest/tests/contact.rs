use atelier_api_rest::RestServer;
use atelier_core_contact_contracts::{ContactSubmitError, MockContactFeatureService};
use atelier_core_health_contracts::MockHealthFeatureService;
use atelier_models::contact::{ContactMessage, ContactSubmission, ContactSubmissionDraft};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::DateTime;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(contact: MockContactFeatureService) -> Router {
    RestServer::new(MockHealthFeatureService::new(), contact).router()
}

fn submission() -> ContactSubmission {
    ContactSubmissionDraft {
        name: "Jo".into(),
        email: "jo@example.com".into(),
        message: "Hello there, I need a website.".into(),
        phone: None,
        company: None,
    }
    .validate()
    .unwrap()
}

fn stored(submission: &ContactSubmission) -> ContactMessage {
    ContactMessage {
        id: uuid::Uuid::from_u128(0x42).into(),
        name: submission.name.clone(),
        email: submission.email.clone(),
        message: submission.message.clone(),
        phone: submission.phone.clone(),
        company: submission.company.clone(),
        created_at: DateTime::from_timestamp(1_715_000_000, 0).unwrap(),
    }
}

async fn submit(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn ok() {
    let submission = submission();
    let service =
        MockContactFeatureService::new().with_submit(submission.clone(), Ok(stored(&submission)));

    let (status, body) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"success": true, "message": "Message sent successfully"})
    );
}

#[tokio::test]
async fn ok_with_optional_fields() {
    let submission = ContactSubmissionDraft {
        name: "Jo".into(),
        email: "jo@example.com".into(),
        message: "Hello there, I need a website.".into(),
        phone: Some("+49 1234 5678".into()),
        company: Some("Jo Design Studio".into()),
    }
    .validate()
    .unwrap();
    let service =
        MockContactFeatureService::new().with_submit(submission.clone(), Ok(stored(&submission)));

    let (status, body) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
            "phone": "+49 1234 5678",
            "company": "Jo Design Studio",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"success": true, "message": "Message sent successfully"})
    );
}

#[tokio::test]
async fn client_supplied_id_and_timestamp_are_ignored() {
    let submission = submission();
    let service =
        MockContactFeatureService::new().with_submit(submission.clone(), Ok(stored(&submission)));

    // unknown fields are dropped before the submission ever reaches the
    // service, so the stored record cannot contain them
    let (status, _) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
            "id": "5cbf1a6d-4a57-4f21-b07e-93d380e45f8a",
            "createdAt": "1999-01-01T00:00:00Z",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn name_too_short() {
    // no expectations: the service must not be called
    let service = MockContactFeatureService::new();

    let (status, body) = submit(
        router(service),
        json!({
            "name": "J",
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Validation error",
            "errors": [
                {"field": "name", "message": "Name must be at least 2 characters"},
            ],
        })
    );
}

#[tokio::test]
async fn invalid_email() {
    let service = MockContactFeatureService::new();

    let (status, body) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "not-an-email",
            "message": "Hello there, I need a website.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Validation error",
            "errors": [
                {"field": "email", "message": "Please enter a valid email address"},
            ],
        })
    );
}

#[tokio::test]
async fn message_too_short() {
    let service = MockContactFeatureService::new();

    let (status, body) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "short",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Validation error",
            "errors": [
                {"field": "message", "message": "Message must be at least 10 characters"},
            ],
        })
    );
}

#[tokio::test]
async fn wrong_typed_field() {
    // the body deserializer rejects this before validation; the caller
    // still gets the validation envelope, not a serde message
    let service = MockContactFeatureService::new();

    let (status, body) = submit(
        router(service),
        json!({
            "name": 123,
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Validation error",
            "errors": [
                {"field": "name", "message": "Name must be a string"},
            ],
        })
    );
    assert!(!body.to_string().contains("invalid type"));
}

#[tokio::test]
async fn missing_fields() {
    let service = MockContactFeatureService::new();

    let (status, body) = submit(router(service), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation error"));
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn storage_error() {
    let submission = submission();
    let service = MockContactFeatureService::new().with_submit(
        submission,
        Err(ContactSubmitError::Storage(anyhow::anyhow!(
            "connection reset by peer"
        ))),
    );

    let (status, body) = submit(
        router(service),
        json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "Hello there, I need a website.",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "Failed to send message"})
    );
    // the storage failure cause must not leak to the caller
    assert!(!body.to_string().contains("connection reset"));
}
