//! Router tests.
//!
//! These exercise routing, extraction and error mapping without a running
//! database; the configured database address refuses connections.

use super::*;
use crate::config::{Config, DatabaseConfig};
use crate::db::{DatabasePool, PoolSettings};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn unreachable_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: "postgres://heartbridge@127.0.0.1:1/heartbridge".to_string(),
            min_connections: 0,
            max_connections: 2,
            command_timeout_secs: 1,
            acquire_timeout_secs: 1,
        },
        ..Config::default()
    }
}

fn test_router() -> Router {
    create_router(Arc::new(AppState::new(unreachable_config())))
}

fn lazy_router() -> Router {
    let config = unreachable_config();
    let pool = DatabasePool::connect_lazy(&PoolSettings::from(&config.database)).unwrap();
    create_router(Arc::new(AppState::with_pool(config, pool)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Root and Health
// ============================================================================

#[tokio::test]
async fn test_root_returns_welcome_message() {
    let response = test_router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "message": "Hello World" }));
}

#[tokio::test]
async fn test_health_without_pool() {
    let response = test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["initialized"], false);
    assert_eq!(body["database"]["leased"], 0);
    assert_eq!(body["database"]["max_connections"], 2);
}

#[tokio::test]
async fn test_health_with_lazy_pool() {
    let response = lazy_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"]["initialized"], true);
    assert_eq!(body["database"]["leased"], 0);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_create_user_invalid_email_is_unprocessable() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/users/",
            json!({ "email_id": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("email_id"));
}

#[tokio::test]
async fn test_create_user_without_trailing_slash() {
    let response = test_router()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({ "email_id": "still not an email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_user_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/users/")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_update_user_unknown_field_is_unprocessable() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let response = test_router()
        .oneshot(json_request("PUT", &uri, json!({ "is_admin": true })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_user_identity_column_is_unprocessable() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let response = test_router()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "user_id": Uuid::new_v4() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_profile_invalid_gender_is_unprocessable() {
    let uri = format!("/users/{}/profiles", Uuid::new_v4());
    let response = test_router()
        .oneshot(json_request(
            "POST",
            &uri,
            json!({
                "first_name": "Asha",
                "middle_name": "",
                "last_name": "Rao",
                "gender": "Unknown",
                "birth_date": "1994-03-12",
                "height": "5'4\"",
                "country_currently_residing": "India",
                "citizen_of_countries": "India",
                "annual_income": "1200000",
                "medical_history": "none"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_user_malformed_id_is_bad_request() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/users/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_profile_malformed_id_is_json_error() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/profiles/1234")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_list_profiles_negative_limit_is_json_error() {
    for uri in ["/profiles/?limit=-1", "/profiles?limit=ten"] {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "INVALID_REQUEST", "{uri}");
    }
}

// ============================================================================
// Database Failures
// ============================================================================

#[tokio::test]
async fn test_unreachable_database_is_internal_error() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let response = test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert!(!body["error"].as_str().unwrap().contains("127.0.0.1"));
}

#[tokio::test]
async fn test_lazy_pool_acquire_failure_is_internal_error() {
    let response = lazy_router()
        .oneshot(Request::builder().uri("/profiles").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "DATABASE_ERROR");
}

// ============================================================================
// OpenAPI
// ============================================================================

#[derive(utoipa::OpenApi)]
#[openapi(paths(
    crate::api::users::update_user,
    crate::api::profiles::update_profile,
    crate::api::profiles::list_profiles,
))]
struct UpdateDoc;

#[test]
fn test_openapi_documents_update_bodies() {
    use utoipa::OpenApi;

    let doc = serde_json::to_value(UpdateDoc::openapi()).unwrap();

    let user_put = &doc["paths"]["/users/{user_id}"]["put"];
    assert!(user_put["requestBody"].is_object());
    let profile_put = &doc["paths"]["/profiles/{profile_id}"]["put"];
    assert!(profile_put["requestBody"].is_object());
    assert!(doc["paths"]["/profiles/"]["get"]["parameters"].is_array());
}
