//! Unit tests for client module.

use super::*;

// ============================================================================
// ClientConfig Tests
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_client_config_custom() {
    let config = ClientConfig {
        base_url: "http://api.example.com:9000".to_string(),
        timeout: Duration::from_secs(60),
    };

    assert_eq!(config.base_url, "http://api.example.com:9000");
    assert_eq!(config.timeout, Duration::from_secs(60));
}

// ============================================================================
// HeartbridgeClient Creation Tests
// ============================================================================

#[test]
fn test_client_new() {
    let client = HeartbridgeClient::new(ClientConfig::default());

    assert!(client.is_ok());
}

#[test]
fn test_client_with_base_url() {
    let client = HeartbridgeClient::with_base_url("http://localhost:3000").unwrap();

    assert_eq!(client.base_url(), "http://localhost:3000");
}

#[test]
fn test_client_base_url_trimmed() {
    let client = HeartbridgeClient::with_base_url("http://localhost:8080/").unwrap();

    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[test]
fn test_client_base_url_keeps_path_prefix() {
    let client = HeartbridgeClient::with_base_url("https://api.example.com/heartbridge/").unwrap();

    assert_eq!(client.base_url(), "https://api.example.com/heartbridge");
}

#[test]
fn test_client_invalid_base_url() {
    let result = HeartbridgeClient::with_base_url("localhost without scheme");

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

// ============================================================================
// Error Mapping Tests
// ============================================================================

#[test]
fn test_not_found_uses_api_message() {
    let error = error_for_status(
        StatusCode::NOT_FOUND,
        r#"{"error":"Not found: User 42","code":"NOT_FOUND"}"#.to_string(),
    );

    assert!(matches!(error, Error::NotFound(ref m) if m == "Not found: User 42"));
}

#[test]
fn test_unprocessable_maps_to_validation() {
    let error = error_for_status(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"error":"Validation failed: email_id","code":"VALIDATION_ERROR"}"#.to_string(),
    );

    assert!(matches!(error, Error::Validation(_)));
}

#[test]
fn test_other_status_keeps_raw_body() {
    let error = error_for_status(StatusCode::BAD_GATEWAY, "upstream down".to_string());

    match error {
        Error::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
