//! Unit tests for error module.

use super::*;

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 409,
        message: "Conflict".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("409"));
    assert!(display.contains("Conflict"));
}

#[test]
fn test_not_found_error_display() {
    let error = Error::NotFound("User not found".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Not found"));
    assert!(display.contains("User not found"));
}

#[test]
fn test_validation_error_display() {
    let error = Error::Validation("email_id: value is not a valid email address".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Validation failed"));
    assert!(display.contains("email_id"));
}

#[test]
fn test_invalid_url_from_parse_error() {
    let error: Error = url::Url::parse("not a url").unwrap_err().into();

    assert!(matches!(error, Error::InvalidUrl(_)));
    assert!(format!("{}", error).contains("Invalid URL"));
}

#[test]
fn test_error_debug() {
    let error = Error::Api {
        status: 500,
        message: "Internal server error".to_string(),
    };

    let debug = format!("{:?}", error);
    assert!(debug.contains("Api"));
    assert!(debug.contains("500"));
}
