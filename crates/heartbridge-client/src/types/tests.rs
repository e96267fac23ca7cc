//! Unit tests for types module.

use super::*;
use serde_json::json;

// ============================================================================
// Gender Tests
// ============================================================================

#[test]
fn test_gender_display() {
    assert_eq!(format!("{}", Gender::Male), "Male");
    assert_eq!(format!("{}", Gender::Female), "Female");
    assert_eq!(format!("{}", Gender::Transgender), "Transgender");
}

#[test]
fn test_gender_serialization() {
    assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");

    let parsed: Gender = serde_json::from_str("\"Transgender\"").unwrap();
    assert_eq!(parsed, Gender::Transgender);
}

#[test]
fn test_gender_rejects_lowercase() {
    assert!(serde_json::from_str::<Gender>("\"male\"").is_err());
}

// ============================================================================
// Request Tests
// ============================================================================

#[test]
fn test_create_user_request_omits_unset_fields() {
    let request = CreateUserRequest {
        email_id: Some("a@b.com".to_string()),
        ..Default::default()
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({ "email_id": "a@b.com", "bookmarks": "", "likes": "" })
    );
}

#[test]
fn test_profile_list_query_encoding() {
    let empty = serde_urlencoded::to_string(ProfileListQuery::default()).unwrap();
    assert_eq!(empty, "");

    let limited = serde_urlencoded::to_string(ProfileListQuery { limit: Some(25) }).unwrap();
    assert_eq!(limited, "limit=25");
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_user_deserialization() {
    let user: User = serde_json::from_value(json!({
        "user_id": "6f1c1f5e-8a4b-4d5e-9c1a-2b3c4d5e6f70",
        "email_id": "a@b.com",
        "phone_number": null,
        "auth_provider": null,
        "provider_id": null,
        "first_name": "A",
        "middle_name": null,
        "last_name": null,
        "bookmarks": "",
        "likes": "",
        "created_at": "2024-05-01T10:00:00Z",
        "modified_at": "2024-05-01T10:00:00Z"
    }))
    .unwrap();

    assert_eq!(user.email_id.as_deref(), Some("a@b.com"));
    assert_eq!(user.first_name.as_deref(), Some("A"));
    assert_eq!(user.created_at, user.modified_at);
}

#[test]
fn test_profile_deserialization() {
    let profile: Profile = serde_json::from_value(json!({
        "profile_id": "0b7e3a4c-1d2e-4f50-8a9b-c0d1e2f3a4b5",
        "user_id": "6f1c1f5e-8a4b-4d5e-9c1a-2b3c4d5e6f70",
        "email_id": null,
        "phone_number": null,
        "first_name": "Asha",
        "middle_name": "",
        "last_name": "Rao",
        "gender": "Female",
        "birth_date": "1994-03-12",
        "height": "5'4\"",
        "country_currently_residing": "India",
        "citizen_of_countries": "India",
        "annual_income": "1200000",
        "personal_assets": null,
        "medical_history": "none",
        "profession": "Engineer",
        "education": null,
        "religion": null,
        "is_verification_requested": true,
        "is_verified": false,
        "created_at": "2024-05-01T10:00:00Z",
        "modified_at": "2024-05-02T10:00:00Z"
    }))
    .unwrap();

    assert_eq!(profile.gender, Gender::Female);
    assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1994, 3, 12).unwrap());
    assert!(profile.is_verification_requested);
    assert!(profile.modified_at > profile.created_at);
}

#[test]
fn test_health_response_deserialization() {
    let health: HealthResponse = serde_json::from_value(json!({
        "status": "healthy",
        "version": "0.1.0",
        "database": {
            "initialized": true,
            "size": 3,
            "idle": 2,
            "leased": 1,
            "max_connections": 10
        }
    }))
    .unwrap();

    assert_eq!(health.status, "healthy");
    assert!(health.database.initialized);
    assert_eq!(health.database.leased, 1);
}

#[test]
fn test_error_response_deserialization() {
    let body: ErrorResponse = serde_json::from_str(
        r#"{"error":"Not found: User 42","code":"NOT_FOUND"}"#,
    )
    .unwrap();

    assert_eq!(body.code, "NOT_FOUND");
}
