//! Integration tests for the Heartbridge API.
//!
//! These tests require the API server to be running against a database with
//! the schema applied. Configure the server URL via the `API_BASE_URL`
//! environment variable (default: `http://localhost:8080`) and run them with
//! `cargo test -p heartbridge-tests -- --ignored`.
//!
//! The `db_properties` suite links the server library directly and runs
//! against the database named by `TEST_DATABASE_URL`; each of its tests
//! returns early when the variable is unset.

use chrono::NaiveDate;
use heartbridge_client::{
    ClientConfig, CreateProfileRequest, CreateUserRequest, Gender, HeartbridgeClient,
};
use std::time::Duration;
use uuid::Uuid;

/// Gets the API base URL from environment or uses default.
#[must_use]
pub fn get_api_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Gets the database URL for the database-backed suite, if configured.
#[must_use]
pub fn get_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Creates a test client configured for the API.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client() -> Result<HeartbridgeClient, heartbridge_client::Error> {
    HeartbridgeClient::new(ClientConfig {
        base_url: get_api_url(),
        timeout: Duration::from_secs(10),
    })
}

/// Generates a unique email address so tests never collide on the unique
/// email constraint.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{}+{}@example.com", prefix, Uuid::new_v4().simple())
}

/// A user payload with a unique email.
#[must_use]
pub fn sample_user(first_name: &str) -> CreateUserRequest {
    CreateUserRequest {
        email_id: Some(unique_email("user")),
        first_name: Some(first_name.to_string()),
        ..Default::default()
    }
}

/// A complete profile payload.
#[must_use]
pub fn sample_profile() -> CreateProfileRequest {
    CreateProfileRequest {
        email_id: None,
        phone_number: None,
        first_name: "Asha".to_string(),
        middle_name: String::new(),
        last_name: "Rao".to_string(),
        gender: Gender::Female,
        birth_date: NaiveDate::from_ymd_opt(1994, 3, 12).unwrap_or_default(),
        height: "5'4\"".to_string(),
        country_currently_residing: "India".to_string(),
        citizen_of_countries: "India".to_string(),
        annual_income: "1200000".to_string(),
        personal_assets: None,
        medical_history: "none".to_string(),
        profession: Some("Engineer".to_string()),
        education: None,
        religion: None,
        is_verification_requested: false,
    }
}
