//! Request and response types for the Heartbridge API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Gender recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Transgender.
    Transgender,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Transgender => write!(f, "Transgender"),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Simple message response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Connection pool status.
    pub database: DatabaseStatus,
}

/// Connection pool status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatus {
    /// Whether a pool is live.
    pub initialized: bool,
    /// Open connections.
    pub size: u32,
    /// Idle connections.
    pub idle: usize,
    /// Connections leased to in-flight requests.
    pub leased: usize,
    /// Configured maximum connections.
    pub max_connections: u32,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

// ============================================================================
// Users
// ============================================================================

/// User account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub user_id: Uuid,
    /// Email address.
    pub email_id: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Single sign-on provider.
    pub auth_provider: Option<String>,
    /// Account identifier at the provider.
    pub provider_id: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Bookmarked profiles.
    pub bookmarks: String,
    /// Liked profiles.
    pub likes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}

/// Request to create a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Single sign-on provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<String>,
    /// Account identifier at the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Middle name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Bookmarked profiles.
    #[serde(default)]
    pub bookmarks: String,
    /// Liked profiles.
    #[serde(default)]
    pub likes: String,
}

/// Response listing users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersListResponse {
    /// Users, newest first.
    pub users: Vec<User>,
    /// Number of users returned.
    pub count: usize,
}

// ============================================================================
// Profiles
// ============================================================================

/// Matchmaking profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier.
    pub profile_id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Contact email address.
    pub email_id: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Height.
    pub height: String,
    /// Country of current residence.
    pub country_currently_residing: String,
    /// Countries of citizenship.
    pub citizen_of_countries: String,
    /// Annual income.
    pub annual_income: String,
    /// Personal assets.
    pub personal_assets: Option<String>,
    /// Medical history.
    pub medical_history: String,
    /// Profession.
    pub profession: Option<String>,
    /// Education.
    pub education: Option<String>,
    /// Religion.
    pub religion: Option<String>,
    /// Whether the owner asked for verification.
    pub is_verification_requested: bool,
    /// Whether an administrator verified the profile.
    pub is_verified: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}

/// Request to create a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    /// Contact email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Height.
    pub height: String,
    /// Country of current residence.
    pub country_currently_residing: String,
    /// Countries of citizenship.
    pub citizen_of_countries: String,
    /// Annual income.
    pub annual_income: String,
    /// Personal assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_assets: Option<String>,
    /// Medical history.
    pub medical_history: String,
    /// Profession.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    /// Education.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Religion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    /// Whether the owner asks for verification.
    #[serde(default)]
    pub is_verification_requested: bool,
}

/// Query parameters for listing profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileListQuery {
    /// Maximum number of profiles to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Response listing profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesListResponse {
    /// Profiles, newest first.
    pub profiles: Vec<Profile>,
    /// Number of profiles returned.
    pub count: usize,
}
