//! Request and response models for the REST API.

use crate::db::{ColumnKind, Entity, FieldMap, Gender, Profile, SqlValue, User};
use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::marker::PhantomData;
use thiserror::Error;
use utoipa::openapi::schema::{
    KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType, Type,
};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};
use uuid::Uuid;


/// Default number of profiles returned by the listing endpoint.
pub const DEFAULT_PROFILE_LIMIT: u32 = 10;

/// Upper bound on the profile listing `limit` parameter.
pub const MAX_PROFILE_LIMIT: u32 = 100;

// ============================================================================
// Validation
// ============================================================================

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending field name.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Checks applied to a payload after it has been deserialized.
pub trait Validate {
    /// Validates the payload.
    ///
    /// # Errors
    /// Returns the first field that fails validation.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Returns `true` if `email` has the shape `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

fn validate_email(field: &str, email: Option<&str>) -> Result<(), ValidationError> {
    match email {
        Some(email) if !is_valid_email(email) => Err(ValidationError::new(
            field,
            "value is not a valid email address",
        )),
        _ => Ok(()),
    }
}

fn validate_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "value cannot be blank"));
    }
    Ok(())
}

// ============================================================================
// Users
// ============================================================================

/// Request to create a user.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Email address.
    #[serde(default)]
    pub email_id: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Single sign-on provider.
    #[serde(default)]
    pub auth_provider: Option<String>,
    /// Account identifier at the provider.
    #[serde(default)]
    pub provider_id: Option<String>,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Middle name.
    #[serde(default)]
    pub middle_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Bookmarked profiles.
    #[serde(default)]
    pub bookmarks: String,
    /// Liked profiles.
    #[serde(default)]
    pub likes: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_email("email_id", self.email_id.as_deref())
    }
}

impl CreateUserRequest {
    /// Converts the request into insert values for a new row.
    #[must_use]
    pub fn into_values(self, user_id: Uuid, now: DateTime<Utc>) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("user_id", SqlValue::Uuid(user_id)),
            ("email_id", self.email_id.into()),
            ("phone_number", self.phone_number.into()),
            ("auth_provider", self.auth_provider.into()),
            ("provider_id", self.provider_id.into()),
            ("first_name", self.first_name.into()),
            ("middle_name", self.middle_name.into()),
            ("last_name", self.last_name.into()),
            ("bookmarks", self.bookmarks.into()),
            ("likes", self.likes.into()),
            ("created_at", SqlValue::Timestamp(now)),
            ("modified_at", SqlValue::Timestamp(now)),
        ]
    }
}

/// Response listing every user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersListResponse {
    /// Users, newest first.
    pub users: Vec<User>,
    /// Number of users returned.
    pub count: usize,
}

// ============================================================================
// Profiles
// ============================================================================

/// Request to create a profile for an existing user.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateProfileRequest {
    /// Contact email address.
    #[serde(default)]
    pub email_id: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth (`YYYY-MM-DD`).
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
    #[serde(default)]
    pub personal_assets: Option<String>,
    /// Medical history.
    pub medical_history: String,
    /// Profession.
    #[serde(default)]
    pub profession: Option<String>,
    /// Education.
    #[serde(default)]
    pub education: Option<String>,
    /// Religion.
    #[serde(default)]
    pub religion: Option<String>,
    /// Whether the owner asks for verification.
    #[serde(default)]
    pub is_verification_requested: bool,
}

impl Validate for CreateProfileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_email("email_id", self.email_id.as_deref())?;
        validate_not_blank("first_name", &self.first_name)?;
        validate_not_blank("last_name", &self.last_name)?;
        Ok(())
    }
}

impl CreateProfileRequest {
    /// Converts the request into insert values for a new row owned by
    /// `user_id`. New profiles always start unverified.
    #[must_use]
    pub fn into_values(
        self,
        profile_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("profile_id", SqlValue::Uuid(profile_id)),
            ("user_id", SqlValue::Uuid(user_id)),
            ("email_id", self.email_id.into()),
            ("phone_number", self.phone_number.into()),
            ("first_name", self.first_name.into()),
            ("middle_name", self.middle_name.into()),
            ("last_name", self.last_name.into()),
            ("gender", SqlValue::text(self.gender.as_str())),
            ("birth_date", SqlValue::Date(self.birth_date)),
            ("height", self.height.into()),
            ("country_currently_residing", self.country_currently_residing.into()),
            ("citizen_of_countries", self.citizen_of_countries.into()),
            ("annual_income", self.annual_income.into()),
            ("personal_assets", self.personal_assets.into()),
            ("medical_history", self.medical_history.into()),
            ("profession", self.profession.into()),
            ("education", self.education.into()),
            ("religion", self.religion.into()),
            (
                "is_verification_requested",
                SqlValue::Bool(self.is_verification_requested),
            ),
            ("is_verified", SqlValue::Bool(false)),
            ("created_at", SqlValue::Timestamp(now)),
            ("modified_at", SqlValue::Timestamp(now)),
        ]
    }
}

/// Query parameters for listing profiles.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProfileListQuery {
    /// Maximum number of profiles to return (default 10, max 100).
    pub limit: Option<u32>,
}

impl ProfileListQuery {
    /// Returns the effective limit, clamped to `1..=MAX_PROFILE_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        i64::from(
            self.limit
                .unwrap_or(DEFAULT_PROFILE_LIMIT)
                .clamp(1, MAX_PROFILE_LIMIT),
        )
    }
}

/// Response listing profiles.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilesListResponse {
    /// Profiles, newest first.
    pub profiles: Vec<Profile>,
    /// Number of profiles returned.
    pub count: usize,
}

// ============================================================================
// Partial Updates
// ============================================================================

/// A partial update payload, checked against the mutable columns of `E`.
///
/// Deserializes from a JSON object; unknown fields and values of the wrong
/// shape are rejected during deserialization.
#[derive(Debug, Clone)]
pub struct UpdateFields<E> {
    fields: FieldMap,
    _entity: PhantomData<fn() -> E>,
}

/// Partial update payload for `PUT /users/{user_id}`.
pub type UserUpdate = UpdateFields<User>;

/// Partial update payload for `PUT /profiles/{profile_id}`.
pub type ProfileUpdate = UpdateFields<Profile>;

impl<E: Entity> UpdateFields<E> {
    /// Validates a JSON object against the mutable columns of `E`.
    ///
    /// # Errors
    /// Returns the first unknown field or ill-typed value.
    pub fn from_json(object: serde_json::Map<String, Value>) -> Result<Self, ValidationError> {
        let mut fields = FieldMap::new();

        for (name, value) in object {
            let Some(column) = E::mutable_column(&name) else {
                return Err(ValidationError::new(name, "unknown or read-only field"));
            };
            let value = convert_value(column.kind, &value)
                .map_err(|message| ValidationError::new(column.name, message))?;
            fields.insert(column.name.to_string(), value);
        }

        Ok(Self {
            fields,
            _entity: PhantomData,
        })
    }

    /// Returns `true` if no fields were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the payload, returning the validated field map.
    #[must_use]
    pub fn into_inner(self) -> FieldMap {
        self.fields
    }
}

impl<'de, E: Entity> Deserialize<'de> for UpdateFields<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Self::from_json(object).map_err(de::Error::custom)
    }
}

impl<E> Validate for UpdateFields<E> {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl<E: Entity> PartialSchema for UpdateFields<E> {
    fn schema() -> RefOr<Schema> {
        E::MUTABLE_COLUMNS
            .iter()
            .fold(
                ObjectBuilder::new()
                    .schema_type(Type::Object)
                    .description(Some("Any subset of the updatable fields")),
                |object, column| object.property(column.name, column_schema(column.kind)),
            )
            .into()
    }
}

impl<E: Entity> ToSchema for UpdateFields<E> {
    fn name() -> Cow<'static, str> {
        Cow::Owned(format!("{}_update", E::TABLE))
    }
}

fn column_schema(kind: ColumnKind) -> ObjectBuilder {
    match kind {
        ColumnKind::Text => ObjectBuilder::new().schema_type(Type::String),
        ColumnKind::NullableText | ColumnKind::Email => ObjectBuilder::new()
            .schema_type(SchemaType::from_iter([Type::String, Type::Null])),
        ColumnKind::Bool => ObjectBuilder::new().schema_type(Type::Boolean),
        ColumnKind::Date => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Date))),
        ColumnKind::Enum(values) => ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(values.iter().copied())),
    }
}

fn convert_value(kind: ColumnKind, value: &Value) -> Result<SqlValue, String> {
    match (kind, value) {
        (ColumnKind::Text, Value::String(s)) => Ok(SqlValue::text(s.as_str())),
        (ColumnKind::NullableText | ColumnKind::Email, Value::Null) => Ok(SqlValue::Text(None)),
        (ColumnKind::NullableText, Value::String(s)) => Ok(SqlValue::text(s.as_str())),
        (ColumnKind::Email, Value::String(s)) if is_valid_email(s) => Ok(SqlValue::text(s.as_str())),
        (ColumnKind::Email, Value::String(_)) => Err("value is not a valid email address".into()),
        (ColumnKind::Bool, Value::Bool(b)) => Ok(SqlValue::Bool(*b)),
        (ColumnKind::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(SqlValue::Date)
            .map_err(|_| "expected a date in YYYY-MM-DD format".to_string()),
        (ColumnKind::Enum(allowed), Value::String(s)) if allowed.iter().any(|v| *v == s.as_str()) => {
            Ok(SqlValue::text(s.as_str()))
        }
        (ColumnKind::Enum(allowed), _) => Err(format!("expected one of {}", allowed.join(", "))),
        (ColumnKind::Text | ColumnKind::NullableText, _) => Err("expected a string".into()),
        (ColumnKind::Email, _) => Err("expected a string or null".into()),
        (ColumnKind::Bool, _) => Err("expected a boolean".into()),
        (ColumnKind::Date, _) => Err("expected a date string".into()),
    }
}

// ============================================================================
// Generic Responses
// ============================================================================

/// Simple message response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Connection pool status.
    pub database: DatabaseStatus,
}

/// Connection pool status reported by the health check.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DatabaseStatus {
    /// Whether a pool is live.
    pub initialized: bool,
    /// Open connections, idle or leased.
    pub size: u32,
    /// Idle connections.
    pub idle: usize,
    /// Connections leased to in-flight requests.
    pub leased: usize,
    /// Configured maximum connections.
    pub max_connections: u32,
}
