//! Database row types and their table metadata.

use crate::db::query::{Column, ColumnKind, Entity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Reference DDL for the `users` and `profiles` tables.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Gender recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Transgender.
    Transgender,
}

impl Gender {
    /// Every accepted spelling, as stored in the database.
    pub const VALUES: &'static [&'static str] = &["Male", "Female", "Transgender"];

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Transgender => "Transgender",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a gender value outside [`Gender::VALUES`].
#[derive(Debug, Error)]
#[error("invalid gender: {0}")]
pub struct InvalidGender(pub String);

impl FromStr for Gender {
    type Err = InvalidGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Transgender" => Ok(Self::Transgender),
            other => Err(InvalidGender(other.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = InvalidGender;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// User account row.
///
/// Created on sign-up by email, phone or single sign-on; remaining contact
/// details may be added later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    /// Unique identifier.
    pub user_id: Uuid,
    /// Email address.
    pub email_id: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Single sign-on provider (e.g. "google", "apple").
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
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}

const USER_MUTABLE_COLUMNS: &[Column] = &[
    Column::new("email_id", ColumnKind::Email),
    Column::new("phone_number", ColumnKind::NullableText),
    Column::new("auth_provider", ColumnKind::NullableText),
    Column::new("provider_id", ColumnKind::NullableText),
    Column::new("first_name", ColumnKind::NullableText),
    Column::new("middle_name", ColumnKind::NullableText),
    Column::new("last_name", ColumnKind::NullableText),
    Column::new("bookmarks", ColumnKind::Text),
    Column::new("likes", ColumnKind::Text),
];

impl Entity for User {
    const TABLE: &'static str = "users";
    const ID_COLUMN: &'static str = "user_id";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "user_id",
        "email_id",
        "phone_number",
        "auth_provider",
        "provider_id",
        "first_name",
        "middle_name",
        "last_name",
        "bookmarks",
        "likes",
        "created_at",
        "modified_at",
    ];
    const MUTABLE_COLUMNS: &'static [Column] = USER_MUTABLE_COLUMNS;
}

/// Matchmaking profile row, owned by a user.
///
/// A user may create any number of profiles; each is verified on request by
/// an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
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
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Height, free-form (e.g. "5'8\"").
    pub height: String,
    /// Country of current residence.
    pub country_currently_residing: String,
    /// Countries of citizenship.
    pub citizen_of_countries: String,
    /// Annual income, free-form.
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
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub modified_at: DateTime<Utc>,
}

const PROFILE_MUTABLE_COLUMNS: &[Column] = &[
    Column::new("email_id", ColumnKind::Email),
    Column::new("phone_number", ColumnKind::NullableText),
    Column::new("first_name", ColumnKind::Text),
    Column::new("middle_name", ColumnKind::Text),
    Column::new("last_name", ColumnKind::Text),
    Column::new("gender", ColumnKind::Enum(Gender::VALUES)),
    Column::new("birth_date", ColumnKind::Date),
    Column::new("height", ColumnKind::Text),
    Column::new("country_currently_residing", ColumnKind::Text),
    Column::new("citizen_of_countries", ColumnKind::Text),
    Column::new("annual_income", ColumnKind::Text),
    Column::new("personal_assets", ColumnKind::NullableText),
    Column::new("medical_history", ColumnKind::Text),
    Column::new("profession", ColumnKind::NullableText),
    Column::new("education", ColumnKind::NullableText),
    Column::new("religion", ColumnKind::NullableText),
    Column::new("is_verification_requested", ColumnKind::Bool),
    Column::new("is_verified", ColumnKind::Bool),
];

impl Entity for Profile {
    const TABLE: &'static str = "profiles";
    const ID_COLUMN: &'static str = "profile_id";
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "profile_id",
        "user_id",
        "email_id",
        "phone_number",
        "first_name",
        "middle_name",
        "last_name",
        "gender",
        "birth_date",
        "height",
        "country_currently_residing",
        "citizen_of_countries",
        "annual_income",
        "personal_assets",
        "medical_history",
        "profession",
        "education",
        "religion",
        "is_verification_requested",
        "is_verified",
        "created_at",
        "modified_at",
    ];
    const MUTABLE_COLUMNS: &'static [Column] = PROFILE_MUTABLE_COLUMNS;
}
