//! Profile handlers.

use crate::api::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::db::{Profile, User, query};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{
    CreateProfileRequest, MessageResponse, ProfileListQuery, ProfileUpdate, ProfilesListResponse,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn profile_not_found(profile_id: Uuid) -> ApiError {
    ApiError::not_found("Profile", profile_id)
}

/// Create a profile owned by an existing user.
///
/// The owner lookup and the insert share one pooled connection.
#[utoipa::path(
    post,
    path = "/users/{user_id}/profiles/",
    params(
        ("user_id" = Uuid, Path, description = "Owning user identifier")
    ),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let pool = state.pools.current().await?;
    let values = request.into_values(Uuid::new_v4(), user_id, Utc::now());

    let profile = pool
        .with_connection(move |conn| {
            Box::pin(async move {
                if !query::exists::<User>(conn, user_id).await? {
                    return Ok(None);
                }
                query::insert_returning::<Profile>(conn, values)
                    .await
                    .map(Some)
            })
        })
        .await?
        .ok_or_else(|| ApiError::not_found("User", user_id))?;

    info!(profile_id = %profile.profile_id, %user_id, "Profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Get a profile by id.
#[utoipa::path(
    get,
    path = "/profiles/{profile_id}",
    params(
        ("profile_id" = Uuid, Path, description = "Profile identifier")
    ),
    responses(
        (status = 200, description = "Profile details", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(profile_id): ApiPath<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    let pool = state.pools.current().await?;

    pool.with_connection(move |conn| Box::pin(query::find_by_id::<Profile>(conn, profile_id)))
        .await?
        .map(Json)
        .ok_or_else(|| profile_not_found(profile_id))
}

/// List the most recent profiles.
#[utoipa::path(
    get,
    path = "/profiles/",
    params(
        ("limit" = Option<u32>, Query, description = "Maximum profiles to return (default 10, max 100)")
    ),
    responses(
        (status = 200, description = "Most recent profiles", body = ProfilesListResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ProfileListQuery>,
) -> Result<Json<ProfilesListResponse>, ApiError> {
    let pool = state.pools.current().await?;
    let limit = params.effective_limit();

    let profiles = pool
        .with_connection(move |conn| Box::pin(query::fetch_page::<Profile>(conn, limit)))
        .await?;

    Ok(Json(ProfilesListResponse {
        count: profiles.len(),
        profiles,
    }))
}

/// Update selected fields of a profile.
#[utoipa::path(
    put,
    path = "/profiles/{profile_id}",
    params(
        ("profile_id" = Uuid, Path, description = "Profile identifier")
    ),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 422, description = "Unknown or invalid field", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(profile_id): ApiPath<Uuid>,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> Result<Json<Profile>, ApiError> {
    let pool = state.pools.current().await?;
    let fields = update.into_inner();

    let profile = pool
        .with_connection(move |conn| {
            Box::pin(query::update_returning::<Profile>(conn, profile_id, fields))
        })
        .await?
        .ok_or_else(|| profile_not_found(profile_id))?;

    info!(%profile_id, "Profile updated");
    Ok(Json(profile))
}

/// Delete a profile.
#[utoipa::path(
    delete,
    path = "/profiles/{profile_id}",
    params(
        ("profile_id" = Uuid, Path, description = "Profile identifier")
    ),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(profile_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.pools.current().await?;

    let deleted = pool
        .with_connection(move |conn| {
            Box::pin(query::delete_by_id::<Profile>(conn, profile_id))
        })
        .await?;

    if !deleted {
        return Err(profile_not_found(profile_id));
    }

    info!(%profile_id, "Profile deleted");
    Ok(Json(MessageResponse::new("Profile deleted successfully")))
}
