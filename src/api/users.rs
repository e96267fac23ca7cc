//! User handlers.

use crate::api::extract::{ApiPath, ValidatedJson};
use crate::db::{User, query};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{CreateUserRequest, MessageResponse, UserUpdate, UsersListResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn user_not_found(user_id: Uuid) -> ApiError {
    ApiError::not_found("User", user_id)
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let pool = state.pools.current().await?;
    let values = request.into_values(Uuid::new_v4(), Utc::now());

    let user = pool
        .with_connection(move |conn| Box::pin(query::insert_returning::<User>(conn, values)))
        .await?;

    info!(user_id = %user.user_id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<User>, ApiError> {
    let pool = state.pools.current().await?;

    pool.with_connection(move |conn| Box::pin(query::find_by_id::<User>(conn, user_id)))
        .await?
        .map(Json)
        .ok_or_else(|| user_not_found(user_id))
}

/// List every user, newest first.
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "All users", body = UsersListResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UsersListResponse>, ApiError> {
    let pool = state.pools.current().await?;

    let users = pool
        .with_connection(|conn| Box::pin(query::list_all::<User>(conn)))
        .await?;

    Ok(Json(UsersListResponse {
        count: users.len(),
        users,
    }))
}

/// Update selected fields of a user.
///
/// Only the supplied fields change; `modified_at` is always refreshed.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User identifier")
    ),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Unknown or invalid field", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ValidatedJson(update): ValidatedJson<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let pool = state.pools.current().await?;
    let fields = update.into_inner();

    let user = pool
        .with_connection(move |conn| {
            Box::pin(query::update_returning::<User>(conn, user_id, fields))
        })
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    info!(%user_id, "User updated");
    Ok(Json(user))
}

/// Delete a user and, by cascade, their profiles.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.pools.current().await?;

    let deleted = pool
        .with_connection(move |conn| Box::pin(query::delete_by_id::<User>(conn, user_id)))
        .await?;

    if !deleted {
        return Err(user_not_found(user_id));
    }

    info!(%user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
