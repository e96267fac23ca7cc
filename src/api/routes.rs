//! Route configuration.

use crate::api::{handlers, profiles, users};
use crate::state::AppState;
use axum::Router;
use axum::routing::{MethodRouter, get, post};
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// Registers `path` both with and without a trailing slash.
fn both(
    router: Router<Arc<AppState>>,
    path: &str,
    method_router: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    let trimmed = path.trim_end_matches('/');
    router
        .route(&format!("{trimmed}/"), method_router.clone())
        .route(trimmed, method_router)
}

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Root and health
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check));

    // Users
    let router = both(
        router,
        "/users/",
        post(users::create_user).get(users::list_users),
    );
    let router = both(
        router,
        "/users/{user_id}",
        get(users::get_user)
            .put(users::update_user)
            .delete(users::delete_user),
    );

    // Profiles
    let router = both(
        router,
        "/users/{user_id}/profiles/",
        post(profiles::create_profile),
    );
    let router = both(router, "/profiles/", get(profiles::list_profiles));
    let router = both(
        router,
        "/profiles/{profile_id}",
        get(profiles::get_profile)
            .put(profiles::update_profile)
            .delete(profiles::delete_profile),
    );

    router.with_state(state)
}
