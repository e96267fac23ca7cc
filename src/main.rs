//! Heartbridge Backend Server
//!
//! REST API server for Heartbridge users and matchmaking profiles.

use heartbridge_backend::api::create_router;
use heartbridge_backend::config::Config;
use heartbridge_backend::db::{Gender, Profile, User};
use heartbridge_backend::error::ErrorResponse;
use heartbridge_backend::models::{
    CreateProfileRequest, CreateUserRequest, DatabaseStatus, HealthResponse, MessageResponse,
    ProfilesListResponse, UsersListResponse,
};
use heartbridge_backend::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        heartbridge_backend::api::handlers::root,
        heartbridge_backend::api::handlers::health_check,
        heartbridge_backend::api::users::create_user,
        heartbridge_backend::api::users::get_user,
        heartbridge_backend::api::users::list_users,
        heartbridge_backend::api::users::update_user,
        heartbridge_backend::api::users::delete_user,
        heartbridge_backend::api::profiles::create_profile,
        heartbridge_backend::api::profiles::get_profile,
        heartbridge_backend::api::profiles::list_profiles,
        heartbridge_backend::api::profiles::update_profile,
        heartbridge_backend::api::profiles::delete_profile,
    ),
    components(
        schemas(
            User,
            Profile,
            Gender,
            CreateUserRequest,
            CreateProfileRequest,
            UsersListResponse,
            ProfilesListResponse,
            MessageResponse,
            HealthResponse,
            DatabaseStatus,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Root", description = "Welcome endpoint"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "User account management"),
        (name = "Profiles", description = "Matchmaking profile management"),
    ),
    info(
        title = "Heartbridge API",
        version = "0.1.0",
        description = "REST API for Heartbridge users and profiles",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables already set in the environment take precedence over .env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.server.bind_address();

    // Create application state
    let state = Arc::new(AppState::new(config));

    // Connect at startup; requests retry initialization if this fails
    match state.pools.initialize().await {
        Ok(pool) => info!(max_connections = pool.max_connections(), "Database ready"),
        Err(e) => warn!(error = %e, "Database unavailable at startup, will retry on demand"),
    }

    info!("Starting Heartbridge Backend on {}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(Arc::clone(&state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.pools.shutdown().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
