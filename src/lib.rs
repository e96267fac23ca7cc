//! # Heartbridge Backend - REST API Server
//!
//! REST backend for the Heartbridge matchmaking service. Users sign up by
//! email, phone or single sign-on and create any number of matchmaking
//! profiles. Built with [Axum](https://crates.io/crates/axum) for async HTTP
//! handling, [sqlx](https://crates.io/crates/sqlx) for PostgreSQL access and
//! [utoipa](https://crates.io/crates/utoipa) for OpenAPI documentation.
//!
//! ## Key Features
//!
//! - **Pooled Connections**: A single connection pool owned by the application
//!   state, created at startup or on first demand and closed on shutdown.
//!
//! - **Scoped Leases**: Each operation leases one connection that is returned
//!   to the pool on every exit path, including cancellation.
//!
//! - **Safe Partial Updates**: Update payloads are checked against a
//!   per-table allow-list of mutable columns; values are always bound as
//!   parameters.
//!
//! - **OpenAPI Documentation**: Swagger UI at `/swagger-ui/`.
//!
//! ## Architecture
//!
//! ```text
//! Handler ──► ConnectionScope::with_connection ──► query::* ──► PostgreSQL
//!    ▲                    │ (LeasedConnection dropped)
//!    └────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, extractors and router configuration |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`db`] | Pool manager, connection scopes, statements and row types |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`state`] | Application state management |
//!
//! ## API Endpoints
//!
//! Every collection route is also served without its trailing slash.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Welcome message |
//! | GET | `/health` | Health check with pool statistics |
//! | POST | `/users/` | Create user |
//! | GET | `/users/` | List users |
//! | GET | `/users/{user_id}` | Get user |
//! | PUT | `/users/{user_id}` | Update user fields |
//! | DELETE | `/users/{user_id}` | Delete user |
//! | POST | `/users/{user_id}/profiles/` | Create profile for user |
//! | GET | `/profiles/?limit=N` | List recent profiles |
//! | GET | `/profiles/{profile_id}` | Get profile |
//! | PUT | `/profiles/{profile_id}` | Update profile fields |
//! | DELETE | `/profiles/{profile_id}` | Delete profile |
//!
//! ## Example Usage
//!
//! ```bash
//! # Run against a local database
//! DATABASE_URL=postgres://localhost/heartbridge cargo run
//!
//! # Create a user
//! curl -X POST http://localhost:8080/users/ \
//!   -H "Content-Type: application/json" \
//!   -d '{"email_id": "a@b.com", "first_name": "A"}'
//!
//! # Change their first name
//! curl -X PUT http://localhost:8080/users/<user_id> \
//!   -H "Content-Type: application/json" \
//!   -d '{"first_name": "B"}'
//! ```
//!
//! The table definitions live in [`db::SCHEMA_SQL`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
