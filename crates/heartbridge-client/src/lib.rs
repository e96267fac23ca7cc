//! HTTP client library for the Heartbridge API.
//!
//! This crate provides a typed HTTP client for the Heartbridge backend. It
//! covers every REST endpoint: users, profiles and the service endpoints.
//!
//! # Example
//!
//! ```no_run
//! use heartbridge_client::{ClientConfig, CreateUserRequest, HeartbridgeClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), heartbridge_client::Error> {
//!     let client = HeartbridgeClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_secs(30),
//!     })?;
//!
//!     let user = client
//!         .create_user(&CreateUserRequest {
//!             email_id: Some("a@b.com".into()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created {}", user.user_id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, HeartbridgeClient};
pub use error::Error;
pub use types::*;
