//! HTTP client for the Heartbridge API.

use crate::error::Error;
use crate::types::*;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Heartbridge API.
#[derive(Debug, Clone)]
pub struct HeartbridgeClient {
    client: Client,
    base_url: String,
}

impl HeartbridgeClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Service
    // ========================================================================

    /// Fetches the welcome message.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn root(&self) -> Result<MessageResponse, Error> {
        let url = format!("{}/", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for a rejected payload, [`Error::Api`]
    /// with status 409 for a duplicate email.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, Error> {
        let url = format!("{}/users/", self.base_url);
        let resp = self.client.post(&url).json(request).send().await?;
        self.handle_response(resp).await
    }

    /// Lists every user, newest first.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_users(&self) -> Result<UsersListResponse, Error> {
        let url = format!("{}/users/", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a user by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the user does not exist.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, Error> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Updates selected fields of a user.
    ///
    /// `fields` must serialize to a JSON object naming only updatable fields.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the user does not exist, or
    /// [`Error::Validation`] for an unknown or ill-typed field.
    pub async fn update_user<T: Serialize + ?Sized>(
        &self,
        user_id: Uuid,
        fields: &T,
    ) -> Result<User, Error> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let resp = self.client.put(&url).json(fields).send().await?;
        self.handle_response(resp).await
    }

    /// Deletes a user and their profiles.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the user does not exist.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<MessageResponse, Error> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let resp = self.client.delete(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Creates a profile owned by `user_id`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the owning user does not exist.
    pub async fn create_profile(
        &self,
        user_id: Uuid,
        request: &CreateProfileRequest,
    ) -> Result<Profile, Error> {
        let url = format!("{}/users/{}/profiles/", self.base_url, user_id);
        let resp = self.client.post(&url).json(request).send().await?;
        self.handle_response(resp).await
    }

    /// Lists the most recent profiles.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_profiles(
        &self,
        query: Option<&ProfileListQuery>,
    ) -> Result<ProfilesListResponse, Error> {
        let mut url = format!("{}/profiles/", self.base_url);
        if let Some(q) = query {
            let params = serde_urlencoded::to_string(q)?;
            if !params.is_empty() {
                url.push_str(&format!("?{}", params));
            }
        }
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Gets a profile by id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the profile does not exist.
    pub async fn get_profile(&self, profile_id: Uuid) -> Result<Profile, Error> {
        let url = format!("{}/profiles/{}", self.base_url, profile_id);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Updates selected fields of a profile.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the profile does not exist, or
    /// [`Error::Validation`] for an unknown or ill-typed field.
    pub async fn update_profile<T: Serialize + ?Sized>(
        &self,
        profile_id: Uuid,
        fields: &T,
    ) -> Result<Profile, Error> {
        let url = format!("{}/profiles/{}", self.base_url, profile_id);
        let resp = self.client.put(&url).json(fields).send().await?;
        self.handle_response(resp).await
    }

    /// Deletes a profile.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the profile does not exist.
    pub async fn delete_profile(&self, profile_id: Uuid) -> Result<MessageResponse, Error> {
        let url = format!("{}/profiles/{}", self.base_url, profile_id);
        let resp = self.client.delete(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(error_for_status(status, text))
    }
}

/// Maps a non-success response to a client error, preferring the API's
/// `error` message over the raw body.
fn error_for_status(status: StatusCode, body: String) -> Error {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}
