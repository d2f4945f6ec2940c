//! Authorized request gateway for the CityScope REST API.
//!
//! Every backend call goes through `ApiClient`. The client stamps requests
//! with the bearer token from the shared [`TokenStore`] and centralizes
//! failure handling: a 401 from any endpoint discards the persisted token
//! on the spot, so whichever screen triggered the call, the session ends
//! the same way.

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::models::{
    AuthPayload, Contribution, Credentials, ForgotPasswordResponse, ForumMessage, ForumTopic,
    GeneratedRoute, NewAccount, NewContribution, NewMessage, NewTopic, ProfileUpdate,
    RouteRequest, User, ValidateResponse,
};

use super::ApiError;

/// API client for the CityScope backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the token store is shared.
///
/// No request timeout is configured: slow calls are left to the network
/// stack, and callers own any retry decision.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check a response, mapping failure statuses onto the error taxonomy.
    ///
    /// A 401 means the credentials the request carried are no longer good:
    /// the persisted token is discarded here, before the error propagates.
    /// The caller still owns the user-facing reaction. Repeating the cleanup
    /// from concurrent in-flight requests is harmless - the slot clear is
    /// idempotent.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "API error response");

        if status == StatusCode::UNAUTHORIZED {
            warn!("Received 401, discarding persisted token");
            if let Err(e) = self.tokens.clear() {
                warn!(error = %e, "Failed to clear token slot");
            }
        }

        Err(ApiError::from_status(status, &body))
    }

    /// Dispatch one request. The bearer token is attached when the slot
    /// holds one; otherwise the call goes out unauthenticated and the
    /// server decides whether that is acceptable. No retries: every
    /// failure surfaces exactly once.
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "API request");

        let mut request = self.client.request(method, &url);

        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let response = self.check_response(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::Unexpected(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    // ===== Auth =====

    /// Exchange credentials for a token and user record
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.post("/auth/login", credentials).await
    }

    /// Create an account; the backend answers with an implicit login payload
    pub async fn register(&self, account: &NewAccount) -> Result<AuthPayload, ApiError> {
        self.post("/auth/register", account).await
    }

    /// Resolve the user behind the currently persisted token
    pub async fn validate(&self) -> Result<User, ApiError> {
        let response: ValidateResponse = self.get("/auth/validate").await?;
        Ok(response.user)
    }

    /// Request a password-reset email
    pub async fn forgot_password(&self, email: &str) -> Result<ForgotPasswordResponse, ApiError> {
        self.post("/auth/forgot-password", &serde_json::json!({ "email": email }))
            .await
    }

    /// Update the current user's profile, returning the replacement record
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.put("/profiles", update).await
    }

    // ===== Contributions =====

    pub async fn fetch_contributions(&self) -> Result<Vec<Contribution>, ApiError> {
        self.get("/contributions").await
    }

    /// Contributions created by the current user (profile screen)
    pub async fn fetch_own_contributions(&self) -> Result<Vec<Contribution>, ApiError> {
        self.get("/contributions/user").await
    }

    pub async fn create_contribution(
        &self,
        contribution: &NewContribution,
    ) -> Result<Contribution, ApiError> {
        self.post("/contributions", contribution).await
    }

    // ===== Agora =====

    pub async fn fetch_topics(&self) -> Result<Vec<ForumTopic>, ApiError> {
        self.get("/forums").await
    }

    pub async fn fetch_topic(&self, topic_id: &str) -> Result<ForumTopic, ApiError> {
        self.get(&format!("/forums/{}", topic_id)).await
    }

    pub async fn create_topic(&self, topic: &NewTopic) -> Result<ForumTopic, ApiError> {
        self.post("/forums", topic).await
    }

    pub async fn post_message(
        &self,
        topic_id: &str,
        content: &str,
    ) -> Result<ForumMessage, ApiError> {
        let body = NewMessage {
            content: content.to_string(),
        };
        self.post(&format!("/forums/{}/messages", topic_id), &body)
            .await
    }

    // ===== Échappées =====

    pub async fn generate_route(&self, request: &RouteRequest) -> Result<GeneratedRoute, ApiError> {
        self.post("/routes/generate", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tokens = TokenStore::open(dir.path().to_path_buf()).expect("slot");
        let client =
            ApiClient::new("http://localhost:5000/api/", tokens).expect("client should build");
        assert_eq!(client.url("/contributions"), "http://localhost:5000/api/contributions");
    }
}
