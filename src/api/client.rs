//! Native Service Client
//!
//! `reqwest` client for the auth, stats and board services. Every request
//! carries the stored bearer token when there is one; every 401 clears the
//! stored identity before the error is returned.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::{
    expire_credentials, LoginData, LoginRequest, SignupData, SignupRequest, TOKEN_KEY,
};
use crate::board::{Post, PostDraft};
use crate::config::ApiConfig;
use crate::riot::{MatchDetail, PlayerMatches, SearchQuery};
use crate::storage::{KeyValueStorage, SharedStorage};

use super::endpoints;
use super::envelope::{error_message, ApiResponse, Payload};
use super::error::{ApiError, ApiResult};

/// HTTP client shared by every command
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    storage: SharedStorage,
}

impl ApiClient {
    /// Build a client that reads its token from `storage`
    pub fn new(config: &ApiConfig, storage: SharedStorage) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config: config.clone(),
            storage,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `POST /api/auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupData> {
        let url = endpoints::url(&self.config.auth_url, endpoints::SIGNUP);
        self.data(self.http.post(&url).json(request)).await
    }

    /// `POST /api/auth/login`; the caller records the session
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginData> {
        let url = endpoints::url(&self.config.auth_url, endpoints::LOGIN);
        self.data(self.http.post(&url).json(request)).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> ApiResult<()> {
        let url = endpoints::url(&self.config.auth_url, endpoints::LOGOUT);
        let envelope: ApiResponse<serde_json::Value> =
            self.envelope(self.http.post(&url)).await?;
        envelope.into_unit()
    }

    /// Whether `username` is still free
    pub async fn check_username(&self, username: &str) -> ApiResult<bool> {
        let url = endpoints::url(&self.config.auth_url, &endpoints::check_username(username));
        self.data(self.http.get(&url)).await
    }

    /// Whether `email` is still free
    pub async fn check_email(&self, email: &str) -> ApiResult<bool> {
        let url = endpoints::url(&self.config.auth_url, &endpoints::check_email(email));
        self.data(self.http.get(&url)).await
    }

    /// Player, aggregate stats and recent matches for a Riot id
    pub async fn player_matches(&self, query: &SearchQuery) -> ApiResult<PlayerMatches> {
        let path = endpoints::player_matches(&query.game_name, &query.tag_line, query.count);
        let url = endpoints::url(&self.config.stats_url, &path);
        self.data(self.http.get(&url)).await
    }

    /// One match from one player's point of view
    pub async fn match_detail(&self, match_id: &str, puuid: &str) -> ApiResult<MatchDetail> {
        let url = endpoints::url(
            &self.config.stats_url,
            &endpoints::match_detail(match_id, puuid),
        );
        self.data(self.http.get(&url)).await
    }

    /// `GET /api/posts`
    pub async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let url = endpoints::url(&self.config.board_url, endpoints::POSTS);
        self.payload(self.http.get(&url)).await
    }

    /// `POST /api/posts`
    pub async fn create_post(&self, draft: &PostDraft) -> ApiResult<Post> {
        let url = endpoints::url(&self.config.board_url, endpoints::POSTS);
        self.payload(self.http.post(&url).json(draft)).await
    }

    fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read access token");
                None
            }
        }
    }

    /// Send with auth attached; map non-2xx statuses to errors
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Service responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            expire_credentials(&*self.storage);
        } else {
            tracing::warn!(status = status.as_u16(), message = ?message, "Request rejected");
        }

        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<ApiResponse<T>> {
        let response = self.execute(request).await?;
        Ok(response.json::<ApiResponse<T>>().await?)
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        self.envelope(request).await?.into_data()
    }

    async fn payload<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        response.json::<Payload<T>>().await?.into_data()
    }
}
