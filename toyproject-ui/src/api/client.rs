//! HTTP API Client
//!
//! Functions for communicating with the auth and stats services from the
//! browser. A stored access token is sent as a bearer header; a 401 clears
//! the stored identity and sends the browser to the login page.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use toyproject::api::endpoints::{self, DEFAULT_BASE_URL};
use toyproject::api::{error_message, ApiError, ApiResponse, ApiResult};
use toyproject::auth::{
    expire_credentials, LoginData, LoginRequest, SignupData, SignupRequest, TOKEN_KEY,
};
use toyproject::riot::{MatchDetail, PlayerMatches, SearchQuery};
use toyproject::storage::KeyValueStorage;

use crate::state::WebStorage;

/// localStorage key overriding the service base URL
pub const API_URL_KEY: &str = "toyproject_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = WebStorage.get(API_URL_KEY).ok().flatten();
    normalize_base(stored.as_deref())
}

fn normalize_base(stored: Option<&str>) -> String {
    let url = stored
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    url.trim_end_matches('/').to_string()
}

/// What a 401 on this call means
#[derive(Clone, Copy, PartialEq)]
enum OnUnauthorized {
    /// Session expired: clear credentials and leave the page
    Redirect,
    /// Wrong credentials on the login form: clear, but stay put
    Stay,
}

// ============ API Functions ============

/// Create an account
pub async fn signup(request: &SignupRequest) -> ApiResult<SignupData> {
    let builder = Request::post(&endpoints::url(&get_api_base(), endpoints::SIGNUP));
    data(with_json(builder, request)?, OnUnauthorized::Redirect).await
}

/// Log in; the caller records the session
pub async fn login(request: &LoginRequest) -> ApiResult<LoginData> {
    let builder = Request::post(&endpoints::url(&get_api_base(), endpoints::LOGIN));
    data(with_json(builder, request)?, OnUnauthorized::Stay).await
}

/// Tell the auth service the session is over
pub async fn logout() -> ApiResult<()> {
    let builder = Request::post(&endpoints::url(&get_api_base(), endpoints::LOGOUT));
    let request = authorized(builder)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    envelope::<serde_json::Value>(request, OnUnauthorized::Stay)
        .await?
        .into_unit()
}

/// Whether `username` is still free
pub async fn check_username(username: &str) -> ApiResult<bool> {
    let url = endpoints::url(&get_api_base(), &endpoints::check_username(username));
    get(&url).await
}

/// Whether `email` is still free
pub async fn check_email(email: &str) -> ApiResult<bool> {
    let url = endpoints::url(&get_api_base(), &endpoints::check_email(email));
    get(&url).await
}

/// Player, aggregate stats and recent matches for a Riot id
pub async fn player_matches(query: &SearchQuery) -> ApiResult<PlayerMatches> {
    let path = endpoints::player_matches(&query.game_name, &query.tag_line, query.count);
    get(&endpoints::url(&get_api_base(), &path)).await
}

/// One match from one player's point of view
pub async fn match_detail(match_id: &str, puuid: &str) -> ApiResult<MatchDetail> {
    let path = endpoints::match_detail(match_id, puuid);
    get(&endpoints::url(&get_api_base(), &path)).await
}

// ============ Plumbing ============

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match WebStorage.get(TOKEN_KEY).ok().flatten() {
        Some(token) if !token.is_empty() => {
            builder.header("Authorization", &format!("Bearer {}", token))
        }
        _ => builder,
    }
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Request> {
    authorized(builder)
        .json(body)
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))
}

async fn get<T: DeserializeOwned>(url: &str) -> ApiResult<T> {
    let request = authorized(Request::get(url))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    data(request, OnUnauthorized::Redirect).await
}

async fn execute(request: Request, on_unauthorized: OnUnauthorized) -> ApiResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    if status == 401 {
        let route = expire_credentials(&WebStorage);
        if on_unauthorized == OnUnauthorized::Redirect {
            redirect(route);
        }
    }

    Err(ApiError::from_status(status, message))
}

async fn envelope<T: DeserializeOwned>(
    request: Request,
    on_unauthorized: OnUnauthorized,
) -> ApiResult<ApiResponse<T>> {
    let response = execute(request, on_unauthorized).await?;
    response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn data<T: DeserializeOwned>(
    request: Request,
    on_unauthorized: OnUnauthorized,
) -> ApiResult<T> {
    envelope(request, on_unauthorized).await?.into_data()
}

/// Full page load, so every signal starts from the cleared storage
fn redirect(route: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(route) {
            web_sys::console::error_1(&e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(None), "http://localhost:8081");
        assert_eq!(normalize_base(Some("  ")), "http://localhost:8081");
        assert_eq!(
            normalize_base(Some("https://api.example.com/")),
            "https://api.example.com"
        );
    }
}
