//! Native client against a mock service

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toyproject::api::{ApiClient, ApiError};
use toyproject::auth::{LoginRequest, TOKEN_KEY, USER_KEY};
use toyproject::board::PostDraft;
use toyproject::config::ApiConfig;
use toyproject::riot::SearchQuery;
use toyproject::storage::{KeyValueStorage, MemoryStorage, SharedStorage};

fn client_for(server: &MockServer, storage: SharedStorage) -> ApiClient {
    let mut config = ApiConfig::default();
    config.set_base_url(&server.uri());
    config.request_timeout_secs = 5;
    ApiClient::new(&config, storage).unwrap()
}

fn logged_in_storage() -> SharedStorage {
    let storage: SharedStorage = Arc::new(MemoryStorage::new());
    storage
        .set(USER_KEY, r#"{"userId":1,"username":"faker"}"#)
        .unwrap();
    storage.set(TOKEN_KEY, "jwt-abc").unwrap();
    storage
}

fn match_history_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "player": { "gameName": "Hide on bush", "tagLine": "KR1", "puuid": "p-1" },
            "stats": {
                "totalGames": 1, "wins": 1, "losses": 0, "winRate": 100.0,
                "averageKDA": 5.0, "totalKills": 7, "totalDeaths": 2, "totalAssists": 3,
                "mostPlayedChampion": "Ahri"
            },
            "matches": [{
                "matchId": "KR_1", "victory": true, "championName": "Ahri",
                "kills": 7, "deaths": 2, "assists": 3, "goldEarned": 12000,
                "totalDamage": 25000, "cs": 200, "gameLength": 1800,
                "gameDate": "2025-08-09T10:00:00", "queueType": "Ranked Solo"
            }]
        }
    })
}

#[tokio::test]
async fn test_check_username_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check/username/faker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    assert_eq!(client.check_username("faker").await, Ok(false));
}

#[tokio::test]
async fn test_bearer_token_attached_when_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/riot/player/Hide%20on%20bush/KR1/matches"))
        .and(query_param("count", "5"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(match_history_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, logged_in_storage());
    let query = SearchQuery {
        game_name: "Hide on bush".to_string(),
        tag_line: "KR1".to_string(),
        count: 5,
    };

    let data = client.player_matches(&query).await.unwrap();
    assert_eq!(data.player.riot_id(), "Hide on bush#KR1");
    assert_eq!(data.matches.len(), 1);
    assert_eq!(data.matches[0].kda_display(), "5.00");
}

#[tokio::test]
async fn test_unauthorized_clears_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/riot/match/KR_1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Token expired"
        })))
        .mount(&server)
        .await;

    let storage = logged_in_storage();
    let client = client_for(&server, Arc::clone(&storage));

    let err = client.match_detail("KR_1", "p-1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unauthorized {
            message: Some("Token expired".to_string())
        }
    );
    assert_eq!(storage.get(USER_KEY).unwrap(), None);
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_rejection_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "faker", "password": "wrong" })))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    let err = client
        .login(&LoginRequest {
            username: "faker".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.login_message(), "Invalid username or password.");
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "userId": 3, "username": "faker", "role": "USER", "token": "jwt-new" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStorage::new()));
    let data = client
        .login(&LoginRequest {
            username: "faker".to_string(),
            password: "Abcdef1!".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(data.token, "jwt-new");
    assert_eq!(data.user.user_id, Some(3));
}

#[tokio::test]
async fn test_unsuccessful_envelope_and_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check/email/a%40b.gg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Lookup disabled"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/riot/match/KR_404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStorage::new()));

    let err = client.check_email("a@b.gg").await.unwrap_err();
    assert_eq!(err.to_string(), "Lookup disabled");

    let err = client.match_detail("KR_404", "p-1").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.match_detail_message(), "Could not load this match.");
}

#[tokio::test]
async fn test_board_accepts_bare_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "title": "Welcome",
            "author": "Admin",
            "content": "Hello",
            "createdAt": "2025-08-09T10:00:00Z",
            "views": 15
        }])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 2, "title": "Hi", "author": "me", "content": "First",
                "createdAt": "2025-08-10T10:00:00Z"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStorage::new()));

    let posts = client.list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].views, 15);
    assert!(posts[0].comments.is_empty());

    let created = client
        .create_post(&PostDraft::new("Hi", "me", "First"))
        .await
        .unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.views, 0);
}

#[tokio::test]
async fn test_network_error() {
    let mut config = ApiConfig::default();
    // Nothing listens on port 9
    config.set_base_url("http://127.0.0.1:9");
    config.request_timeout_secs = 2;
    let client = ApiClient::new(&config, Arc::new(MemoryStorage::new())).unwrap();

    let err = client.check_username("faker").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
