//! Auth service request and response bodies

use serde::{Deserialize, Serialize};

/// Role sent with every signup
pub const DEFAULT_ROLE: &str = "USER";

/// The logged-in user, as persisted under the `user` storage key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// `POST /api/auth/login` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `data` of a successful login: the user plus its access token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(flatten)]
    pub user: AuthenticatedUser,
}

/// `POST /api/auth/signup` body
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// `data` of a successful signup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_data_splits_token_from_user() {
        let json = r#"{
            "userId": 12,
            "username": "faker",
            "email": "faker@t1.gg",
            "role": "USER",
            "token": "jwt-abc"
        }"#;

        let data: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(data.token, "jwt-abc");
        assert_eq!(data.user.user_id, Some(12));
        assert_eq!(data.user.username, "faker");

        // The persisted user never carries the token
        let stored = serde_json::to_value(&data.user).unwrap();
        assert!(stored.get("token").is_none());
        assert_eq!(stored["userId"], 12);
    }
}
