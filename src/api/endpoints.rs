//! Service Endpoints
//!
//! Paths of every external call. User-entered path segments (game names
//! with spaces, emails) are percent-encoded.

use urlencoding::encode;

pub const SIGNUP: &str = "/api/auth/signup";
pub const LOGIN: &str = "/api/auth/login";
pub const LOGOUT: &str = "/api/auth/logout";
pub const POSTS: &str = "/api/posts";

/// Default base URL for all three services
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

pub fn check_username(username: &str) -> String {
    format!("/api/auth/check/username/{}", encode(username))
}

pub fn check_email(email: &str) -> String {
    format!("/api/auth/check/email/{}", encode(email))
}

pub fn player_matches(game_name: &str, tag_line: &str, count: u32) -> String {
    format!(
        "/api/riot/player/{}/{}/matches?count={}",
        encode(game_name),
        encode(tag_line),
        count
    )
}

pub fn match_detail(match_id: &str, puuid: &str) -> String {
    format!("/api/riot/match/{}?puuid={}", encode(match_id), encode(puuid))
}

/// Join a base URL and an absolute path
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_matches_encodes_segments() {
        assert_eq!(
            player_matches("Hide on bush", "KR1", 5),
            "/api/riot/player/Hide%20on%20bush/KR1/matches?count=5"
        );
    }

    #[test]
    fn test_check_paths() {
        assert_eq!(check_username("faker"), "/api/auth/check/username/faker");
        assert_eq!(
            check_email("a+b@t1.gg"),
            "/api/auth/check/email/a%2Bb%40t1.gg"
        );
    }

    #[test]
    fn test_match_detail() {
        assert_eq!(
            match_detail("KR_123", "abc/def"),
            "/api/riot/match/KR_123?puuid=abc%2Fdef"
        );
    }

    #[test]
    fn test_url_join() {
        assert_eq!(url("http://localhost:8081/", LOGIN), "http://localhost:8081/api/auth/login");
        assert_eq!(url("http://localhost:8081", POSTS), "http://localhost:8081/api/posts");
    }
}
