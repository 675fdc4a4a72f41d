//! Stats service response types
//!
//! Everything here is read-only: it arrives from
//! `GET /api/riot/player/{gameName}/{tagLine}/matches` and
//! `GET /api/riot/match/{matchId}` and is rendered as-is or through the
//! derived figures in [`super::stats`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `data` of the player match-history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerMatches {
    pub player: Player,
    pub stats: PlayerStats,
    #[serde(default)]
    pub matches: Vec<MatchSummary>,
}

/// Riot account identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub game_name: String,
    pub tag_line: String,
    #[serde(default)]
    pub puuid: Option<String>,
}

impl Player {
    /// `Name#TAG`
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Aggregates over the returned matches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage, 0-100
    pub win_rate: f64,
    #[serde(rename = "averageKDA")]
    pub average_kda: f64,
    pub total_kills: u32,
    pub total_deaths: u32,
    pub total_assists: u32,
    #[serde(default)]
    pub most_played_champion: Option<String>,
}

/// One row of the match history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,
    pub victory: bool,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u64,
    pub total_damage: u64,
    pub cs: u32,
    /// Seconds
    pub game_length: u64,
    #[serde(with = "game_date")]
    pub game_date: DateTime<Utc>,
    #[serde(default)]
    pub queue_type: String,
}

/// `data` of the match detail endpoint, from one player's perspective
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub puuid: Option<String>,
    pub game_name: String,
    pub tag_line: String,
    pub victory: bool,
    pub champion_name: String,
    #[serde(default)]
    pub queue_type: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u64,
    pub total_damage: u64,
    pub cs: u32,
    /// Seconds
    pub game_length: u64,
    #[serde(with = "game_date")]
    pub game_date: DateTime<Utc>,
}

impl MatchDetail {
    /// `Name#TAG`
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }

    /// PUUID cut to its first 20 and last 10 characters for display
    pub fn short_puuid(&self) -> Option<String> {
        let puuid = self.puuid.as_deref()?;
        let chars: Vec<char> = puuid.chars().collect();
        if chars.len() <= PUUID_HEAD + PUUID_TAIL {
            return Some(puuid.to_string());
        }

        let head: String = chars[..PUUID_HEAD].iter().collect();
        let tail: String = chars[chars.len() - PUUID_TAIL..].iter().collect();
        Some(format!("{}...{}", head, tail))
    }
}

const PUUID_HEAD: usize = 20;
const PUUID_TAIL: usize = 10;

/// Game dates arrive either as ISO 8601 text or as epoch milliseconds
mod game_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::format::parse_timestamp;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("game date out of range: {}", ms))),
            Raw::Text(text) => parse_timestamp(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid game date: {}", text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PLAYER_JSON: &str = r#"{
        "player": { "gameName": "Hide on bush", "tagLine": "KR1", "puuid": "p-1" },
        "stats": {
            "totalGames": 2, "wins": 1, "losses": 1, "winRate": 50.0,
            "averageKDA": 3.25, "totalKills": 10, "totalDeaths": 4, "totalAssists": 3,
            "mostPlayedChampion": "Ahri"
        },
        "matches": [
            {
                "matchId": "KR_1", "victory": true, "championName": "Ahri",
                "kills": 7, "deaths": 1, "assists": 2, "goldEarned": 12345,
                "totalDamage": 23456, "cs": 210, "gameLength": 1800,
                "gameDate": "2025-08-09T10:00:00", "queueType": "Ranked Solo"
            },
            {
                "matchId": "KR_2", "victory": false, "championName": "Sylas",
                "kills": 3, "deaths": 3, "assists": 1, "goldEarned": 9000,
                "totalDamage": 15000, "cs": 150, "gameLength": 1500,
                "gameDate": 1754733600000
            }
        ]
    }"#;

    #[test]
    fn test_player_matches_parse() {
        let data: PlayerMatches = serde_json::from_str(PLAYER_JSON).unwrap();

        assert_eq!(data.player.riot_id(), "Hide on bush#KR1");
        assert_eq!(data.stats.average_kda, 3.25);
        assert_eq!(data.stats.most_played_champion.as_deref(), Some("Ahri"));
        assert_eq!(data.matches.len(), 2);

        let first = &data.matches[0];
        assert_eq!(
            first.game_date,
            Utc.with_ymd_and_hms(2025, 8, 9, 10, 0, 0).unwrap()
        );
        assert_eq!(first.queue_type, "Ranked Solo");

        // Millisecond dates and a missing queue type
        let second = &data.matches[1];
        assert_eq!(second.game_date.timestamp_millis(), 1754733600000);
        assert_eq!(second.queue_type, "");
    }

    #[test]
    fn test_match_detail_footer_ids() {
        let json = r#"{
            "matchId": "KR_7000000001",
            "puuid": "abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGH",
            "gameName": "Hide on bush", "tagLine": "KR1", "victory": false,
            "championName": "Azir", "kills": 2, "deaths": 4, "assists": 6,
            "goldEarned": 10000, "totalDamage": 20000, "cs": 250,
            "gameLength": 2000, "gameDate": 1754733600000
        }"#;

        let detail: MatchDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.match_id.as_deref(), Some("KR_7000000001"));
        assert_eq!(
            detail.short_puuid().as_deref(),
            Some("abcdefghijklmnopqrst...89ABCDEFGH")
        );

        let short = MatchDetail {
            puuid: Some("p-1".to_string()),
            ..detail.clone()
        };
        assert_eq!(short.short_puuid().as_deref(), Some("p-1"));

        let missing = MatchDetail {
            puuid: None,
            ..detail
        };
        assert_eq!(missing.short_puuid(), None);
    }

    #[test]
    fn test_invalid_game_date_rejected() {
        let json = PLAYER_JSON.replace("2025-08-09T10:00:00", "last tuesday");
        assert!(serde_json::from_str::<PlayerMatches>(&json).is_err());
    }
}
