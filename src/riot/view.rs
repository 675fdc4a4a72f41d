//! Match-History View State
//!
//! UI-independent state behind the search screen: the two search inputs,
//! the loading/error/result triple and the set of expanded match rows.
//! The Leptos page keeps a `MatchSearch` in a signal; the CLI drives it
//! directly.

use std::collections::HashSet;
use thiserror::Error;

use super::types::PlayerMatches;

/// Matches requested per search
pub const DEFAULT_MATCH_COUNT: u32 = 5;

/// Match ids whose rows show full detail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedMatches {
    ids: HashSet<String>,
}

impl ExpandedMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a collapsed row or collapse an expanded one
    ///
    /// Returns whether the row is expanded afterwards.
    pub fn toggle(&mut self, match_id: &str) -> bool {
        if self.ids.remove(match_id) {
            false
        } else {
            self.ids.insert(match_id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, match_id: &str) -> bool {
        self.ids.contains(match_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Why a search could not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter both a game name and a tag.")]
    MissingRiotId,

    #[error("A search is already in progress.")]
    InFlight,
}

/// A validated search, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub game_name: String,
    pub tag_line: String,
    pub count: u32,
}

/// What the result area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing searched yet: show the hint card
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Search screen state
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSearch {
    pub game_name: String,
    pub tag_line: String,
    pub count: u32,
    loading: bool,
    result: Option<PlayerMatches>,
    error: Option<String>,
    expanded: ExpandedMatches,
}

impl Default for MatchSearch {
    fn default() -> Self {
        Self {
            game_name: String::new(),
            tag_line: String::new(),
            count: DEFAULT_MATCH_COUNT,
            loading: false,
            result: None,
            error: None,
            expanded: ExpandedMatches::new(),
        }
    }
}

impl MatchSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search from the current inputs
    ///
    /// Both inputs are required and only one search runs at a time. On
    /// success the previous result, error and expanded rows are cleared and
    /// the loading flag is set.
    pub fn begin(&mut self) -> Result<SearchQuery, SearchError> {
        if self.loading {
            return Err(SearchError::InFlight);
        }

        let game_name = self.game_name.trim();
        let tag_line = self.tag_line.trim().trim_start_matches('#');
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(SearchError::MissingRiotId);
        }

        let query = SearchQuery {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
            count: self.count,
        };

        self.loading = true;
        self.error = None;
        self.result = None;
        self.expanded.clear();

        Ok(query)
    }

    /// Store the outcome of the request started by `begin`
    pub fn finish(&mut self, outcome: Result<PlayerMatches, String>) {
        self.loading = false;
        match outcome {
            Ok(data) => self.result = Some(data),
            Err(message) => self.error = Some(message),
        }
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.result.is_some() {
            SearchPhase::Loaded
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else {
            SearchPhase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&PlayerMatches> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle(&mut self, match_id: &str) -> bool {
        self.expanded.toggle(match_id)
    }

    pub fn is_expanded(&self, match_id: &str) -> bool {
        self.expanded.is_expanded(match_id)
    }

    pub fn expanded(&self) -> &ExpandedMatches {
        &self.expanded
    }
}

/// Frontend route of a match detail page, segments percent-encoded
pub fn match_detail_link(match_id: &str, puuid: &str) -> String {
    format!(
        "/riot/match/{}?puuid={}",
        urlencoding::encode(match_id),
        urlencoding::encode(puuid)
    )
}

/// Reason a match detail page cannot load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid access: a match id and player id are required.")]
pub struct InvalidMatchLink;

/// Validate the route parameters of a match detail page
///
/// Both the match id and the PUUID are required; blank counts as missing.
pub fn match_detail_target(
    match_id: Option<&str>,
    puuid: Option<&str>,
) -> Result<(String, String), InvalidMatchLink> {
    let match_id = match_id.map(str::trim).filter(|s| !s.is_empty());
    let puuid = puuid.map(str::trim).filter(|s| !s.is_empty());

    match (match_id, puuid) {
        (Some(m), Some(p)) => Ok((m.to_string(), p.to_string())),
        _ => Err(InvalidMatchLink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::types::{Player, PlayerStats};

    fn sample() -> PlayerMatches {
        PlayerMatches {
            player: Player {
                game_name: "Faker".to_string(),
                tag_line: "KR1".to_string(),
                puuid: None,
            },
            stats: PlayerStats {
                total_games: 0,
                wins: 0,
                losses: 0,
                win_rate: 0.0,
                average_kda: 0.0,
                total_kills: 0,
                total_deaths: 0,
                total_assists: 0,
                most_played_champion: None,
            },
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut expanded = ExpandedMatches::new();
        expanded.toggle("KR_1");
        let before = expanded.clone();

        assert!(expanded.toggle("KR_2"));
        assert!(expanded.is_expanded("KR_2"));
        assert!(!expanded.toggle("KR_2"));
        assert_eq!(expanded, before);

        // From empty as well
        let mut empty = ExpandedMatches::new();
        empty.toggle("KR_9");
        empty.toggle("KR_9");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut expanded = ExpandedMatches::new();
        expanded.toggle("a");
        expanded.toggle("b");
        expanded.toggle("a");
        assert!(!expanded.is_expanded("a"));
        assert!(expanded.is_expanded("b"));
        assert_eq!(expanded.len(), 1);
    }

    #[test]
    fn test_begin_requires_both_inputs() {
        let mut search = MatchSearch::new();
        search.game_name = "Faker".to_string();
        assert_eq!(search.begin(), Err(SearchError::MissingRiotId));
        assert_eq!(search.phase(), SearchPhase::Idle);

        search.tag_line = "  ".to_string();
        assert_eq!(search.begin(), Err(SearchError::MissingRiotId));
    }

    #[test]
    fn test_search_lifecycle() {
        let mut search = MatchSearch::new();
        search.game_name = " Faker ".to_string();
        search.tag_line = "#KR1".to_string();

        let query = search.begin().unwrap();
        assert_eq!(query.game_name, "Faker");
        assert_eq!(query.tag_line, "KR1");
        assert_eq!(query.count, DEFAULT_MATCH_COUNT);
        assert_eq!(search.phase(), SearchPhase::Loading);

        // Gated while in flight
        assert_eq!(search.begin(), Err(SearchError::InFlight));

        search.finish(Ok(sample()));
        assert_eq!(search.phase(), SearchPhase::Loaded);
        assert!(!search.is_loading());

        search.toggle("KR_1");
        assert!(search.is_expanded("KR_1"));

        // A new search clears the old result and expanded rows
        search.begin().unwrap();
        assert!(search.result().is_none());
        assert!(search.expanded().is_empty());

        search.finish(Err("Player not found.".to_string()));
        assert_eq!(search.phase(), SearchPhase::Failed);
        assert_eq!(search.error(), Some("Player not found."));
    }

    #[test]
    fn test_match_detail_link_encodes() {
        assert_eq!(
            match_detail_link("KR_1", "p-1"),
            "/riot/match/KR_1?puuid=p-1"
        );
        assert_eq!(
            match_detail_link("KR 1/2", "a+b&c=d"),
            "/riot/match/KR%201%2F2?puuid=a%2Bb%26c%3Dd"
        );
    }

    #[test]
    fn test_match_detail_target() {
        assert_eq!(
            match_detail_target(Some("KR_1"), Some("p-1")),
            Ok(("KR_1".to_string(), "p-1".to_string()))
        );
        assert_eq!(match_detail_target(Some("KR_1"), None), Err(InvalidMatchLink));
        assert_eq!(match_detail_target(None, Some("p-1")), Err(InvalidMatchLink));
        assert_eq!(match_detail_target(Some(""), Some("p-1")), Err(InvalidMatchLink));
    }
}
