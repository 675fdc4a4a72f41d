//! Match History
//!
//! League of Legends match-history lookup, backed by the stats service.
//!
//! - **types**: Player, aggregate stats, match rows and match detail
//! - **stats**: KDA, CS/min, per-game averages, skill rating
//! - **view**: Search state and the expanded-row set

pub mod stats;
pub mod types;
pub mod view;

pub use stats::{cs_per_minute, format_kda, kda, AverageKda, SkillRating};
pub use types::{MatchDetail, MatchSummary, Player, PlayerMatches, PlayerStats};
pub use view::{
    match_detail_link, match_detail_target, ExpandedMatches, InvalidMatchLink, MatchSearch,
    SearchError, SearchPhase, SearchQuery, DEFAULT_MATCH_COUNT,
};
