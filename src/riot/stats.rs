//! Derived Match Figures
//!
//! Numbers computed on the client from what the stats service returns:
//! KDA, CS per minute, per-game averages and the skill rating band.

use super::types::{MatchDetail, MatchSummary, PlayerStats};

/// `(kills + assists) / deaths`, or `kills + assists` for a deathless game
pub fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = f64::from(kills) + f64::from(assists);
    if deaths > 0 {
        takedowns / f64::from(deaths)
    } else {
        takedowns
    }
}

/// KDA as displayed: two decimals, or one for a deathless game
pub fn format_kda(kills: u32, deaths: u32, assists: u32) -> String {
    let value = kda(kills, deaths, assists);
    if deaths > 0 {
        format!("{:.2}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Creep score per minute; 0 for a zero-length game
pub fn cs_per_minute(cs: u32, game_length_secs: u64) -> f64 {
    if game_length_secs == 0 {
        return 0.0;
    }
    f64::from(cs) / (game_length_secs as f64 / 60.0)
}

/// Mean kills, deaths and assists per game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageKda {
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
}

impl std::fmt::Display for AverageKda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} / {:.1} / {:.1}", self.kills, self.deaths, self.assists)
    }
}

/// Skill rating derived from win rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
    NeedsWork,
}

impl SkillRating {
    /// Band for a win rate percentage
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate >= 70.0 {
            SkillRating::Excellent
        } else if win_rate >= 60.0 {
            SkillRating::Good
        } else if win_rate >= 50.0 {
            SkillRating::Average
        } else if win_rate >= 40.0 {
            SkillRating::BelowAverage
        } else {
            SkillRating::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillRating::Excellent => "Excellent",
            SkillRating::Good => "Good",
            SkillRating::Average => "Average",
            SkillRating::BelowAverage => "Below average",
            SkillRating::NeedsWork => "Needs work",
        }
    }
}

impl PlayerStats {
    /// Per-game averages; all zero when no games were returned
    pub fn average_per_game(&self) -> AverageKda {
        if self.total_games == 0 {
            return AverageKda {
                kills: 0.0,
                deaths: 0.0,
                assists: 0.0,
            };
        }

        let games = f64::from(self.total_games);
        AverageKda {
            kills: f64::from(self.total_kills) / games,
            deaths: f64::from(self.total_deaths) / games,
            assists: f64::from(self.total_assists) / games,
        }
    }

    pub fn skill_rating(&self) -> SkillRating {
        SkillRating::from_win_rate(self.win_rate)
    }

    /// Win rate as displayed, one decimal with a percent sign
    pub fn win_rate_display(&self) -> String {
        format!("{:.1}%", self.win_rate)
    }
}

impl MatchSummary {
    pub fn kda(&self) -> f64 {
        kda(self.kills, self.deaths, self.assists)
    }

    pub fn kda_display(&self) -> String {
        format_kda(self.kills, self.deaths, self.assists)
    }

    pub fn cs_per_minute(&self) -> f64 {
        cs_per_minute(self.cs, self.game_length)
    }

    pub fn outcome_label(&self) -> &'static str {
        outcome_label(self.victory)
    }
}

impl MatchDetail {
    pub fn kda(&self) -> f64 {
        kda(self.kills, self.deaths, self.assists)
    }

    pub fn kda_display(&self) -> String {
        format_kda(self.kills, self.deaths, self.assists)
    }

    pub fn cs_per_minute(&self) -> f64 {
        cs_per_minute(self.cs, self.game_length)
    }

    pub fn outcome_label(&self) -> &'static str {
        outcome_label(self.victory)
    }
}

fn outcome_label(victory: bool) -> &'static str {
    if victory {
        "Victory"
    } else {
        "Defeat"
    }
}
