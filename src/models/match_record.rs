use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A fixture tracked by the live feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Stable match identifier (e.g. "match-42")
    pub id: String,

    /// Home team display name
    pub home_team: String,

    /// Away team display name
    pub away_team: String,

    /// Lifecycle state, carrying the scoreboard once the match kicks off
    #[serde(flatten)]
    pub state: MatchState,

    /// Competition name (e.g. "Premier League")
    pub competition: String,

    /// Match day
    pub date: NaiveDate,

    /// Kickoff time, "HH:MM"
    pub time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee: Option<String>,

    /// Formatted crowd figure, only known once a match is over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<String>,
}

/// Match lifecycle. An upcoming match has no scoreboard at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchState {
    Upcoming,
    Live(Score),
    Finished(Score),
}

/// Plain status label, without the scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

/// Home/away goal tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "homeScore")]
    pub home: u32,

    #[serde(rename = "awayScore")]
    pub away: u32,
}

/// New state for a known match, as reported by an external feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    pub match_id: String,
    pub state: MatchState,
}

/// Which side of the fixture an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Score {
    pub const ZERO: Score = Score { home: 0, away: 0 };

    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Score after one more goal for `side`
    pub fn with_goal(self, side: Side) -> Self {
        match side {
            Side::Home => Self {
                home: self.home.saturating_add(1),
                ..self
            },
            Side::Away => Self {
                away: self.away.saturating_add(1),
                ..self
            },
        }
    }

    /// True if neither side has fewer goals than in `earlier`
    pub fn follows(&self, earlier: &Score) -> bool {
        self.home >= earlier.home && self.away >= earlier.away
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

impl MatchState {
    pub fn status(&self) -> MatchStatus {
        match self {
            MatchState::Upcoming => MatchStatus::Upcoming,
            MatchState::Live(_) => MatchStatus::Live,
            MatchState::Finished(_) => MatchStatus::Finished,
        }
    }

    pub fn score(&self) -> Option<Score> {
        match self {
            MatchState::Upcoming => None,
            MatchState::Live(score) | MatchState::Finished(score) => Some(*score),
        }
    }

    /// Whether moving from `self` to `next` is a legal step of the lifecycle.
    ///
    /// Matches only move forward (upcoming, live, finished) and scores
    /// never go down. A finished match accepts nothing.
    pub fn can_become(&self, next: &MatchState) -> bool {
        match (self, next) {
            (MatchState::Upcoming, MatchState::Upcoming) => true,
            (MatchState::Upcoming, MatchState::Live(_)) => true,
            (MatchState::Upcoming, MatchState::Finished(_)) => true,
            (MatchState::Live(prev), MatchState::Live(score)) => score.follows(prev),
            (MatchState::Live(prev), MatchState::Finished(score)) => score.follows(prev),
            (MatchState::Finished(prev), MatchState::Finished(score)) => prev == score,
            _ => false,
        }
    }
}

impl Match {
    pub fn status(&self) -> MatchStatus {
        self.state.status()
    }

    pub fn score(&self) -> Option<Score> {
        self.state.score()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, MatchState::Live(_))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, MatchState::Finished(_))
    }

    /// Score used for change detection; an upcoming match counts as 0-0
    pub fn tally(&self) -> Score {
        self.score().unwrap_or(Score::ZERO)
    }
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(state: MatchState) -> Match {
        Match {
            id: "match-0".to_string(),
            home_team: "Brazil".to_string(),
            away_team: "France".to_string(),
            state,
            competition: "International Friendly".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 6, 11).unwrap(),
            time: "20:45".to_string(),
            venue: Some("Maracanã".to_string()),
            location: None,
            referee: None,
            attendance: None,
        }
    }

    #[test]
    fn test_upcoming_has_no_score() {
        let m = fixture(MatchState::Upcoming);
        assert_eq!(m.score(), None);
        assert_eq!(m.tally(), Score::ZERO);
        assert_eq!(m.status().as_str(), "upcoming");
    }

    #[test]
    fn test_json_shape() {
        let live = fixture(MatchState::Live(Score::new(2, 1)));
        let json = serde_json::to_value(&live).unwrap();

        assert_eq!(json["status"], "live");
        assert_eq!(json["homeScore"], 2);
        assert_eq!(json["awayScore"], 1);
        assert_eq!(json["homeTeam"], "Brazil");
        assert_eq!(json["date"], "2026-06-11");
        assert!(json.get("attendance").is_none());

        let upcoming = serde_json::to_value(fixture(MatchState::Upcoming)).unwrap();
        assert_eq!(upcoming["status"], "upcoming");
        assert!(upcoming.get("homeScore").is_none());

        let back: Match = serde_json::from_value(json).unwrap();
        assert_eq!(back, live);
    }

    #[test]
    fn test_can_become() {
        let live = MatchState::Live(Score::new(1, 0));

        assert!(MatchState::Upcoming.can_become(&MatchState::Live(Score::ZERO)));
        assert!(live.can_become(&MatchState::Live(Score::new(2, 0))));
        assert!(live.can_become(&MatchState::Finished(Score::new(1, 0))));
        assert!(!live.can_become(&MatchState::Live(Score::new(0, 1))));
        assert!(!live.can_become(&MatchState::Upcoming));

        let finished = MatchState::Finished(Score::new(2, 1));
        assert!(finished.can_become(&finished));
        assert!(!finished.can_become(&MatchState::Live(Score::new(2, 1))));
        assert!(!finished.can_become(&MatchState::Finished(Score::new(3, 1))));
    }

    #[test]
    fn test_with_goal() {
        assert_eq!(Score::new(1, 0).with_goal(Side::Home), Score::new(2, 0));
        assert_eq!(Score::new(1, 0).with_goal(Side::Away), Score::new(1, 1));
        assert_eq!(Score::new(3, 2).to_string(), "3-2");
    }
}
