//! Selectors the match board renders from a feed snapshot.

use crate::models::{Match, MatchStatus};

pub const DEFAULT_RESULTS_LIMIT: usize = 18;

/// Matches currently in play
pub fn live_matches(matches: &[Match]) -> Vec<&Match> {
    matches.iter().filter(|m| m.is_live()).collect()
}

/// First `limit` finished matches, in collection order
pub fn recent_results(matches: &[Match], limit: usize) -> Vec<&Match> {
    matches.iter().filter(|m| m.is_finished()).take(limit).collect()
}

/// The next fixture still to kick off
pub fn next_fixture(matches: &[Match]) -> Option<&Match> {
    matches.iter().find(|m| m.status() == MatchStatus::Upcoming)
}

/// Case-insensitive search over team and competition names
pub fn search<'a>(matches: &'a [Match], query: &str) -> Vec<&'a Match> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    matches
        .iter()
        .filter(|m| {
            [&m.home_team, &m.away_team, &m.competition]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
