use crate::feed::Draws;
use crate::models::{MatchState, Side};

/// Per-pass odds of each transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probabilities {
    /// upcoming -> live
    pub kickoff: f64,
    /// live -> finished
    pub full_time: f64,
    /// live -> live with one more goal
    pub goal: f64,
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            kickoff: 0.05,
            full_time: 0.02,
            goal: 0.30,
        }
    }
}

/// What happened to a single match during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    KickedOff,
    FullTime,
    Goal(Side),
}

/// Advance one match by a single pass.
///
/// Draws are taken in a fixed order: kickoff for upcoming matches, then
/// full time, then goal for live ones. A successful full-time draw ends the
/// match before any goal draw is taken. Finished matches take no draws.
pub fn advance<D: Draws + ?Sized>(
    state: &MatchState,
    odds: &Probabilities,
    draws: &mut D,
) -> (MatchState, Transition) {
    match *state {
        MatchState::Upcoming => {
            if draws.chance(odds.kickoff) {
                (MatchState::Live(Default::default()), Transition::KickedOff)
            } else {
                (*state, Transition::Unchanged)
            }
        }
        MatchState::Live(score) => {
            if draws.chance(odds.full_time) {
                (MatchState::Finished(score), Transition::FullTime)
            } else if draws.chance(odds.goal) {
                let side = draws.coin();
                (MatchState::Live(score.with_goal(side)), Transition::Goal(side))
            } else {
                (*state, Transition::Unchanged)
            }
        }
        MatchState::Finished(_) => (*state, Transition::Unchanged),
    }
}
