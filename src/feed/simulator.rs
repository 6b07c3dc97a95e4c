use std::collections::HashMap;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::feed::{advance, Draws, FeedSettings};
use crate::models::{FeedSnapshot, Highlight, Match, MatchState, Score, StateUpdate};

/// A state change applied to one match during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchChange {
    pub match_id: String,
    pub before: MatchState,
    pub after: MatchState,
}

/// Outcome of a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Every match whose state changed
    pub changes: Vec<MatchChange>,

    /// Matches whose score differs from the last recorded one, in collection order
    pub updated_ids: Vec<String>,
}

/// Owns a match collection and mutates it one pass at a time
pub struct LiveMatchSimulator {
    matches: Vec<Match>,
    previous_scores: HashMap<String, Score>,
    highlight: Option<Highlight>,
    updated_ids: Vec<String>,
    stale: bool,
    passes: u64,
    settings: FeedSettings,
    draws: Box<dyn Draws>,
}

impl LiveMatchSimulator {
    /// Create a simulator over `seed`, which it owns from now on
    pub fn new(seed: Vec<Match>, settings: FeedSettings, draws: impl Draws + 'static) -> Self {
        let previous_scores = seed.iter().map(|m| (m.id.clone(), m.tally())).collect();

        Self {
            matches: seed,
            previous_scores,
            highlight: None,
            updated_ids: Vec::new(),
            stale: false,
            passes: 0,
            settings,
            draws: Box::new(draws),
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Id of the most recently changed match while its highlight lasts
    pub fn last_updated_id(&self, now: Instant) -> Option<&str> {
        self.highlight
            .as_ref()
            .filter(|h| h.is_active(now))
            .map(|h| h.match_id.as_str())
    }

    /// Run one randomized pass over every match
    pub fn run_pass(&mut self, now: Instant) -> PassReport {
        let mut report = PassReport::default();

        for m in &mut self.matches {
            let (next, _) = advance(&m.state, &self.settings.odds, &mut self.draws);
            settle(&mut self.previous_scores, m, next, &mut report);
        }

        self.finish_pass(&report, now);
        report
    }

    /// Merge states fetched from an external feed.
    ///
    /// Unknown ids and backwards transitions are dropped; everything else
    /// goes through the same change detection as a simulated pass.
    pub fn apply_remote(&mut self, updates: Vec<StateUpdate>, now: Instant) -> PassReport {
        let mut report = PassReport::default();
        let mut incoming: HashMap<String, MatchState> = updates
            .into_iter()
            .map(|u| (u.match_id, u.state))
            .collect();

        for m in &mut self.matches {
            let Some(next) = incoming.remove(&m.id) else {
                continue;
            };

            if !m.state.can_become(&next) {
                warn!(
                    "Ignoring illegal update for {}: {:?} -> {:?}",
                    m.id, m.state, next
                );
                continue;
            }

            settle(&mut self.previous_scores, m, next, &mut report);
        }

        for id in incoming.keys() {
            debug!("Ignoring update for unknown match {}", id);
        }

        self.finish_pass(&report, now);
        report
    }

    /// Record a skipped pass; the collection is left as it was
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn snapshot(&self, is_syncing: bool) -> FeedSnapshot {
        FeedSnapshot {
            matches: self.matches.clone(),
            highlight: self.highlight.clone(),
            updated_ids: self.updated_ids.clone(),
            is_syncing,
            stale: self.stale,
            passes: self.passes,
        }
    }

    fn finish_pass(&mut self, report: &PassReport, now: Instant) {
        // Last write wins for the single highlight slot
        if let Some(id) = report.updated_ids.last() {
            self.highlight = Some(Highlight {
                match_id: id.clone(),
                expires_at: now + self.settings.highlight_cooldown,
            });
        }

        self.updated_ids = report.updated_ids.clone();
        self.stale = false;
        self.passes += 1;
    }
}

/// Apply `next` to `m` and record what changed
fn settle(
    previous_scores: &mut HashMap<String, Score>,
    m: &mut Match,
    next: MatchState,
    report: &mut PassReport,
) {
    if next == m.state {
        return;
    }

    let before = std::mem::replace(&mut m.state, next);
    report.changes.push(MatchChange {
        match_id: m.id.clone(),
        before,
        after: next,
    });

    let tally = m.tally();
    if let Some(previous) = previous_scores.get_mut(&m.id) {
        if *previous != tally {
            *previous = tally;
            report.updated_ids.push(m.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;

    use super::*;
    use crate::feed::draws::scripted::ScriptedDraws;
    use crate::feed::RandomDraws;
    use crate::models::{MatchStatus, Side};

    fn fixture(id: &str, state: MatchState) -> Match {
        Match {
            id: id.to_string(),
            home_team: "Arsenal".to_string(),
            away_team: "Liverpool".to_string(),
            state,
            competition: "Premier League".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: "15:00".to_string(),
            venue: Some("Etihad Stadium".to_string()),
            location: Some("Manchester, UK".to_string()),
            referee: Some("Howard Webb".to_string()),
            attendance: None,
        }
    }

    fn simulator(seed: Vec<Match>, draws: impl Draws + 'static) -> LiveMatchSimulator {
        LiveMatchSimulator::new(seed, FeedSettings::default(), draws)
    }

    #[test]
    fn test_no_pass_leaves_seed_untouched() {
        let seed = vec![
            fixture("m1", MatchState::Upcoming),
            fixture("m2", MatchState::Live(Score::new(1, 0))),
            fixture("m3", MatchState::Finished(Score::new(2, 1))),
        ];
        let sim = simulator(seed.clone(), ScriptedDraws::always(Side::Home));
        let snapshot = sim.snapshot(false);

        assert_eq!(snapshot.matches, seed);
        assert_eq!(snapshot.passes, 0);
        assert_eq!(snapshot.last_updated_id(Instant::now()), None);
    }

    #[test]
    fn test_kickoff() {
        let mut sim = simulator(
            vec![fixture("m1", MatchState::Upcoming)],
            ScriptedDraws::new().chances(&[true]),
        );

        let report = sim.run_pass(Instant::now());

        let m1 = &sim.matches()[0];
        assert_eq!(m1.status(), MatchStatus::Live);
        assert_eq!(m1.score(), Some(Score::ZERO));
        assert_eq!(report.changes.len(), 1);
        // 0-0 matches the cached tally of an upcoming match
        assert!(report.updated_ids.is_empty());
    }

    #[test]
    fn test_home_goal_highlights_match() {
        let mut sim = simulator(
            vec![fixture("m2", MatchState::Live(Score::new(1, 0)))],
            ScriptedDraws::new().chances(&[false, true]).coins(&[Side::Home]),
        );
        let now = Instant::now();

        let report = sim.run_pass(now);

        assert_eq!(sim.matches()[0].state, MatchState::Live(Score::new(2, 0)));
        assert_eq!(report.updated_ids, vec!["m2".to_string()]);
        assert_eq!(sim.last_updated_id(now), Some("m2"));
    }

    #[test]
    fn test_full_time_takes_precedence_over_goal() {
        let mut sim = simulator(
            vec![fixture("m2", MatchState::Live(Score::new(1, 0)))],
            ScriptedDraws::always(Side::Home),
        );
        let now = Instant::now();

        let report = sim.run_pass(now);

        assert_eq!(sim.matches()[0].state, MatchState::Finished(Score::new(1, 0)));
        assert!(report.updated_ids.is_empty());
        assert_eq!(sim.last_updated_id(now), None);
    }

    #[test]
    fn test_finished_match_never_changes() {
        let m3 = fixture("m3", MatchState::Finished(Score::new(2, 1)));
        let mut sim = simulator(vec![m3.clone()], ScriptedDraws::always(Side::Away));

        for _ in 0..25 {
            let report = sim.run_pass(Instant::now());
            assert!(report.changes.is_empty());
            assert_eq!(sim.matches()[0], m3);
        }
        assert_eq!(sim.passes(), 25);
    }

    #[test]
    fn test_highlight_cooldown() {
        let mut sim = simulator(
            vec![fixture("m2", MatchState::Live(Score::new(0, 0)))],
            ScriptedDraws::new().chances(&[false, true]).coins(&[Side::Away]),
        );
        let now = Instant::now();
        sim.run_pass(now);

        // A quiet pass does not clear the highlight early
        sim.run_pass(now + Duration::from_secs(1));

        assert_eq!(sim.last_updated_id(now + Duration::from_millis(4999)), Some("m2"));
        assert_eq!(sim.last_updated_id(now + Duration::from_secs(5)), None);
        assert!(sim.snapshot(false).updated_ids.is_empty());
    }

    #[test]
    fn test_last_changed_match_wins_highlight() {
        let mut sim = simulator(
            vec![
                fixture("a", MatchState::Live(Score::ZERO)),
                fixture("b", MatchState::Live(Score::ZERO)),
            ],
            ScriptedDraws::new()
                .chances(&[false, true, false, true])
                .coins(&[Side::Home, Side::Away]),
        );
        let now = Instant::now();

        let report = sim.run_pass(now);

        assert_eq!(report.updated_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(sim.last_updated_id(now), Some("b"));
    }

    #[test]
    fn test_invariants_hold_over_random_passes() {
        let seed: Vec<Match> = (0..30)
            .map(|i| {
                let state = match i % 3 {
                    0 => MatchState::Upcoming,
                    1 => MatchState::Live(Score::new(1, 1)),
                    _ => MatchState::Finished(Score::new(3, 0)),
                };
                fixture(&format!("m{}", i), state)
            })
            .collect();
        let settings = FeedSettings {
            odds: crate::feed::Probabilities {
                kickoff: 0.4,
                full_time: 0.1,
                goal: 0.6,
            },
            ..FeedSettings::default()
        };
        let mut sim = LiveMatchSimulator::new(seed, settings, RandomDraws::seeded(99));

        let mut previous = sim.matches().to_vec();
        for _ in 0..100 {
            sim.run_pass(Instant::now());
            for (before, after) in previous.iter().zip(sim.matches()) {
                assert_eq!(before.id, after.id);
                assert_eq!(before.home_team, after.home_team);
                assert!(before.state.can_become(&after.state));
                if before.is_finished() {
                    assert_eq!(before, after);
                }
            }
            previous = sim.matches().to_vec();
        }
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = simulator(
            vec![fixture("x1", MatchState::Live(Score::ZERO))],
            ScriptedDraws::new().chances(&[false, true]).coins(&[Side::Home]),
        );
        let mut second = simulator(
            vec![fixture("y1", MatchState::Live(Score::new(4, 4)))],
            ScriptedDraws::never(),
        );
        let now = Instant::now();

        first.run_pass(now);
        second.run_pass(now);

        assert_eq!(first.matches().len(), 1);
        assert_eq!(first.matches()[0].score(), Some(Score::new(1, 0)));
        assert_eq!(first.last_updated_id(now), Some("x1"));

        assert_eq!(second.matches().len(), 1);
        assert_eq!(second.matches()[0].id, "y1");
        assert_eq!(second.matches()[0].score(), Some(Score::new(4, 4)));
        assert_eq!(second.last_updated_id(now), None);
    }

    #[test]
    fn test_apply_remote() {
        let mut sim = simulator(
            vec![
                fixture("m1", MatchState::Upcoming),
                fixture("m2", MatchState::Live(Score::new(2, 0))),
                fixture("m3", MatchState::Finished(Score::new(1, 1))),
            ],
            ScriptedDraws::never(),
        );
        let now = Instant::now();

        let report = sim.apply_remote(
            vec![
                StateUpdate {
                    match_id: "m1".to_string(),
                    state: MatchState::Live(Score::new(0, 1)),
                },
                // Score going backwards is rejected
                StateUpdate {
                    match_id: "m2".to_string(),
                    state: MatchState::Live(Score::new(1, 0)),
                },
                StateUpdate {
                    match_id: "m3".to_string(),
                    state: MatchState::Live(Score::new(1, 1)),
                },
                StateUpdate {
                    match_id: "ghost".to_string(),
                    state: MatchState::Upcoming,
                },
            ],
            now,
        );

        assert_eq!(report.updated_ids, vec!["m1".to_string()]);
        assert_eq!(sim.matches()[0].score(), Some(Score::new(0, 1)));
        assert_eq!(sim.matches()[1].score(), Some(Score::new(2, 0)));
        assert!(sim.matches()[2].is_finished());
        assert_eq!(sim.matches().len(), 3);
        assert_eq!(sim.last_updated_id(now), Some("m1"));
    }

    #[test]
    fn test_stale_flag_clears_on_next_pass() {
        let mut sim = simulator(vec![fixture("m1", MatchState::Upcoming)], ScriptedDraws::never());

        sim.mark_stale();
        assert!(sim.snapshot(false).stale);
        assert_eq!(sim.passes(), 0);

        sim.apply_remote(Vec::new(), Instant::now());
        assert!(!sim.snapshot(false).stale);
        assert_eq!(sim.passes(), 1);
    }
}
