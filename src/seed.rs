//! Seed collection for a feed: a deterministic-shaped fixture list spread
//! over the two weeks around `today`.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::{Match, MatchState, Score};

pub const DEFAULT_SEED_COUNT: usize = 210;

/// Matches per calendar day
const MATCHES_PER_DAY: usize = 15;

/// Days before `today` covered by the schedule
const DAYS_BACK: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompetitionKind {
    International,
    Club,
}

const COMPETITIONS: [(&str, CompetitionKind); 7] = [
    ("World Cup Qualifiers", CompetitionKind::International),
    ("UEFA Champions League", CompetitionKind::Club),
    ("Premier League", CompetitionKind::Club),
    ("La Liga", CompetitionKind::Club),
    ("Bundesliga", CompetitionKind::Club),
    ("International Friendly", CompetitionKind::International),
    ("Copa Libertadores", CompetitionKind::Club),
];

const VENUES: [(&str, &str); 7] = [
    ("Wembley Stadium", "London, UK"),
    ("Santiago Bernabéu", "Madrid, Spain"),
    ("Maracanã", "Rio de Janeiro, Brazil"),
    ("Allianz Arena", "Munich, Germany"),
    ("Lusail Stadium", "Lusail, Qatar"),
    ("Camp Nou", "Barcelona, Spain"),
    ("Etihad Stadium", "Manchester, UK"),
];

const REFEREES: [&str; 5] = [
    "Pierluigi Collina II",
    "Howard Webb",
    "Cüneyt Çakır",
    "Stephanie Frappart",
    "Mark Clattenburg",
];

const NATIONAL_TEAMS: [&str; 16] = [
    "Brazil",
    "France",
    "Argentina",
    "Germany",
    "Spain",
    "Italy",
    "England",
    "Portugal",
    "Netherlands",
    "Belgium",
    "Turkey",
    "Croatia",
    "Japan",
    "USA",
    "Mexico",
    "Morocco",
];

const CLUB_TEAMS: [&str; 12] = [
    "Real Madrid",
    "Man City",
    "Liverpool",
    "Barcelona",
    "Bayern Munich",
    "Arsenal",
    "Inter Milan",
    "PSG",
    "Bayer Leverkusen",
    "AC Milan",
    "Dortmund",
    "Juventus",
];

/// Generate `count` matches around `today`.
///
/// Past days are finished with a final score and attendance, today's
/// fixtures are a mix of live and upcoming, later days are upcoming.
pub fn generate_matches<R: Rng + ?Sized>(count: usize, today: NaiveDate, rng: &mut R) -> Vec<Match> {
    (0..count).map(|i| generate_match(i, today, rng)).collect()
}

fn generate_match<R: Rng + ?Sized>(i: usize, today: NaiveDate, rng: &mut R) -> Match {
    let (competition, kind) = COMPETITIONS[i % COMPETITIONS.len()];
    let (venue, location) = VENUES[i % VENUES.len()];
    let teams: &[&str] = match kind {
        CompetitionKind::International => &NATIONAL_TEAMS[..],
        CompetitionKind::Club => &CLUB_TEAMS[..],
    };

    // Second pick skips over the first so a team never plays itself
    let home = rng.gen_range(0..teams.len());
    let away = (home + 1 + rng.gen_range(0..teams.len() - 1)) % teams.len();

    let day_offset = (i / MATCHES_PER_DAY) as i64 - DAYS_BACK;
    let date = today
        .checked_add_signed(Duration::days(day_offset))
        .unwrap_or(today);

    let state = match day_offset {
        d if d < 0 => MatchState::Finished(Score::new(rng.gen_range(0..4), rng.gen_range(0..4))),
        0 if i % 3 == 0 => MatchState::Live(Score::new(rng.gen_range(0..3), rng.gen_range(0..2))),
        _ => MatchState::Upcoming,
    };

    let attendance = match state {
        MatchState::Finished(_) => Some(format_thousands(45_000 + rng.gen_range(0..40_000))),
        _ => None,
    };

    Match {
        id: format!("match-{}", i),
        home_team: teams[home].to_string(),
        away_team: teams[away].to_string(),
        state,
        competition: competition.to_string(),
        date,
        time: format!("{}:{:02}", 12 + i % 10, (i % 4) * 15),
        venue: Some(venue.to_string()),
        location: Some(location.to_string()),
        referee: Some(REFEREES[i % REFEREES.len()].to_string()),
        attendance,
    }
}

/// 52345 -> "52,345"
fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
