use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::feed::{FeedSettings, Probabilities};
use crate::seed::DEFAULT_SEED_COUNT;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Milliseconds between two sync passes
    pub poll_interval_ms: u64,

    /// Simulated network latency of a pass, in milliseconds
    pub sync_latency_ms: u64,

    /// How long a changed match stays highlighted, in milliseconds
    pub highlight_cooldown_ms: u64,

    /// Per-pass chance of an upcoming match kicking off
    pub kickoff_chance: f64,

    /// Per-pass chance of a live match reaching full time
    pub full_time_chance: f64,

    /// Per-pass chance of a goal in a live match
    pub goal_chance: f64,

    /// Number of matches in the generated seed collection
    pub seed_count: usize,

    /// Fixed RNG seed for reproducible runs
    pub rng_seed: Option<u64>,

    /// Live-score endpoint; when set, passes poll it instead of simulating
    pub remote_url: Option<String>,

    /// Upper bound on one remote feed request, in milliseconds
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            poll_interval_ms: parse_var("FEED_POLL_INTERVAL_MS", 8000)?,
            sync_latency_ms: parse_var("FEED_SYNC_LATENCY_MS", 800)?,
            highlight_cooldown_ms: parse_var("FEED_HIGHLIGHT_COOLDOWN_MS", 5000)?,
            kickoff_chance: parse_var("FEED_KICKOFF_CHANCE", 0.05)?,
            full_time_chance: parse_var("FEED_FULL_TIME_CHANCE", 0.02)?,
            goal_chance: parse_var("FEED_GOAL_CHANCE", 0.30)?,
            seed_count: parse_var("FEED_SEED_COUNT", DEFAULT_SEED_COUNT)?,
            rng_seed: match env::var("FEED_RNG_SEED") {
                Ok(raw) => Some(
                    raw.trim()
                        .parse()
                        .context("FEED_RNG_SEED must be a valid number")?,
                ),
                Err(_) => None,
            },
            remote_url: env::var("FEED_REMOTE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            request_timeout_ms: parse_var("FEED_REQUEST_TIMEOUT_MS", 5000)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the feed cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("FEED_POLL_INTERVAL_MS must be greater than zero");
        }

        if self.request_timeout_ms == 0 || self.request_timeout_ms >= self.poll_interval_ms {
            bail!(
                "FEED_REQUEST_TIMEOUT_MS must be between 1 and FEED_POLL_INTERVAL_MS ({}), got {}",
                self.poll_interval_ms,
                self.request_timeout_ms
            );
        }

        for (name, p) in [
            ("FEED_KICKOFF_CHANCE", self.kickoff_chance),
            ("FEED_FULL_TIME_CHANCE", self.full_time_chance),
            ("FEED_GOAL_CHANCE", self.goal_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("{} must be between 0 and 1, got {}", name, p);
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            sync_latency: Duration::from_millis(self.sync_latency_ms),
            highlight_cooldown: Duration::from_millis(self.highlight_cooldown_ms),
            odds: Probabilities {
                kickoff: self.kickoff_chance,
                full_time: self.full_time_chance,
                goal: self.goal_chance,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 8000,
            sync_latency_ms: 800,
            highlight_cooldown_ms: 5000,
            kickoff_chance: 0.05,
            full_time_chance: 0.02,
            goal_chance: 0.30,
            seed_count: DEFAULT_SEED_COUNT,
            rng_seed: None,
            remote_url: None,
            request_timeout_ms: 5000,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}
