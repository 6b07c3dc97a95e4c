use std::time::Duration;

use crate::feed::Probabilities;

/// Timing and odds of a feed instance
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// Period between two sync passes
    pub poll_interval: Duration,

    /// Artificial delay between a pass starting and its results landing
    pub sync_latency: Duration,

    /// How long a changed match stays highlighted
    pub highlight_cooldown: Duration,

    /// Transition odds per pass
    pub odds: Probabilities,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(8),
            sync_latency: Duration::from_millis(800),
            highlight_cooldown: Duration::from_secs(5),
            odds: Probabilities::default(),
        }
    }
}
