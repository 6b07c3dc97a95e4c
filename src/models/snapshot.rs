use tokio::time::Instant;

use crate::models::Match;

/// Recently-updated marker with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub match_id: String,
    pub expires_at: Instant,
}

impl Highlight {
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Read-only view of a feed, published after every state change
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Current match collection
    pub matches: Vec<Match>,

    /// Most recently changed match, until its cooldown runs out
    pub highlight: Option<Highlight>,

    /// Every match whose score changed in the last pass, in collection order
    pub updated_ids: Vec<String>,

    /// A pass has started and its results are not yet applied
    pub is_syncing: bool,

    /// The last pass was skipped because the source failed
    pub stale: bool,

    /// Number of completed passes
    pub passes: u64,
}

impl FeedSnapshot {
    pub fn new(matches: Vec<Match>) -> Self {
        Self {
            matches,
            highlight: None,
            updated_ids: Vec::new(),
            is_syncing: false,
            stale: false,
            passes: 0,
        }
    }

    /// Id of the highlighted match, or None once the cooldown has expired
    pub fn last_updated_id(&self, now: Instant) -> Option<&str> {
        self.highlight
            .as_ref()
            .filter(|h| h.is_active(now))
            .map(|h| h.match_id.as_str())
    }
}
