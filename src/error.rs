use thiserror::Error;

/// Failures of an external match feed. None of them stop the feed loop:
/// the pass is skipped and the last known state is kept.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid record {match_id}: {reason}")]
    InvalidRecord { match_id: String, reason: String },
}

impl FeedError {
    /// Transport failures are worth retrying on the next pass as-is
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Transport(_) | FeedError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
