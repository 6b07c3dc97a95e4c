pub mod match_record;
pub mod snapshot;

pub use match_record::{Match, MatchState, MatchStatus, Score, Side, StateUpdate};
pub use snapshot::{FeedSnapshot, Highlight};
