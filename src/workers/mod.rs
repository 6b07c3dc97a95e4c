pub mod board_reporter;
pub mod live_feed;

pub use board_reporter::BoardReporterWorker;
pub use live_feed::{FeedHandle, FeedSource, FeedView, LiveFeedWorker};
