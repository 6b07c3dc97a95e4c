pub mod remote_feed;

pub use remote_feed::RemoteFeedClient;
