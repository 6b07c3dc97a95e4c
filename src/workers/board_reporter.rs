use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::models::FeedSnapshot;
use crate::views;

/// Worker that logs a match board summary after every completed pass
pub struct BoardReporterWorker {
    snapshot_rx: watch::Receiver<FeedSnapshot>,
}

impl BoardReporterWorker {
    /// Create a new board reporter worker
    pub fn new(snapshot_rx: watch::Receiver<FeedSnapshot>) -> Self {
        Self { snapshot_rx }
    }

    /// Run the worker loop until the feed goes away
    pub async fn run(mut self) {
        info!("Board reporter started");

        while self.snapshot_rx.changed().await.is_ok() {
            let snapshot = self.snapshot_rx.borrow_and_update().clone();
            if !snapshot.is_syncing {
                self.report(&snapshot);
            }
        }

        warn!("Board reporter channel closed");
    }

    fn report(&self, snapshot: &FeedSnapshot) {
        if snapshot.stale {
            warn!("Pass {} | Feed stale, showing last known scores", snapshot.passes);
            return;
        }

        let live = views::live_matches(&snapshot.matches);
        let results = views::recent_results(&snapshot.matches, views::DEFAULT_RESULTS_LIMIT);

        info!(
            "Pass {} | Live: {} | Results: {} | Highlight: {}",
            snapshot.passes,
            live.len(),
            results.len(),
            snapshot.last_updated_id(Instant::now()).unwrap_or("-"),
        );

        if let Some(next) = views::next_fixture(&snapshot.matches) {
            info!(
                "Next up | {} vs {} | {} {} | {}",
                next.home_team, next.away_team, next.date, next.time, next.competition
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exits_when_feed_closes() {
        let (tx, rx) = watch::channel(FeedSnapshot::new(Vec::new()));
        let task = tokio::spawn(BoardReporterWorker::new(rx).run());

        let mut stale = FeedSnapshot::new(Vec::new());
        stale.stale = true;
        tx.send_replace(stale);
        drop(tx);

        task.await.unwrap();
    }
}
