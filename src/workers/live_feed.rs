use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::RemoteFeedClient;
use crate::feed::{Draws, FeedSettings, LiveMatchSimulator, PassReport};
use crate::models::{FeedSnapshot, Match};

/// Where each pass gets its new match states from
pub enum FeedSource {
    /// Random transitions
    Simulated,
    /// Polled external feed
    Remote(RemoteFeedClient),
}

/// Worker that owns a simulator and runs a sync pass every poll interval
pub struct LiveFeedWorker {
    simulator: LiveMatchSimulator,
    source: FeedSource,
    snapshot_tx: watch::Sender<FeedSnapshot>,
    shutdown_rx: watch::Receiver<bool>,
}

/// What a consumer sees at a given instant
#[derive(Debug, Clone)]
pub struct FeedView {
    pub matches: Vec<Match>,
    pub last_updated_id: Option<String>,
    pub updated_ids: Vec<String>,
    pub is_syncing: bool,
    pub stale: bool,
}

/// Owner's side of a running feed. Dropping it cancels the feed.
pub struct FeedHandle {
    snapshot_rx: watch::Receiver<FeedSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl LiveFeedWorker {
    /// Spawn the worker on the current runtime
    pub fn start(simulator: LiveMatchSimulator, source: FeedSource) -> FeedHandle {
        let (snapshot_tx, snapshot_rx) = watch::channel(simulator.snapshot(false));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = Self {
            simulator,
            source,
            snapshot_tx,
            shutdown_rx,
        };

        FeedHandle {
            snapshot_rx,
            shutdown_tx,
            task: Some(tokio::spawn(worker.run())),
        }
    }

    /// Run the worker loop until shutdown
    async fn run(mut self) {
        let settings = self.simulator.settings().clone();
        info!(
            "Live feed started ({} matches, interval: {:?}, latency: {:?})",
            self.simulator.matches().len(),
            settings.poll_interval,
            settings.sync_latency
        );

        // First pass happens one full period after start
        let mut interval = time::interval_at(
            Instant::now() + settings.poll_interval,
            settings.poll_interval,
        );
        // A pass that overruns the period delays the next one instead of
        // stacking up ticks, so passes never overlap
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown_rx.changed() => break,
                _ = interval.tick() => {}
            }

            if !self.sync(&settings).await {
                break;
            }
        }

        info!("Live feed stopped after {} passes", self.simulator.passes());
    }

    /// Perform a single sync pass. Returns false if shutdown arrived mid-pass,
    /// in which case the pass is dropped and the syncing flag cleared.
    async fn sync(&mut self, settings: &FeedSettings) -> bool {
        self.publish(true);

        tokio::select! {
            _ = self.shutdown_rx.changed() => {
                self.publish(false);
                return false;
            }
            _ = time::sleep(settings.sync_latency) => {}
        }

        let report = match &self.source {
            FeedSource::Simulated => Some(self.simulator.run_pass(Instant::now())),
            FeedSource::Remote(client) => {
                let fetched = tokio::select! {
                    _ = self.shutdown_rx.changed() => None,
                    fetched = client.fetch_updates() => Some(fetched),
                };
                let Some(fetched) = fetched else {
                    self.publish(false);
                    return false;
                };

                match fetched {
                    Ok(updates) => Some(self.simulator.apply_remote(updates, Instant::now())),
                    Err(e) => {
                        if e.is_transient() {
                            warn!("Live feed unreachable, keeping last known state: {}", e);
                        } else {
                            error!("Discarding malformed feed payload: {}", e);
                        }
                        self.simulator.mark_stale();
                        None
                    }
                }
            }
        };

        if let Some(report) = report {
            self.log_report(&report);
        }

        self.publish(false);
        true
    }

    fn publish(&self, is_syncing: bool) {
        self.snapshot_tx
            .send_replace(self.simulator.snapshot(is_syncing));
    }

    fn log_report(&self, report: &PassReport) {
        for change in &report.changes {
            if change.before.status() != change.after.status() {
                info!(
                    "Match {} | {} -> {}",
                    change.match_id,
                    change.before.status().as_str(),
                    change.after.status().as_str()
                );
            }
        }

        for id in &report.updated_ids {
            if let Some(m) = self.simulator.matches().iter().find(|m| &m.id == id) {
                info!(
                    "Score | {} {} {} | {}",
                    m.home_team,
                    m.tally(),
                    m.away_team,
                    m.competition
                );
            }
        }

        debug!(
            "Pass {} complete: {} changes, {} score updates",
            self.simulator.passes(),
            report.changes.len(),
            report.updated_ids.len()
        );
    }
}

impl FeedView {
    pub fn at(snapshot: &FeedSnapshot, now: Instant) -> Self {
        Self {
            matches: snapshot.matches.clone(),
            last_updated_id: snapshot.last_updated_id(now).map(str::to_string),
            updated_ids: snapshot.updated_ids.clone(),
            is_syncing: snapshot.is_syncing,
            stale: snapshot.stale,
        }
    }
}

impl FeedHandle {
    /// Start a randomized feed over `seed`
    pub fn spawn_simulated(
        seed: Vec<Match>,
        settings: FeedSettings,
        draws: impl Draws + 'static,
    ) -> Self {
        LiveFeedWorker::start(
            LiveMatchSimulator::new(seed, settings, draws),
            FeedSource::Simulated,
        )
    }

    /// Current matches, highlighted id and sync flag
    pub fn snapshot(&self) -> FeedView {
        FeedView::at(&self.snapshot_rx.borrow(), Instant::now())
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stop the feed and wait for its task to finish
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Live feed task failed: {}", e);
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
