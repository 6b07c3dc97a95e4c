use anyhow::{Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_match_feed::api::RemoteFeedClient;
use live_match_feed::config::Config;
use live_match_feed::feed::{LiveMatchSimulator, RandomDraws};
use live_match_feed::seed;
use live_match_feed::workers::{BoardReporterWorker, FeedSource, LiveFeedWorker};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "live_match_feed=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting live-match-feed");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Seed collection and randomness
    let (mut seed_rng, draws) = match config.rng_seed {
        Some(value) => {
            info!("Using fixed RNG seed {}", value);
            (StdRng::seed_from_u64(value), RandomDraws::seeded(value.wrapping_add(1)))
        }
        None => (StdRng::from_entropy(), RandomDraws::from_entropy()),
    };
    let today = Local::now().date_naive();
    let matches = seed::generate_matches(config.seed_count, today, &mut seed_rng);
    info!("Generated {} matches around {}", matches.len(), today);

    let source = match &config.remote_url {
        Some(url) => {
            info!("Polling remote live feed at {}", url);
            FeedSource::Remote(
                RemoteFeedClient::new(url, config.request_timeout())
                    .context("Failed to build remote feed client")?,
            )
        }
        None => FeedSource::Simulated,
    };

    // Start the feed
    let simulator = LiveMatchSimulator::new(matches, config.feed_settings(), draws);
    let feed = LiveFeedWorker::start(simulator, source);

    let reporter = BoardReporterWorker::new(feed.subscribe());
    let mut reporter_handle = tokio::spawn(async move {
        reporter.run().await;
    });

    info!("Live feed running, press Ctrl+C to stop");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = &mut reporter_handle => {
            error!("Board reporter exited unexpectedly: {:?}", result);
        }
    }

    feed.stop().await;
    reporter_handle.abort();

    info!("Shutting down live-match-feed");
    Ok(())
}
