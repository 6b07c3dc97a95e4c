use std::env;

use anyhow::{Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_match_feed::seed::{generate_matches, DEFAULT_SEED_COUNT};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays valid JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_matches=info,live_match_feed=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let count = parse_flag(&args, "--count", "-c").unwrap_or(DEFAULT_SEED_COUNT);
    let mut rng = match parse_flag(&args, "--seed", "-s") {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let today = Local::now().date_naive();
    let matches = generate_matches(count, today, &mut rng);
    info!("Generated {} matches around {}", matches.len(), today);

    let json = serde_json::to_string_pretty(&matches).context("Failed to serialize matches")?;
    println!("{}", json);

    Ok(())
}

/// Parse `--flag value` / `-f value` from command line arguments
fn parse_flag<T: std::str::FromStr>(args: &[String], long: &str, short: &str) -> Option<T> {
    for (i, arg) in args.iter().enumerate() {
        if arg == long || arg == short {
            if let Some(value) = args.get(i + 1) {
                if let Ok(parsed) = value.parse() {
                    return Some(parsed);
                }
            }
        }
    }
    None
}
