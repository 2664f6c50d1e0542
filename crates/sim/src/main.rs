//! Headless arena runner entry point.
mod config;
mod scenario;

use agent_content::ArchetypeLoader;
use anyhow::Result;
use config::SimConfig;
use scenario::Arena;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    tracing::info!(
        "Running {} ticks of {}s (seed {})",
        config.ticks,
        config.dt,
        config.seed
    );

    let catalog = match &config.catalog {
        Some(path) => ArchetypeLoader::load(path)?,
        None => ArchetypeLoader::embedded()?,
    };

    let mut arena = Arena::build(&catalog, config.seed)?;
    let mut busiest = 0;
    for tick in 1..=config.ticks {
        if config.slow_at == Some(tick) {
            arena.slow_time(config.slow_factor);
        }
        busiest = busiest.max(arena.step(config.dt)?);
    }

    tracing::info!("Peak active agents per tick: {}", busiest);
    for agent in arena.report() {
        println!(
            "{:<10} {:<9} {:>6.1} hp  {:>4} shots  {}{}",
            agent.name,
            agent.id.to_string(),
            agent.health,
            agent.shots,
            if agent.alive { "alive" } else { "dead" },
            if agent.target_found { ", engaged" } else { "" },
        );
    }

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` (default: info).
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
