//! Scripted host driver: loads content, runs a duel and logs every change.
mod config;
mod content;
mod duel;

use anyhow::Result;
use config::SandboxConfig;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SandboxConfig::from_env();
    let report = duel::Duel::new(&config)?.run(&config);

    info!(
        target: "sandbox",
        rounds = report.rounds,
        mage_health = report.mage_health,
        knight_health = report.knight_health,
        winner = report.winner.unwrap_or("none"),
        "Duel finished"
    );
    Ok(())
}
