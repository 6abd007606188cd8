use anyhow::{Context, Result};
use arex_config::config::{self, ConfigUpdate, RecordDecision};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: arex-config <config.json>  (paths to evaluate are read from stdin)")?;
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let update: ConfigUpdate =
        serde_json::from_str(&raw).with_context(|| format!("invalid config in {}", path))?;

    let live = config::update(update);
    tracing::info!(version = ?live.record_version(), "Evaluating paths from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let target = line.trim();
        if target.is_empty() {
            continue;
        }
        let Some(current) = config::get() else {
            tracing::warn!("No runtime config published");
            break;
        };
        let limiter = config::limiter().context("record limiter not initialised")?;
        match current.record_decision(target, limiter.as_ref()) {
            RecordDecision::Record => println!("record\t{}", target),
            RecordDecision::Skip(reason) => println!("skip\t{}\t{:?}", target, reason),
        }
    }

    Ok(())
}
