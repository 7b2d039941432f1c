// Entry point for a one-shot aggregation run

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aggregator::{
    Aggregator, ArbeitnowSource, FileSink, FixedDelayPacer, HttpFetcher, JobSource,
    LinkedinSource, RemotiveSearchSource, RemotiveSource, RunRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present, then initialize logging
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aggregator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job posting aggregation");

    let output_dir =
        std::env::var("JOBS_OUTPUT_DIR").unwrap_or_else(|_| "data/raw/jobs".to_string());
    let sink = FileSink::new(&output_dir).context("Failed to prepare output directory")?;

    let fetcher = Arc::new(HttpFetcher::new().context("Failed to build HTTP client")?);
    let pacer = Arc::new(FixedDelayPacer::new());

    let sources: Vec<Arc<dyn JobSource>> = vec![
        Arc::new(RemotiveSource::new(fetcher.clone())),
        Arc::new(RemotiveSearchSource::new(fetcher.clone())),
        Arc::new(ArbeitnowSource::new(fetcher.clone())),
        Arc::new(LinkedinSource::new(fetcher, pacer.clone())),
    ];
    let aggregator = Aggregator::new(sources, pacer);

    let request = RunRequest::new(vec![
        "software engineer".to_string(),
        "data scientist".to_string(),
        "devops engineer".to_string(),
    ]);

    let result = aggregator.run(&request).await;
    tracing::info!(
        total = result.total(),
        failed_sources = result.failed_sources,
        "run finished, persisting"
    );

    let artifacts = sink.persist(&result).context("Failed to persist run output")?;
    tracing::info!(
        artifacts = artifacts.len(),
        dir = %output_dir,
        "aggregation complete"
    );

    Ok(())
}
