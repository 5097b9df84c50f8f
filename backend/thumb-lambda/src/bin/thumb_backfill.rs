//! Thumbnail Backfill - generates missing thumbnails for existing objects
//!
//! Environment variables (plus the S3/logging ones read by the lambda):
//! - BACKFILL_BUCKET: bucket to scan (required)
//! - BACKFILL_PREFIX: key prefix to scan (default: whole bucket)
//! - BACKFILL_DELAY_MS: pause between processed objects (default: 50)

use anyhow::Context;
use s3_utils::S3Client;
use std::sync::Arc;
use thumb_lambda::backfill::run_backfill;
use thumb_lambda::{telemetry, BackfillConfig, Config, ThumbnailHandler};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log_format);

    let backfill = BackfillConfig::from_env().context("Failed to load backfill configuration")?;
    info!(
        bucket = %backfill.bucket,
        prefix = %backfill.prefix,
        delay_ms = backfill.delay.as_millis() as u64,
        "Configuration loaded"
    );

    let s3 = S3Client::from_config(config.s3).await;
    let handler = ThumbnailHandler::new(Arc::new(s3.operations()));

    let report = run_backfill(&handler, &backfill)
        .await
        .context("Failed to list objects")?;

    if report.failed() > 0 {
        warn!(failed = report.failed(), "Some thumbnails could not be generated");
    }

    info!("Thumbnail backfill finished");
    Ok(())
}
