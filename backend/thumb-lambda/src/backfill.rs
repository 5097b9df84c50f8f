//! Backfill - thumbnails for objects stored before the trigger existed
//!
//! Lists a bucket prefix and runs the regular pipeline for every original
//! whose derived thumbnail is not stored yet.

use crate::config::BackfillConfig;
use crate::event::ObjectRef;
use crate::handler::{BatchReport, RecordOutcome, SkipReason, ThumbnailHandler};
use crate::naming::{is_thumbnail, thumbnail_key};
use s3_utils::S3Error;
use tracing::{info, warn};

pub async fn run_backfill(
    handler: &ThumbnailHandler,
    config: &BackfillConfig,
) -> Result<BatchReport, S3Error> {
    let store = handler.store();
    let keys = store.list_keys(&config.bucket, &config.prefix).await?;

    info!(
        bucket = %config.bucket,
        prefix = %config.prefix,
        objects = keys.len(),
        "Starting thumbnail backfill"
    );

    let mut report = BatchReport::default();

    for key in keys {
        let object = ObjectRef::new(config.bucket.clone(), key);

        // Thumbnails and extensionless keys are classified by the pipeline itself
        if let Some(thumb_key) = thumbnail_key(&object.key).filter(|_| !is_thumbnail(&object.key)) {
            match store.exists(&object.bucket, &thumb_key).await {
                Ok(true) => {
                    report.push(RecordOutcome::Skipped {
                        object,
                        reason: SkipReason::ThumbnailExists,
                    });
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    // Regenerating is harmless, so fall through to the pipeline
                    warn!(
                        key = %object.key,
                        thumb_key = %thumb_key,
                        error = %e,
                        "Could not check for existing thumbnail"
                    );
                }
            }
        }

        let outcome = handler.process_object(object).await;
        let attempted = !matches!(outcome, RecordOutcome::Skipped { .. });
        report.push(outcome);

        if attempted && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    report.log_summary();
    Ok(report)
}
