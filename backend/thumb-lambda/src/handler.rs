//! Thumbnail handler - runs the per-record pipeline for a batch
//!
//! For each record, in order:
//! 1. Skip objects that are already thumbnails (or have no extension to mark)
//! 2. Download the original from S3
//! 3. Decode, bound to 600x600 and re-encode as JPEG
//! 4. Upload under the derived `_thumb.` key in the same bucket
//!
//! The first failing step ends that record only; siblings in the same batch
//! are always attempted.

use crate::error::{ProcessError, Stage};
use crate::event::{object_refs, ObjectRef};
use crate::naming::{is_thumbnail, thumbnail_key};
use crate::processor::{ThumbnailProcessor, THUMBNAIL_CONTENT_TYPE};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent};
use s3_utils::ObjectStore;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Why a record produced no thumbnail without counting as a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Key carries the thumbnail marker
    AlreadyThumbnail,
    /// Key has no `.`, so the derived key would overwrite the source
    NoExtension,
    /// Derived thumbnail is already stored (backfill only)
    ThumbnailExists,
}

/// Outcome of one record
#[derive(Debug)]
pub enum RecordOutcome {
    Skipped {
        object: ObjectRef,
        reason: SkipReason,
    },
    Completed {
        object: ObjectRef,
        thumb_key: String,
        location: String,
        width: u32,
        height: u32,
    },
    Failed {
        object: Option<ObjectRef>,
        error: ProcessError,
    },
}

impl RecordOutcome {
    /// Stage the record failed at, if it failed
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            RecordOutcome::Failed { error, .. } => Some(error.stage()),
            _ => None,
        }
    }
}

/// Per-record outcomes of one batch, in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Failed { .. }))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| predicate(o)).count()
    }

    /// Emit the one-line summary for the batch
    pub fn log_summary(&self) {
        info!(
            records = self.len(),
            completed = self.completed(),
            skipped = self.skipped(),
            failed = self.failed(),
            "Batch processed"
        );
    }
}

/// Runs the thumbnail pipeline against an [`ObjectStore`]
#[derive(Clone)]
pub struct ThumbnailHandler {
    store: Arc<dyn ObjectStore>,
    processor: Arc<ThumbnailProcessor>,
}

impl ThumbnailHandler {
    /// Create a handler with the default 600x600 JPEG processor
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_processor(store, ThumbnailProcessor::with_defaults())
    }

    pub fn with_processor(store: Arc<dyn ObjectStore>, processor: ThumbnailProcessor) -> Self {
        Self {
            store,
            processor: Arc::new(processor),
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Process every record of an S3 notification, one after another
    pub async fn handle_event(&self, event: &S3Event) -> BatchReport {
        let mut report = BatchReport::default();

        for parsed in object_refs(event) {
            let outcome = match parsed {
                Ok(object) => self.process_object(object).await,
                Err(error) => {
                    error!(
                        stage = %error.stage(),
                        error = %error,
                        "Skipping malformed S3 record"
                    );
                    RecordOutcome::Failed {
                        object: None,
                        error,
                    }
                }
            };
            report.push(outcome);
        }

        report.log_summary();
        report
    }

    /// Process already-resolved objects, one after another
    pub async fn handle_objects<I>(&self, objects: I) -> BatchReport
    where
        I: IntoIterator<Item = ObjectRef>,
    {
        let mut report = BatchReport::default();
        for object in objects {
            report.push(self.process_object(object).await);
        }

        report.log_summary();
        report
    }

    /// Run the full pipeline for one object
    pub async fn process_object(&self, object: ObjectRef) -> RecordOutcome {
        if is_thumbnail(&object.key) {
            debug!(bucket = %object.bucket, key = %object.key, "Skipping thumbnail object");
            return RecordOutcome::Skipped {
                object,
                reason: SkipReason::AlreadyThumbnail,
            };
        }

        let Some(thumb_key) = thumbnail_key(&object.key) else {
            warn!(
                bucket = %object.bucket,
                key = %object.key,
                "Skipping object without extension; thumbnail key would overwrite it"
            );
            return RecordOutcome::Skipped {
                object,
                reason: SkipReason::NoExtension,
            };
        };

        match self.generate_and_store(&object, &thumb_key).await {
            Ok((location, width, height)) => {
                info!(
                    bucket = %object.bucket,
                    key = %object.key,
                    thumb_key = %thumb_key,
                    location = %location,
                    width,
                    height,
                    "Successfully uploaded thumbnail"
                );
                RecordOutcome::Completed {
                    object,
                    thumb_key,
                    location,
                    width,
                    height,
                }
            }
            Err(e) => {
                error!(
                    bucket = %object.bucket,
                    key = %object.key,
                    stage = %e.stage(),
                    error = %e,
                    "Failed to generate thumbnail"
                );
                RecordOutcome::Failed {
                    object: Some(object),
                    error: e,
                }
            }
        }
    }

    async fn generate_and_store(
        &self,
        object: &ObjectRef,
        thumb_key: &str,
    ) -> Result<(String, u32, u32), ProcessError> {
        let original = self
            .store
            .download(&object.bucket, &object.key)
            .await
            .map_err(ProcessError::Fetch)?;

        let thumbnail = self.processor.clone().generate_async(original).await?;

        let location = self
            .store
            .upload(
                &object.bucket,
                thumb_key,
                thumbnail.data,
                THUMBNAIL_CONTENT_TYPE,
            )
            .await
            .map_err(ProcessError::Upload)?;

        Ok((location, thumbnail.width, thumbnail.height))
    }
}

/// Lambda entry point: handle one S3 notification.
///
/// Always completes normally; per-record failures are only visible in logs,
/// so the runtime never redrives a batch because of one bad object.
pub async fn function_handler(
    event: LambdaEvent<S3Event>,
    handler: &ThumbnailHandler,
) -> Result<(), Error> {
    debug!(
        request_id = %event.context.request_id,
        records = event.payload.records.len(),
        "Received S3 event"
    );
    handler.handle_event(&event.payload).await;
    Ok(())
}
