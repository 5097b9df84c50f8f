//! Thumbnail Lambda
//!
//! S3-triggered function that writes a bounded JPEG thumbnail next to every
//! uploaded image, plus a backfill tool for objects that predate the trigger.

pub mod backfill;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod naming;
pub mod processor;
pub mod telemetry;

// Public re-exports
pub use config::{BackfillConfig, Config, LogFormat};
pub use error::{ProcessError, Result, Stage};
pub use event::ObjectRef;
pub use handler::{function_handler, BatchReport, RecordOutcome, SkipReason, ThumbnailHandler};
pub use processor::{ThumbnailConfig, ThumbnailProcessor, ThumbnailResult};
