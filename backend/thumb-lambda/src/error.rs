//! Error types for the thumbnail pipeline
//!
//! Every variant maps to the pipeline [`Stage`] it was raised at, so a failed
//! record can be reported as "failed at stage X with cause Y".

use image::ImageError;
use s3_utils::S3Error;
use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Pipeline step a record can fail at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Record could not be turned into a bucket/key pair
    Event,
    Fetch,
    Decode,
    Resize,
    Encode,
    /// Blocking image task did not complete
    Transform,
    Upload,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Event => "event",
            Stage::Fetch => "fetch",
            Stage::Decode => "decode",
            Stage::Resize => "resize",
            Stage::Encode => "encode",
            Stage::Transform => "transform",
            Stage::Upload => "upload",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Malformed event record: {0}")]
    MalformedRecord(String),

    #[error("Could not download from S3: {0}")]
    Fetch(#[source] S3Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Resize returned an empty thumbnail")]
    EmptyThumbnail,

    #[error("JPEG encoding error: {0}")]
    Encode(#[source] ImageError),

    #[error("Thumbnail task failed: {0}")]
    Task(String),

    #[error("Failed to upload: {0}")]
    Upload(#[source] S3Error),
}

impl ProcessError {
    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::MalformedRecord(_) => Stage::Event,
            ProcessError::Fetch(_) => Stage::Fetch,
            ProcessError::Decode(_) => Stage::Decode,
            ProcessError::EmptyThumbnail => Stage::Resize,
            ProcessError::Encode(_) => Stage::Encode,
            ProcessError::Task(_) => Stage::Transform,
            ProcessError::Upload(_) => Stage::Upload,
        }
    }
}
