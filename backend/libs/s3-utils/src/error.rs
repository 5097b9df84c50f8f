//! Error types for S3 operations.

use thiserror::Error;

/// Result type alias for S3 operations.
pub type Result<T> = std::result::Result<T, S3Error>;

/// Errors returned by [`crate::ObjectStore`] implementations.
#[derive(Error, Debug)]
pub enum S3Error {
    /// GetObject request failed (missing object, access denied, network)
    #[error("failed to get s3://{bucket}/{key}: {message}")]
    Download {
        bucket: String,
        key: String,
        message: String,
    },

    /// Object body stream broke while collecting
    #[error("failed to read body of s3://{bucket}/{key}: {message}")]
    BodyRead {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to put s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to list s3://{bucket}/{prefix}: {message}")]
    List {
        bucket: String,
        prefix: String,
        message: String,
    },

    #[error("failed to head s3://{bucket}/{key}: {message}")]
    Head {
        bucket: String,
        key: String,
        message: String,
    },
}
