//! S3 notification parsing
//!
//! Turns raw [`S3Event`] records into bucket/key pairs. S3 delivers object
//! keys form-encoded (`+` for space, `%XX` escapes) so they are decoded here
//! before any storage call.

use crate::error::ProcessError;
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use std::fmt;

/// Bucket and key of the object a record refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Extract the object reference from a notification record
    pub fn from_record(record: &S3EventRecord) -> Result<Self, ProcessError> {
        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ProcessError::MalformedRecord("missing bucket name".to_string()))?;

        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProcessError::MalformedRecord("missing object key".to_string()))?;

        Ok(Self::new(bucket, decode_key(raw_key)))
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Decode a form-encoded S3 notification key.
///
/// Falls back to the raw key when the escapes do not form valid UTF-8.
pub fn decode_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Object references for every record, in delivery order
pub fn object_refs(event: &S3Event) -> Vec<Result<ObjectRef, ProcessError>> {
    event.records.iter().map(ObjectRef::from_record).collect()
}
