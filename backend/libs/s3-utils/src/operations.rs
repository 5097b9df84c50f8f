/// Object-store operations used by the thumbnail pipeline
use crate::config::S3Config;
use crate::error::{Result, S3Error};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Storage capability consumed by the thumbnail pipeline.
///
/// Every call names its bucket explicitly because a single event may carry
/// records from several buckets.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object body into memory
    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Store `body` under `key`, returning the object location
    async fn upload(&self, bucket: &str, key: &str, body: Bytes, content_type: &str)
        -> Result<String>;

    /// List every key under `prefix`, following continuation tokens
    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Check whether an object exists
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct S3Operations {
    client: Arc<Client>,
    config: S3Config,
    region: String,
}

impl S3Operations {
    pub fn new(client: Arc<Client>, config: S3Config, region: String) -> Self {
        Self {
            client,
            config,
            region,
        }
    }
}

#[async_trait]
impl ObjectStore for S3Operations {
    async fn download(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| S3Error::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| S3Error::BodyRead {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes();

        debug!(bucket, key, size = body.len(), "Downloaded object");
        Ok(body)
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String> {
        let size = body.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| S3Error::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(bucket, key, size, "Uploaded object");
        Ok(self.config.object_url(&self.region, bucket, key))
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| S3Error::List {
                    bucket: bucket.to_string(),
                    prefix: prefix.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(|k| k.to_string())),
            );

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        debug!(bucket, prefix, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|service| service.is_not_found())
                    .unwrap_or(false)
                    || e.raw_response().map(|r| r.status().as_u16()) == Some(404);

                if not_found {
                    Ok(false)
                } else {
                    Err(S3Error::Head {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    })
                }
            }
        }
    }
}
