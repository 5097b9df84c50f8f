//! Shared fixtures for thumbnail integration tests
#![allow(dead_code)]

use aws_lambda_events::event::s3::S3Event;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use mockall::mock;
use s3_utils::{ObjectStore, S3Error};
use std::io::Cursor;

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl ObjectStore for Store {
        async fn download(&self, bucket: &str, key: &str) -> Result<Bytes, S3Error>;
        async fn upload(
            &self,
            bucket: &str,
            key: &str,
            body: Bytes,
            content_type: &str,
        ) -> Result<String, S3Error>;
        async fn list_keys(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, S3Error>;
        async fn exists(&self, bucket: &str, key: &str) -> Result<bool, S3Error>;
    }
}

/// Encode a gradient JPEG of the given size
pub fn jpeg(width: u32, height: u32) -> Bytes {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(90))
        .expect("encode fixture");
    Bytes::from(buf)
}

/// Dimensions of an encoded JPEG, or `None` if it does not decode
pub fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .ok()
        .map(|img| (img.width(), img.height()))
}

pub fn download_error(bucket: &str, key: &str) -> S3Error {
    S3Error::Download {
        bucket: bucket.to_string(),
        key: key.to_string(),
        message: "NoSuchKey: The specified key does not exist.".to_string(),
    }
}

pub fn location(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.us-east-1.amazonaws.com/{key}")
}

/// ObjectCreated:Put notification in the shape S3 delivers it
pub fn s3_event(records: &[(&str, &str)]) -> S3Event {
    let records: Vec<serde_json::Value> = records
        .iter()
        .map(|(bucket, key)| {
            serde_json::json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": { "principalId": "AWS:EXAMPLE" },
                "requestParameters": { "sourceIPAddress": "10.0.0.1" },
                "responseElements": {
                    "x-amz-request-id": "C3D13FE58DE4C810",
                    "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "thumbnail-trigger",
                    "bucket": {
                        "name": bucket,
                        "ownerIdentity": { "principalId": "A3NL1KOZZKExample" },
                        "arn": format!("arn:aws:s3:::{bucket}")
                    },
                    "object": {
                        "key": key,
                        "size": 1024,
                        "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                        "sequencer": "0055AED6DCD90281E5"
                    }
                }
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({ "Records": records })).expect("valid S3 event")
}
