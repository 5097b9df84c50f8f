//! Shared S3 utilities for the thumbnail binaries
//!
//! Provides the AWS S3 client, its configuration, and the [`ObjectStore`]
//! capability the thumbnail pipeline is written against.

use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod error;
pub mod operations;

pub use config::S3Config;
pub use error::{Result, S3Error};
pub use operations::{ObjectStore, S3Operations};

/// Shared S3 client wrapper, built once per process
#[derive(Clone)]
pub struct S3Client {
    client: Arc<Client>,
    config: S3Config,
    region: String,
}

impl S3Client {
    /// Create the S3 client from resolved configuration
    pub async fn from_config(config: S3Config) -> Self {
        let region_provider = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(config::DEFAULT_REGION);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

        // Explicit keys win over the default credential chain (useful for MinIO)
        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "thumb_lambda_s3",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| config::DEFAULT_REGION.to_string());

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style())
            .build();

        info!(
            region = %region,
            endpoint = ?config.endpoint,
            path_style = config.path_style(),
            "S3 client initialized"
        );

        Self {
            client: Arc::new(Client::from_conf(s3_config)),
            config,
            region,
        }
    }

    /// Operations handle sharing this client
    pub fn operations(&self) -> S3Operations {
        S3Operations::new(self.client.clone(), self.config.clone(), self.region.clone())
    }
}
