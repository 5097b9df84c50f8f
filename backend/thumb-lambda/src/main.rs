/// Thumbnail Lambda - S3 ObjectCreated handler
///
/// Environment variables:
/// - AWS_REGION: region for the S3 client (default: SDK chain, then us-east-1)
/// - S3_ENDPOINT: optional S3-compatible endpoint (MinIO, LocalStack)
/// - S3_FORCE_PATH_STYLE: path-style addressing (default: false)
/// - LOG_FORMAT: `json` or `text` (default: text)
/// - RUST_LOG: tracing filter
use anyhow::Context;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3_utils::S3Client;
use std::sync::Arc;
use thumb_lambda::{function_handler, telemetry, Config, ThumbnailHandler};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    telemetry::init_tracing(config.log_format);
    info!("Starting thumbnail lambda");

    // One client per execution environment, reused across invocations
    let s3 = S3Client::from_config(config.s3).await;
    let handler = ThumbnailHandler::new(Arc::new(s3.operations()));

    run(service_fn(|event: LambdaEvent<S3Event>| {
        function_handler(event, &handler)
    }))
    .await
}
