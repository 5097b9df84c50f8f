/// Integration tests for the thumbnail backfill
mod common;

use common::{jpeg, location, MockStore};
use s3_utils::S3Error;
use std::sync::Arc;
use std::time::Duration;
use thumb_lambda::backfill::run_backfill;
use thumb_lambda::{BackfillConfig, RecordOutcome, SkipReason, ThumbnailHandler};

fn config() -> BackfillConfig {
    BackfillConfig {
        bucket: "media".to_string(),
        prefix: "photos/".to_string(),
        delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_backfill_only_processes_missing_thumbnails() {
    let mut store = MockStore::new();
    let original = jpeg(900, 1800);

    store
        .expect_list_keys()
        .withf(|bucket, prefix| bucket == "media" && prefix == "photos/")
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                "photos/a.jpg".to_string(),
                "photos/a_thumb.jpg".to_string(),
                "photos/b.jpg".to_string(),
                "photos/notes".to_string(),
            ])
        });

    store
        .expect_exists()
        .withf(|_, key| key == "photos/a_thumb.jpg")
        .times(1)
        .returning(|_, _| Ok(true));
    store
        .expect_exists()
        .withf(|_, key| key == "photos/b_thumb.jpg")
        .times(1)
        .returning(|_, _| Ok(false));

    store
        .expect_download()
        .withf(|_, key| key == "photos/b.jpg")
        .times(1)
        .returning(move |_, _| Ok(original.clone()));
    store
        .expect_upload()
        .withf(|_, key, _, _| key == "photos/b_thumb.jpg")
        .times(1)
        .returning(|bucket, key, _, _| Ok(location(bucket, key)));

    let handler = ThumbnailHandler::new(Arc::new(store));
    let report = run_backfill(&handler, &config()).await.unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(report.completed(), 1);
    assert_eq!(report.skipped(), 3);

    let reasons: Vec<SkipReason> = report
        .outcomes
        .iter()
        .filter_map(|o| match o {
            RecordOutcome::Skipped { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::ThumbnailExists,
            SkipReason::AlreadyThumbnail,
            SkipReason::NoExtension,
        ]
    );

    match &report.outcomes[2] {
        RecordOutcome::Completed { width, height, .. } => assert_eq!((*width, *height), (300, 600)),
        other => panic!("expected completed outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_backfill_regenerates_when_lookup_fails() {
    let mut store = MockStore::new();
    let original = jpeg(50, 50);

    store
        .expect_list_keys()
        .returning(|_, _| Ok(vec!["photos/c.jpg".to_string()]));
    store.expect_exists().times(1).returning(|bucket, key| {
        Err(S3Error::Head {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: "SlowDown".to_string(),
        })
    });
    store
        .expect_download()
        .times(1)
        .returning(move |_, _| Ok(original.clone()));
    store
        .expect_upload()
        .times(1)
        .returning(|bucket, key, _, _| Ok(location(bucket, key)));

    let handler = ThumbnailHandler::new(Arc::new(store));
    let report = run_backfill(&handler, &config()).await.unwrap();

    assert_eq!(report.completed(), 1);
}

#[tokio::test]
async fn test_backfill_listing_failure_is_an_error() {
    let mut store = MockStore::new();

    store.expect_list_keys().times(1).returning(|bucket, prefix| {
        Err(S3Error::List {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            message: "NoSuchBucket".to_string(),
        })
    });

    let handler = ThumbnailHandler::new(Arc::new(store));
    let err = run_backfill(&handler, &config()).await.unwrap_err();

    assert!(matches!(err, S3Error::List { .. }));
}
