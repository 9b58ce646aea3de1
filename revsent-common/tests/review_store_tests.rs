//! File-backed review store tests
//!
//! Exercises init_database against a real SQLite file and checks that the
//! replace-all contract is idempotent as seen through aggregation.

use chrono::Utc;
use revsent_common::db::{init_database, ReviewSink, SqliteReviewStore};
use revsent_common::record::{parse, RawLine};
use revsent_common::scorer::score_record;
use revsent_common::{summarize, Lexicon, ScoredRecord, Sentiment};
use tempfile::TempDir;

fn sample_records(lexicon: &Lexicon) -> Vec<ScoredRecord> {
    [
        r#"{"reviewText":"This product is amazing and great, very good!","reviewerID":"A1","asin":"B1","overall":5}"#,
        r#"{"reviewText":"Terrible, worst purchase, very bad","reviewerID":"A2","asin":"B2","overall":1}"#,
        r#"{"reviewText":"It arrived on time","reviewerID":"A3","asin":"B3","overall":3}"#,
    ]
    .iter()
    .map(|line| score_record(lexicon, parse(&RawLine::from(*line)).unwrap()))
    .collect()
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("reviews.db");

    let pool = init_database(&db_path).await.unwrap();

    assert!(db_path.exists(), "Database file was not created");
    let store = SqliteReviewStore::new(pool);
    assert_eq!(store.count().await.unwrap(), 0);
    store.close().await;
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("reviews.db");
    let lexicon = Lexicon::default();

    let first = SqliteReviewStore::new(init_database(&db_path).await.unwrap());
    first.replace_all(&sample_records(&lexicon)).await.unwrap();
    first.close().await;

    let second = SqliteReviewStore::new(init_database(&db_path).await.unwrap());
    assert_eq!(second.count().await.unwrap(), 3);
    second.close().await;
}

#[tokio::test]
async fn test_replace_all_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = SqliteReviewStore::new(init_database(&dir.path().join("r.db")).await.unwrap());
    let lexicon = Lexicon::default();
    let records = sample_records(&lexicon);

    store.replace_all(&records).await.unwrap();
    let first_count = store.count().await.unwrap();
    let first_summary = summarize(&store.read_all().await.unwrap(), &lexicon);

    store.replace_all(&records).await.unwrap();
    let second_count = store.count().await.unwrap();
    let second_summary = summarize(&store.read_all().await.unwrap(), &lexicon);

    assert_eq!(first_count, 3);
    assert_eq!(first_count, second_count);
    assert_eq!(first_summary, second_summary);
}

#[tokio::test]
async fn test_read_back_preserves_scores_and_labels() {
    let dir = TempDir::new().unwrap();
    let store = SqliteReviewStore::new(init_database(&dir.path().join("r.db")).await.unwrap());
    let lexicon = Lexicon::default();

    store.replace_all(&sample_records(&lexicon)).await.unwrap();
    let stored = store.read_all().await.unwrap();

    let scores: Vec<(i64, Sentiment)> = stored.iter().map(|r| (r.score, r.sentiment)).collect();
    assert_eq!(
        scores,
        vec![
            (7, Sentiment::Positive),
            (-7, Sentiment::Negative),
            (0, Sentiment::Neutral)
        ]
    );
    assert!(stored.iter().all(|r| r.scored_at <= Utc::now()));
}

#[tokio::test]
async fn test_failed_insert_keeps_previous_rows() {
    let dir = TempDir::new().unwrap();
    let store = SqliteReviewStore::new(init_database(&dir.path().join("r.db")).await.unwrap());
    let lexicon = Lexicon::default();

    store.replace_all(&sample_records(&lexicon)).await.unwrap();

    // Reject every new insert so the second replace fails after its DELETE
    sqlx::query(
        "CREATE TRIGGER reject_insert BEFORE INSERT ON results \
         BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let result = store.replace_all(&sample_records(&lexicon)).await;
    assert!(matches!(result, Err(revsent_common::Error::Storage(_))));
    assert_eq!(store.count().await.unwrap(), 3);
}
