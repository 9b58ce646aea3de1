//! Scored-review persistence
//!
//! The store is replaced wholesale on every run: clear, then bulk insert, inside
//! one transaction. Only one run is expected to write at a time; nothing here
//! coordinates concurrent runs against the same file.

use crate::record::{ReviewRecord, ScoredRecord, Sentiment};
use crate::{time, Result};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

/// Rows per multi-row INSERT (7 bound values each, stays under SQLite's 999 limit)
const INSERT_CHUNK_ROWS: usize = 128;

/// Destination for a run's scored records and source for aggregation
#[async_trait]
pub trait ReviewSink: Send + Sync {
    /// Drop every stored record and store `records` instead
    ///
    /// All-or-nothing: on error the previous contents are kept.
    /// Returns the number of rows inserted.
    async fn replace_all(&self, records: &[ScoredRecord]) -> Result<u64>;

    /// Every stored record, in insertion order
    async fn read_all(&self) -> Result<Vec<ScoredRecord>>;

    /// Number of stored records
    async fn count(&self) -> Result<i64>;
}

/// [`ReviewSink`] over the SQLite `results` table
#[derive(Clone)]
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

type ResultRow = (String, String, f64, String, i64, String, String);

impl SqliteReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the underlying pool
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database closed.");
    }
}

#[async_trait]
impl ReviewSink for SqliteReviewStore {
    async fn replace_all(&self, records: &[ScoredRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let cleared = sqlx::query("DELETE FROM results")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        debug!("Cleared {} previous rows", cleared);

        let mut inserted = 0u64;
        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO results (reviewerID, asin, rating, review, score, sentiment, timestamp) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.review.reviewer_id.as_str())
                    .push_bind(record.review.asin.as_str())
                    .push_bind(record.review.rating)
                    .push_bind(record.review.review_text.as_str())
                    .push_bind(record.score)
                    .push_bind(record.sentiment.as_str())
                    .push_bind(time::to_storage(&record.scored_at));
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        // dropping `tx` without commit rolls back
        tx.commit().await?;
        debug!("Inserted {} rows", inserted);

        Ok(inserted)
    }

    async fn read_all(&self) -> Result<Vec<ScoredRecord>> {
        let rows = sqlx::query_as::<_, ResultRow>(
            r#"
            SELECT
                COALESCE(reviewerID, ''),
                COALESCE(asin, ''),
                COALESCE(rating, 0.0),
                COALESCE(review, ''),
                COALESCE(score, 0),
                sentiment,
                timestamp
            FROM results
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM results")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_record(row: ResultRow) -> Result<ScoredRecord> {
    let (reviewer_id, asin, rating, review_text, score, sentiment, timestamp) = row;
    Ok(ScoredRecord {
        review: ReviewRecord {
            reviewer_id,
            asin,
            rating,
            review_text,
        },
        score,
        sentiment: sentiment.parse::<Sentiment>()?,
        scored_at: time::from_storage(&timestamp)?,
    })
}
