//! Aggregation over the persisted result set
//!
//! Everything here is derived from the full set of scored records read back from
//! storage. Only the word ranking depends on record order (ties keep the order in
//! which words were first seen).

use crate::lexicon::Lexicon;
use crate::record::{ScoredRecord, Sentiment};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Number of words reported in the frequency ranking
pub const TOP_WORD_COUNT: usize = 10;

/// Ratings at or above this with a Negative label count as a mismatch
pub const HIGH_RATING: f64 = 4.0;

/// Ratings at or below this with a Positive label count as a mismatch
pub const LOW_RATING: f64 = 2.0;

/// Count and share of one sentiment label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Percentage of all records, two decimals; `None` when there are no records
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Summary of a persisted result set; recomputed each run, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub total: usize,
    /// One entry per label in [`Sentiment::ALL`] order
    pub distribution: Vec<SentimentShare>,
    /// Mean score, two decimals; `None` when there are no records
    pub mean_score: Option<f64>,
    /// rating >= 4 but labelled Negative
    pub high_rating_negative: usize,
    /// rating <= 2 but labelled Positive
    pub low_rating_positive: usize,
    pub top_words: Vec<WordCount>,
}

impl AggregateSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for one label
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.distribution
            .iter()
            .find(|share| share.sentiment == sentiment)
            .map(|share| share.count)
            .unwrap_or(0)
    }

    /// Mean score, or [`Error::EmptyDataset`] when nothing was aggregated
    pub fn require_mean_score(&self) -> Result<f64> {
        self.mean_score.ok_or(Error::EmptyDataset)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the summary of a result set
pub fn summarize(records: &[ScoredRecord], lexicon: &Lexicon) -> AggregateSummary {
    let total = records.len();

    let mut counts: HashMap<Sentiment, usize> = HashMap::new();
    let mut score_sum: i64 = 0;
    let mut high_rating_negative = 0;
    let mut low_rating_positive = 0;

    for record in records {
        *counts.entry(record.sentiment).or_insert(0) += 1;
        score_sum += record.score;

        let rating = record.review.rating;
        if rating >= HIGH_RATING && record.sentiment == Sentiment::Negative {
            high_rating_negative += 1;
        }
        if rating <= LOW_RATING && record.sentiment == Sentiment::Positive {
            low_rating_positive += 1;
        }
    }

    let distribution = Sentiment::ALL
        .iter()
        .map(|&sentiment| {
            let count = counts.get(&sentiment).copied().unwrap_or(0);
            SentimentShare {
                sentiment,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    let mean_score = if total == 0 {
        None
    } else {
        Some(round2(score_sum as f64 / total as f64))
    };

    AggregateSummary {
        total,
        distribution,
        mean_score,
        high_rating_negative,
        low_rating_positive,
        top_words: top_words(records, lexicon, TOP_WORD_COUNT),
    }
}

fn percentage(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(round2(count as f64 / total as f64 * 100.0))
}

/// Most frequent non-stop words, count descending, ties in first-seen order
pub fn top_words(records: &[ScoredRecord], lexicon: &Lexicon, limit: usize) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut words: Vec<WordCount> = Vec::new();

    for record in records {
        let text = record.review.review_text.to_lowercase();
        for token in text.split_whitespace() {
            if lexicon.is_stop_word(token) {
                continue;
            }
            match index.get(token) {
                Some(&slot) => words[slot].count += 1,
                None => {
                    index.insert(token.to_string(), words.len());
                    words.push(WordCount {
                        word: token.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    words.sort_by(|a, b| b.count.cmp(&a.count));
    words.truncate(limit);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ReviewRecord;
    use chrono::Utc;

    fn scored(text: &str, rating: f64, score: i64) -> ScoredRecord {
        ScoredRecord {
            review: ReviewRecord {
                reviewer_id: String::new(),
                asin: String::new(),
                rating,
                review_text: text.to_string(),
            },
            score,
            sentiment: crate::scorer::classify(score),
            scored_at: Utc::now(),
        }
    }

    fn stop_words(words: &[&str]) -> Lexicon {
        Lexicon::default().with_stop_words(words.iter().map(|w| w.to_string()))
    }

    #[test]
    fn test_summarize_empty_reports_no_data() {
        let summary = summarize(&[], &Lexicon::default());

        assert!(summary.is_empty());
        assert_eq!(summary.mean_score, None);
        assert!(summary.distribution.iter().all(|s| s.count == 0 && s.percentage.is_none()));
        assert!(summary.top_words.is_empty());
        assert!(matches!(summary.require_mean_score(), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_distribution_and_mean() {
        let records = vec![
            scored("a", 5.0, 7),
            scored("b", 1.0, -7),
            scored("c", 3.0, 0),
        ];
        let summary = summarize(&records, &Lexicon::default());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Sentiment::Positive), 1);
        assert_eq!(summary.count(Sentiment::Negative), 1);
        assert_eq!(summary.count(Sentiment::Neutral), 1);
        assert_eq!(summary.distribution[0].percentage, Some(33.33));
        assert_eq!(summary.mean_score, Some(0.0));
        assert_eq!(summary.require_mean_score().unwrap(), 0.0);
    }

    #[test]
    fn test_mean_rounds_to_two_decimals() {
        let records = vec![scored("a", 3.0, 1), scored("b", 3.0, 1), scored("c", 3.0, 2)];
        let summary = summarize(&records, &Lexicon::default());
        assert_eq!(summary.mean_score, Some(1.33));
    }

    #[test]
    fn test_mismatch_counts() {
        let records = vec![
            scored("a", 5.0, -3), // high rating, negative
            scored("b", 4.0, -2), // high rating, negative
            scored("c", 4.0, -1), // high rating, neutral
            scored("d", 2.0, 3),  // low rating, positive
            scored("e", 0.0, 2),  // missing rating counts as low
            scored("f", 3.0, 5),  // mid rating
        ];
        let summary = summarize(&records, &Lexicon::default());

        assert_eq!(summary.high_rating_negative, 2);
        assert_eq!(summary.low_rating_positive, 2);
    }

    #[test]
    fn test_no_mismatch_for_agreeing_pair() {
        let records = vec![
            scored("This product is amazing and great, very good!", 5.0, 7),
            scored("Terrible, worst purchase, very bad", 1.0, -7),
        ];
        let summary = summarize(&records, &Lexicon::default());

        assert_eq!(summary.high_rating_negative, 0);
        assert_eq!(summary.low_rating_positive, 0);
    }

    #[test]
    fn test_top_words_example() {
        let records = vec![
            scored("the good product was great", 3.0, 0),
            scored("the product was bad", 3.0, 0),
        ];
        let summary = summarize(&records, &stop_words(&["the", "was"]));

        let ranked: Vec<(&str, usize)> = summary
            .top_words
            .iter()
            .map(|w| (w.word.as_str(), w.count))
            .collect();
        assert_eq!(
            ranked,
            vec![("product", 2), ("good", 1), ("great", 1), ("bad", 1)]
        );
    }

    #[test]
    fn test_top_words_case_folds_and_limits() {
        let text = (0..15).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let records = vec![scored(&text, 3.0, 0), scored("W14 w14", 3.0, 0)];
        let words = top_words(&records, &stop_words(&[]), TOP_WORD_COUNT);

        assert_eq!(words.len(), TOP_WORD_COUNT);
        assert_eq!(words[0], WordCount { word: "w14".to_string(), count: 3 });
        assert_eq!(words[1].word, "w0");
        assert_eq!(words[9].word, "w8");
    }

    #[test]
    fn test_summary_independent_of_order_except_ties() {
        let a = scored("great value", 5.0, 2);
        let b = scored("poor value", 1.0, -2);
        let forward = summarize(&[a.clone(), b.clone()], &Lexicon::default());
        let backward = summarize(&[b, a], &Lexicon::default());

        assert_eq!(forward.distribution, backward.distribution);
        assert_eq!(forward.mean_score, backward.mean_score);
        assert_eq!(forward.top_words[0], backward.top_words[0]);
    }
}
