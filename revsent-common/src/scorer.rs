//! Heuristic sentiment scorer
//!
//! Score = phrase adjustments + lexicon word weights + long review boost,
//! all computed on the lowercased text. Word matching is substring presence,
//! not token matching: "hate" fires inside "whatever", and a word counts once
//! no matter how often it appears.

use crate::lexicon::Lexicon;
use crate::record::{ReviewRecord, ScoredRecord, Sentiment};
use crate::time;

/// Reviews with more whitespace-separated words than this get +1
pub const LONG_REVIEW_WORDS: usize = 50;

/// Scores strictly above this are Positive, strictly below its negation Negative
pub const CLASSIFY_THRESHOLD: i64 = 1;

/// Compute the raw sentiment score of a review text
pub fn score(lexicon: &Lexicon, text: &str) -> i64 {
    let text = text.to_lowercase();

    let phrase_delta: i64 = lexicon
        .phrases()
        .filter(|(phrase, _)| text.contains(phrase))
        .map(|(_, delta)| delta)
        .sum();

    let word_delta: i64 = lexicon
        .signed_weights()
        .filter(|(word, _)| text.contains(word))
        .map(|(_, weight)| weight)
        .sum();

    let length_boost = if text.split_whitespace().count() > LONG_REVIEW_WORDS {
        1
    } else {
        0
    };

    phrase_delta + word_delta + length_boost
}

/// Map a score onto a label; -1, 0 and 1 are all Neutral
pub fn classify(score: i64) -> Sentiment {
    if score > CLASSIFY_THRESHOLD {
        Sentiment::Positive
    } else if score < -CLASSIFY_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Score and label a parsed review, stamping it with the current time
pub fn score_record(lexicon: &Lexicon, review: ReviewRecord) -> ScoredRecord {
    let score = score(lexicon, &review.review_text);
    ScoredRecord {
        sentiment: classify(score),
        score,
        review,
        scored_at: time::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dead_zone() {
        assert_eq!(classify(-1), Sentiment::Neutral);
        assert_eq!(classify(0), Sentiment::Neutral);
        assert_eq!(classify(1), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_outside_dead_zone() {
        assert_eq!(classify(2), Sentiment::Positive);
        assert_eq!(classify(i64::MAX), Sentiment::Positive);
        assert_eq!(classify(-2), Sentiment::Negative);
        assert_eq!(classify(i64::MIN), Sentiment::Negative);
    }

    #[test]
    fn test_score_positive_example() {
        let lexicon = Lexicon::default();
        // amazing (3) + great (2) + "very good" (2)
        assert_eq!(score(&lexicon, "This product is amazing and great, very good!"), 7);
    }

    #[test]
    fn test_score_negative_example() {
        let lexicon = Lexicon::default();
        // terrible (-3) + worst (-2) + "very bad" (-2)
        assert_eq!(score(&lexicon, "Terrible, worst purchase, very bad"), -7);
    }

    #[test]
    fn test_score_is_case_insensitive() {
        let lexicon = Lexicon::default();
        assert_eq!(score(&lexicon, "AMAZING"), score(&lexicon, "amazing"));
    }

    #[test]
    fn test_phrases_compose_additively() {
        let lexicon = Lexicon::default();
        assert_eq!(score(&lexicon, "very good, not good"), 0);
        assert_eq!(score(&lexicon, "not bad"), 1);
        assert_eq!(score(&lexicon, "very bad and not bad"), -1);
    }

    #[test]
    fn test_word_counts_once() {
        let lexicon = Lexicon::default();
        assert_eq!(score(&lexicon, "great great great"), 2);
    }

    #[test]
    fn test_substring_matching_quirk() {
        let lexicon = Lexicon::default();
        // "hate" is embedded in "whatever"
        assert_eq!(score(&lexicon, "whatever"), -2);
        // "love" is embedded in "gloves"
        assert_eq!(score(&lexicon, "nice gloves"), 2);
    }

    #[test]
    fn test_long_review_boost() {
        let lexicon = Lexicon::default();
        let fifty = vec!["word"; 50].join(" ");
        let fifty_one = vec!["word"; 51].join(" ");

        assert_eq!(score(&lexicon, &fifty), 0);
        assert_eq!(score(&lexicon, &fifty_one), 1);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(score(&Lexicon::default(), ""), 0);
    }

    #[test]
    fn test_score_record() {
        let review = ReviewRecord {
            reviewer_id: "A1".to_string(),
            asin: "B1".to_string(),
            rating: 5.0,
            review_text: "Excellent, love it".to_string(),
        };
        let before = time::now();
        let scored = score_record(&Lexicon::default(), review.clone());

        assert!(scored.scored_at >= before && scored.scored_at <= time::now());
        assert_eq!(scored.score, 5);
        assert_eq!(scored.sentiment, Sentiment::Positive);
        assert_eq!(scored.review, review);
    }
}
