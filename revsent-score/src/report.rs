//! Console report for a finished run

use revsent_common::AggregateSummary;
use std::fmt;
use std::time::Duration;

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Lines read from the source
    pub loaded: usize,
    /// Lines that parsed and were scored
    pub scored: usize,
    /// Rows written to storage
    pub inserted: u64,
    pub summary: AggregateSummary,
    pub elapsed: Duration,
}

impl RunReport {
    /// Lines dropped by the parser
    pub fn dropped(&self) -> usize {
        self.loaded.saturating_sub(self.scored)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.summary;

        writeln!(f, "Total reviews loaded: {}", self.loaded)?;
        writeln!(f, "Total records inserted: {}", self.inserted)?;
        if self.dropped() > 0 {
            writeln!(f, "Malformed lines skipped: {}", self.dropped())?;
        }

        writeln!(f)?;
        writeln!(f, "Sentiment distribution:")?;
        if summary.is_empty() {
            writeln!(f, "  no data")?;
        } else {
            for share in &summary.distribution {
                match share.percentage {
                    Some(pct) => {
                        writeln!(f, "  {}: {} ({:.2}%)", share.sentiment, share.count, pct)?
                    }
                    None => writeln!(f, "  {}: {} (no data)", share.sentiment, share.count)?,
                }
            }
        }

        match summary.mean_score {
            Some(mean) => writeln!(f, "Average sentiment score: {:.2}", mean)?,
            None => writeln!(f, "Average sentiment score: no data")?,
        }

        writeln!(f)?;
        writeln!(f, "High rating but negative sentiment: {}", summary.high_rating_negative)?;
        writeln!(f, "Low rating but positive sentiment: {}", summary.low_rating_positive)?;

        writeln!(f)?;
        writeln!(f, "Top {} words:", revsent_common::aggregate::TOP_WORD_COUNT)?;
        if summary.top_words.is_empty() {
            writeln!(f, "  no data")?;
        }
        for word in &summary.top_words {
            writeln!(f, "  {}: {}", word.word, word.count)?;
        }

        writeln!(f)?;
        write!(f, "Elapsed: {:.2}s", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revsent_common::{summarize, Lexicon};

    #[test]
    fn test_empty_report_says_no_data() {
        let report = RunReport {
            loaded: 0,
            scored: 0,
            inserted: 0,
            summary: summarize(&[], &Lexicon::default()),
            elapsed: Duration::from_millis(12),
        };
        let text = report.to_string();

        assert!(text.contains("Total reviews loaded: 0"));
        assert!(text.contains("Average sentiment score: no data"));
        assert!(!text.contains("NaN"));
        assert!(text.ends_with("Elapsed: 0.01s"));
    }

    #[test]
    fn test_dropped_lines_reported() {
        let report = RunReport {
            loaded: 5,
            scored: 3,
            inserted: 3,
            summary: summarize(&[], &Lexicon::default()),
            elapsed: Duration::ZERO,
        };

        assert_eq!(report.dropped(), 2);
        assert!(report.to_string().contains("Malformed lines skipped: 2"));
    }
}
