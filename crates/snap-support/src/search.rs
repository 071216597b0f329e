/// Text search over parsed FAQ records.
///
/// Matching is a case-insensitive substring test against the question, answer and
/// keywords of a record. Highlighting splits display text into plain and matched
/// segments so the renderer can escape every piece before wrapping matches.
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::model::FaqRecord;

/// A run of display text, flagged when it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Compiled search term shared by matching and highlighting.
///
/// The term is trimmed and matched literally, ignoring case; regex metacharacters are
/// escaped first.
#[derive(Debug, Clone)]
pub enum TermPattern {
    /// Blank term: every record matches, nothing is highlighted.
    Everything,
    Literal(Regex),
    /// The term could not be compiled (size limits). Nothing matches.
    Nothing,
}

impl TermPattern {
    pub fn new(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return Self::Everything;
        }
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Self::Literal(re),
            Err(e) => {
                debug!(error = %e, "search term rejected");
                Self::Nothing
            }
        }
    }

    pub fn matches(&self, record: &FaqRecord) -> bool {
        match self {
            Self::Everything => true,
            Self::Literal(re) => [&record.question, &record.answer, &record.keywords]
                .iter()
                .any(|field| re.is_match(field)),
            Self::Nothing => false,
        }
    }

    /// Split `text` around every occurrence of the term.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Self::Literal(re) = self else {
            return vec![Segment {
                text,
                matched: false,
            }];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in re.find_iter(text) {
            if m.start() > last {
                segments.push(Segment {
                    text: &text[last..m.start()],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: m.as_str(),
                matched: true,
            });
            last = m.end();
        }
        if last < text.len() || segments.is_empty() {
            segments.push(Segment {
                text: &text[last..],
                matched: false,
            });
        }
        segments
    }
}

/// Records matching `term`, in their original order.
pub fn filter<'a>(records: &'a [FaqRecord], term: &str) -> Vec<&'a FaqRecord> {
    let pattern = TermPattern::new(term);
    records.iter().filter(|r| pattern.matches(r)).collect()
}

/// Split `text` around every case-insensitive occurrence of `term`.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    TermPattern::new(term).segments(text)
}

/// Screen reader announcement for a finished search.
pub fn result_announcement(term: &str, count: usize) -> String {
    if term.trim().is_empty() {
        return format!("Showing all {count} frequently asked questions");
    }
    match count {
        0 => format!("No FAQ items match \"{}\"", term.trim()),
        1 => "Found 1 matching FAQ item".to_string(),
        n => format!("Found {n} matching FAQ items"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_faqs;

    fn matches(record: &FaqRecord, term: &str) -> bool {
        TermPattern::new(term).matches(record)
    }

    fn sample() -> Vec<FaqRecord> {
        parse_faqs(
            "# SNAP Photo FAQ\n\
             ## How do I order prints?\n\
             You can order online.\n\
             **Keywords:** prints, order\n\
             **Category:** Order & Shipping\n\
             ## What payment methods are accepted?\n\
             We accept all major cards.\n",
        )
    }

    #[test]
    fn empty_term_matches_everything() {
        for record in sample() {
            assert!(matches(&record, ""));
            assert!(matches(&record, "   "));
        }
    }

    #[test]
    fn search_for_cards_matches_only_payment_record() {
        let records = sample();
        for term in ["cards", "CARDS", "Cards"] {
            let hits = filter(&records, term);
            assert_eq!(hits.len(), 1, "term {term}");
            assert_eq!(hits[0].question, "What payment methods are accepted?");
        }
    }

    #[test]
    fn keywords_are_searched() {
        let records = sample();
        let record = &records[0];
        assert!(!record.answer.contains("prints,"));
        assert!(matches(record, "PRINTS, ORDER"));
    }

    #[test]
    fn question_is_searched() {
        let records = sample();
        assert!(matches(&records[1], "payment METHODS"));
        assert!(!matches(&records[1], "refund"));
    }

    #[test]
    fn highlight_wraps_every_occurrence() {
        let segments = highlight("Cards and more cards", "card");
        let matched: Vec<&str> = segments.iter().filter(|s| s.matched).map(|s| s.text).collect();
        assert_eq!(matched, vec!["Card", "card"]);
        let joined: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(joined, "Cards and more cards");
    }

    #[test]
    fn highlight_escapes_metacharacters() {
        let segments = highlight("Is it $5.00 (USD)?", "$5.00 (");
        assert_eq!(
            segments,
            vec![
                Segment { text: "Is it ", matched: false },
                Segment { text: "$5.00 (", matched: true },
                Segment { text: "USD)?", matched: false },
            ]
        );
        assert!(highlight("a+b", "a+").iter().any(|s| s.matched));
        assert!(!highlight("aab", "a+").iter().any(|s| s.matched));
    }

    #[test]
    fn highlight_with_empty_term_is_one_plain_segment() {
        let segments = highlight("text", "");
        assert_eq!(segments, vec![Segment { text: "text", matched: false }]);
    }

    #[test]
    fn matching_and_highlighting_agree_on_unicode_case() {
        let record = FaqRecord::new("İstanbul", "Yes.");
        for term in ["i", "İ", "STANBUL"] {
            let highlighted = highlight(&record.question, term).iter().any(|s| s.matched);
            assert_eq!(matches(&record, term), highlighted, "term {term}");
        }
        assert!(matches(&record, "STANBUL"));
    }

    #[test]
    fn announcement_counts() {
        assert_eq!(result_announcement("x", 1), "Found 1 matching FAQ item");
        assert_eq!(result_announcement("x", 3), "Found 3 matching FAQ items");
        assert_eq!(result_announcement("zzz", 0), "No FAQ items match \"zzz\"");
    }
}
