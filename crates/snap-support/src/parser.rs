/// Parser for the support page FAQ markdown.
///
/// The document has a flat structure:
/// - Title: `# SNAP Photo FAQ` before the first question (ignored)
/// - Question headers: `## Question text`
/// - Answer body: every following non-empty line until the next `## ` header
/// - Optional metadata lines inside a block: `**Keywords:** a, b` and `**Category:** Name`
///
/// Parser approach: single pass over trimmed lines with an accumulator for the open block.
/// Malformed input is normalized, never rejected.
use tracing::debug;

use crate::model::{FaqRecord, DEFAULT_CATEGORY};

const TITLE_MARKER: &str = "# ";
const QUESTION_MARKER: &str = "## ";
const KEYWORDS_MARKER: &str = "**Keywords:**";
const CATEGORY_MARKER: &str = "**Category:**";

#[derive(Debug)]
struct OpenBlock {
    question: String,
    answer: String,
    keywords: String,
    category: String,
}

impl OpenBlock {
    fn new(question: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: String::new(),
            keywords: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Blocks without a question or answer are dropped.
    fn finish(self) -> Option<FaqRecord> {
        let answer = self.answer.trim_end();
        if self.question.is_empty() || answer.is_empty() {
            debug!(question = %self.question, "dropping FAQ block without answer");
            return None;
        }
        Some(FaqRecord {
            question: self.question,
            answer: answer.to_string(),
            keywords: self.keywords,
            category: self.category,
        })
    }
}

/// Parse FAQ markdown into records in document order.
pub fn parse_faqs(markdown: &str) -> Vec<FaqRecord> {
    let mut records = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for line in markdown.lines().map(str::trim) {
        if line.is_empty() || (open.is_none() && line.starts_with(TITLE_MARKER)) {
            continue;
        }

        if let Some(question) = line.strip_prefix(QUESTION_MARKER) {
            if let Some(record) = open.take().and_then(OpenBlock::finish) {
                records.push(record);
            }
            open = Some(OpenBlock::new(question.trim()));
            continue;
        }

        let Some(block) = open.as_mut() else {
            continue;
        };

        if let Some(keywords) = line.strip_prefix(KEYWORDS_MARKER) {
            block.keywords = keywords.trim().to_string();
        } else if let Some(category) = line.strip_prefix(CATEGORY_MARKER) {
            block.category = category.trim().to_string();
        } else {
            block.answer.push_str(line);
            block.answer.push('\n');
        }
    }

    if let Some(record) = open.and_then(OpenBlock::finish) {
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# SNAP Photo FAQ
## How do I order prints?
You can order online.
**Keywords:** prints, order
**Category:** Order & Shipping
## What payment methods are accepted?
We accept all major cards.
"#;

    #[test]
    fn parse_sample_document() {
        let records = parse_faqs(SAMPLE);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            FaqRecord::new("How do I order prints?", "You can order online.")
                .with_keywords("prints, order")
                .with_category("Order & Shipping")
        );
        assert_eq!(
            records[1],
            FaqRecord::new(
                "What payment methods are accepted?",
                "We accept all major cards."
            )
        );
    }

    #[test]
    fn multi_line_answers_keep_line_breaks() {
        let content = "## Q\n  first line  \n\n   second line\n";
        let records = parse_faqs(content);
        assert_eq!(records[0].answer, "first line\nsecond line");
    }

    #[test]
    fn question_without_answer_is_dropped() {
        let content = "## Empty\n\n\n## Full\nAnswer.\n## Trailing\n";
        let records = parse_faqs(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Full");
    }

    #[test]
    fn metadata_only_block_is_dropped() {
        let content = "## Tagged\n**Keywords:** x\n**Category:** Returns\n";
        assert!(parse_faqs(content).is_empty());
    }

    #[test]
    fn metadata_never_leaks_into_answer() {
        let content = "## Q\n**Category:** Photo Tips\nBody.\n**Keywords:** lens\nMore.\n";
        let records = parse_faqs(content);
        assert_eq!(records[0].answer, "Body.\nMore.");
        assert_eq!(records[0].keywords, "lens");
        assert_eq!(records[0].category, "Photo Tips");
    }

    #[test]
    fn metadata_resets_per_block() {
        let content = "## A\nx\n**Keywords:** k\n**Category:** Payments\n## B\ny\n";
        let records = parse_faqs(content);
        assert_eq!(records[1].keywords, "");
        assert_eq!(records[1].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn malformed_category_is_stored_raw() {
        let content = "## Q\nA\n**Category:** ** Products\n";
        let records = parse_faqs(content);
        assert_eq!(records[0].category, "** Products");
    }

    #[test]
    fn lines_before_first_question_are_ignored() {
        let content = "# Title\nIntro paragraph.\n**Keywords:** stray\n## Q\nA\n";
        let records = parse_faqs(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, "A");
        assert_eq!(records[0].keywords, "");
    }

    #[test]
    fn hash_lines_inside_a_block_are_answer_text() {
        let content = "## Q\nA\n# Another Title\nB\n";
        assert_eq!(parse_faqs(content)[0].answer, "A\n# Another Title\nB");
    }

    #[test]
    fn answer_made_of_a_hash_line_is_kept() {
        let records =
            parse_faqs("# SNAP Photo FAQ\n## How many prints?\n# of prints per order is unlimited.\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "How many prints?");
        assert_eq!(records[0].answer, "# of prints per order is unlimited.");
    }

    #[test]
    fn n_headings_yield_n_records_in_order() {
        let content: String = (0..25)
            .map(|i| format!("## Question {i}\nAnswer {i}\n\n"))
            .collect();
        let records = parse_faqs(&content);
        assert_eq!(records.len(), 25);
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.question, format!("Question {i}"));
            assert_eq!(r.answer, format!("Answer {i}"));
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_faqs("").is_empty());
        assert!(parse_faqs("# SNAP Photo FAQ\n\n").is_empty());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let records = parse_faqs("## Q\r\nA\r\n**Keywords:** k\r\n");
        assert_eq!(records[0].answer, "A");
        assert_eq!(records[0].keywords, "k");
    }

    #[test]
    fn parse_bundled_document() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/faqs.md");
        let content = std::fs::read_to_string(&path).expect("bundled faqs.md should be readable");
        let records = parse_faqs(&content);
        assert!(records.len() >= 8, "expected the bundled FAQ set");
        assert!(records.iter().all(|r| !r.answer.contains("**Keywords:**")));
        assert!(records.iter().any(|r| r.category == DEFAULT_CATEGORY));
    }
}
