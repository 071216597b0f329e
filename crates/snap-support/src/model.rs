pub const DEFAULT_CATEGORY: &str = "General";

/// One question/answer unit parsed from a `## ` section of the FAQ document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqRecord {
    /// Heading text with the `## ` marker removed
    pub question: String,
    /// Body lines joined with `\n`, metadata lines excluded
    pub answer: String,
    /// Value of the `**Keywords:**` line; searched but never rendered
    pub keywords: String,
    /// Raw value of the `**Category:**` line, `"General"` when absent
    pub category: String,
}

#[cfg(test)]
impl FaqRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            keywords: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Records sharing one raw category value, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Raw category value used as the grouping key
    pub key: String,
    /// Display label with stray markdown asterisks removed
    pub label: String,
    /// Font Awesome icon class
    pub icon: &'static str,
    pub records: Vec<FaqRecord>,
}
