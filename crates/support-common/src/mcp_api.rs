use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchFaqsParams {
    /// Free text matched case-insensitively against questions, answers and keywords.
    /// An empty query clears the search.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OpenCategoryParams {
    /// Category name as listed by `list_categories` (e.g. "Order & Shipping").
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubmitContactParams {
    pub name: String,
    pub email: String,
    pub subject: String,
    /// Optional order number the request refers to.
    pub order_number: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FaqHit {
    /// Position of the record in document order.
    pub position: usize,
    pub question: String,
    pub category: String,
    /// Question text with matches wrapped in `<span class="faq-highlight">`.
    pub question_html: String,
    /// Answer text with matches wrapped in `<span class="faq-highlight">`.
    pub answer_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchFaqsResponse {
    pub query: String,
    pub results: Vec<FaqHit>,
    /// Text announced through the ARIA live region.
    pub announcement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub faq_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewResponse {
    /// One of `browsing`, `category_detail`, `search_results`.
    pub view: String,
    /// Category title when a category is open, or the active search query.
    pub title: Option<String>,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldErrorInfo {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubmitContactResponse {
    pub accepted: bool,
    /// Success notice shown to the user after an accepted submission.
    pub notice: Option<String>,
    pub reference: Option<String>,
    pub errors: Vec<FieldErrorInfo>,
    /// First invalid field, which receives focus in the form.
    pub focus_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadFaqsResponse {
    pub updated: bool,
    /// SHA-256 of the fetched document.
    pub digest: String,
    pub faq_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_params_accept_missing_order_number() {
        let params: SubmitContactParams = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Prints",
            "message": "My prints arrived bent."
        }))
        .unwrap();
        assert!(params.order_number.is_none());
    }

    #[test]
    fn rejected_submission_wire_shape() {
        let response = SubmitContactResponse {
            accepted: false,
            notice: None,
            reference: None,
            errors: vec![FieldErrorInfo {
                field: "email".to_string(),
                message: "Please enter a valid email address.".to_string(),
            }],
            focus_field: Some("email".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "accepted": false,
                "notice": null,
                "reference": null,
                "errors": [{"field": "email", "message": "Please enter a valid email address."}],
                "focus_field": "email"
            })
        );
    }
}
