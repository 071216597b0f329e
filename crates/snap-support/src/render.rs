/// HTML fragments for the support page.
///
/// Markup follows the Bootstrap accordion and card components the page is styled
/// with. All record text is escaped; search matches are wrapped in
/// `<span class="faq-highlight">`.
use crate::model::{CategoryGroup, FaqRecord};
use crate::search::highlight;

pub const ACCORDION_ID: &str = "faqAccordion";
pub const LOADING_ID: &str = "faq-loading";
pub const CATEGORY_CARDS_ID: &str = "categoryCards";
pub const CATEGORY_DETAIL_ID: &str = "categoryDetail";
pub const CATEGORY_TITLE_ID: &str = "categoryTitle";
pub const BACK_BUTTON_ID: &str = "backToCategories";
pub const LIVE_REGION_ID: &str = "search-results-live";

const LOAD_FAILURE_MESSAGE: &str = "Unable to load frequently asked questions. Please try \
refreshing the page or contact support if the problem persists.";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape `text` and wrap every occurrence of `term`. Line breaks become `<br>`.
pub fn highlighted_html(text: &str, term: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|segment| {
            let escaped = escape_html(segment.text).replace('\n', "<br>");
            if segment.matched {
                format!(r#"<span class="faq-highlight">{escaped}</span>"#)
            } else {
                escaped
            }
        })
        .collect()
}

/// One collapsible accordion item. The first item starts expanded.
pub fn render_accordion_item(record: &FaqRecord, index: usize, term: &str, parent_id: &str) -> String {
    let item_id = index + 1;
    let is_first = index == 0;
    let button_class = if is_first { "" } else { " collapsed" };
    let collapse_class = if is_first { " show" } else { "" };
    let question = highlighted_html(&record.question, term);
    let answer = highlighted_html(&record.answer, term);

    format!(
        r##"<div class="accordion-item" data-faq-item>
    <h3 class="accordion-header" id="faq-heading-{item_id}">
        <button class="accordion-button{button_class}" type="button" data-bs-toggle="collapse" data-bs-target="#faq-collapse-{item_id}" aria-expanded="{is_first}" aria-controls="faq-collapse-{item_id}">
            {question}
        </button>
    </h3>
    <div id="faq-collapse-{item_id}" class="accordion-collapse collapse{collapse_class}" data-bs-parent="#{parent_id}" aria-labelledby="faq-heading-{item_id}">
        <div class="accordion-body">
            {answer}
        </div>
    </div>
</div>
"##
    )
}

pub fn render_accordion<'a, I>(records: I, term: &str, parent_id: &str) -> String
where
    I: IntoIterator<Item = &'a FaqRecord>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| render_accordion_item(record, index, term, parent_id))
        .collect()
}

pub fn render_category_cards(groups: &[CategoryGroup]) -> String {
    let mut html = format!(r#"<div id="{CATEGORY_CARDS_ID}" class="row g-4">"#);
    html.push('\n');
    for group in groups {
        let count = group.records.len();
        let noun = if count == 1 { "question" } else { "questions" };
        html.push_str(&format!(
            r#"<div class="col-md-6 col-lg-4">
    <button type="button" class="card h-100 category-card w-100 text-start" data-category="{key}">
        <div class="card-body">
            <i class="fas {icon} fa-2x mb-3" aria-hidden="true"></i>
            <h3 class="h5 card-title">{label}</h3>
            <p class="card-text text-muted">{count} {noun}</p>
        </div>
    </button>
</div>
"#,
            key = escape_html(&group.key),
            icon = group.icon,
            label = escape_html(&group.label),
        ));
    }
    html.push_str("</div>\n");
    html
}

pub fn render_category_detail(group: &CategoryGroup) -> String {
    let parent_id = "categoryAccordion";
    format!(
        r#"<div id="{CATEGORY_DETAIL_ID}">
<button type="button" id="{BACK_BUTTON_ID}" class="btn btn-link mb-3"><i class="fas fa-arrow-left me-2" aria-hidden="true"></i>Back to categories</button>
<h2 id="{CATEGORY_TITLE_ID}"><i class="fas {icon} me-2" aria-hidden="true"></i>{label}</h2>
<div class="accordion" id="{parent_id}">
{items}</div>
</div>
"#,
        icon = group.icon,
        label = escape_html(&group.label),
        items = render_accordion(&group.records, "", parent_id),
    )
}

pub fn render_search_results(hits: &[&FaqRecord], term: &str) -> String {
    if hits.is_empty() {
        return format!(
            r#"<div class="alert alert-info" role="status">No questions match "{}".</div>
"#,
            escape_html(term.trim())
        );
    }
    format!(
        r#"<div class="accordion" id="{ACCORDION_ID}">
{}</div>
"#,
        render_accordion(hits.iter().copied(), term, ACCORDION_ID)
    )
}

/// Warning shown in place of the loading placeholder when the FAQ document
/// could not be loaded.
pub fn render_load_failure() -> String {
    format!(
        r#"<div id="{LOADING_ID}">
    <div class="alert alert-warning" role="alert">
        <i class="fas fa-exclamation-triangle me-2"></i>
        {LOAD_FAILURE_MESSAGE}
    </div>
</div>
"#
    )
}

pub fn render_skip_link() -> String {
    r##"<a href="#faq-section" class="sr-only sr-only-focusable position-absolute">Skip to FAQ section</a>
"##
    .to_string()
}

pub fn render_live_region(message: &str) -> String {
    format!(
        r#"<div id="{LIVE_REGION_ID}" class="sr-only" aria-live="polite" aria-atomic="true">{}</div>
"#,
        escape_html(message)
    )
}
