use crate::model::{CategoryGroup, FaqRecord};

const FALLBACK_ICON: &str = "fa-question-circle";

/// Known category terms and their icons. First match wins, so more specific
/// terms come before broader ones.
const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("photo", "fa-camera"),
    ("shipping", "fa-truck"),
    ("order", "fa-truck"),
    ("payment", "fa-credit-card"),
    ("billing", "fa-credit-card"),
    ("return", "fa-undo"),
    ("refund", "fa-undo"),
    ("product", "fa-box"),
    ("account", "fa-user"),
];

/// Group records by their raw category, keeping first-seen group order and
/// document order within each group.
pub fn group_by_category(records: &[FaqRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.key == record.category) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(CategoryGroup {
                key: record.category.clone(),
                label: sanitize_category(&record.category),
                icon: category_icon(&record.category),
                records: vec![record.clone()],
            }),
        }
    }
    groups
}

/// Strip stray leading asterisks left by malformed `**Category:**` lines.
pub fn sanitize_category(raw: &str) -> String {
    raw.trim().trim_start_matches('*').trim().to_string()
}

pub fn category_icon(category: &str) -> &'static str {
    let lowered = category.to_lowercase();
    CATEGORY_ICONS
        .iter()
        .find(|(term, _)| lowered.contains(term))
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

/// Find a group by key or display label, ignoring case.
pub fn find_group<'a>(groups: &'a [CategoryGroup], name: &str) -> Option<&'a CategoryGroup> {
    let name = name.trim();
    groups
        .iter()
        .find(|g| g.key == name)
        .or_else(|| {
            groups.iter().find(|g| {
                g.key.eq_ignore_ascii_case(name) || g.label.eq_ignore_ascii_case(name)
            })
        })
}
