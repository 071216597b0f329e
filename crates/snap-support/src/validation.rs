/// Field rules for the support ticket contact form.
///
/// Validation never fails hard: every field yields a `FieldStatus` carrying the inline
/// message shown next to it, and the form report tells which field receives focus.
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Email,
    Subject,
    OrderNumber,
    Message,
}

impl FieldKind {
    /// Form control id of the field.
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::OrderNumber => "order_number",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormField<'a> {
    pub kind: FieldKind,
    pub value: &'a str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Invalid(String),
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

pub fn validate_field(field: &FormField<'_>) -> FieldStatus {
    let value = field.value.trim();

    if value.is_empty() {
        return if field.required {
            FieldStatus::Invalid("This field is required.".to_string())
        } else {
            FieldStatus::Valid
        };
    }

    match field.kind {
        FieldKind::Email if !EMAIL_RE.is_match(value) => {
            FieldStatus::Invalid("Please enter a valid email address.".to_string())
        }
        FieldKind::Name if value.chars().count() < MIN_NAME_CHARS => FieldStatus::Invalid(
            format!("Name must be at least {MIN_NAME_CHARS} characters long."),
        ),
        FieldKind::Message if value.chars().count() < MIN_MESSAGE_CHARS => FieldStatus::Invalid(
            format!("Message must be at least {MIN_MESSAGE_CHARS} characters long."),
        ),
        _ => FieldStatus::Valid,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub order_number: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Tracked fields in form order.
    pub fn fields(&self) -> [FormField<'_>; 5] {
        [
            FormField {
                kind: FieldKind::Name,
                value: &self.name,
                required: true,
            },
            FormField {
                kind: FieldKind::Email,
                value: &self.email,
                required: true,
            },
            FormField {
                kind: FieldKind::Subject,
                value: &self.subject,
                required: true,
            },
            FormField {
                kind: FieldKind::OrderNumber,
                value: self.order_number.as_deref().unwrap_or(""),
                required: false,
            },
            FormField {
                kind: FieldKind::Message,
                value: &self.message,
                required: true,
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct FormReport {
    pub fields: Vec<(FieldKind, FieldStatus)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, status)| status.is_valid())
    }

    /// Field that receives focus after a blocked submission.
    pub fn first_invalid(&self) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(_, status)| !status.is_valid())
            .map(|(kind, _)| *kind)
    }

    pub fn errors(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        self.fields
            .iter()
            .filter_map(|(kind, status)| status.message().map(|m| (*kind, m)))
    }
}

pub fn validate_form(form: &ContactForm) -> FormReport {
    FormReport {
        fields: form
            .fields()
            .iter()
            .map(|field| (field.kind, validate_field(field)))
            .collect(),
    }
}
