use std::path::PathBuf;
use std::time::Duration;

use crate::contact::DEFAULT_SUBMIT_DELAY;
use crate::error::AppError;
use crate::session::BrowseLayout;
use support_common::document::{DocumentSource, DEFAULT_DOCUMENT_PATH};

/// Service configuration loaded explicitly from environment variables.
///
/// The FAQ document must come from somewhere: either a local file or a base URL.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the FAQ markdown is read from.
    pub source: DocumentSource,
    /// Presentation of the browsing view.
    pub layout: BrowseLayout,
    /// Latency of the simulated contact form submission.
    pub submit_delay: Duration,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// One of these is required (`FAQ_FILE` wins when both are set):
    /// - `FAQ_FILE`: path to a local faqs.md
    /// - `FAQ_BASE_URL`: base URL the document is fetched from
    ///
    /// Optional:
    /// - `FAQ_DOCUMENT_PATH` (default: "faqs.md")
    /// - `FAQ_LAYOUT`: "categories" (default) or "accordion"
    /// - `CONTACT_SUBMIT_DELAY_MS` (default: 2000)
    /// - `SUPPORT_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let source = match (get("FAQ_FILE"), get("FAQ_BASE_URL")) {
            (Some(file), _) => {
                let path = PathBuf::from(file.trim());
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "FAQ_FILE not found: {}",
                        path.display()
                    )));
                }
                DocumentSource::File(path)
            }
            (None, Some(base_url)) => {
                let doc_path =
                    get("FAQ_DOCUMENT_PATH").unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string());
                DocumentSource::http(&base_url, &doc_path)
                    .map_err(|e| AppError::Config(e.to_string()))?
            }
            (None, None) => {
                return Err(AppError::Config(
                    "either FAQ_FILE or FAQ_BASE_URL environment variable is required".to_string(),
                ))
            }
        };

        let layout = match get("FAQ_LAYOUT").as_deref().map(str::trim) {
            None => BrowseLayout::Categories,
            Some(v) if v.eq_ignore_ascii_case("categories") => BrowseLayout::Categories,
            Some(v) if v.eq_ignore_ascii_case("accordion") => BrowseLayout::Accordion,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "FAQ_LAYOUT must be 'categories' or 'accordion', got '{other}'"
                )))
            }
        };

        let submit_delay = match get("CONTACT_SUBMIT_DELAY_MS") {
            None => DEFAULT_SUBMIT_DELAY,
            Some(v) => v.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
                AppError::Config(format!("CONTACT_SUBMIT_DELAY_MS must be an integer, got '{v}'"))
            })?,
        };

        Ok(Self {
            source,
            layout,
            submit_delay,
            tcp_listen_addr: get("SUPPORT_TCP_LISTEN_ADDR"),
        })
    }
}
