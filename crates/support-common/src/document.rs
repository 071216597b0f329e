/// Loads the FAQ markdown document from its configured source.
///
/// Two sources are supported:
/// - `Http`: a plain GET of a fixed relative path (default `faqs.md`) under a base URL
/// - `File`: a local markdown file, used for offline deployments and tests
///
/// HTTP requests are retried with capped exponential backoff on network errors,
/// `429` and `5xx` responses. Every other non-success status fails immediately.
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::CommonError;

pub const DEFAULT_DOCUMENT_PATH: &str = "faqs.md";

#[derive(Clone, Debug)]
pub struct DocumentClientConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for DocumentClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_millis(2_000),
        }
    }
}

impl DocumentClientConfig {
    /// Optional:
    /// - `FAQ_FETCH_TIMEOUT_SECS` (default: 10)
    /// - `FAQ_FETCH_MAX_RETRIES` (default: 2)
    /// - `FAQ_FETCH_RETRY_INITIAL_MS` (default: 200)
    /// - `FAQ_FETCH_RETRY_MAX_MS` (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let timeout = env_parse::<u64>("FAQ_FETCH_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let max_retries = env_parse::<u32>("FAQ_FETCH_MAX_RETRIES").unwrap_or(defaults.max_retries);
        let initial_backoff = env_parse::<u64>("FAQ_FETCH_RETRY_INITIAL_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_backoff);
        let max_backoff = env_parse::<u64>("FAQ_FETCH_RETRY_MAX_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_backoff);

        Self {
            timeout,
            max_retries,
            initial_backoff,
            max_backoff,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

/// Where the FAQ markdown lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    Http { base_url: String, path: String },
    File(PathBuf),
}

impl DocumentSource {
    pub fn http(base_url: &str, path: &str) -> Result<Self, CommonError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CommonError::InvalidSource(format!(
                "base url must start with http:// or https://, got '{base_url}'"
            )));
        }
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            return Err(CommonError::InvalidSource("document path must not be empty".to_string()));
        }
        Ok(Self::Http {
            base_url: base_url.to_string(),
            path: path.to_string(),
        })
    }

    /// Human-readable location used in logs.
    pub fn location(&self) -> String {
        match self {
            Self::Http { base_url, path } => format!("{base_url}/{path}"),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DocumentClient {
    config: DocumentClientConfig,
    http: reqwest::Client,
}

impl DocumentClient {
    pub fn new(config: DocumentClientConfig) -> Result<Self, CommonError> {
        let http = reqwest::Client::builder()
            .user_agent("snap-support/faq-loader")
            .build()?;
        Ok(Self { config, http })
    }

    /// Fetch the raw markdown text from `source`.
    pub async fn fetch(&self, source: &DocumentSource) -> Result<String, CommonError> {
        match source {
            DocumentSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CommonError::Io {
                    path: path.clone(),
                    source,
                }),
            DocumentSource::Http { .. } => {
                let url = source.location();
                self.get_with_retry(&url).await
            }
        }
    }

    async fn get_with_retry(&self, url: &str) -> Result<String, CommonError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.get_once(url).await {
                Ok(text) => {
                    debug!(url, attempt, bytes = text.len(), "document fetched");
                    return Ok(text);
                }
                Err(e) => {
                    if attempt > self.config.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = backoff_delay(
                        self.config.initial_backoff,
                        self.config.max_backoff,
                        attempt - 1,
                    );
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "document fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<String, CommonError> {
        let resp = self
            .http
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CommonError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(resp.text().await?)
    }
}

fn should_retry(err: &CommonError) -> bool {
    match err {
        CommonError::Request(e) => e.is_timeout() || e.is_connect() || e.is_body(),
        CommonError::Status { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        CommonError::Io { .. } | CommonError::InvalidSource(_) => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    let jitter_cap = std::cmp::max(1, capped_ms / 4);
    Duration::from_millis(capped_ms.saturating_add(pseudo_jitter_ms(jitter_cap)))
}

fn pseudo_jitter_ms(max_inclusive: u64) -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    nanos % (max_inclusive + 1)
}
