/// Reload service for the FAQ document.
///
/// Fetches the document, hashes it with SHA-256 and re-parses only when the digest
/// differs from the last successful load. Used at startup and on demand through the
/// `reload_faqs` tool.
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::AppError;
use crate::model::FaqRecord;
use crate::parser;
use support_common::document::{DocumentClient, DocumentSource};

/// Result of a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadResult {
    /// Whether the document changed and was re-parsed.
    pub updated: bool,
    /// SHA-256 of the fetched document, hex encoded.
    pub digest: String,
}

pub struct ReloadService {
    client: DocumentClient,
    source: DocumentSource,
    last_digest: Mutex<Option<String>>,
}

impl ReloadService {
    pub fn new(client: DocumentClient, source: DocumentSource) -> Self {
        Self {
            client,
            source,
            last_digest: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Fetch and parse unconditionally, remembering the digest.
    pub async fn load(&self) -> Result<Vec<FaqRecord>, AppError> {
        let text = self.client.fetch(&self.source).await?;
        let digest = document_digest(&text);
        let records = parser::parse_faqs(&text);
        info!(
            source = %self.source.location(),
            digest = %digest,
            faqs = records.len(),
            "FAQ document loaded"
        );
        *self.last_digest.lock().await = Some(digest);
        Ok(records)
    }

    /// Fetch the document and re-parse it if its content changed.
    pub async fn reload(&self) -> Result<(ReloadResult, Option<Vec<FaqRecord>>), AppError> {
        let text = self.client.fetch(&self.source).await?;
        let digest = document_digest(&text);

        let mut last = self.last_digest.lock().await;
        if last.as_deref() == Some(digest.as_str()) {
            info!(digest = %digest, "FAQ document unchanged, skipping re-parse");
            return Ok((
                ReloadResult {
                    updated: false,
                    digest,
                },
                None,
            ));
        }

        let records = parser::parse_faqs(&text);
        info!(digest = %digest, faqs = records.len(), "FAQ document changed, re-parsed");
        *last = Some(digest.clone());

        Ok((
            ReloadResult {
                updated: true,
                digest,
            },
            Some(records),
        ))
    }
}

pub fn document_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use support_common::document::{DocumentClientConfig, DEFAULT_DOCUMENT_PATH};
    use support_common::error::CommonError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> DocumentClient {
        DocumentClient::new(DocumentClientConfig {
            timeout: Duration::from_secs(5),
            max_retries: 0,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(1),
        })
        .unwrap()
    }

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            document_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn reload_skips_unchanged_document() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "## Q\nA\n").unwrap();
        let service = ReloadService::new(client(), DocumentSource::File(file.path().to_path_buf()));

        let records = service.load().await.unwrap();
        assert_eq!(records.len(), 1);

        let (result, new_records) = service.reload().await.unwrap();
        assert!(!result.updated);
        assert!(new_records.is_none());
        assert_eq!(result.digest, document_digest("## Q\nA\n"));

        std::fs::write(file.path(), "## Q\nA\n## Q2\nB\n").unwrap();
        let (result, new_records) = service.reload().await.unwrap();
        assert!(result.updated);
        assert_eq!(new_records.map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn first_reload_always_parses() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "## Q\nA\n").unwrap();
        let service = ReloadService::new(client(), DocumentSource::File(file.path().to_path_buf()));

        let (result, records) = service.reload().await.unwrap();
        assert!(result.updated);
        assert_eq!(records.map(|r| r.len()), Some(1));
    }

    #[tokio::test]
    async fn http_not_found_is_a_load_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/faqs.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = DocumentSource::http(&server.uri(), DEFAULT_DOCUMENT_PATH).unwrap();
        let service = ReloadService::new(client(), source);
        let err = service.load().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::LoadFailure(CommonError::Status { .. })
        ));
    }

    #[tokio::test]
    async fn loads_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/faqs.md"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("# SNAP Photo FAQ\n## Q\nA\n**Category:** Photo Tips\n"),
            )
            .mount(&server)
            .await;

        let source = DocumentSource::http(&server.uri(), DEFAULT_DOCUMENT_PATH).unwrap();
        let service = ReloadService::new(client(), source);
        let records = service.load().await.unwrap();
        assert_eq!(records[0].category, "Photo Tips");
    }
}
