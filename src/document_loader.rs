//! Fetches schedule document bytes for a [`DocumentRef`].

use std::time::Duration;

use tracing::{debug, instrument};

use crate::errors::BotError;
use crate::schedule_catalog::DocumentRef;

/// Loads schedule PDFs from the university site or from local storage
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl DocumentLoader {
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// Obtain the document bytes, or fail once. There are no retries.
    #[instrument(level = "debug", skip_all, fields(document = %document))]
    pub async fn load(&self, document: &DocumentRef) -> Result<Vec<u8>, BotError> {
        let bytes = match document {
            DocumentRef::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?;
                response.bytes().await?.to_vec()
            }
            DocumentRef::Local(path) => tokio::time::timeout(self.timeout, tokio::fs::read(path))
                .await
                .map_err(|_| BotError::Timeout(format!("reading {}", path.display())))??,
        };

        if bytes.is_empty() {
            return Err(BotError::Document(format!("{document} is empty")));
        }

        debug!(bytes = bytes.len(), "Schedule document loaded");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_local_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();

        let loader = DocumentLoader::new(Duration::from_secs(5)).unwrap();
        let bytes = loader
            .load(&DocumentRef::Local(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn test_missing_local_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DocumentLoader::new(Duration::from_secs(5)).unwrap();
        let result = loader
            .load(&DocumentRef::Local(dir.path().join("absent.pdf")))
            .await;
        assert!(matches!(result, Err(BotError::Document(_))));
    }

    #[tokio::test]
    async fn test_empty_local_file_fails() {
        let file = NamedTempFile::new().unwrap();
        let loader = DocumentLoader::new(Duration::from_secs(5)).unwrap();
        let result = loader
            .load(&DocumentRef::Local(file.path().to_path_buf()))
            .await;
        assert!(matches!(result, Err(BotError::Document(_))));
    }
}
