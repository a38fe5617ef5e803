//! Converted-artifact delivery helpers.
//!
//! On success the conversion endpoint hands back a `fileUrl`. Browser hosts load
//! it into a hidden frame; embedding hosts fetch it. Both paths may need the
//! internal document-server address rewritten to the public one first.

use std::path::Path;

use super::ConvertClient;
use crate::error::{Result, TransportError};

impl ConvertClient {
    /// Rewrite an internal document-server address to the public one
    ///
    /// Applied to every file URL the service returns, when the configured
    /// `public_url`/`internal_url` pair is present.
    pub(crate) fn rewrite_file_url(&self, file_url: String) -> String {
        match (
            &self.config.endpoint.public_url,
            &self.config.endpoint.internal_url,
        ) {
            (Some(public), Some(internal)) if file_url.starts_with(internal.as_str()) => {
                file_url.replacen(internal.as_str(), public, 1)
            }
            _ => file_url,
        }
    }

    /// Fetch the converted artifact into memory
    pub async fn fetch_artifact(&self, file_url: &str) -> Result<Vec<u8>> {
        tracing::debug!(file_url = %file_url, "fetching converted artifact");

        let response = self.http.get(file_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(status.as_u16()).into());
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the converted artifact and write it to `path`
    ///
    /// Returns the number of bytes written.
    pub async fn save_artifact(&self, file_url: &str, path: &Path) -> Result<u64> {
        let bytes = self.fetch_artifact(file_url).await?;
        tokio::fs::write(path, &bytes).await?;

        tracing::info!(file_url = %file_url, path = %path.display(), size = bytes.len(), "artifact saved");
        Ok(bytes.len() as u64)
    }
}
