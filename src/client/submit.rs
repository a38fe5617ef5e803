//! One-shot job submission and response decoding.

use super::ConvertClient;
use crate::error::{Error, Result, TransportError};
use crate::types::{ConversionRequest, ConversionStatus, ConvertServiceResponse};
use crate::validate;

impl ConvertClient {
    /// Submit a conversion request once and decode the reported status
    ///
    /// Validates locally first: an invalid request fails immediately and the
    /// endpoint is never contacted. One poll of the loop in
    /// [`start`](ConvertClient::start) is exactly one call to this method; the
    /// server correlates repeated submissions of the same parameter tuple to the
    /// running job.
    ///
    /// Transport failures are terminal and never retried here: 403 maps to
    /// [`TransportError::PermissionDenied`], any other non-2xx status to
    /// [`TransportError::UnexpectedStatus`].
    pub async fn submit(&self, request: &ConversionRequest) -> Result<ConversionStatus> {
        validate::validate_request(request)?;
        self.submit_unchecked(request).await
    }

    /// Submission without pre-flight validation (the poll loop validates once at start)
    pub(crate) async fn submit_unchecked(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionStatus> {
        let url = self.config.convert_url();
        tracing::debug!(
            file_name = %request.file_name,
            target_format = %request.target_format,
            attachment_id = %request.attachment_id,
            "submitting conversion request"
        );

        let mut http_request = self.http.post(&url).json(request);
        if let Some(auth) = &self.config.endpoint.auth_header {
            http_request = http_request.header("Authorization", auth);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "conversion endpoint rejected request");
            return Err(TransportError::from_status(status.as_u16()).into());
        }

        let body: ConvertServiceResponse = response.json().await?;
        self.decode_status(body)
    }

    /// Map one wire response onto a [`ConversionStatus`]
    ///
    /// An `error` field wins over everything else; `endConvert == true` requires
    /// a file URL; anything else is one more pending round.
    fn decode_status(&self, body: ConvertServiceResponse) -> Result<ConversionStatus> {
        if let Some(code) = body.error {
            return Ok(ConversionStatus::Failed { code });
        }

        if body.end_convert {
            let file_url = body.file_url.ok_or_else(|| {
                Error::InvalidResponse("completed response is missing fileUrl".to_string())
            })?;
            return Ok(ConversionStatus::Completed {
                file_url: self.rewrite_file_url(file_url),
            });
        }

        Ok(ConversionStatus::Pending)
    }
}
