//! Failure classification and message rendering
//!
//! Maps every [`ErrorCode`] the conversion service can emit (including codes it
//! cannot emit yet) to a human-readable message. Service-originated codes are
//! additionally wrapped in a "service reported" template; connection failures
//! and unrecognized codes are rendered bare. The mapping is total: there is no
//! code value, present or future, without a defined message.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::types::ErrorCode;

/// Stable key of one message template in the catalog
///
/// Hosts override individual templates by this key's [`name`](MessageKey::name)
/// through `Config::messages`, which is how localization plugs in without the
/// crate carrying an i18n layer of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Unknown service-side conversion error
    ServiceUnknown,
    /// Conversion timed out server-side
    ServiceTimeout,
    /// Document conversion failed
    ServiceConversion,
    /// Service could not download the source document
    ServiceDownloading,
    /// Document is password protected
    ServicePassword,
    /// Service database error
    ServiceDatabase,
    /// Invalid input document
    ServiceInput,
    /// Security token mismatch
    ServiceToken,
    /// Conversion service could not be reached
    NotReached,
    /// Generic fallback for anything without a specific template
    Unknown,
    /// Caller lacks permission to convert the document
    Permission,
    /// File name was empty
    FileNameRequired,
    /// File name contained a forbidden character
    FileNameInvalidCharacters,
    /// Wrapper template applied to service-originated messages
    ServicePrefix,
}

impl MessageKey {
    /// Stable name used for catalog overrides
    pub fn name(&self) -> &'static str {
        match self {
            MessageKey::ServiceUnknown => "service.unknown",
            MessageKey::ServiceTimeout => "service.timeout",
            MessageKey::ServiceConversion => "service.conversion",
            MessageKey::ServiceDownloading => "service.download",
            MessageKey::ServicePassword => "service.password",
            MessageKey::ServiceDatabase => "service.database",
            MessageKey::ServiceInput => "service.input",
            MessageKey::ServiceToken => "service.token",
            MessageKey::NotReached => "service.not-reached",
            MessageKey::Unknown => "error.unknown",
            MessageKey::Permission => "error.permission",
            MessageKey::FileNameRequired => "filename.required",
            MessageKey::FileNameInvalidCharacters => "filename.invalid-characters",
            MessageKey::ServicePrefix => "service.prefix",
        }
    }

    fn default_template(&self) -> &'static str {
        match self {
            MessageKey::ServiceUnknown => "an unknown error occurred during conversion",
            MessageKey::ServiceTimeout => "the conversion timeout was reached",
            MessageKey::ServiceConversion => "the document could not be converted",
            MessageKey::ServiceDownloading => "the document to convert could not be downloaded",
            MessageKey::ServicePassword => "the document is password protected",
            MessageKey::ServiceDatabase => "a database error occurred",
            MessageKey::ServiceInput => "the input document is invalid",
            MessageKey::ServiceToken => "the document security token is invalid",
            MessageKey::NotReached => "the conversion service could not be reached",
            MessageKey::Unknown => "an unknown error occurred",
            MessageKey::Permission => "you do not have permission to convert this document",
            MessageKey::FileNameRequired => "a file name is required",
            MessageKey::FileNameInvalidCharacters => {
                "the file name must not contain the characters / : * ? \" < > |"
            }
            MessageKey::ServicePrefix => "conversion service reported: {message}",
        }
    }
}

/// A classified, rendered failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    /// The canonical code, when the failure came from the service contract
    pub code: Option<ErrorCode>,
    /// Rendered message, wrapper already applied
    pub message: String,
    /// Whether the failure is attributable to the conversion backend
    pub service_reported: bool,
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Message catalog with English defaults and per-key overrides
#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog with the built-in English templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with host-supplied template overrides, keyed by [`MessageKey::name`]
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Render the template behind `key`
    pub fn render(&self, key: MessageKey) -> String {
        self.overrides
            .get(key.name())
            .cloned()
            .unwrap_or_else(|| key.default_template().to_string())
    }

    /// Classify a service-reported failure code
    ///
    /// Total over all code values: unrecognized codes fall back to the generic
    /// unknown-error template without the service wrapper.
    pub fn classify(&self, code: &ErrorCode) -> ClassifiedError {
        let key = match code {
            ErrorCode::Unknown => MessageKey::ServiceUnknown,
            ErrorCode::Timeout => MessageKey::ServiceTimeout,
            ErrorCode::Conversion => MessageKey::ServiceConversion,
            ErrorCode::Downloading => MessageKey::ServiceDownloading,
            ErrorCode::Password => MessageKey::ServicePassword,
            ErrorCode::Database => MessageKey::ServiceDatabase,
            ErrorCode::Input => MessageKey::ServiceInput,
            ErrorCode::Token => MessageKey::ServiceToken,
            ErrorCode::NotReached => MessageKey::NotReached,
            ErrorCode::Unrecognized(_) => MessageKey::Unknown,
        };

        let service_reported = code.is_service_originated();
        let mut message = self.render(key);
        if service_reported {
            message = self
                .render(MessageKey::ServicePrefix)
                .replace("{message}", &message);
        }

        ClassifiedError {
            code: Some(code.clone()),
            message,
            service_reported,
        }
    }

    /// Classify an HTTP-level failure of the conversion endpoint
    ///
    /// 403 renders the permission template; any other status renders the generic
    /// unknown-error template. Never wrapped: the service itself did not report.
    pub fn classify_transport(&self, error: &TransportError) -> ClassifiedError {
        let key = match error {
            TransportError::PermissionDenied { .. } => MessageKey::Permission,
            TransportError::UnexpectedStatus { .. } => MessageKey::Unknown,
        };

        ClassifiedError {
            code: None,
            message: self.render(key),
            service_reported: false,
        }
    }
}
