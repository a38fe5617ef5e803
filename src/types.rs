//! Core types for doc-convert

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedError;

/// Unique identifier for a conversion session
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl SessionId {
    /// Create a new SessionId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<SessionId> for i64 {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One document-conversion job, identified by its parameter tuple
///
/// The conversion endpoint issues no job id: the same parameters are re-submitted
/// on every poll and the server correlates them to the running job. The request is
/// therefore immutable once built.
///
/// # Example
///
/// ```
/// use doc_convert::ConversionRequest;
///
/// let request = ConversionRequest::new("report", "pdf", "12884901890", "65601")
///     .download_as(true)
///     .region("en-US");
/// assert_eq!(request.target_format, "pdf");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// Target file name, without extension
    pub file_name: String,
    /// Target format extension (e.g., "pdf", "docx")
    #[serde(rename = "targetFileType")]
    pub target_format: String,
    /// Identifier of the source attachment to convert
    pub attachment_id: String,
    /// Identifier of the page owning the attachment
    pub page_id: String,
    /// Whether the result is delivered as a download rather than stored server-side
    #[serde(skip_serializing_if = "is_false", default)]
    pub is_download_as: bool,
    /// Optional replacement title for the stored result
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_title: Option<String>,
    /// Optional locale tag forwarded to the conversion service
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ConversionRequest {
    /// Create a request with the required parameter tuple
    pub fn new(
        file_name: impl Into<String>,
        target_format: impl Into<String>,
        attachment_id: impl Into<String>,
        page_id: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            target_format: target_format.into(),
            attachment_id: attachment_id.into(),
            page_id: page_id.into(),
            is_download_as: false,
            new_title: None,
            region: None,
        }
    }

    /// Mark the job as a download-as conversion
    pub fn download_as(mut self, is_download_as: bool) -> Self {
        self.is_download_as = is_download_as;
        self
    }

    /// Set a replacement title for the stored result
    pub fn new_title(mut self, title: impl Into<String>) -> Self {
        self.new_title = Some(title.into());
        self
    }

    /// Set the locale tag forwarded to the conversion service
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Result of one poll round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionStatus {
    /// Conversion still running; poll again
    Pending,
    /// Conversion finished; the artifact is available at `file_url`
    Completed {
        /// URL of the converted artifact
        file_url: String,
    },
    /// The conversion service reported a terminal failure
    Failed {
        /// Classified failure code
        code: ErrorCode,
    },
}

/// Wire response of the conversion endpoint
///
/// `end_convert == false` with no error means the job is still running and must
/// be polled again.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertServiceResponse {
    /// Whether the conversion has finished
    #[serde(default)]
    pub end_convert: bool,
    /// URL of the converted artifact (present when `end_convert` is true)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_url: Option<String>,
    /// Terminal failure code, when the service failed the job
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorCode>,
}

/// Failure codes reported by the conversion service
///
/// Two wire representations exist across server generations: small negative
/// integers and symbolic strings. Both decode into this one canonical enum;
/// encoding always emits the symbolic form. Codes outside the known set decode
/// to [`ErrorCode::Unrecognized`] so that a future server revision degrades to
/// the generic message instead of a decode failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unknown service error
    Unknown,
    /// Conversion timed out server-side
    Timeout,
    /// Document conversion failed
    Conversion,
    /// Service could not download the source document
    Downloading,
    /// Document is password protected
    Password,
    /// Service database error
    Database,
    /// Invalid input document
    Input,
    /// Security token mismatch
    Token,
    /// Conversion service could not be reached
    NotReached,
    /// Code outside the known set; carries the raw wire token
    Unrecognized(String),
}

impl ErrorCode {
    /// Translate a numeric wire code (legacy server generation)
    pub fn from_numeric(code: i64) -> Self {
        match code {
            -1 => ErrorCode::Unknown,
            -2 => ErrorCode::Timeout,
            -3 => ErrorCode::Conversion,
            -4 => ErrorCode::Downloading,
            -5 => ErrorCode::Password,
            -6 => ErrorCode::Database,
            -7 => ErrorCode::Input,
            -8 => ErrorCode::Token,
            -10 => ErrorCode::NotReached,
            other => ErrorCode::Unrecognized(other.to_string()),
        }
    }

    /// Translate a symbolic wire code (current server generation)
    pub fn from_symbolic(code: &str) -> Self {
        match code.to_ascii_lowercase().as_str() {
            "unknown" => ErrorCode::Unknown,
            "timeout" => ErrorCode::Timeout,
            "conversion" => ErrorCode::Conversion,
            "download" | "downloading" => ErrorCode::Downloading,
            "password" => ErrorCode::Password,
            "database" => ErrorCode::Database,
            "input" => ErrorCode::Input,
            "token" => ErrorCode::Token,
            "connection" | "not-reached" | "not_reached" => ErrorCode::NotReached,
            _ => ErrorCode::Unrecognized(code.to_string()),
        }
    }

    /// Canonical symbolic token for this code
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Unknown => "unknown",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Conversion => "conversion",
            ErrorCode::Downloading => "download",
            ErrorCode::Password => "password",
            ErrorCode::Database => "database",
            ErrorCode::Input => "input",
            ErrorCode::Token => "token",
            ErrorCode::NotReached => "connection",
            ErrorCode::Unrecognized(raw) => raw,
        }
    }

    /// Whether this failure originates from the conversion backend itself
    ///
    /// Service-originated codes get the "service reported" wrapper when rendered;
    /// connection failures and unrecognized codes do not.
    pub fn is_service_originated(&self) -> bool {
        !matches!(self, ErrorCode::NotReached | ErrorCode::Unrecognized(_))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CodeVisitor;

        impl de::Visitor<'_> for CodeVisitor {
            type Value = ErrorCode;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a numeric or symbolic conversion error code")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ErrorCode, E> {
                Ok(ErrorCode::from_numeric(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ErrorCode, E> {
                Ok(ErrorCode::Unrecognized(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ErrorCode, E> {
                Ok(ErrorCode::from_symbolic(v))
            }
        }

        deserializer.deserialize_any(CodeVisitor)
    }
}

/// Event emitted during a conversion session lifecycle
///
/// Every variant carries the session id, so subscribers observing multiple
/// concurrent sessions can scope their UI side effects (spinner, message region,
/// input re-enabling) to the session that produced the event.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Session accepted; first submission is about to go out
    ConversionStarted {
        /// Session ID
        id: SessionId,
        /// Target file name of the job
        file_name: String,
        /// Target format of the job
        target_format: String,
    },

    /// One poll round trip finished with the job still pending
    ConversionPending {
        /// Session ID
        id: SessionId,
        /// Number of submissions issued so far
        attempt: u32,
    },

    /// Session reached terminal success
    ConversionCompleted {
        /// Session ID
        id: SessionId,
        /// URL of the converted artifact
        file_url: String,
        /// When the terminal status was observed
        at: DateTime<Utc>,
    },

    /// Session reached terminal failure
    ConversionFailed {
        /// Session ID
        id: SessionId,
        /// Rendered, classification-aware failure message
        message: String,
        /// When the terminal status was observed
        at: DateTime<Utc>,
    },

    /// Session was cancelled; no terminal event follows
    ConversionCancelled {
        /// Session ID
        id: SessionId,
        /// When cancellation was observed
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The session this event belongs to
    pub fn session_id(&self) -> SessionId {
        match self {
            Event::ConversionStarted { id, .. }
            | Event::ConversionPending { id, .. }
            | Event::ConversionCompleted { id, .. }
            | Event::ConversionFailed { id, .. }
            | Event::ConversionCancelled { id, .. } => *id,
        }
    }
}

/// Terminal result of one conversion session
///
/// Exactly one outcome is produced per session. `Cancelled` means cooperative
/// cancellation won the race: neither the success nor the failure arm applies,
/// and no terminal event was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// Conversion succeeded; deliver the artifact at `file_url`
    Completed {
        /// URL of the converted artifact
        file_url: String,
    },
    /// Conversion failed; `error` carries the rendered message for display
    Failed(ClassifiedError),
    /// Session was cancelled before reaching a terminal status
    Cancelled,
}

impl JobOutcome {
    /// Whether the session completed successfully
    pub fn is_completed(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_conversions() {
        let id = SessionId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(SessionId::from(42i64), id);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_request_builder_sets_optional_fields() {
        let request = ConversionRequest::new("report", "pdf", "101", "7")
            .download_as(true)
            .new_title("Quarterly report")
            .region("de-DE");

        assert!(request.is_download_as);
        assert_eq!(request.new_title.as_deref(), Some("Quarterly report"));
        assert_eq!(request.region.as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_request_serializes_with_wire_field_names() {
        let request = ConversionRequest::new("report", "pdf", "101", "7");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["fileName"], "report");
        assert_eq!(json["targetFileType"], "pdf");
        assert_eq!(json["attachmentId"], "101");
        assert_eq!(json["pageId"], "7");
        // Unset optionals stay off the wire
        assert!(json.get("isDownloadAs").is_none());
        assert!(json.get("newTitle").is_none());
        assert!(json.get("region").is_none());
    }

    #[test]
    fn test_error_code_decodes_numeric_wire_space() {
        let cases = [
            (-1, ErrorCode::Unknown),
            (-2, ErrorCode::Timeout),
            (-3, ErrorCode::Conversion),
            (-4, ErrorCode::Downloading),
            (-5, ErrorCode::Password),
            (-6, ErrorCode::Database),
            (-7, ErrorCode::Input),
            (-8, ErrorCode::Token),
            (-10, ErrorCode::NotReached),
        ];
        for (wire, expected) in cases {
            let decoded: ErrorCode = serde_json::from_str(&wire.to_string()).unwrap();
            assert_eq!(decoded, expected, "numeric code {} decoded wrong", wire);
        }
    }

    #[test]
    fn test_error_code_decodes_symbolic_wire_space() {
        let cases = [
            ("\"unknown\"", ErrorCode::Unknown),
            ("\"TIMEOUT\"", ErrorCode::Timeout),
            ("\"conversion\"", ErrorCode::Conversion),
            ("\"download\"", ErrorCode::Downloading),
            ("\"downloading\"", ErrorCode::Downloading),
            ("\"password\"", ErrorCode::Password),
            ("\"database\"", ErrorCode::Database),
            ("\"input\"", ErrorCode::Input),
            ("\"token\"", ErrorCode::Token),
            ("\"CONNECTION\"", ErrorCode::NotReached),
            ("\"not-reached\"", ErrorCode::NotReached),
        ];
        for (wire, expected) in cases {
            let decoded: ErrorCode = serde_json::from_str(wire).unwrap();
            assert_eq!(decoded, expected, "symbolic code {} decoded wrong", wire);
        }
    }

    #[test]
    fn test_error_code_unknown_values_decode_to_unrecognized() {
        let decoded: ErrorCode = serde_json::from_str("-99").unwrap();
        assert_eq!(decoded, ErrorCode::Unrecognized("-99".to_string()));

        let decoded: ErrorCode = serde_json::from_str("\"quota-exceeded\"").unwrap();
        assert_eq!(decoded, ErrorCode::Unrecognized("quota-exceeded".to_string()));
    }

    #[test]
    fn test_error_code_encodes_symbolic() {
        assert_eq!(serde_json::to_string(&ErrorCode::Timeout).unwrap(), "\"timeout\"");
        assert_eq!(
            serde_json::to_string(&ErrorCode::NotReached).unwrap(),
            "\"connection\""
        );
    }

    #[test]
    fn test_service_originated_excludes_not_reached_and_unrecognized() {
        assert!(ErrorCode::Unknown.is_service_originated());
        assert!(ErrorCode::Token.is_service_originated());
        assert!(!ErrorCode::NotReached.is_service_originated());
        assert!(!ErrorCode::Unrecognized("x".to_string()).is_service_originated());
    }

    #[test]
    fn test_convert_service_response_decodes_all_shapes() {
        let pending: ConvertServiceResponse =
            serde_json::from_str(r#"{"endConvert": false}"#).unwrap();
        assert!(!pending.end_convert);
        assert!(pending.error.is_none());

        let done: ConvertServiceResponse =
            serde_json::from_str(r#"{"endConvert": true, "fileUrl": "http://ds/file.pdf"}"#)
                .unwrap();
        assert!(done.end_convert);
        assert_eq!(done.file_url.as_deref(), Some("http://ds/file.pdf"));

        let failed: ConvertServiceResponse =
            serde_json::from_str(r#"{"endConvert": false, "error": -3}"#).unwrap();
        assert_eq!(failed.error, Some(ErrorCode::Conversion));
    }

    #[test]
    fn test_event_session_id_accessor() {
        let event = Event::ConversionPending {
            id: SessionId::new(9),
            attempt: 2,
        };
        assert_eq!(event.session_id(), SessionId::new(9));
    }
}
