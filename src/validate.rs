//! Pre-flight request validation
//!
//! Validation runs before any network traffic: a request that fails here is
//! rejected immediately and the conversion endpoint is never contacted.

use crate::error::ValidationError;
use crate::formats;
use crate::types::ConversionRequest;

/// Characters that must not appear in a target file name
pub const INVALID_FILE_NAME_CHARS: [char; 8] = ['/', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a target file name
///
/// The name must be non-empty and must not contain any of
/// [`INVALID_FILE_NAME_CHARS`]. The first offending character is reported.
pub fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    if file_name.is_empty() {
        return Err(ValidationError::EmptyFileName);
    }

    if let Some(found) = file_name.chars().find(|c| INVALID_FILE_NAME_CHARS.contains(c)) {
        return Err(ValidationError::InvalidFileNameCharacters { found });
    }

    Ok(())
}

/// Validate a full conversion request
///
/// Checks the file name, requires a non-empty target format, and rejects
/// conversions the format table knows to be impossible. A source extension the
/// table does not know passes through: the server remains the authority for
/// formats this crate has not catalogued.
pub fn validate_request(request: &ConversionRequest) -> Result<(), ValidationError> {
    validate_file_name(&request.file_name)?;

    if request.target_format.is_empty() {
        return Err(ValidationError::EmptyTargetFormat);
    }

    if let Some(source_ext) = source_extension(&request.file_name) {
        if formats::lookup(source_ext).is_some()
            && !formats::can_convert_to(source_ext, &request.target_format)
        {
            return Err(ValidationError::UnsupportedConversion {
                source_ext: source_ext.to_string(),
                target: request.target_format.clone(),
            });
        }
    }

    Ok(())
}

/// Extension of the source document, when the file name carries one
fn source_extension(file_name: &str) -> Option<&str> {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
