//! Known document formats and their conversion targets
//!
//! A static table of the formats the conversion service understands: the
//! document family each belongs to, whether the service can edit it, and the
//! target extensions it converts to. Used for pre-flight target validation and
//! for picking a default conversion target per family.

/// Document family a format belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Text documents (doc, docx, odt, ...)
    Word,
    /// Spreadsheets (xls, xlsx, ods, ...)
    Cell,
    /// Presentations (ppt, pptx, odp, ...)
    Slide,
    /// Fillable forms (docxf, oform)
    Form,
}

/// One entry of the supported-format table
#[derive(Debug)]
pub struct FormatInfo {
    /// Lowercase file extension
    pub extension: &'static str,
    /// Family the format belongs to
    pub document_type: DocumentType,
    /// Whether the service edits this format in place
    pub editable: bool,
    /// Extensions this format converts to (empty = not convertible)
    pub convert_to: &'static [&'static str],
}

const WORD_TARGETS_FROM_DOC: &[&str] = &[
    "docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa",
    "rtf", "txt",
];

/// All formats the conversion service understands
pub const SUPPORTED_FORMATS: &[FormatInfo] = &[
    FormatInfo { extension: "djvu", document_type: DocumentType::Word, editable: false, convert_to: &[] },
    FormatInfo { extension: "doc", document_type: DocumentType::Word, editable: false, convert_to: WORD_TARGETS_FROM_DOC },
    FormatInfo { extension: "docm", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "dotx", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "docx", document_type: DocumentType::Word, editable: true, convert_to: &["docxf", "docm", "dotx", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "docxf", document_type: DocumentType::Form, editable: true, convert_to: &["docx", "oform", "docm", "dotx", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "oform", document_type: DocumentType::Form, editable: false, convert_to: &["pdf"] },
    FormatInfo { extension: "dot", document_type: DocumentType::Word, editable: false, convert_to: WORD_TARGETS_FROM_DOC },
    FormatInfo { extension: "dotm", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "dotx", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "epub", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "fb2", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "fb2", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "html", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "fodt", document_type: DocumentType::Word, editable: false, convert_to: WORD_TARGETS_FROM_DOC },
    FormatInfo { extension: "html", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "mht", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "odt", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "odt", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "html", "ott", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "ott", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "html", "odt", "pdf", "pdfa", "rtf", "txt"] },
    FormatInfo { extension: "pdf", document_type: DocumentType::Word, editable: false, convert_to: &[] },
    FormatInfo { extension: "rtf", document_type: DocumentType::Word, editable: false, convert_to: &["docx", "docxf", "docm", "dotx", "dotm", "epub", "fb2", "html", "odt", "ott", "pdf", "pdfa", "txt"] },
    FormatInfo { extension: "txt", document_type: DocumentType::Word, editable: false, convert_to: &[] },
    FormatInfo { extension: "xps", document_type: DocumentType::Word, editable: false, convert_to: &["pdf", "pdfa"] },
    FormatInfo { extension: "oxps", document_type: DocumentType::Word, editable: false, convert_to: &["pdf", "pdfa"] },
    FormatInfo { extension: "xml", document_type: DocumentType::Word, editable: false, convert_to: WORD_TARGETS_FROM_DOC },
    FormatInfo { extension: "csv", document_type: DocumentType::Cell, editable: false, convert_to: &[] },
    FormatInfo { extension: "fods", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "ods", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ots", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "ots", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "xls", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "xlsm", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xltx", "xltm"] },
    FormatInfo { extension: "xlsx", document_type: DocumentType::Cell, editable: true, convert_to: &["csv", "ods", "ots", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "xlt", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xltx", "xlsm", "xltm"] },
    FormatInfo { extension: "xltm", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xltx", "xlsm"] },
    FormatInfo { extension: "xltx", document_type: DocumentType::Cell, editable: false, convert_to: &["xlsx", "csv", "ods", "ots", "pdf", "pdfa", "xlsm", "xltm"] },
    FormatInfo { extension: "fodp", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "odp", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "otp", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "pot", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "potm", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm"] },
    FormatInfo { extension: "potx", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "pptm", "potm"] },
    FormatInfo { extension: "pps", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "ppsm", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "ppsx", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "ppt", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
    FormatInfo { extension: "pptm", document_type: DocumentType::Slide, editable: false, convert_to: &["pptx", "odp", "otp", "pdf", "pdfa", "potx", "potm"] },
    FormatInfo { extension: "pptx", document_type: DocumentType::Slide, editable: true, convert_to: &["odp", "otp", "pdf", "pdfa", "potx", "pptm", "potm"] },
];

/// Look up a format by extension (case-insensitive)
pub fn lookup(extension: &str) -> Option<&'static FormatInfo> {
    let ext = extension.to_ascii_lowercase();
    SUPPORTED_FORMATS.iter().find(|f| f.extension == ext)
}

/// Target extensions a source format converts to, when the format is known
pub fn convert_targets(extension: &str) -> Option<&'static [&'static str]> {
    lookup(extension).map(|f| f.convert_to)
}

/// Whether a known format has at least one conversion target
pub fn is_convertible(extension: &str) -> bool {
    lookup(extension).is_some_and(|f| !f.convert_to.is_empty())
}

/// Whether `source` converts to `target` according to the table
pub fn can_convert_to(source: &str, target: &str) -> bool {
    let target = target.to_ascii_lowercase();
    convert_targets(source).is_some_and(|targets| targets.contains(&target.as_str()))
}

/// Default conversion target for a known source format
///
/// Word documents default to docx, spreadsheets to xlsx, presentations to pptx,
/// forms to docx. Returns `None` for unknown or non-convertible formats.
pub fn default_convert_target(extension: &str) -> Option<&'static str> {
    let info = lookup(extension)?;
    if info.convert_to.is_empty() {
        return None;
    }
    let target = match info.document_type {
        DocumentType::Word | DocumentType::Form => "docx",
        DocumentType::Cell => "xlsx",
        DocumentType::Slide => "pptx",
    };
    if info.convert_to.contains(&target) {
        Some(target)
    } else {
        info.convert_to.first().copied()
    }
}

/// Mime type of a converted artifact by target extension
pub fn mime_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pdf" | "pdfa" => "application/pdf",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        "rtf" => "application/rtf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "html" => "text/html",
        "epub" => "application/epub+zip",
        _ => "application/octet-stream",
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(lookup("DOCX").is_some());
        assert!(lookup("docx").is_some());
        assert!(lookup("vsdx").is_none());
    }

    #[test]
    fn test_convertibility() {
        assert!(is_convertible("doc"));
        assert!(is_convertible("xls"));
        // Empty conversion lists
        assert!(!is_convertible("pdf"));
        assert!(!is_convertible("txt"));
        assert!(!is_convertible("csv"));
        // Unknown format
        assert!(!is_convertible("vsdx"));
    }

    #[test]
    fn test_can_convert_to_respects_table() {
        assert!(can_convert_to("docx", "pdf"));
        assert!(can_convert_to("docx", "PDF"));
        assert!(can_convert_to("xlsx", "csv"));
        assert!(!can_convert_to("docx", "xlsx"));
        assert!(!can_convert_to("oform", "docx"));
        assert!(can_convert_to("oform", "pdf"));
    }

    #[test]
    fn test_default_targets_follow_document_family() {
        assert_eq!(default_convert_target("doc"), Some("docx"));
        assert_eq!(default_convert_target("xls"), Some("xlsx"));
        assert_eq!(default_convert_target("ppt"), Some("pptx"));
        assert_eq!(default_convert_target("docxf"), Some("docx"));
        // oform's family default (docx) is not a listed target; first listed wins
        assert_eq!(default_convert_target("oform"), Some("pdf"));
        assert_eq!(default_convert_target("pdf"), None);
        assert_eq!(default_convert_target("vsdx"), None);
    }

    #[test]
    fn test_mime_types_for_primary_targets() {
        assert_eq!(
            mime_type("docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime_type("pdf"), "application/pdf");
        assert_eq!(mime_type("weird"), "application/octet-stream");
    }

    #[test]
    fn test_table_has_no_duplicate_extensions() {
        let mut seen = std::collections::HashSet::new();
        for format in SUPPORTED_FORMATS {
            assert!(
                seen.insert(format.extension),
                "duplicate format entry {}",
                format.extension
            );
        }
    }
}
