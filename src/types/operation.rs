//! Operation-type tags and their output file extensions
//!
//! Every document operation the pipeline supports is identified by a string
//! tag (e.g. `"merge_pdf"`). The tag determines the extension of the file the
//! downstream processor is expected to write.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Extension used for operation tags with no static mapping
pub const DEFAULT_EXTENSION: &str = ".out";

/// Static map of operation tag to output extension
static EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Structural page operations
        ("merge_pdf", ".pdf"),
        ("smart_merge", ".pdf"),
        ("split_pdf", ".zip"),
        ("rotate_pdf", ".pdf"),
        ("delete_pages", ".pdf"),
        ("reorder_pages", ".pdf"),
        ("extract_pages", ".pdf"),
        ("compress_pdf", ".pdf"),
        ("sign_pdf", ".pdf"),
        ("add_watermark", ".pdf"),
        ("add_page_numbers", ".pdf"),
        ("protect_pdf", ".pdf"),
        ("unlock_pdf", ".pdf"),
        // Format conversions
        ("pdf_to_word", ".docx"),
        ("word_to_pdf", ".pdf"),
        ("pdf_to_excel", ".xlsx"),
        ("excel_to_pdf", ".pdf"),
        ("pdf_to_ppt", ".pptx"),
        ("ppt_to_pdf", ".pdf"),
        ("images_to_pdf", ".pdf"),
        // Extraction (multi-file results are zipped)
        ("pdf_to_images", ".zip"),
        ("extract_images", ".zip"),
        ("extract_text", ".txt"),
    ])
});

/// Look up the output extension for an operation tag
///
/// Unrecognized tags fall back to [`DEFAULT_EXTENSION`].
pub fn extension_for(operation: &str) -> &'static str {
    EXTENSIONS.get(operation).copied().unwrap_or(DEFAULT_EXTENSION)
}

/// Check whether an operation tag has a static extension mapping
pub fn is_known_operation(operation: &str) -> bool {
    EXTENSIONS.contains_key(operation)
}

/// Build the output file name for a base name and operation tag
///
/// The naming is a pure function of its arguments, so one session repeating
/// the same operation overwrites the same output path.
pub fn output_file_name(base: &str, operation: &str) -> String {
    format!("{base}_{operation}{}", extension_for(operation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_known_ops() {
        assert_eq!(extension_for("merge_pdf"), ".pdf");
        assert_eq!(extension_for("pdf_to_word"), ".docx");
        assert_eq!(extension_for("extract_images"), ".zip");
        assert_eq!(extension_for("extract_text"), ".txt");
    }

    #[test]
    fn test_extension_for_unknown_op() {
        assert_eq!(extension_for("unknown_op"), ".out");
        assert_eq!(extension_for(""), ".out");
    }

    #[test]
    fn test_is_known_operation() {
        assert!(is_known_operation("split_pdf"));
        assert!(!is_known_operation("summarize_pdf"));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("report", "merge_pdf"), "report_merge_pdf.pdf");
        assert_eq!(output_file_name("output", "unknown_op"), "output_unknown_op.out");
    }
}
