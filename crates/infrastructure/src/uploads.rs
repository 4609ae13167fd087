//! Upload intake inspection.

use chrono::{DateTime, Utc};
use dreamtrue_domain::{FileCategory, UploadStatus, UploadedFile, generate_id};

/// Builds the intake record for a file about to be uploaded: guesses the
/// content type from the name and starts the record in the uploading
/// state with the default category.
#[must_use]
pub fn inspect_upload(file_name: &str, size: u64, now: DateTime<Utc>) -> UploadedFile {
    let content_type = mime_guess::from_path(file_name)
        .first_or(mime::APPLICATION_OCTET_STREAM)
        .essence_str()
        .to_string();

    UploadedFile {
        id: generate_id(),
        name: file_name.to_string(),
        size,
        content_type,
        uploaded_at: now,
        status: UploadStatus::Uploading,
        category: FileCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inspect_guesses_content_type() {
        let file = inspect_upload("brand-deck.pdf", 2048, Utc::now());
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.status, UploadStatus::Uploading);
        assert_eq!(file.category, FileCategory::Other);
        assert_eq!(file.size, 2048);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let file = inspect_upload("notes.unknownext", 10, Utc::now());
        assert_eq!(file.content_type, "application/octet-stream");
    }
}
