//! Uploaded document records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a document came from, for dashboard grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Internal company material.
    Internal,
    /// External/market material.
    External,
    /// Research documents.
    Research,
    /// Competitor material.
    Competitor,
    /// Anything else (default for new uploads).
    #[default]
    Other,
}

/// Progress of an upload through intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Bytes still transferring.
    Uploading,
    /// Transferred, being ingested.
    Processing,
    /// Available to the analysis.
    Ready,
    /// Intake failed.
    Error,
}

impl UploadStatus {
    /// The next status in the happy path, if any.
    #[must_use]
    pub const fn advanced(self) -> Self {
        match self {
            Self::Uploading => Self::Processing,
            Self::Processing | Self::Ready => Self::Ready,
            Self::Error => Self::Error,
        }
    }
}

/// A document in the upload list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File id.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// When the upload started.
    pub uploaded_at: DateTime<Utc>,
    /// Intake progress.
    pub status: UploadStatus,
    /// Dashboard grouping.
    pub category: FileCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_advances_along_happy_path() {
        assert_eq!(UploadStatus::Uploading.advanced(), UploadStatus::Processing);
        assert_eq!(UploadStatus::Processing.advanced(), UploadStatus::Ready);
        assert_eq!(UploadStatus::Ready.advanced(), UploadStatus::Ready);
    }

    #[test]
    fn test_error_status_is_sticky() {
        assert_eq!(UploadStatus::Error.advanced(), UploadStatus::Error);
    }
}
