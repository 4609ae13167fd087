//! Upload intake tracking.
//!
//! Uploads are client-simulated: each file walks
//! uploading → processing → ready on fixed per-phase tick counts,
//! mirroring the dashboard's document list. The queue owns the records;
//! the view reads them back out after each tick.

use dreamtrue_domain::{FileCategory, UploadStatus, UploadedFile};

/// Ticks a file spends in the uploading phase.
pub const UPLOAD_PHASE_TICKS: u32 = 2;
/// Ticks a file spends in the processing phase.
pub const PROCESS_PHASE_TICKS: u32 = 3;

#[derive(Debug, Clone)]
struct Entry {
    file: UploadedFile,
    phase_remaining: u32,
}

/// Tracks uploaded documents through intake.
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    entries: Vec<Entry>,
}

impl UploadQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a file to the queue. Intake starts from the file's current
    /// status; fresh uploads should arrive as `Uploading`.
    pub fn add(&mut self, file: UploadedFile) {
        let phase_remaining = Self::phase_length(file.status);
        tracing::debug!(file = %file.name, "upload queued");
        self.entries.push(Entry {
            file,
            phase_remaining,
        });
    }

    /// Advances every in-flight file by one logical tick. Settled files
    /// (ready or errored) are untouched.
    pub fn tick(&mut self) {
        for entry in &mut self.entries {
            if Self::phase_length(entry.file.status) == 0 {
                continue;
            }
            entry.phase_remaining = entry.phase_remaining.saturating_sub(1);
            if entry.phase_remaining == 0 {
                entry.file.status = entry.file.status.advanced();
                entry.phase_remaining = Self::phase_length(entry.file.status);
            }
        }
    }

    /// Reassigns the dashboard category of a file. Returns false if the
    /// id is unknown.
    pub fn set_category(&mut self, file_id: &str, category: FileCategory) -> bool {
        match self.entries.iter_mut().find(|e| e.file.id == file_id) {
            Some(entry) => {
                entry.file.category = category;
                true
            }
            None => false,
        }
    }

    /// Removes a file from the queue, returning its record.
    pub fn remove(&mut self, file_id: &str) -> Option<UploadedFile> {
        let index = self.entries.iter().position(|e| e.file.id == file_id)?;
        Some(self.entries.remove(index).file)
    }

    /// The current records, in insertion order.
    #[must_use]
    pub fn files(&self) -> Vec<UploadedFile> {
        self.entries.iter().map(|e| e.file.clone()).collect()
    }

    /// Number of files available to the analysis.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.file.status == UploadStatus::Ready)
            .count()
    }

    /// True once nothing is still in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries
            .iter()
            .all(|e| Self::phase_length(e.file.status) == 0)
    }

    const fn phase_length(status: UploadStatus) -> u32 {
        match status {
            UploadStatus::Uploading => UPLOAD_PHASE_TICKS,
            UploadStatus::Processing => PROCESS_PHASE_TICKS,
            UploadStatus::Ready | UploadStatus::Error => 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn file(id: &str) -> UploadedFile {
        UploadedFile {
            id: id.to_string(),
            name: format!("{id}.pdf"),
            size: 1024,
            content_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
            status: UploadStatus::Uploading,
            category: FileCategory::Other,
        }
    }

    #[test]
    fn test_file_walks_phases_on_ticks() {
        let mut queue = UploadQueue::new();
        queue.add(file("a"));

        for _ in 0..UPLOAD_PHASE_TICKS {
            queue.tick();
        }
        assert_eq!(queue.files()[0].status, UploadStatus::Processing);

        for _ in 0..PROCESS_PHASE_TICKS {
            queue.tick();
        }
        assert_eq!(queue.files()[0].status, UploadStatus::Ready);
        assert_eq!(queue.ready_count(), 1);
        assert!(queue.is_settled());
    }

    #[test]
    fn test_ready_files_stay_ready() {
        let mut queue = UploadQueue::new();
        queue.add(file("a"));
        for _ in 0..(UPLOAD_PHASE_TICKS + PROCESS_PHASE_TICKS + 5) {
            queue.tick();
        }
        assert_eq!(queue.files()[0].status, UploadStatus::Ready);
    }

    #[test]
    fn test_later_files_progress_independently() {
        let mut queue = UploadQueue::new();
        queue.add(file("a"));
        for _ in 0..UPLOAD_PHASE_TICKS {
            queue.tick();
        }
        queue.add(file("b"));
        queue.tick();

        let files = queue.files();
        assert_eq!(files[0].status, UploadStatus::Processing);
        assert_eq!(files[1].status, UploadStatus::Uploading);
        assert!(!queue.is_settled());
    }

    #[test]
    fn test_set_category_and_remove() {
        let mut queue = UploadQueue::new();
        queue.add(file("a"));

        assert!(queue.set_category("a", FileCategory::Competitor));
        assert!(!queue.set_category("ghost", FileCategory::Internal));
        assert_eq!(queue.files()[0].category, FileCategory::Competitor);

        let removed = queue.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(queue.files().is_empty());
        assert!(queue.remove("a").is_none());
    }
}
