#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Error(String),
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error(_))
    }
}

/// Per-file slot in a batch, index-aligned with the submitted files.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub file_name: String,
    pub progress: u8,
    pub status: UploadStatus,
    pub url: Option<String>,
}

impl UploadItem {
    pub(crate) fn pending(file_name: String) -> Self {
        Self {
            file_name,
            progress: 0,
            status: UploadStatus::Pending,
            url: None,
        }
    }
}

/// Status update emitted over the coordinator's event channel.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub index: usize,
    pub file_name: String,
    pub progress: u8,
    pub status: UploadStatus,
}
