mod coordinator;
mod types;

pub use coordinator::UploadCoordinator;
pub use types::{ProgressEvent, UploadItem, UploadStatus};
