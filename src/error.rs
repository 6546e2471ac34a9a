use thiserror::Error;

/// Failure of a single image upload to the host.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Network error during upload: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Upload timeout")]
    Timeout,

    #[error("Upload failed with status: {0}")]
    Status(u16),

    #[error("Failed to parse response")]
    Decode(#[source] serde_json::Error),

    /// The host answered with a well-formed body that reports failure.
    #[error("{message}")]
    Rejected { code: i64, message: String },
}

impl UploadError {
    pub(crate) fn from_send(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }
}

/// Aggregate failure of an upload batch. Per-item detail stays on the
/// coordinator's items; this carries the first cause for the caller.
#[derive(Debug, Error)]
#[error("{failed} of {total} uploads failed (first at image {index}): {source}")]
pub struct BatchError {
    pub total: usize,
    pub failed: usize,
    pub index: usize,
    #[source]
    pub source: UploadError,
}

/// Failure talking to the furniture analysis API.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Unable to connect to furniture analysis API at {base_url}. Please ensure the server is running.")]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Failed to parse response JSON")]
    Decode(#[source] serde_json::Error),

    /// The API returned its structured `{error, message, status}` body.
    #[error("{message}")]
    Api {
        error: String,
        message: String,
        status: u16,
    },
}
