use serde::Deserialize;
use std::path::Path;

/// A binary image handed to the uploader.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { file_name, bytes })
    }
}

/// The host answers 200 with either a success or a failure body; model both
/// explicitly instead of poking at loose JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImgbbReply {
    Success(ImgbbUploadResponse),
    Failure(ImgbbErrorBody),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbUploadResponse {
    pub data: ImgbbImageData,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbImageData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url_viewer: String,
    pub url: String,
    #[serde(default)]
    pub display_url: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub expiration: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbErrorBody {
    pub error: ImgbbErrorDetail,
    pub success: bool,
    #[serde(default)]
    pub status: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: i64,
}
