mod types;

pub use types::{
    ImagePayload, ImgbbErrorBody, ImgbbErrorDetail, ImgbbImageData, ImgbbReply,
    ImgbbUploadResponse,
};

use crate::config::Config;
use crate::error::UploadError;
use bytes::Bytes;
use futures::stream;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::convert::Infallible;
use std::time::Duration;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const CHUNK_SIZE: usize = 64 * 1024;

/// Client for the imgbb upload endpoint.
#[derive(Clone)]
pub struct ImgbbClient {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
}

impl ImgbbClient {
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(UploadError::Transport)?;

        Ok(Self {
            client,
            upload_url: config.imgbb_upload_url.clone(),
            api_key: config.imgbb_api_key.clone(),
        })
    }

    /// Uploads one image as a multipart form. `on_progress` fires with 0-100
    /// percentages as the body is pulled onto the wire.
    pub async fn upload_image<F>(
        &self,
        image: ImagePayload,
        on_progress: F,
    ) -> Result<ImgbbImageData, UploadError>
    where
        F: FnMut(u8) + Send + Sync + 'static,
    {
        let file_name = image.file_name.clone();
        let total = image.bytes.len() as u64;
        let body = reqwest::Body::wrap_stream(progress_chunks(image.bytes, on_progress));
        let part = Part::stream_with_length(body, total).file_name(file_name);
        let form = Form::new()
            .part("image", part)
            .text("key", self.api_key.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::from_send)?;

        // The host only carries a parseable body on 200.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(UploadError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(UploadError::from_send)?;
        match serde_json::from_str::<ImgbbReply>(&text).map_err(UploadError::Decode)? {
            ImgbbReply::Success(reply) => Ok(reply.data),
            ImgbbReply::Failure(err) => Err(UploadError::Rejected {
                code: err.error.code,
                message: err.error.message,
            }),
        }
    }
}

/// Splits the payload into chunks and reports cumulative percentage as each
/// chunk is consumed by the request body.
fn progress_chunks<F>(
    bytes: Vec<u8>,
    mut on_progress: F,
) -> impl futures::Stream<Item = Result<Bytes, Infallible>> + Send + Sync + 'static
where
    F: FnMut(u8) + Send + Sync + 'static,
{
    let total = bytes.len() as u64;
    let chunks: Vec<Bytes> = bytes
        .chunks(CHUNK_SIZE)
        .map(Bytes::copy_from_slice)
        .collect();

    let mut sent = 0u64;
    stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        on_progress(((sent * 100) / total) as u8);
        Ok::<Bytes, Infallible>(chunk)
    }))
}
