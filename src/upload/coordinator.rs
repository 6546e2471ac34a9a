use crate::error::{BatchError, UploadError};
use crate::imgbb::{ImagePayload, ImgbbClient};
use crate::upload::types::{ProgressEvent, UploadItem, UploadStatus};
use futures::future::join_all;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Default)]
struct BatchState {
    // Tags the live batch. Bumped on submit and reset so callbacks from a
    // superseded batch are ignored.
    generation: u64,
    items: Vec<UploadItem>,
}

/// Fans a batch of images out to the host, one concurrent request per image,
/// and collects the hosted URLs in input order.
pub struct UploadCoordinator {
    client: ImgbbClient,
    state: Arc<Mutex<BatchState>>,
}

impl UploadCoordinator {
    pub fn new(client: ImgbbClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(BatchState::default())),
        }
    }

    /// Uploads all images concurrently. Succeeds only if every upload
    /// succeeds; the returned URLs are index-aligned with `images`. A single
    /// failure fails the batch, but sibling uploads still run to completion
    /// and settle their item state.
    pub async fn submit(
        &self,
        images: Vec<ImagePayload>,
        events: &UnboundedSender<ProgressEvent>,
    ) -> Result<Vec<String>, BatchError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let total = images.len();
        log::info!("Uploading {} image(s)", total);

        let generation = {
            let mut state = self.state.lock().unwrap();
            // A fresh tag per batch, so a batch still in flight cannot write
            // into the items installed here.
            state.generation += 1;
            state.items = images
                .iter()
                .map(|image| UploadItem::pending(image.file_name.clone()))
                .collect();
            state.generation
        };

        let uploads = images.into_iter().enumerate().map(|(index, image)| {
            let state = Arc::clone(&self.state);
            let events = events.clone();
            async move { self.upload_one(index, image, generation, state, events).await }
        });

        let results = join_all(uploads).await;

        let mut urls = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(url) => urls.push(url),
                Err(error) => failures.push((index, error)),
            }
        }

        if failures.is_empty() {
            Ok(urls)
        } else {
            let failed = failures.len();
            let (index, source) = failures.swap_remove(0);
            log::warn!("{} of {} uploads failed", failed, total);
            Err(BatchError {
                total,
                failed,
                index,
                source,
            })
        }
    }

    /// Clears all item state and invalidates in-flight callbacks. Running
    /// requests are not cancelled; their late updates hit a stale generation
    /// and are dropped.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.generation += 1;
        state.items.clear();
    }

    /// Snapshot of the current batch for per-item status rendering.
    pub fn items(&self) -> Vec<UploadItem> {
        self.state.lock().unwrap().items.clone()
    }

    async fn upload_one(
        &self,
        index: usize,
        image: ImagePayload,
        generation: u64,
        state: Arc<Mutex<BatchState>>,
        events: UnboundedSender<ProgressEvent>,
    ) -> Result<String, UploadError> {
        update_item(&state, &events, generation, index, |item| {
            item.status = UploadStatus::Uploading;
        });

        let progress_state = Arc::clone(&state);
        let progress_events = events.clone();
        let result = self
            .client
            .upload_image(image, move |pct| {
                update_item(&progress_state, &progress_events, generation, index, |item| {
                    item.progress = pct;
                });
            })
            .await;

        match &result {
            Ok(data) => {
                let url = data.url.clone();
                update_item(&state, &events, generation, index, |item| {
                    item.progress = 100;
                    item.status = UploadStatus::Completed;
                    item.url = Some(url);
                });
            }
            Err(error) => {
                let message = error.to_string();
                update_item(&state, &events, generation, index, |item| {
                    item.status = UploadStatus::Error(message);
                });
            }
        }

        result.map(|data| data.url)
    }
}

/// Applies a mutation to one item under the lock and forwards the new state
/// over the event channel. Updates against a stale generation or an already
/// terminal item are dropped.
fn update_item<F>(
    state: &Mutex<BatchState>,
    events: &UnboundedSender<ProgressEvent>,
    generation: u64,
    index: usize,
    apply: F,
) where
    F: FnOnce(&mut UploadItem),
{
    let mut state = state.lock().unwrap();
    if state.generation != generation {
        return;
    }
    if let Some(item) = state.items.get_mut(index) {
        if item.status.is_terminal() {
            return;
        }
        apply(item);
        let _ = events.send(ProgressEvent {
            index,
            file_name: item.file_name.clone(),
            progress: item.progress,
            status: item.status.clone(),
        });
    }
}
