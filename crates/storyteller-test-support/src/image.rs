//! Test image generators — mock `ImageGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storyteller_core::generation::{GenerationError, ImageGenerator, ImageRequest};
use tokio::sync::Barrier;

/// An image generator that records every request and returns `image_bytes`,
/// except for prompts containing one of the configured failure markers.
#[derive(Debug)]
pub struct RecordingImageGenerator {
    image_bytes: Vec<u8>,
    fail_markers: Vec<String>,
    requests: Mutex<Vec<ImageRequest>>,
}

impl RecordingImageGenerator {
    /// Create a generator that succeeds for every prompt.
    #[must_use]
    pub fn new(image_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            image_bytes: image_bytes.into(),
            fail_markers: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make every prompt containing `marker` fail.
    #[must_use]
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_markers.push(marker.into());
        self
    }

    /// Returns a snapshot of every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made to `generate_image`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageGenerator for RecordingImageGenerator {
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<u8>, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        if self
            .fail_markers
            .iter()
            .any(|marker| request.prompt.contains(marker.as_str()))
        {
            return Err(GenerationError::Status {
                status: 500,
                body: "model overloaded".into(),
            });
        }
        Ok(self.image_bytes.clone())
    }
}

/// An image generator that always fails.
#[derive(Debug)]
pub struct FailingImageGenerator;

#[async_trait]
impl ImageGenerator for FailingImageGenerator {
    async fn generate_image(&self, _request: &ImageRequest) -> Result<Vec<u8>, GenerationError> {
        Err(GenerationError::Http("connection refused".into()))
    }
}

/// An image generator whose calls all block until `parties` of them are in
/// flight at once. Callers that issue requests one at a time never get past
/// the first call.
#[derive(Debug)]
pub struct RendezvousImageGenerator {
    image_bytes: Vec<u8>,
    barrier: Barrier,
}

impl RendezvousImageGenerator {
    /// Create a generator that releases its callers once `parties` are waiting.
    #[must_use]
    pub fn new(parties: usize, image_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            image_bytes: image_bytes.into(),
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl ImageGenerator for RendezvousImageGenerator {
    async fn generate_image(&self, _request: &ImageRequest) -> Result<Vec<u8>, GenerationError> {
        self.barrier.wait().await;
        Ok(self.image_bytes.clone())
    }
}
