use super::ImageBackend;
use crate::ai::gemini::types::InlineData;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted reply for one [`MockImageBackend::render`] call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Image(InlineData),
    NoImage,
    ProviderError(String),
}

/// Request captured by [`MockImageBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub image: InlineData,
    pub prompt: String,
}

/// In-memory backend with queued replies and request recording.
///
/// Replies are consumed in order. When the queue is empty a tiny PNG is
/// returned.
#[derive(Debug, Clone, Default)]
pub struct MockImageBackend {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockImageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, mime_type: &str, data: &str) -> Self {
        self.push(MockReply::Image(InlineData {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        }))
    }

    pub fn with_no_image(self) -> Self {
        self.push(MockReply::NoImage)
    }

    pub fn with_error(self, message: &str) -> Self {
        self.push(MockReply::ProviderError(message.to_string()))
    }

    fn push(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.prompt.clone())
    }
}

/// Base64 of a 1x1 transparent PNG.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn render(&self, image: &InlineData, prompt: &str) -> Result<InlineData> {
        self.requests.lock().unwrap().push(RecordedRequest {
            image: image.clone(),
            prompt: prompt.to_string(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Image(data)) => Ok(data),
            Some(MockReply::NoImage) => Err(Error::NoImageReturned),
            Some(MockReply::ProviderError(message)) => Err(Error::AiProvider(message)),
            None => Ok(InlineData {
                mime_type: "image/png".to_string(),
                data: TINY_PNG_BASE64.to_string(),
            }),
        }
    }
}
