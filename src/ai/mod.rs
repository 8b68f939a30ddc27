//! AI service integration for product placement and image edits
//!
//! Provides the [`ImageBackend`] seam over Gemini's image model, plus the
//! generation and edit operations the application controller calls.

pub mod gemini;
pub mod marketing;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use marketing::{edit_image, generate_marketing_image};
pub use mock::MockImageBackend;

use crate::ai::gemini::types::InlineData;
use crate::Result;
use async_trait::async_trait;

/// One request in, first image part out.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Send `image` together with `prompt` and return the first image the
    /// service produces. Fails with [`crate::Error::NoImageReturned`] when the
    /// response carries no inline image.
    async fn render(&self, image: &InlineData, prompt: &str) -> Result<InlineData>;
}
