use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentResponse, ImageGenerationConfig, ImageRequest, InlineData, Part,
};
use crate::ai::ImageBackend;
use crate::models::{Config, DEFAULT_TIMEOUT};
use crate::{Error, Result};
use async_trait::async_trait;

/// Gemini image model used for both placement and edits.
#[derive(Debug, Clone)]
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, DEFAULT_TIMEOUT, client),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http: GeminiHttpClient::from_config(config),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl ImageBackend for GeminiImageClient {
    async fn render(&self, image: &InlineData, prompt: &str) -> Result<InlineData> {
        tracing::debug!(
            "Sending {} image ({} base64 chars) to Gemini model {}",
            image.mime_type,
            image.data.len(),
            self.http.model()
        );

        let request = ImageRequest {
            contents: vec![Content {
                role: None,
                parts: vec![
                    Part::InlineData {
                        inline_data: image.clone(),
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        };

        let gemini_response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let Some(image_data) = gemini_response.first_inline_image() else {
            tracing::warn!(
                "Gemini returned no image part (finish reason: {})",
                gemini_response.finish_reason().unwrap_or("unknown")
            );
            return Err(Error::NoImageReturned);
        };

        tracing::debug!(
            "Gemini returned image with mime_type: {}",
            image_data.mime_type
        );

        Ok(image_data.clone())
    }
}
