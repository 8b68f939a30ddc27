//! Product placement and image edit operations.
//!
//! Both operations decode their input data URL, make exactly one backend call
//! and hand back a data URL. Remote failures are logged in full and collapsed
//! into a single user-facing error per operation.

use super::ImageBackend;
use crate::models::Medium;
use crate::{data_url, prompts, Error, Result};

/// Place the product from `product_image` into `medium`.
pub async fn generate_marketing_image(
    backend: &dyn ImageBackend,
    product_image: &str,
    medium: Medium,
) -> Result<String> {
    let image = data_url::decode(product_image)?;
    let prompt = prompts::for_medium(medium);

    tracing::info!("Generating {} visualization", medium);

    match backend.render(&image, prompt).await {
        Ok(result) => Ok(data_url::encode(&result.mime_type, &result.data)),
        Err(e) => {
            tracing::error!("Error generating marketing image: {}", e);
            Err(Error::GenerationFailed)
        }
    }
}

/// Apply a free-text `instruction` to `current_image`.
pub async fn edit_image(
    backend: &dyn ImageBackend,
    current_image: &str,
    instruction: &str,
) -> Result<String> {
    let image = data_url::decode(current_image)?;

    tracing::info!("Editing image: {}", instruction);

    match backend.render(&image, instruction).await {
        Ok(result) => Ok(data_url::encode(&result.mime_type, &result.data)),
        Err(e) => {
            tracing::error!("Error editing image: {}", e);
            Err(Error::EditFailed)
        }
    }
}
