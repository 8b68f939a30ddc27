//! Image file upload and download
//!
//! Turns image files on disk into data URLs for the controller, and writes
//! generated data URLs back out as image files.

use crate::{data_url, Error, Result};
use image::ImageFormat;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Read an image file and encode it as a data URL.
///
/// The MIME type comes from the file contents, not its extension. Files that
/// are not a recognised image format are rejected.
pub async fn load_data_url(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let format = image::guess_format(&bytes)?;

    tracing::debug!(
        "Loaded {} ({} bytes, {:?})",
        path.display(),
        bytes.len(),
        format
    );

    Ok(data_url::from_bytes(format.to_mime_type(), &bytes))
}

/// File extension for a MIME type, falling back to `bin`.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

/// Writes generated images into a session output directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    output_dir: PathBuf,
}

impl ImageStore {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Decode `data_url` and write it as `<base_name>.<ext>`.
    ///
    /// `base_name` must be a single path component; anything that could
    /// resolve outside the output directory is rejected.
    pub async fn save(&self, data_url: &str, base_name: &str) -> Result<PathBuf> {
        validate_base_name(base_name)?;
        let (mime_type, bytes) = data_url::to_bytes(data_url)?;
        let path = self
            .output_dir
            .join(format!("{}.{}", base_name, extension_for_mime(&mime_type)));

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!("Saved image to {}", path.display());

        Ok(path)
    }
}

fn validate_base_name(base_name: &str) -> Result<()> {
    let is_plain = !base_name.is_empty()
        && !base_name.contains(['/', '\\'])
        && base_name != "."
        && base_name != ".."
        && Path::new(base_name).file_name() == Some(OsStr::new(base_name));
    if is_plain {
        Ok(())
    } else {
        Err(Error::InvalidFileName(base_name.to_string()))
    }
}
