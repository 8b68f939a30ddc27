//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

/// User-facing message for a failed generation call.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate visualization. Please try again.";

/// User-facing message for a failed edit call.
pub const EDIT_FAILED_MESSAGE: &str = "Failed to edit image. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed data URL: {0}")]
    MalformedInput(String),

    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),

    #[error("Invalid marketing medium: {0}")]
    InvalidMedium(String),

    #[error("No image generated in the response")]
    NoImageReturned,

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed,

    #[error("{}", EDIT_FAILED_MESSAGE)]
    EditFailed,

    #[error("Action not available: {0}")]
    InvalidTransition(String),

    #[error("Edit instruction must not be empty")]
    EmptyInstruction,

    #[error("Request was superseded by a newer action")]
    Superseded,
}

pub type Result<T> = std::result::Result<T, Error>;
