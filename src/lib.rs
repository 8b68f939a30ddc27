//! Product visualizer - places an uploaded product image onto a mug, t-shirt
//! or billboard with Gemini's image model, then refines the result with
//! free-text edits.

pub mod ai;
pub mod app;
pub mod cli;
pub mod data_url;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;

pub use app::{App, Phase, Snapshot};
pub use error::{Error, Result};
pub use models::{Config, Medium};
