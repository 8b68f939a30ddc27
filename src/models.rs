//! Data models and structures
//!
//! Defines the marketing media a product can be placed into and the
//! runtime configuration for the Gemini image service.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Physical or display context the product image is composited into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    Mug,
    TShirt,
    Billboard,
}

impl Medium {
    pub const ALL: [Medium; 3] = [Medium::Mug, Medium::TShirt, Medium::Billboard];

    /// Position of this medium in [`Medium::ALL`]; used to index prompt tables.
    pub const fn index(self) -> usize {
        match self {
            Medium::Mug => 0,
            Medium::TShirt => 1,
            Medium::Billboard => 2,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Medium::Mug => "Mug",
            Medium::TShirt => "T-Shirt",
            Medium::Billboard => "Billboard",
        }
    }

    /// Lowercase identifier accepted by [`Medium::from_str`].
    pub const fn slug(self) -> &'static str {
        match self {
            Medium::Mug => "mug",
            Medium::TShirt => "t-shirt",
            Medium::Billboard => "billboard",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Medium {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mug" => Ok(Medium::Mug),
            "t-shirt" | "tshirt" | "t_shirt" => Ok(Medium::TShirt),
            "billboard" => Ok(Medium::Billboard),
            _ => Err(Error::InvalidMedium(s.to_string())),
        }
    }
}

const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or_else(|| Error::Config("GEMINI_API_KEY (or API_KEY) not set".to_string()))?;

        let image_model = non_empty("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let image_model = image_model
            .strip_prefix("models/")
            .unwrap_or(&image_model)
            .to_string();

        let gemini_base_url = non_empty("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = match non_empty("GEMINI_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a positive whole number, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            gemini_api_key,
            image_model,
            gemini_base_url,
            request_timeout,
        })
    }
}
