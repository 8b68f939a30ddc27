//! Application state controller.
//!
//! Holds the uploaded product image, the latest generated image, the loading
//! flag and the user-facing error, and sequences user actions into calls on
//! the generation and edit operations.
//!
//! Every remote call is tagged with a token from a monotonically increasing
//! counter. `upload` and `reset` advance the counter, so a response that
//! resolves after either of them is dropped instead of overwriting newer state.

use crate::ai::{edit_image, generate_marketing_image, GeminiImageClient, ImageBackend};
use crate::models::{Config, Medium};
use crate::{Error, Result};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// Coarse view of where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Ready,
    Generating,
    Viewing,
    Editing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Empty => "empty",
            Phase::Ready => "ready",
            Phase::Generating => "generating",
            Phase::Viewing => "viewing",
            Phase::Editing => "editing",
        };
        f.write_str(name)
    }
}

/// Copy of the controller state handed to presenters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub product_image: Option<String>,
    pub generated_image: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Snapshot {
    pub fn phase(&self) -> Phase {
        match (&self.product_image, &self.generated_image, self.is_loading) {
            (None, _, _) => Phase::Empty,
            (Some(_), None, false) => Phase::Ready,
            (Some(_), None, true) => Phase::Generating,
            (Some(_), Some(_), false) => Phase::Viewing,
            (Some(_), Some(_), true) => Phase::Editing,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    snapshot: Snapshot,
    token: u64,
}

impl State {
    /// Start a remote call: set loading, clear the error, hand out a token.
    fn begin(&mut self) -> u64 {
        self.snapshot.is_loading = true;
        self.snapshot.error = None;
        self.token += 1;
        self.token
    }

    fn invalidate(&mut self) {
        self.token += 1;
    }
}

/// Drives a single product-visualization session.
pub struct App {
    backend: Box<dyn ImageBackend>,
    state: Mutex<State>,
}

impl App {
    pub fn new(backend: Box<dyn ImageBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(State::default()),
        }
    }

    /// Build an app backed by Gemini from environment-derived config.
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiImageClient::from_config(config);
        info!("Image provider: Gemini (model: {})", client.model());
        Self::new(Box::new(client))
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state().snapshot.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state().snapshot.phase()
    }

    /// Replace the product image. Any in-flight request is abandoned.
    pub fn upload(&self, image: impl Into<String>) {
        let mut state = self.state();
        state.invalidate();
        state.snapshot = Snapshot {
            product_image: Some(image.into()),
            ..Snapshot::default()
        };
        info!("Product image uploaded");
    }

    /// Generate a placement of the product into `medium`.
    ///
    /// Only available in [`Phase::Ready`]. On failure the session returns to
    /// `Ready` with the error message set.
    pub async fn select_medium(&self, medium: Medium) -> Result<String> {
        let (token, product) = {
            let mut state = self.state();
            let phase = state.snapshot.phase();
            let product = match (&state.snapshot.product_image, phase) {
                (Some(product), Phase::Ready) => product.clone(),
                _ => {
                    return Err(Error::InvalidTransition(format!(
                        "cannot choose a medium while {}",
                        phase
                    )))
                }
            };
            (state.begin(), product)
        };

        let result = generate_marketing_image(self.backend.as_ref(), &product, medium).await;
        self.finish(token, result)
    }

    /// Apply a free-text edit to the generated image.
    ///
    /// Only available in [`Phase::Viewing`]. A failed edit keeps the previous
    /// image on display.
    pub async fn submit_edit(&self, instruction: &str) -> Result<String> {
        let (token, current) = {
            let mut state = self.state();
            let phase = state.snapshot.phase();
            let current = match (&state.snapshot.generated_image, phase) {
                (Some(current), Phase::Viewing) => current.clone(),
                _ => {
                    return Err(Error::InvalidTransition(format!(
                        "cannot edit while {}",
                        phase
                    )))
                }
            };
            if instruction.trim().is_empty() {
                return Err(Error::EmptyInstruction);
            }
            (state.begin(), current)
        };

        let result = edit_image(self.backend.as_ref(), &current, instruction).await;
        self.finish(token, result)
    }

    /// Clear everything and abandon any in-flight request.
    pub fn reset(&self) {
        let mut state = self.state();
        state.invalidate();
        state.snapshot = Snapshot::default();
        info!("Session reset");
    }

    fn finish(&self, token: u64, result: Result<String>) -> Result<String> {
        let mut state = self.state();
        if state.token != token {
            warn!("Discarding response for superseded request {}", token);
            return Err(Error::Superseded);
        }

        state.snapshot.is_loading = false;
        match result {
            Ok(image) => {
                state.snapshot.generated_image = Some(image.clone());
                Ok(image)
            }
            Err(e) => {
                state.snapshot.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
