//! vidprompt turns reference images, a rough idea and optional style
//! modifiers into a polished video-generation prompt via the Gemini API.
//!
//! The library half (models, request builder, client, session state) is
//! usable without the GUI; the [`app`] module provides the desktop form the
//! binary launches.

pub mod app;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod session;

pub use config::{GeminiConfig, UploadLimits};
pub use error::{PromptError, Result};
pub use gemini::{GeminiClient, PromptGenerator};
pub use models::{
    EaseOptions, ImagePayload, ImageReference, Mode, PromptRequest, StyleModifier,
};
pub use prompt::{build_request, AssembledRequest};
