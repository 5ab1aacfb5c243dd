use crate::error::{PromptError, Result};
use std::env;

pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Bounds applied to uploaded reference images before they enter a draft.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_image_bytes: usize,
    pub max_reference_images: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        UploadLimits {
            max_image_bytes: 8 * 1024 * 1024,
            max_reference_images: 6,
        }
    }
}

impl UploadLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_image_bytes(mut self, bytes: usize) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    pub fn with_max_reference_images(mut self, count: usize) -> Self {
        self.max_reference_images = count;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub api_base: Option<String>,
    pub temperature: Option<f64>,
    pub limits: UploadLimits,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model_id: None,
            api_base: None,
            temperature: None,
            limits: UploadLimits::default(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `GEMINI_API_KEY` (fallback `API_KEY`) plus the optional model,
    /// endpoint, temperature and upload-limit overrides. The credential is
    /// never taken from user input.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty());
        let model_id = env::var("GEMINI_MODEL_ID").ok();
        let api_base = env::var("GEMINI_API_BASE").ok();
        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|value| value.parse().ok());

        let mut limits = UploadLimits::default();
        if let Some(bytes) = env::var("VIDPROMPT_MAX_IMAGE_BYTES")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            limits.max_image_bytes = bytes;
        }
        if let Some(count) = env::var("VIDPROMPT_MAX_REFERENCE_IMAGES")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            limits.max_reference_images = count;
        }

        GeminiConfig {
            api_key,
            model_id,
            api_base,
            temperature,
            limits,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// The credential check runs at client construction, before any network
    /// call can be attempted.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                PromptError::Config(
                    "GEMINI_API_KEY is not set; the generation service credential must come from the environment".into(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_when_unset() {
        let config = GeminiConfig::new();
        assert_eq!(config.model_id(), DEFAULT_MODEL_ID);
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(config.limits.max_reference_images, 6);
    }

    #[test]
    fn builders_override_defaults() {
        let config = GeminiConfig::new()
            .with_api_key("k")
            .with_model("gemini-2.5-pro")
            .with_api_base("https://example.test/v1beta/")
            .with_temperature(0.2)
            .with_limits(UploadLimits::new().with_max_reference_images(3));
        assert_eq!(config.model_id(), "gemini-2.5-pro");
        assert_eq!(config.api_base(), "https://example.test/v1beta");
        assert_eq!(config.temperature(), 0.2);
        assert_eq!(config.limits.max_reference_images, 3);
        assert!(config.require_api_key().is_ok());
    }

    #[test]
    fn missing_credential_is_a_config_error() {
        let config = GeminiConfig::new();
        match config.require_api_key() {
            Err(PromptError::Config(_)) => {}
            other => panic!("expected config error, got {:?}", other),
        }

        let blank = GeminiConfig::new().with_api_key("   ");
        assert!(blank.require_api_key().is_err());
    }
}
