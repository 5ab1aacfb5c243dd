pub mod generate_client;

use crate::{error::Result, prompt::AssembledRequest};
use async_trait::async_trait;

pub use generate_client::GeminiClient;

/// Seam over the generation service so the form wiring and tests can swap in
/// a mock without touching the network.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    async fn generate(&self, request: &AssembledRequest) -> Result<String>;
}
