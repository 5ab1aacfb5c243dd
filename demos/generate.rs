use std::env;
use std::path::Path;

use vidprompt::session::read_image_reference;
use vidprompt::{build_request, GeminiClient, GeminiConfig, PromptRequest, StyleModifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    vidprompt::logger::init()?;

    let image_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "reference.png".to_string());

    let config = GeminiConfig::from_env();
    let limits = config.limits.clone();

    log::info!("🖼️  Loading reference image from {}", image_path);
    let image = read_image_reference(Path::new(&image_path), &limits)?;

    let request = PromptRequest::SingleFrame {
        image,
        description: "一只猫走在雨夜的霓虹街道上，路面反射着灯光".to_string(),
        modifiers: vec![StyleModifier::Lighting, StyleModifier::Camera],
    };

    let assembled = build_request(&request);
    let client = GeminiClient::new(config)?;

    log::info!("🔄 Requesting prompt generation...");
    let prompt = client.generate(&assembled).await?;
    println!("{}", prompt);

    Ok(())
}
