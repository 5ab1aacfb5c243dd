use std::sync::Arc;

use vidprompt::app::{install_cjk_fonts, StudioApp};
use vidprompt::logger::{self, LoggerConfig};
use vidprompt::{GeminiClient, GeminiConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(LoggerConfig::development())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = GeminiConfig::from_env();
    log::info!("⚙️  Model: {}", config.model_id());
    log::info!(
        "⚙️  Upload limits: {} MB per image, {} reference images",
        config.limits.max_image_bytes / (1024 * 1024),
        config.limits.max_reference_images
    );

    let limits = config.limits.clone();
    let client = match GeminiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let app = StudioApp::new(Arc::new(client), limits, handle);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([900.0, 620.0]),
        ..Default::default()
    };

    log::info!("🚀 Starting vidprompt studio");
    eframe::run_native(
        "AI 视频提示词工作台",
        options,
        Box::new(move |cc| {
            install_cjk_fonts(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
