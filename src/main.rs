//! Label Scanner backend - HTTP glue between the scanner frontend and the
//! third-party OCR / language-model services.

use label_scanner::config::Settings;
use label_scanner::ocr::vision::VisionOcrProvider;
use label_scanner::openrouter::OpenRouterClient;
use label_scanner::server::{self, AppState};
use label_scanner::translate::TranslateClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "label_scanner=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // One shared HTTP client for the Google and LibreTranslate adapters.
    let http = reqwest::Client::new();

    let ocr = VisionOcrProvider::from_env(http.clone())?;
    info!("Vision OCR client initialized");

    let llm = OpenRouterClient::from_env(settings.model.as_str())?;
    info!("OpenRouter client initialized (model: {})", settings.model);

    let translator = TranslateClient::new(http, settings.libretranslate_url.clone());

    // Build application state
    let state = AppState {
        ocr: Arc::new(ocr),
        llm: Arc::new(llm),
        translator: Arc::new(translator),
    };

    let app = server::router(state, &settings)?;

    // Run server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;
    info!("Server listening on http://0.0.0.0:{}", settings.port);
    axum::serve(listener, app).await?;

    Ok(())
}
