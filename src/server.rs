//! HTTP ingress: routing, request validation, adapter dispatch, and the
//! success half of the response mapping.
//!
//! Control flow is strictly linear per request: validate → one external call
//! → reply. Handlers hold no state between requests; every failure path goes
//! through [`ApiError`] so each request gets exactly one reply.

use crate::config::Settings;
use crate::error::ApiError;
use crate::ocr::{OcrProvider, TextDetection};
use crate::openrouter::{Message, OpenRouterClient};
use crate::prompts;
use crate::schema::{
    co2_analysis_schema, comprehensive_analysis_schema, Co2Analysis, ComprehensiveAnalysis,
    UserPreferences,
};
use crate::translate::TranslateClient;
use anyhow::Context;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
///
/// All clients are constructed once at startup and shared read-only; no
/// per-request construction, no teardown beyond process exit.
#[derive(Clone)]
pub struct AppState {
    pub ocr: Arc<dyn OcrProvider>,
    pub llm: Arc<OpenRouterClient>,
    pub translator: Arc<TranslateClient>,
}

/// Build the application router with the CORS, trace and body-limit layers.
pub fn router(state: AppState, settings: &Settings) -> anyhow::Result<Router> {
    let origins = settings
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid allowed origin: {}", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/test-cors", get(test_cors))
        .route("/extract-ingredients", post(extract_ingredients))
        .route("/ocr", post(ocr_text))
        .route("/translate", post(translate))
        .route("/analyze-co2", post(analyze_co2))
        .route("/comprehensive-analysis", post(comprehensive_analysis))
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

// ============================================================================
// Request/response shapes
// ============================================================================

#[derive(Deserialize)]
struct ExtractIngredientsRequest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct IngredientsResponse {
    ingredients: String,
}

#[derive(Deserialize)]
struct OcrRequest {
    #[serde(default, rename = "imageBase64")]
    image_base64: Option<String>,
}

#[derive(Serialize)]
struct OcrResponse {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    target_lang: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedResponse {
    translated_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisRequest {
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    user_preferences: UserPreferences,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// CORS smoke-test endpoint for the frontend.
async fn test_cors() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "CORS is working properly",
    })
}

/// Extract an ingredient list from free-form label text via the LLM.
async fn extract_ingredients(
    State(state): State<AppState>,
    Json(req): Json<ExtractIngredientsRequest>,
) -> Result<Json<IngredientsResponse>, ApiError> {
    let text = match req.text.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::Validation("No text provided")),
    };

    info!("Extracting ingredients from {} chars of text", text.len());

    let messages = vec![
        Message::system(prompts::INGREDIENT_SYSTEM_PROMPT),
        Message::user(prompts::ingredient_user_prompt(text)),
    ];

    let ingredients = state
        .llm
        .chat(messages)
        .await
        .map_err(|e| ApiError::upstream("Failed to extract ingredients", e))?;

    Ok(Json(IngredientsResponse { ingredients }))
}

/// Run OCR over a base64-encoded image from the request body.
///
/// An image with no readable text is a 200 with an empty `text` field, not
/// an error.
async fn ocr_text(
    State(state): State<AppState>,
    Json(req): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, ApiError> {
    let encoded = match req.image_base64.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ApiError::Validation("No image provided")),
    };

    let image = BASE64
        .decode(encoded)
        .map_err(|_| ApiError::Validation("Invalid image encoding"))?;

    info!("Running OCR on {} byte image via {}", image.len(), state.ocr.name());

    match state.ocr.detect_text(&image).await {
        Ok(TextDetection::Text(text)) => Ok(Json(OcrResponse { text })),
        Ok(TextDetection::NoText) => {
            info!("No text detected in image");
            Ok(Json(OcrResponse {
                text: String::new(),
            }))
        }
        Err(e) => Err(ApiError::upstream("Failed to extract text from image", e)),
    }
}

/// Translate text through LibreTranslate.
async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslatedResponse>, ApiError> {
    let (text, target_lang) = match (req.text.as_deref(), req.target_lang.as_deref()) {
        (Some(t), Some(l)) if !t.is_empty() && !l.is_empty() => (t, l),
        _ => return Err(ApiError::Validation("Missing text or target language")),
    };

    let translated_text = state
        .translator
        .translate(text, target_lang)
        .await
        .map_err(|e| ApiError::upstream("Failed to translate text", e))?;

    Ok(Json(TranslatedResponse { translated_text }))
}

/// Estimate the environmental impact of an ingredient list via the LLM.
async fn analyze_co2(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<Co2Analysis>, ApiError> {
    if req.ingredients.is_empty() {
        return Err(ApiError::Validation("No ingredients provided"));
    }

    info!("Analyzing CO2 impact of {} ingredients", req.ingredients.len());

    let messages = vec![Message::user(prompts::co2_prompt(&req.ingredients))];

    let analysis: Co2Analysis = state
        .llm
        .chat_json(messages, "co2_analysis", co2_analysis_schema())
        .await
        .map_err(|e| ApiError::upstream("Failed to analyze environmental impact", e))?;

    Ok(Json(analysis))
}

/// Full analysis (environment, allergens, dietary fit, health) against the
/// user's selected preferences.
async fn comprehensive_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<ComprehensiveAnalysis>, ApiError> {
    if req.ingredients.is_empty() {
        return Err(ApiError::Validation("No ingredients provided"));
    }

    info!(
        "Running comprehensive analysis of {} ingredients",
        req.ingredients.len()
    );

    let messages = vec![Message::user(prompts::comprehensive_prompt(
        &req.ingredients,
        &req.user_preferences,
    ))];

    let analysis: ComprehensiveAnalysis = state
        .llm
        .chat_json(
            messages,
            "comprehensive_analysis",
            comprehensive_analysis_schema(),
        )
        .await
        .map_err(|e| ApiError::upstream("Failed to analyze ingredients", e))?;

    Ok(Json(analysis))
}
