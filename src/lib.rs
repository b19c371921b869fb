//! Backend glue for the food-label scanner.
//!
//! HTTP ingress (axum) → external-call adapters (Google Cloud Vision OCR,
//! OpenRouter chat completions, LibreTranslate) → response mapper. No
//! original processing logic and no state beyond the request in flight.

pub mod config;
pub mod error;
pub mod ocr;
pub mod openrouter;
pub mod prompts;
pub mod schema;
pub mod server;
pub mod translate;
