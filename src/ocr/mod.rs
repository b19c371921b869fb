//! OCR provider abstraction.
//!
//! Defines the [`OcrProvider`] trait and the [`TextDetection`] outcome so the
//! ingress can dispatch to the external text-detection backend (and tests can
//! substitute a stub).

pub mod vision;

/// Outcome of a text-detection call.
///
/// `NoText` is a valid empty result, not a failure: the image was processed
/// and simply contained no readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextDetection {
    Text(String),
    NoText,
}

/// Async seam over the external OCR capability.
#[async_trait::async_trait]
pub trait OcrProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn detect_text(&self, image: &[u8]) -> anyhow::Result<TextDetection>;
}
