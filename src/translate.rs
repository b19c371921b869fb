//! LibreTranslate client backing the `/translate` passthrough.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub struct TranslateClient {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl TranslateClient {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Translate `text` into `target_lang`, auto-detecting the source language.
    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
        };

        info!("TranslateClient: translating {} chars to {}", text.len(), target_lang);

        let resp = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .context("Failed to send translate request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Translate API error ({}): {}", status, text);
        }

        let translated: TranslateResponse = resp
            .json()
            .await
            .context("Failed to parse translate response")?;

        Ok(translated.translated_text)
    }
}
