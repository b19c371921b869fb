//! Process configuration, read once at startup.
//!
//! Adapter credentials (`OPENROUTER_API_KEY`, `GOOGLE_APPLICATION_CREDENTIALS`)
//! are read by the clients that own them and are never logged.

use anyhow::{Context, Result};
use std::env;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ORIGIN: &str = "http://127.0.0.1:5501";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp";
const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com/translate";

/// Environment snapshot shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub model: String,
    pub libretranslate_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = parse_origins(
            env::var("ALLOWED_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_ORIGIN),
        );
        if allowed_origins.is_empty() {
            anyhow::bail!("ALLOWED_ORIGINS must name at least one origin");
        }

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("MAX_BODY_BYTES is not a valid size: {}", raw))?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        let model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let libretranslate_url = env::var("LIBRETRANSLATE_URL")
            .unwrap_or_else(|_| DEFAULT_LIBRETRANSLATE_URL.to_string());

        Ok(Self {
            port,
            allowed_origins,
            max_body_bytes,
            model,
            libretranslate_url,
        })
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_origin() {
        assert_eq!(
            parse_origins("http://127.0.0.1:5501"),
            vec!["http://127.0.0.1:5501"]
        );
    }

    #[test]
    fn test_parse_origin_list() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://scanner.example.com ,"),
            vec!["http://localhost:3000", "https://scanner.example.com"]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_origins("  ,, ").is_empty());
    }
}
