use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PREFERENCE_DIR: &str = ".crop-sahayaka";

#[derive(Debug, Clone)]
pub struct Config {
    // Prediction and chat service
    pub api_base_url: String,

    // Directory holding the language preference slot
    pub preference_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("CROP_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)
            .context("CROP_API_URL must be an http(s) URL")?;

        Ok(Self {
            api_base_url,
            preference_dir: std::env::var("CROP_PREFERENCE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREFERENCE_DIR)),
        })
    }
}

/// Trim whitespace and trailing slashes; reject anything that isn't http(s).
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("Invalid base URL: '{}'", url);
    }
    Ok(trimmed.to_string())
}
