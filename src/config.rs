use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::error::{HiveError, Result};

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
pub const MISSING_KEY_WARNING: &str =
    "Warning: YOUTUBE_API_KEY environment variable not set. Using a placeholder.";

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/chat";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b";

/// YouTube Data API key. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Credential(key.into())
    }

    pub fn placeholder() -> Self {
        Credential(PLACEHOLDER_API_KEY.to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_API_KEY
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            f.write_str("Credential(<placeholder>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// Returns the key when one is set, otherwise writes a single warning line to
/// `out` and falls back to the placeholder. An empty value counts as unset.
pub fn load_credential(value: Option<String>, out: &mut impl Write) -> Result<Credential> {
    match value {
        Some(key) if !key.is_empty() => Ok(Credential::new(key)),
        _ => {
            writeln!(out, "{}", MISSING_KEY_WARNING)?;
            warn!("{} unset, YouTube searches will be rejected", API_KEY_VAR);
            Ok(Credential::placeholder())
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: Credential,
    pub youtube_api_url: String,
    pub youtube_max_results: u32,
    pub youtube_published_within_days: u32,
    pub ollama_url: String,
    pub ollama_model: String,
    pub max_iterations: usize,
}

impl Config {
    /// Builds the configuration from an explicit variable source. The missing
    /// key warning, if any, is written to `out`.
    pub fn from_lookup<F>(lookup: F, out: &mut impl Write) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strict = lookup("REQUIRE_YOUTUBE_API_KEY")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let raw_key = lookup(API_KEY_VAR);
        if strict && raw_key.as_deref().is_none_or(str::is_empty) {
            return Err(HiveError::MissingCredential(API_KEY_VAR));
        }
        let youtube_api_key = load_credential(raw_key, out)?;

        Ok(Self {
            youtube_api_key,
            youtube_api_url: lookup("YOUTUBE_API_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string()),
            youtube_max_results: lookup("YOUTUBE_MAX_RESULTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            youtube_published_within_days: lookup("YOUTUBE_PUBLISHED_WITHIN_DAYS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            ollama_url: lookup("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: lookup("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            max_iterations: lookup("HIVE_MAX_ITERATIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        })
    }
}
