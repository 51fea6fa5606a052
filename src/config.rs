use crate::tokenizer::{StopWordEntry, StopWords};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://openapi.etsy.com/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shops analyzed when an interactive session starts
pub const DEFAULT_SHOPS: &[&str] = &[
    "Element83",
    "LDawningScott",
    "PegandAwl",
    "SinScissorsBoutique",
    "OxAndPine",
    "volaris",
    "moderntextures",
    "CarveCraftworks",
    "EbanisteriaCavallaro",
    "SheetMusicEphemera",
];

/// Process configuration, read once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "API_KEY")]
    pub api_key: String,
    /// `None` selects the built-in English list
    #[serde(rename = "STOP_WORDS", default)]
    pub stop_words: Option<Vec<StopWordEntry>>,
    #[serde(rename = "API_BASE_URL", default = "default_base_url")]
    pub api_base_url: String,
    #[serde(rename = "REQUEST_TIMEOUT_SECS", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(rename = "DEFAULT_SHOPS", default = "default_shops")]
    pub default_shops: Vec<String>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_shops() -> Vec<String> {
    DEFAULT_SHOPS.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config")
    }

    pub fn stop_words(&self) -> StopWords {
        match &self.stop_words {
            Some(entries) => StopWords::from_entries(entries),
            None => StopWords::english(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
