//! Server configuration

use serde::Deserialize;
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Directory containing the model artifact files
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// Number of ranked entries returned per prediction
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Origins allowed by the CORS layer; empty means same-origin only
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, model_dir_override: Option<&str>) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model_dir) = model_dir_override {
            config.model_dir = model_dir.to_string();
        }

        if config.top_k == 0 {
            anyhow::bail!("top_k must be at least 1");
        }

        // The CORS layer needs every origin as a header value; a typo in
        // the config must fail startup, not silently shrink the allow-list.
        for origin in &config.allowed_origins {
            origin
                .parse::<axum::http::HeaderValue>()
                .map_err(|_| anyhow::anyhow!("invalid allowed origin: {origin:?}"))?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            top_k: default_top_k(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_model_dir() -> String {
    "models/isl_angles_model".to_string()
}

fn default_top_k() -> usize {
    signserve_model::DEFAULT_TOP_K
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}
