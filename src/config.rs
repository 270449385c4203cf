//! Configuration management

use std::{env, path::Path};

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// Environment files to load before resolving the service token.
    /// Paths support ~ expansion. Loaded in order, later files override earlier.
    #[serde(default)]
    pub env_files: Vec<String>,
    /// Server configuration
    pub server: ServerConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Authentication configuration for protected routes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared service token callers must present in `x-service-token`.
    /// Supports: literal value or `env:VAR_NAME` indirection.
    pub service_token: Option<String>,

    /// Token values that mean "never configured". A resolved token equal
    /// to any of these makes every protected route fail server-side.
    #[serde(default = "default_placeholder_tokens")]
    pub placeholder_tokens: Vec<String>,
}

fn default_placeholder_tokens() -> Vec<String> {
    [
        "changeme",
        "change-me",
        "replace-token",
        "placeholder",
        "dev-token",
        "test-token",
    ]
    .map(str::to_string)
    .to_vec()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_token: Some("env:ANALYTICS_SERVICE_TOKEN".to_string()),
            placeholder_tokens: default_placeholder_tokens(),
        }
    }
}

impl AuthConfig {
    /// Resolve the service token (expand `env:VAR_NAME` indirection).
    ///
    /// Returns `None` when no token is configured or the referenced
    /// environment variable is unset. The unresolved `env:` literal is
    /// never used as a token value.
    #[must_use]
    pub fn resolve_service_token(&self) -> Option<String> {
        let raw = self.service_token.as_ref()?;
        if let Some(var_name) = raw.strip_prefix("env:") {
            env::var(var_name).ok()
        } else {
            Some(raw.clone())
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        // Load from file if provided
        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        // Merge environment variables (WMS_ANALYTICS_ prefix)
        figment = figment.merge(Env::prefixed("WMS_ANALYTICS_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // Load env files into process environment (before token resolution)
        config.load_env_files();

        Ok(config)
    }

    /// Load environment files into the process environment.
    /// Supports ~ expansion. Files that don't exist are silently skipped.
    fn load_env_files(&self) {
        for path_str in &self.env_files {
            let expanded = if path_str.starts_with('~') {
                if let Some(home) = dirs::home_dir() {
                    path_str.replacen('~', &home.display().to_string(), 1)
                } else {
                    path_str.clone()
                }
            } else {
                path_str.clone()
            };

            let path = Path::new(&expanded);
            if path.exists() {
                match dotenvy::from_path(path) {
                    Ok(()) => {
                        tracing::info!("Loaded env file: {expanded}");
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load env file {expanded}: {e}");
                    }
                }
            } else {
                tracing::debug!("Env file not found (skipped): {expanded}");
            }
        }
    }
}
