//! Configuration module for the dealership backend
//!
//! This module handles loading and validating configuration from environment
//! variables.

use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub tracing: TracingSettings,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    pub host: String,
    /// Main API port
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: Environment,
}

/// Environment type
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// API token configuration
///
/// One static bearer token per role. Unset tokens disable that role's
/// access entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub admin_token: Option<String>,
    pub manager_token: Option<String>,
    pub clerk_token: Option<String>,
    pub viewer_token: Option<String>,
}

/// Tracing settings
#[derive(Debug, Clone, Deserialize)]
pub struct TracingSettings {
    /// Service name for log output
    pub service_name: String,
    /// Enable JSON logging
    pub json_logs: bool,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self> {
        let settings = Settings {
            server: ServerSettings {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Invalid PORT")?,
                environment: match env::var("RUST_ENV")
                    .unwrap_or_else(|_| "development".to_string())
                    .as_str()
                {
                    "production" => Environment::Production,
                    "staging" => Environment::Staging,
                    _ => Environment::Development,
                },
            },
            auth: AuthSettings {
                admin_token: env::var("ADMIN_API_TOKEN").ok(),
                manager_token: env::var("MANAGER_API_TOKEN").ok(),
                clerk_token: env::var("CLERK_API_TOKEN").ok(),
                viewer_token: env::var("VIEWER_API_TOKEN").ok(),
            },
            tracing: TracingSettings {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "lotkeeper-backend".to_string()),
                json_logs: env::var("JSON_LOGS")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("PORT cannot be 0");
        }

        // Token strength rules apply outside development. Staging often has
        // production-like data and should be similarly protected.
        if self.server.environment == Environment::Production
            || self.server.environment == Environment::Staging
        {
            let tokens = [
                ("ADMIN_API_TOKEN", &self.auth.admin_token),
                ("MANAGER_API_TOKEN", &self.auth.manager_token),
                ("CLERK_API_TOKEN", &self.auth.clerk_token),
                ("VIEWER_API_TOKEN", &self.auth.viewer_token),
            ];

            for (name, token) in tokens {
                if let Some(token) = token {
                    if token.len() < 16 {
                        anyhow::bail!(
                            "{} must be at least 16 characters in production/staging",
                            name
                        );
                    }

                    let weak_tokens = ["secret", "password", "change-me", "test", "demo"];
                    for weak in weak_tokens {
                        if token.to_lowercase().contains(weak) {
                            anyhow::bail!(
                                "{} contains weak pattern '{}' - use a strong random token",
                                name,
                                weak
                            );
                        }
                    }
                }
            }

            if self.auth.admin_token.is_none() {
                anyhow::bail!("ADMIN_API_TOKEN must be set in production/staging");
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Load settings for testing (with defaults)
    pub fn load_for_testing() -> Self {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                environment: Environment::Development,
            },
            auth: AuthSettings {
                admin_token: Some("admin-token".to_string()),
                manager_token: Some("manager-token".to_string()),
                clerk_token: Some("clerk-token".to_string()),
                viewer_token: Some("viewer-token".to_string()),
            },
            tracing: TracingSettings {
                service_name: "lotkeeper-backend".to_string(),
                json_logs: false,
            },
        }
    }
}
