//! # Router Configuration
//!
//! Loads the CORS policy and the always-on mode from a YAML, TOML or JSON file.
//!
//! ```yaml
//! cors_always_on: false
//! cors:
//!   allowed_origins: ["https://app.example.com", "http://localhost:3000"]
//!   allowed_methods: ["GET", "POST", "PUT", "DELETE"]
//!   allowed_headers: ["Content-Type", "Authorization"]
//!   allow_credentials: true
//!   max_age: 600
//! ```
//!
//! The format is chosen by extension (`.yaml`/`.yml`, `.toml`, `.json`). Omitting `cors`
//! leaves routers on the built-in permissive policy.
//!
//! ## Environment Variables
//!
//! ### `RESTROUTE_CORS_ALWAYS_ON`
//!
//! Overrides `cors_always_on` from the file. Accepts `true`/`false`/`1`/`0`
//! (case-insensitive); anything else is ignored.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::middleware::cors::{CorsConfig, CorsResolver};
use crate::router::Router;

pub const CORS_ALWAYS_ON_ENV: &str = "RESTROUTE_CORS_ALWAYS_ON";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RouterConfig {
    pub cors: Option<CorsConfig>,
    pub cors_always_on: bool,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl RouterConfig {
    /// Read, parse and validate a configuration file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let mut config: RouterConfig = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            "toml" => toml::from_str(&text)
                .with_context(|| format!("invalid TOML in {}", path.display()))?,
            "json" => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", path.display()))?,
            other => bail!(
                "unsupported config format '{}' for {} (expected yaml, yml, toml or json)",
                other,
                path.display()
            ),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(flag) = env::var(CORS_ALWAYS_ON_ENV).ok().as_deref().and_then(parse_flag) {
            self.cors_always_on = flag;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(cors) = &self.cors {
            cors.validate().context("invalid cors section")?;
        }
        Ok(())
    }

    #[must_use]
    pub fn resolver(&self) -> CorsResolver {
        CorsResolver::with_always_on(self.cors_always_on)
    }

    /// The policy routers will use: the configured one or the permissive default
    #[must_use]
    pub fn effective_cors(&self) -> CorsConfig {
        self.cors.clone().unwrap_or_else(CorsConfig::permissive)
    }

    /// Install the policy (when configured) and the resolver mode on a router.
    pub fn apply_to(&self, router: &mut Router) {
        if let Some(cors) = &self.cors {
            router.set_cors_config(cors.clone());
        }
        router.set_cors_resolver(self.resolver());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn test_effective_cors_defaults_to_permissive() {
        assert_eq!(RouterConfig::default().effective_cors(), CorsConfig::permissive());
        assert!(!RouterConfig::default().resolver().is_always_on());
    }
}
