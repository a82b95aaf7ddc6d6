//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides the configured CMS token.
pub const CMS_TOKEN_ENV: &str = "FOLIO_CMS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,

    // Directory for static assets served under /assets
    pub assets_dir: String,

    // CMS
    #[serde(default)]
    pub cms: CmsConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            author: "Jane Doe".to_string(),
            description: String::new(),
            assets_dir: "assets".to_string(),
            cms: CmsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Headless CMS connection configuration
///
/// Both fields are required for live content; when either is missing the
/// resolver serves static fallback content instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS, e.g. `https://cms.example.com`
    pub base_url: String,
    /// API token; the `FOLIO_CMS_TOKEN` environment variable takes precedence
    pub api_token: String,
}

impl CmsConfig {
    /// The effective API token, preferring the environment override.
    pub fn token(&self) -> Option<String> {
        match std::env::var(CMS_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => Some(token),
            _ if !self.api_token.is_empty() => Some(self.api_token.clone()),
            _ => None,
        }
    }
}

/// Server bind configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.server.port, 4000);
        assert!(config.cms.base_url.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
cms:
  base_url: https://cms.example.com
  api_token: secret
server:
  port: 8080
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.cms.base_url, "https://cms.example.com");
        assert_eq!(config.server.port, 8080);
        // Unspecified sections keep their defaults
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.assets_dir, "assets");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: From Disk").unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "From Disk");
    }
}
