//! Headless CMS HTTP client
//!
//! One authorized GET per entry, single attempt, no retry. Every way a fetch
//! can go wrong is captured in [`FetchError`]; the resolver turns all of them
//! into static-fallback content, so nothing here surfaces to a visitor.

pub mod schema;

use crate::config::CmsConfig;
use crate::locale::Locale;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Why a CMS fetch failed. Diagnostic only; callers fall back regardless.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("CMS configuration missing: {0}")]
    ConfigMissing(&'static str),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CMS returned HTTP {0}")]
    Http(StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// HTTP client for the CMS content API.
#[derive(Debug)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CmsClient {
    /// Build a client from configuration. Missing base URL or token fails
    /// closed so the caller can route to fallback content.
    pub fn from_config(config: &CmsConfig) -> Result<Self, FetchError> {
        if config.base_url.is_empty() {
            return Err(FetchError::ConfigMissing("cms.base_url"));
        }
        let token = config
            .token()
            .ok_or(FetchError::ConfigMissing("cms.api_token"))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("folio-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch one content resource with all relations populated.
    ///
    /// Returns the raw JSON document; shape validation happens separately in
    /// [`decode`] so that a non-JSON body and a well-formed-but-wrong body
    /// are distinguishable in logs.
    pub async fn fetch(&self, resource: &str, locale: Locale) -> Result<serde_json::Value, FetchError> {
        let url = format!(
            "{}/api/{}?populate=*&locale={}",
            self.base_url,
            resource,
            locale.code()
        );

        tracing::debug!(%url, "fetching CMS resource");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(FetchError::Decode)
    }

    /// Validate a raw JSON document against an ingress schema.
    pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, FetchError> {
        serde_json::from_value(value).map_err(|err| FetchError::Shape(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::schema::{Entry, Envelope, HomeAttrs};

    #[test]
    fn test_missing_base_url_fails_closed() {
        let config = CmsConfig::default();
        let err = CmsClient::from_config(&config).unwrap_err();
        assert!(matches!(err, FetchError::ConfigMissing("cms.base_url")));
    }

    #[test]
    fn test_missing_token_fails_closed() {
        let config = CmsConfig {
            base_url: "https://cms.example.com".to_string(),
            api_token: String::new(),
        };
        let err = CmsClient::from_config(&config).unwrap_err();
        assert!(matches!(err, FetchError::ConfigMissing("cms.api_token")));
    }

    #[test]
    fn test_decode_missing_required_field_is_shape_error() {
        let value = serde_json::json!({ "data": { "id": 1, "attributes": {} }, "meta": {} });
        let result = CmsClient::decode::<Envelope<Entry<HomeAttrs>>>(value);
        assert!(matches!(result, Err(FetchError::Shape(_))));
    }
}
