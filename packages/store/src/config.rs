//! # Client configuration — `lessons.toml`
//!
//! Defines the TOML document the web app embeds at build time (filename:
//! [`ClientConfig::filename`] = `"lessons.toml"`). It tells the client where the
//! backend lives and how to reach the identity provider.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//!
//! [identity]
//! api_key = "..."
//! base_url = "https://identitytoolkit.googleapis.com/v1"
//!
//! [google]
//! client_id = "..."
//! redirect_uri = "http://localhost:8080/auth/callback"
//!
//! [feed]
//! page_size = 9
//! search_debounce_ms = 300
//! ```
//!
//! Every section derives `Default`, so a missing section or an empty file is
//! equivalent to the development defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `lessons.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// REST backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

/// Identity provider (Firebase Identity Toolkit) settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_identity_base_url")]
    pub base_url: String,
}

fn default_identity_base_url() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_identity_base_url(),
        }
    }
}

/// Google sign-in settings. An empty client id hides the Google button.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default = "default_google_redirect_uri")]
    pub redirect_uri: String,
}

fn default_google_redirect_uri() -> String {
    "http://localhost:8080/auth/callback".to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            redirect_uri: default_google_redirect_uri(),
        }
    }
}

/// Public feed behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_page_size() -> usize {
    9
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "lessons.toml"
    }

    /// Builder method to point the client at another backend.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Whether Google sign-in can be offered.
    pub fn google_enabled(&self) -> bool {
        !self.google.client_id.trim().is_empty()
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.feed.page_size, 9);
        assert!(!config.google_enabled());
    }

    #[test]
    fn test_partial_sections() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://lessons.example.com"

            [google]
            client_id = "abc.apps.googleusercontent.com"

            [feed]
            search_debounce_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://lessons.example.com");
        assert!(config.google_enabled());
        assert_eq!(config.google.redirect_uri, "http://localhost:8080/auth/callback");
        assert_eq!(config.feed.page_size, 9);
        assert_eq!(config.feed.search_debounce_ms, 500);
        assert_eq!(
            config.identity.base_url,
            "https://identitytoolkit.googleapis.com/v1"
        );
    }

    #[test]
    fn test_toml_roundtrip_keeps_override() {
        let config = ClientConfig::default().with_api_base_url("https://api.test");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
