//! The embedded `lessons.toml` and its build-time override.

use store::ClientConfig;

const EMBEDDED: &str = include_str!("../lessons.toml");

/// Parse the embedded config, falling back to defaults when it is unreadable.
pub fn load() -> ClientConfig {
    resolve(EMBEDDED, option_env!("LESSONS_API_URL"))
}

fn resolve(raw: &str, api_url: Option<&str>) -> ClientConfig {
    let config = match ClientConfig::from_toml(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, file = ClientConfig::filename(), "invalid config, using defaults");
            ClientConfig::default()
        }
    };
    match api_url.map(str::trim) {
        Some(url) if !url.is_empty() => config.with_api_base_url(url),
        _ => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = ClientConfig::from_toml(EMBEDDED).unwrap();
        assert_eq!(config.feed.page_size, 9);
        assert_eq!(config.feed.search_debounce_ms, 300);
    }

    #[test]
    fn test_api_url_override() {
        let config = resolve(EMBEDDED, Some("https://api.example.com"));
        assert_eq!(config.api.base_url, "https://api.example.com");

        let config = resolve(EMBEDDED, Some("  "));
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_broken_config_falls_back() {
        let config = resolve("[feed\npage_size = ", None);
        assert_eq!(config, ClientConfig::default());
    }
}
