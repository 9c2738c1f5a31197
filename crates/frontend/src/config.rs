use serde::Deserialize;

use crate::api::{self, ApiError};

/// Path the static host serves client settings from.
const CONFIG_PATH: &str = "/app-config.json";

/// Runtime client settings, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub mapbox_access_token: String,
    #[serde(default = "default_style_url")]
    pub map_style_url: String,
}

fn default_style_url() -> String {
    "mapbox://styles/mapbox/streets-v11".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001".to_string(),
            mapbox_access_token: String::new(),
            map_style_url: default_style_url(),
        }
    }
}

impl AppConfig {
    /// Style URL handed to the map. Plain `https` style URLs carry the token
    /// as a query parameter; `mapbox://` URLs are resolved by the SDK itself.
    pub fn style_url(&self) -> String {
        style_url_with_token(&self.map_style_url, &self.mapbox_access_token)
    }
}

pub fn style_url_with_token(style_url: &str, token: &str) -> String {
    if token.is_empty() || !style_url.starts_with("https://") || style_url.contains("access_token=") {
        return style_url.to_string();
    }
    let sep = if style_url.contains('?') { '&' } else { '?' };
    format!("{style_url}{sep}access_token={token}")
}

/// Fetch settings from the serving origin.
pub async fn load() -> Result<AppConfig, ApiError> {
    let url = format!("{}{}", api::origin(), CONFIG_PATH);
    api::get_json(&url, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes() {
        let json = r#"{"apiBaseUrl":"https://api.example.com","mapboxAccessToken":"pk.abc","mapStyleUrl":"mapbox://styles/mapbox/light-v11"}"#;
        let cfg: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.api_base_url, "https://api.example.com");
        assert_eq!(cfg.mapbox_access_token, "pk.abc");
        assert_eq!(cfg.map_style_url, "mapbox://styles/mapbox/light-v11");
    }

    #[test]
    fn test_config_defaults_optional_fields() {
        let cfg: AppConfig = serde_json::from_str(r#"{"apiBaseUrl":"/api"}"#).unwrap();
        assert!(cfg.mapbox_access_token.is_empty());
        assert_eq!(cfg.map_style_url, "mapbox://styles/mapbox/streets-v11");
    }

    #[test]
    fn test_https_style_gets_token() {
        assert_eq!(
            style_url_with_token("https://api.mapbox.com/styles/v1/mapbox/streets-v11", "pk.1"),
            "https://api.mapbox.com/styles/v1/mapbox/streets-v11?access_token=pk.1"
        );
        assert_eq!(
            style_url_with_token("https://tiles.example.com/style.json?v=2", "pk.1"),
            "https://tiles.example.com/style.json?v=2&access_token=pk.1"
        );
    }

    #[test]
    fn test_style_left_alone() {
        assert_eq!(
            style_url_with_token("mapbox://styles/mapbox/streets-v11", "pk.1"),
            "mapbox://styles/mapbox/streets-v11"
        );
        assert_eq!(
            style_url_with_token("https://a.example/s.json", ""),
            "https://a.example/s.json"
        );
        assert_eq!(
            style_url_with_token("https://a.example/s.json?access_token=x", "pk.1"),
            "https://a.example/s.json?access_token=x"
        );
    }
}
