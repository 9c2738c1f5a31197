use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::Serialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/streets-v11";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {source}")]
    Port {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Settings the browser client needs at startup, served as `/app-config.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_base_url: String,
    pub mapbox_access_token: String,
    pub map_style_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
    pub static_dir: PathBuf,
    pub client: ClientConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or empty variables fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::Port { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(ServerConfig {
            port,
            dist_dir: PathBuf::from(get("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| "static".to_string())),
            client: ClientConfig {
                api_base_url: get("API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                mapbox_access_token: get("MAPBOX_ACCESS_TOKEN").unwrap_or_default(),
                map_style_url: get("MAPBOX_STYLE_URL")
                    .unwrap_or_else(|| DEFAULT_STYLE_URL.to_string()),
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.dist_dir, PathBuf::from("dist"));
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
        assert_eq!(cfg.client.api_base_url, "http://localhost:3001");
        assert_eq!(cfg.client.mapbox_access_token, "");
        assert_eq!(cfg.client.map_style_url, "mapbox://styles/mapbox/streets-v11");
    }

    #[test]
    fn test_overrides() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DIST_DIR", "/srv/dist"),
            ("API_BASE_URL", "https://api.example.com/"),
            ("MAPBOX_ACCESS_TOKEN", "pk.test"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.dist_dir, PathBuf::from("/srv/dist"));
        assert_eq!(cfg.client.api_base_url, "https://api.example.com");
        assert_eq!(cfg.client.mapbox_access_token, "pk.test");
        assert_eq!(cfg.addr().port(), 8080);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[("PORT", ""), ("DIST_DIR", "  ")])).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_bad_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_client_config_serializes_camel_case() {
        let cfg = ServerConfig::from_lookup(lookup_from(&[("MAPBOX_ACCESS_TOKEN", "pk.x")])).unwrap();
        let json = serde_json::to_value(&cfg.client).unwrap();
        assert_eq!(json["mapboxAccessToken"], "pk.x");
        assert_eq!(json["apiBaseUrl"], "http://localhost:3001");
        assert!(json.get("mapStyleUrl").is_some());
    }
}
