use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,*";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not found in environment variables. Please create a .env file with your API key.")]
    MissingApiKey,
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Which browser origins may call the API. Credentials are allowed either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, mirrored back to the caller. Insecure with credentials.
    AnyOrigin,
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut origins = Vec::new();
        for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if origin == "*" {
                return Ok(Self::AnyOrigin);
            }
            let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                name: "CORS_ALLOWED_ORIGINS",
                value: origin.to_string(),
            })?;
            origins.push(value);
        }
        Ok(Self::Origins(origins))
    }

    pub fn layer(&self) -> CorsLayer {
        let allow_origin = match self {
            Self::AnyOrigin => AllowOrigin::mirror_request(),
            Self::Origins(origins) => AllowOrigin::list(origins.iter().cloned()),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub gemini: GeminiSettings,
    pub cors: CorsPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = var("GEMINI_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let model = var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = var("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let host = parse_or("HOST", var("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        let cors = CorsPolicy::parse(
            var("CORS_ALLOWED_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        )?;

        Ok(Self {
            host,
            port,
            gemini: GeminiSettings {
                api_key,
                model,
                base_url,
            },
            cors,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = config_from(&[("GEMINI_API_KEY", "secret")]).unwrap();

        assert_eq!(config.gemini.api_key, "secret");
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.cors, CorsPolicy::AnyOrigin);
    }

    #[test]
    fn missing_or_blank_key_is_fatal() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::MissingApiKey);
        assert_eq!(
            config_from(&[("GEMINI_API_KEY", "   ")]).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_BASE_URL", "http://localhost:9999/"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3001"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://aura.example"),
        ])
        .unwrap();

        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.base_url, "http://localhost:9999");
        assert_eq!(config.bind_addr(), "127.0.0.1:3001".parse().unwrap());
        assert_eq!(
            config.cors,
            CorsPolicy::Origins(vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://aura.example"),
            ])
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = config_from(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
