// src/config.rs
//! Settings loaded from environment variables. `.env` files are honored by
//! the binary (dotenvy) before this module reads anything.
//!
//! The backend adapter assumes it is handed valid configuration; missing
//! credentials are detected here at startup and reported by the caller.

use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_NEWSDATA_API_URL: &str = "https://api.newdata.io/v1";
pub const DEFAULT_SERPAPI_API_URL: &str = "https://serpapi.com/search";

/// Which upstream strategy the adapter runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Newsdata,
    Serp,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newsdata" => Ok(Self::Newsdata),
            "serp" | "serpapi" => Ok(Self::Serp),
            other => bail!("unsupported UPSTREAM_BACKEND: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub host: String,
    pub port: u16,
    pub env: String,
    pub backend: BackendKind,
    pub newsdata_api_url: String,
    pub newsdata_api_key: String,
    pub serpapi_api_url: String,
    pub serpapi_api_key: String,
    pub allowed_origins: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "news-gateway".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            env: "production".to_string(),
            backend: BackendKind::Newsdata,
            newsdata_api_url: DEFAULT_NEWSDATA_API_URL.to_string(),
            newsdata_api_key: String::new(),
            serpapi_api_url: DEFAULT_SERPAPI_API_URL.to_string(),
            serpapi_api_key: String::new(),
            allowed_origins: "*".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let port = env_or("PORT", "8080")
            .parse::<u16>()
            .context("PORT must be a number in 1..=65535")?;
        let request_timeout_secs = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?;
        let backend = env_or("UPSTREAM_BACKEND", "newsdata").parse::<BackendKind>()?;

        Ok(Self {
            app_name: env_or("APP_NAME", &defaults.app_name),
            app_version: defaults.app_version,
            host: env_or("HOST", &defaults.host),
            port,
            env: env_or("APP_ENV", &defaults.env),
            backend,
            newsdata_api_url: env_or("NEWSDATA_API_URL", DEFAULT_NEWSDATA_API_URL),
            newsdata_api_key: env_or("NEWSDATA_API_KEY", ""),
            serpapi_api_url: env_or("SERPAPI_API_URL", DEFAULT_SERPAPI_API_URL),
            serpapi_api_key: env_or("SERPAPI_API_KEY", ""),
            allowed_origins: env_or("ALLOWED_ORIGINS", "*"),
            request_timeout_secs,
        })
    }

    /// Startup warnings for incomplete configuration. Never fatal; the
    /// gateway still boots, upstream calls just go out unauthenticated.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        match self.backend {
            BackendKind::Newsdata if self.newsdata_api_key.is_empty() => {
                warnings
                    .push("NEWSDATA_API_KEY is not set; upstream calls are unauthenticated".into());
            }
            BackendKind::Serp if self.serpapi_api_key.is_empty() => {
                warnings
                    .push("SERPAPI_API_KEY is not set; upstream calls are unauthenticated".into());
            }
            _ => {}
        }
        warnings
    }

    pub fn is_development(&self) -> bool {
        matches!(
            self.env.to_ascii_lowercase().as_str(),
            "development" | "dev" | "local"
        )
    }

    /// `None` means any origin; otherwise the parsed comma-separated list.
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        if self.allowed_origins.trim() == "*" {
            return None;
        }
        Some(
            self.allowed_origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const VARS: &[&str] = &[
        "APP_NAME",
        "HOST",
        "PORT",
        "APP_ENV",
        "UPSTREAM_BACKEND",
        "NEWSDATA_API_URL",
        "NEWSDATA_API_KEY",
        "SERPAPI_API_URL",
        "SERPAPI_API_KEY",
        "ALLOWED_ORIGINS",
        "REQUEST_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[serial_test::serial]
    #[test]
    fn defaults_apply_without_env() {
        clear_env();
        let s = Settings::from_env().unwrap();
        assert_eq!(s.app_name, "news-gateway");
        assert_eq!(s.port, 8080);
        assert_eq!(s.env, "production");
        assert_eq!(s.backend, BackendKind::Newsdata);
        assert_eq!(s.newsdata_api_url, DEFAULT_NEWSDATA_API_URL);
        assert_eq!(s.request_timeout_secs, 30);
        assert!(!s.is_development());
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_and_backend_parse() {
        clear_env();
        env::set_var("UPSTREAM_BACKEND", "SerpApi");
        env::set_var("APP_ENV", "development");
        env::set_var("PORT", "9999");
        let s = Settings::from_env().unwrap();
        assert_eq!(s.backend, BackendKind::Serp);
        assert_eq!(s.port, 9999);
        assert!(s.is_development());
        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn unknown_backend_is_rejected() {
        clear_env();
        env::set_var("UPSTREAM_BACKEND", "gopher");
        assert!(Settings::from_env().is_err());
        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn missing_credential_produces_a_warning() {
        clear_env();
        let s = Settings::from_env().unwrap();
        let warnings = s.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NEWSDATA_API_KEY"));

        env::set_var("NEWSDATA_API_KEY", "secret");
        let s = Settings::from_env().unwrap();
        assert!(s.validate().is_empty());
        clear_env();
    }

    #[test]
    fn cors_origins_parse() {
        let mut s = Settings::default();
        assert_eq!(s.cors_origins(), None);

        s.allowed_origins = "https://a.example, https://b.example ,".to_string();
        assert_eq!(
            s.cors_origins(),
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }
}
