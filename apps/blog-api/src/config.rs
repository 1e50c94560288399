//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use blog_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Whether commenting on a missing post creates it.
    pub comment_upsert: bool,
    /// Allowed CORS origins; empty or `*` means any origin.
    pub cors_origins: Vec<String>,
    /// Maximum JSON request body, in bytes.
    pub json_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DB_URI").ok().map(|uri| DatabaseConfig {
            database: env::var("DB_NAME")
                .unwrap_or_else(|_| DatabaseConfig::DEFAULT_DATABASE.to_string()),
            collection: env::var("DB_COLLECTION")
                .unwrap_or_else(|_| DatabaseConfig::DEFAULT_COLLECTION.to_string()),
            connect_timeout: Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT_SECS", 10)),
            app_name: Some(env!("CARGO_PKG_NAME").to_string()),
            uri,
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 5000),
            database,
            comment_upsert: env::var("COMMENT_UPSERT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            json_limit: parse_var("JSON_LIMIT_BYTES", 100 * 1024),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

/// Format: comma-separated origins, e.g. `https://a.example,https://b.example`.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins("https://a.example, ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }
}
