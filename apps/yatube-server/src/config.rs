//! Application configuration loaded from environment variables.

use std::env;

use yatube_core::Paginator;
use yatube_core::pagination::DEFAULT_PAGE_SIZE;
use yatube_infra::DatabaseConfig;

use crate::middleware::session::SessionSettings;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub posts_per_page: u64,
    pub session: SessionSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| var(key).and_then(|s| s.trim().parse::<u64>().ok());

        let database = var("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(100),
            min_connections: parsed("DB_MIN_CONNECTIONS")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(10),
        });

        let defaults = SessionSettings::default();
        let session = SessionSettings {
            login_url: var("LOGIN_URL").unwrap_or(defaults.login_url),
            secure_cookies: var("SECURE_COOKIES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.secure_cookies),
        };

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed("PORT")
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(8080),
            database,
            posts_per_page: parsed("POSTS_PER_PAGE")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            session,
        }
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.posts_per_page).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = config_from(&[]);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.paginator().per_page(), 10);
        assert_eq!(config.session.login_url, "/auth/login/");
        assert!(!config.session.secure_cookies);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/yatube"),
            ("DB_MAX_CONNECTIONS", "20"),
            ("POSTS_PER_PAGE", "25"),
            ("LOGIN_URL", "/accounts/login/"),
            ("SECURE_COOKIES", "true"),
        ]);

        assert_eq!(config.port, 9000);
        let database = config.database.as_ref().unwrap();
        assert_eq!(database.url, "postgres://localhost/yatube");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
        assert_eq!(config.paginator().per_page(), 25);
        assert_eq!(config.session.login_url, "/accounts/login/");
        assert!(config.session.secure_cookies);
    }

    #[test]
    fn test_invalid_page_size_falls_back_to_default() {
        assert_eq!(config_from(&[("POSTS_PER_PAGE", "0")]).posts_per_page, 10);
        assert_eq!(config_from(&[("POSTS_PER_PAGE", "many")]).posts_per_page, 10);
    }
}
