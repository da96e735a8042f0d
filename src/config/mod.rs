use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Paths that bypass the bearer-token check entirely.
pub const PUBLIC_EXACT_PATHS: &[&str] = &["/", "/favicon.ico"];
pub const PUBLIC_PATH_PREFIXES: &[&str] = &["/swagger", "/api-docs", "/health"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
    /// Overrides that failed to parse. Logged once tracing is up.
    #[serde(skip)]
    pub rejected_overrides: Vec<ConfigError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Ignoring invalid {key}={value:?}, keeping {kept}")]
    InvalidOverride {
        key: &'static str,
        value: String,
        kept: String,
    },
}

fn parse_override<T>(
    key: &'static str,
    raw: Option<String>,
    current: T,
    rejected: &mut Vec<ConfigError>,
) -> T
where
    T: FromStr + ToString,
{
    let Some(value) = raw else {
        return current;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            rejected.push(ConfigError::InvalidOverride {
                key,
                kept: current.to_string(),
                value,
            });
            current
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub min_token_length: usize,
    pub public_paths: Vec<String>,
    pub public_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_token_length: 10,
            public_paths: PUBLIC_EXACT_PATHS.iter().map(|p| p.to_string()).collect(),
            public_prefixes: PUBLIC_PATH_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    /// Apply per-key overrides from `lookup`. A value that does not parse
    /// keeps the preset and is recorded in `rejected_overrides`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut rejected = Vec::new();

        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        let (port_key, port) = match lookup("USERS_API_PORT") {
            Some(v) => ("USERS_API_PORT", Some(v)),
            None => ("PORT", lookup("PORT")),
        };
        self.server.port = parse_override(port_key, port, self.server.port, &mut rejected);
        if let Some(v) = lookup("LOG_LEVEL") {
            self.server.log_level = v;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        self.database.max_connections = parse_override(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            self.database.max_connections,
            &mut rejected,
        );
        self.database.connection_timeout = parse_override(
            "DATABASE_CONNECTION_TIMEOUT",
            lookup("DATABASE_CONNECTION_TIMEOUT"),
            self.database.connection_timeout,
            &mut rejected,
        );

        // API overrides
        self.api.enable_request_logging = parse_override(
            "API_ENABLE_REQUEST_LOGGING",
            lookup("API_ENABLE_REQUEST_LOGGING"),
            self.api.enable_request_logging,
            &mut rejected,
        );

        // Auth overrides
        self.auth.min_token_length = parse_override(
            "AUTH_MIN_TOKEN_LENGTH",
            lookup("AUTH_MIN_TOKEN_LENGTH"),
            self.auth.min_token_length,
            &mut rejected,
        );

        // Security overrides
        self.security.enable_cors = parse_override(
            "SECURITY_ENABLE_CORS",
            lookup("SECURITY_ENABLE_CORS"),
            self.security.enable_cors,
            &mut rejected,
        );

        self.rejected_overrides = rejected;
        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                log_level: "debug".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            auth: AuthConfig::default(),
            security: SecurityConfig { enable_cors: true },
            rejected_overrides: Vec::new(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            auth: AuthConfig::default(),
            security: SecurityConfig { enable_cors: false },
            rejected_overrides: Vec::new(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
