// backend/services/orders/api/src/config.rs

use serde_json::{Value, json};
use shared_kernel::errors::{AppError, AppResult, ErrorCode};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "fatal"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            "test" => Some(Self::Test),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub port: u16,
    pub database_url: Option<String>,
    pub use_inmemory: bool,
    pub log_level: String,
    pub outbox_batch_size: u32,
    pub outbox_poll_interval_ms: u64,
    pub pricing_base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Toute la validation en un passage : chaque champ fautif est
    /// collecté, puis une seule erreur structurée les liste tous.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut offending: Vec<Value> = Vec::new();

        let env = match lookup("NODE_ENV") {
            None => Environment::Development,
            Some(raw) => Environment::parse(&raw).unwrap_or_else(|| {
                offending.push(json!({
                    "field": "NODE_ENV",
                    "reason": format!("'{raw}' is not one of development|production|test"),
                }));
                Environment::Development
            }),
        };

        let port = match lookup("PORT") {
            None => 3000,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    offending.push(json!({
                        "field": "PORT",
                        "reason": format!("'{raw}' is not a positive integer"),
                    }));
                    3000
                }
            },
        };

        let use_inmemory = match lookup("USE_INMEMORY").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(raw) => {
                offending.push(json!({
                    "field": "USE_INMEMORY",
                    "reason": format!("'{raw}' is not a boolean string"),
                }));
                false
            }
        };

        let database_url = lookup("DATABASE_URL");
        if database_url.is_none() && !use_inmemory {
            offending.push(json!({
                "field": "DATABASE_URL",
                "reason": "required unless USE_INMEMORY is set",
            }));
        }

        let log_level = match lookup("LOG_LEVEL") {
            None => "info".to_string(),
            Some(raw) if LOG_LEVELS.contains(&raw.as_str()) => raw,
            Some(raw) => {
                offending.push(json!({
                    "field": "LOG_LEVEL",
                    "reason": format!("'{raw}' is not one of {}", LOG_LEVELS.join("|")),
                }));
                "info".to_string()
            }
        };

        let outbox_batch_size = match lookup("OUTBOX_BATCH_SIZE") {
            None => 10,
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    offending.push(json!({
                        "field": "OUTBOX_BATCH_SIZE",
                        "reason": format!("'{raw}' is not a positive integer"),
                    }));
                    10
                }
            },
        };

        let outbox_poll_interval_ms = match lookup("OUTBOX_POLL_INTERVAL_MS") {
            None => 5000,
            Some(raw) => match raw.parse::<u64>() {
                Ok(interval) if interval > 0 => interval,
                _ => {
                    offending.push(json!({
                        "field": "OUTBOX_POLL_INTERVAL_MS",
                        "reason": format!("'{raw}' is not a positive integer"),
                    }));
                    5000
                }
            },
        };

        let pricing_base_url = match lookup("PRICING_BASE_URL") {
            None => None,
            Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => Some(raw),
            Some(raw) => {
                offending.push(json!({
                    "field": "PRICING_BASE_URL",
                    "reason": format!("'{raw}' is not an http(s) URL"),
                }));
                None
            }
        };

        if !offending.is_empty() {
            return Err(
                AppError::new(ErrorCode::ValidationFailed, "Invalid configuration")
                    .with_details(json!({ "fields": offending })),
            );
        }

        Ok(Self {
            env,
            port,
            database_url,
            use_inmemory,
            log_level,
            outbox_batch_size,
            outbox_poll_interval_ms,
            pricing_base_url,
        })
    }

    /// Directive EnvFilter pour tracing ; `fatal` n'existe pas côté
    /// tracing, on le replie sur `error`.
    pub fn tracing_directive(&self) -> &str {
        match self.log_level.as_str() {
            "fatal" => "error",
            other => other,
        }
    }
}
