//! Database connection settings read from the process environment.

use std::fmt;

use crate::constants::{DEFAULT_PG_HOST, DEFAULT_PG_PORT, PG_MAX_IDENTIFIER_LEN};
use crate::env_config::{env_non_empty, env_parse_with_default};
use crate::error::CoreError;

/// Connection parameters for the PostgreSQL instance holding the vectors.
///
/// `url` wins over the individual fields when present.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DbConfig {
    pub url: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    /// Read `DATABASE_URL`, `POSTGRES_DB`, `POSTGRES_USER`, `POSTGRES_PASSWORD`,
    /// `POSTGRES_HOST` and `POSTGRES_PORT`.
    pub fn from_env() -> Self {
        Self {
            url: env_non_empty("DATABASE_URL"),
            database: env_non_empty("POSTGRES_DB"),
            user: env_non_empty("POSTGRES_USER"),
            password: std::env::var("POSTGRES_PASSWORD").ok(),
            host: env_non_empty("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_PG_HOST.to_owned()),
            port: env_parse_with_default("POSTGRES_PORT", DEFAULT_PG_PORT),
        }
    }

    /// `host:port/database` for log lines; never includes credentials.
    pub fn display_target(&self) -> String {
        if self.url.is_some() {
            return "DATABASE_URL".to_owned();
        }
        format!("{}:{}/{}", self.host, self.port, self.database.as_deref().unwrap_or("<default>"))
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Table names are spliced into DDL, so only plain lowercase identifiers pass.
pub fn validate_table_name(name: &str) -> Result<&str, CoreError> {
    let mut chars = name.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid_start && valid_rest && name.len() <= PG_MAX_IDENTIFIER_LEN {
        Ok(name)
    } else {
        Err(CoreError::InvalidTableName(name.to_owned()))
    }
}
