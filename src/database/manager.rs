use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the outline store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// Raised by the database itself (constraint violation, missing relation, ...).
    /// Carries the server's message verbatim.
    #[error("{0}")]
    Database(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Database(db_err.message().to_string()),
            other => StoreError::Sqlx(other),
        }
    }
}

/// Build the shared connection pool.
///
/// The pool connects lazily, so an unreachable database does not stop the
/// server from starting; requests fail individually until it comes back.
/// Without a URL the libpq `PG*` environment variables apply.
pub fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let mut options = match config.url.as_deref() {
        Some(url) => {
            info!("Using database {}", redact_url(url));
            PgConnectOptions::from_str(url).map_err(|_| StoreError::InvalidDatabaseUrl)?
        }
        None => {
            warn!("DATABASE_URL is not set, falling back to PG* environment defaults");
            PgConnectOptions::new()
        }
    };

    if config.require_tls {
        options = options.ssl_mode(PgSslMode::Require);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_lazy_with(options);

    Ok(pool)
}

/// Connection string with the password masked, for logs.
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.into()
        }
        Err(_) => "<unparsable url>".to_string(),
    }
}
