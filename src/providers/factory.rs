// ABOUTME: Provider registry and connection dispatch for multi-database support
// ABOUTME: Resolves provider names to backends at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Provider Factory
//!
//! Maps provider names to backends and wraps the live connection in an enum
//! that delegates to the appropriate implementation.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info};

use super::sqlite::SqliteConnection;
use super::DatabaseProvider;
use crate::config::PoolConfig;
use crate::errors::{GatewayError, Result};
use crate::params::Params;
use crate::row::RowSet;

#[cfg(feature = "postgresql")]
use super::postgres::PostgresConnection;

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Sqlite,
    Postgres,
}

impl ProviderKind {
    /// Resolve a provider name through the registry
    ///
    /// Accepted names (ASCII case-insensitive): `sqlite`, `sqlite3`,
    /// `postgres`, `postgresql`, `pgsql`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is not in the registry
    /// - A `PostgreSQL` name is given but the `postgresql` feature is not enabled
    pub fn resolve(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pgsql" => {
                #[cfg(feature = "postgresql")]
                return Ok(Self::Postgres);

                #[cfg(not(feature = "postgresql"))]
                return Err(GatewayError::UnknownProvider(format!(
                    "{name} (PostgreSQL support is not enabled; enable the 'postgresql' \
                     feature flag in Cargo.toml)"
                )));
            }
            _ => Err(GatewayError::UnknownProvider(name.to_owned())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Live connection wrapper that delegates to the appropriate backend
#[derive(Debug)]
pub enum Connection {
    Sqlite(SqliteConnection),
    #[cfg(feature = "postgresql")]
    Postgres(PostgresConnection),
}

impl Connection {
    /// Open a connection of the given kind
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to open the connection; the
    /// provider's cause is carried in the message.
    pub async fn open(kind: ProviderKind, url: &str, config: &PoolConfig) -> Result<Self> {
        debug!(provider = %kind, "opening database connection");
        match kind {
            ProviderKind::Sqlite => {
                let connection = SqliteConnection::open(url, config).await?;
                info!(backend = connection.backend_info(), "connection opened");
                Ok(Self::Sqlite(connection))
            }
            #[cfg(feature = "postgresql")]
            ProviderKind::Postgres => {
                let connection = PostgresConnection::open(url, config).await?;
                info!(backend = connection.backend_info(), "connection opened");
                Ok(Self::Postgres(connection))
            }
            #[cfg(not(feature = "postgresql"))]
            ProviderKind::Postgres => Err(GatewayError::UnknownProvider(
                "postgres (PostgreSQL support is not enabled)".to_owned(),
            )),
        }
    }

    /// The backend kind behind this connection
    #[must_use]
    pub const fn provider_kind(&self) -> ProviderKind {
        match self {
            Self::Sqlite(_) => ProviderKind::Sqlite,
            #[cfg(feature = "postgresql")]
            Self::Postgres(_) => ProviderKind::Postgres,
        }
    }
}

#[async_trait]
impl DatabaseProvider for Connection {
    async fn query(&self, sql: &str, params: &Params) -> Result<RowSet> {
        match self {
            Self::Sqlite(connection) => connection.query(sql, params).await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(connection) => connection.query(sql, params).await,
        }
    }

    async fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
        match self {
            Self::Sqlite(connection) => connection.execute(sql, params).await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(connection) => connection.execute(sql, params).await,
        }
    }

    async fn close(&self) {
        match self {
            Self::Sqlite(connection) => connection.close().await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(connection) => connection.close().await,
        }
    }

    fn is_open(&self) -> bool {
        match self {
            Self::Sqlite(connection) => connection.is_open(),
            #[cfg(feature = "postgresql")]
            Self::Postgres(connection) => connection.is_open(),
        }
    }

    fn backend_info(&self) -> &'static str {
        match self {
            Self::Sqlite(connection) => connection.backend_info(),
            #[cfg(feature = "postgresql")]
            Self::Postgres(connection) => connection.backend_info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_sqlite_names() {
        assert_eq!(ProviderKind::resolve("sqlite").unwrap(), ProviderKind::Sqlite);
        assert_eq!(ProviderKind::resolve("SQLite3").unwrap(), ProviderKind::Sqlite);
    }

    #[cfg(feature = "postgresql")]
    #[test]
    fn registry_resolves_postgres_names() {
        assert_eq!(
            ProviderKind::resolve("postgresql").unwrap(),
            ProviderKind::Postgres
        );
        assert_eq!(ProviderKind::resolve("pgsql").unwrap(), ProviderKind::Postgres);
    }

    #[cfg(not(feature = "postgresql"))]
    #[test]
    fn postgres_name_without_feature_is_rejected() {
        assert!(matches!(
            ProviderKind::resolve("postgres"),
            Err(GatewayError::UnknownProvider(_))
        ));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            ProviderKind::resolve("mysql"),
            Err(GatewayError::UnknownProvider(name)) if name == "mysql"
        ));
        assert!(ProviderKind::resolve("").is_err());
    }
}
