// ABOUTME: The connection facade owning at most one live backend connection
// ABOUTME: Exposes connect/disconnect plus parametrized query, execute, and insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Gateway
//!
//! [`Gateway`] holds at most one open connection, resolved at runtime by
//! provider name. Every operation is call-and-return: it blocks (awaits)
//! until the backend answers, with no internal background work and no
//! retries. The gateway is not safe for concurrent mutation by multiple
//! callers without external synchronization.

use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::errors::{GatewayError, Result};
use crate::params::Params;
use crate::providers::factory::{Connection, ProviderKind};
use crate::providers::DatabaseProvider;
use crate::row::{Row, RowSet};

/// Provider-agnostic connection facade
pub struct Gateway {
    config: GatewayConfig,
    connection: Option<Connection>,
}

impl Gateway {
    /// Create a gateway with default configuration, in the Closed state
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a gateway with explicit configuration, in the Closed state
    #[must_use]
    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Open a connection through the named provider
    ///
    /// The connection string is opaque and passed through to the backend
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A connection is already open (`AlreadyConnected`; the live handle
    ///   is left untouched — it is never silently replaced)
    /// - The provider name is not in the registry (`UnknownProvider`)
    /// - The backend fails to open (`Connect`, carrying the cause)
    pub async fn connect(&mut self, connection_string: &str, provider: &str) -> Result<()> {
        if self.connection.is_some() {
            return Err(GatewayError::AlreadyConnected);
        }

        let kind = ProviderKind::resolve(provider)?;
        debug!(provider = %kind, "resolved database provider");

        let connection = Connection::open(kind, connection_string, &self.config.pool).await?;
        self.connection = Some(connection);
        Ok(())
    }

    /// Close and release the connection; a no-op when already Closed
    ///
    /// Safe to call any number of times.
    pub async fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close().await;
            info!("database connection closed");
        }
    }

    /// Read-only access to the live connection, for advanced use such as
    /// backend inspection; ownership stays with the gateway
    #[must_use]
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// True while a connection is open
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.as_ref().is_some_and(DatabaseProvider::is_open)
    }

    /// Execute a row-returning statement, buffering the full result
    ///
    /// Parameters are referenced as `@name` in the statement and bound from
    /// `params`; values never touch the SQL text.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when Closed (no backend call is made),
    /// `MissingParameter` for an unbound `@name`, or `Execution` when the
    /// backend rejects the statement.
    pub async fn query(&self, sql: &str, params: &Params) -> Result<RowSet> {
        self.live()?.query(sql, params).await
    }

    /// Like [`query`](Self::query), yielding only the first row, if any
    ///
    /// # Errors
    ///
    /// Same failure modes as [`query`](Self::query).
    pub async fn query_one(&self, sql: &str, params: &Params) -> Result<Option<Row>> {
        Ok(self.query(sql, params).await?.into_iter().next())
    }

    /// Execute a non-row-returning statement (INSERT/UPDATE/DELETE/DDL)
    ///
    /// # Errors
    ///
    /// Same failure modes as [`query`](Self::query).
    pub async fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
        self.live()?.execute(sql, params).await
    }

    /// Insert one row built from the parameter names of `data`
    ///
    /// Generates `INSERT INTO <table> (<cols>) VALUES (@c1, …)` with every
    /// value bound by name. Table and column names must pass identifier
    /// validation; they are emitted double-quoted.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` when Closed, `InvalidIdentifier` for a table
    /// or column name outside the allow-list, `EmptyInsert` when `data` is
    /// empty, or `Execution` when the backend rejects the statement.
    pub async fn insert(&self, table: &str, data: &Params) -> Result<u64> {
        let connection = self.live()?;
        if data.is_empty() {
            return Err(GatewayError::EmptyInsert(table.to_owned()));
        }

        let target = quote_table(table)?;
        let mut columns = Vec::with_capacity(data.len());
        let mut references = Vec::with_capacity(data.len());
        for name in data.names() {
            columns.push(quote_identifier(name)?);
            references.push(format!("@{name}"));
        }

        let statement = format!(
            "INSERT INTO {target} ({}) VALUES ({})",
            columns.join(", "),
            references.join(", ")
        );
        debug!(table, columns = data.len(), "issuing insert");

        connection.execute(&statement, data).await
    }

    fn live(&self) -> Result<&Connection> {
        self.connection.as_ref().ok_or(GatewayError::NotConnected)
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a validated column identifier
fn quote_identifier(raw: &str) -> Result<String> {
    if is_valid_identifier(raw) {
        Ok(format!("\"{raw}\""))
    } else {
        Err(GatewayError::InvalidIdentifier(raw.to_owned()))
    }
}

/// Quote a validated table name, allowing one `schema.table` qualifier
fn quote_table(raw: &str) -> Result<String> {
    let mut segments = raw.split('.');
    let first = segments.next().unwrap_or_default();
    match (segments.next(), segments.next()) {
        (None, _) => quote_identifier(first),
        (Some(second), None) => Ok(format!(
            "{}.{}",
            quote_identifier(first)?,
            quote_identifier(second)?
        )),
        (Some(_), Some(_)) => Err(GatewayError::InvalidIdentifier(raw.to_owned())),
    }
}

/// Identifier allow-list: ASCII letter or underscore, then letters, digits,
/// underscores
fn is_valid_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
