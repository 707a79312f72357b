// ABOUTME: PostgreSQL backend over a sqlx connection pool
// ABOUTME: Decodes the common scalar wire types into tagged values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # PostgreSQL Backend
//!
//! Wraps a sqlx `PostgreSQL` pool behind [`DatabaseProvider`]. Only the
//! scalar types with a tagged-value mapping are decoded; anything else
//! (arrays, ranges, json, …) surfaces as a decode error naming the type.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::{Column as _, Row as _, TypeInfo as _, ValueRef as _};
use tracing::debug;

use super::DatabaseProvider;
use crate::config::PoolConfig;
use crate::errors::{GatewayError, Result};
use crate::params::{expand, Params, Placeholder};
use crate::row::{Row, RowSet};
use crate::value::Value;

/// `PostgreSQL` backend connection
#[derive(Debug)]
pub struct PostgresConnection {
    pool: PgPool,
}

impl PostgresConnection {
    /// Open a `PostgreSQL` connection for the given URL
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established; the driver's
    /// cause is carried in the message.
    pub async fn open(url: &str, config: &PoolConfig) -> Result<Self> {
        let mut options = PgPoolOptions::new().max_connections(config.max_connections);
        if let Some(secs) = config.acquire_timeout_secs {
            options = options.acquire_timeout(Duration::from_secs(secs));
        }

        let pool = options
            .connect(url)
            .await
            .map_err(|e| GatewayError::Connect(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseProvider for PostgresConnection {
    async fn query(&self, sql: &str, params: &Params) -> Result<RowSet> {
        let (statement, values) = expand(sql, params, Placeholder::Dollar)?;
        debug!(params = values.len(), "executing postgres query");

        let mut query = sqlx::query(&statement);
        for value in &values {
            query = bind_value(query, value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        materialize(&rows)
    }

    async fn execute(&self, sql: &str, params: &Params) -> Result<u64> {
        let (statement, values) = expand(sql, params, Placeholder::Dollar)?;
        debug!(params = values.len(), "executing postgres command");

        let mut query = sqlx::query(&statement);
        for value in &values {
            query = bind_value(query, value);
        }

        let done = query.execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn is_open(&self) -> bool {
        !self.pool.is_closed()
    }

    fn backend_info(&self) -> &'static str {
        "PostgreSQL (client-server)"
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &'q Value,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Integer(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.as_str()),
        Value::Blob(v) => query.bind(v.as_slice()),
        Value::Boolean(v) => query.bind(*v),
    }
}

/// Buffer every returned row into a [`RowSet`]
fn materialize(rows: &[PgRow]) -> Result<RowSet> {
    let Some(first) = rows.first() else {
        return Ok(RowSet::empty());
    };

    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|column| column.name().to_owned())
        .collect();

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            values.push(decode_cell(row, index, column)?);
        }
        out.push(Row::new(Arc::clone(&columns), values));
    }

    Ok(RowSet::new(columns, out))
}

/// Map one cell into a tagged value by its wire type name
fn decode_cell(row: &PgRow, index: usize, column: &str) -> Result<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_info = raw.type_info();
    let type_name = type_info.name();
    match type_name {
        "BOOL" => Ok(Value::Boolean(row.try_get(index)?)),
        "INT2" => Ok(Value::Integer(i64::from(row.try_get::<i16, _>(index)?))),
        "INT4" => Ok(Value::Integer(i64::from(row.try_get::<i32, _>(index)?))),
        "INT8" => Ok(Value::Integer(row.try_get(index)?)),
        "FLOAT4" => Ok(Value::Float(f64::from(row.try_get::<f32, _>(index)?))),
        "FLOAT8" => Ok(Value::Float(row.try_get(index)?)),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => {
            Ok(Value::Text(row.try_get(index)?))
        }
        "BYTEA" => Ok(Value::Blob(row.try_get(index)?)),
        _ => Err(GatewayError::Decode {
            column: column.to_owned(),
            type_name: type_name.to_owned(),
        }),
    }
}
