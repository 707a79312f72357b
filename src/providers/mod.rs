// ABOUTME: Database backend abstraction for the gateway
// ABOUTME: Uniform provider trait with SQLite and PostgreSQL implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Providers
//!
//! Each backend implements [`DatabaseProvider`] so the gateway sees one
//! interface regardless of which engine is live. Backends are resolved at
//! runtime by name through [`factory::ProviderKind`].

use async_trait::async_trait;

use crate::errors::Result;
use crate::params::Params;
use crate::row::RowSet;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Uniform backend interface
///
/// All backends must implement this trait so the gateway layer stays
/// independent of the engine behind it.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Execute a row-returning statement and buffer the full result
    async fn query(&self, sql: &str, params: &Params) -> Result<RowSet>;

    /// Execute a non-row-returning statement, yielding the affected-row count
    async fn execute(&self, sql: &str, params: &Params) -> Result<u64>;

    /// Close the underlying connection; further calls fail at the driver
    async fn close(&self);

    /// True while the underlying connection is open
    fn is_open(&self) -> bool;

    /// Short description of the backend, for logging
    fn backend_info(&self) -> &'static str;
}
