// ABOUTME: Main library entry point for the dbgateway connection facade
// ABOUTME: Wires up value, row, parameter, provider, and gateway modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

#![deny(unsafe_code)]

//! # dbgateway
//!
//! A provider-agnostic SQL connection gateway. One [`Gateway`] owns at most
//! one live database connection, selected at runtime by provider name, and
//! exposes parametrized query and command execution returning generic row
//! collections.
//!
//! ## Features
//!
//! - **Runtime backend selection**: `SQLite` out of the box, `PostgreSQL`
//!   behind the `postgresql` feature flag
//! - **Named parameters**: `@name` references bound by name, never
//!   interpolated into SQL text
//! - **Tagged values**: results surface as an exhaustive [`Value`] variant
//!   instead of an unconstrained dynamic type
//! - **Buffered results**: every query returns a fully materialized
//!   [`RowSet`] snapshot
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dbgateway::{Gateway, Params, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut gateway = Gateway::new();
//!     gateway.connect("sqlite:app.db", "sqlite").await?;
//!
//!     gateway
//!         .execute("CREATE TABLE users (id INTEGER, name TEXT)", &Params::new())
//!         .await?;
//!     gateway
//!         .insert("users", Params::new().set("id", 1).set("name", "ada"))
//!         .await?;
//!
//!     let rows = gateway
//!         .query("SELECT name FROM users WHERE id = @id", Params::new().set("id", 1))
//!         .await?;
//!     for row in &rows {
//!         println!("{:?}", row.get("name"));
//!     }
//!
//!     gateway.disconnect().await;
//!     Ok(())
//! }
//! ```

/// Environment-driven gateway and pool configuration
pub mod config;

/// Error taxonomy surfaced by every gateway operation
pub mod errors;

/// The connection facade itself
pub mod gateway;

/// Named bind parameters and placeholder expansion
pub mod params;

/// Database backends and the provider registry
pub mod providers;

/// Result rows and buffered row sets
pub mod row;

/// Tagged cell values
pub mod value;

pub use config::{GatewayConfig, PoolConfig};
pub use errors::{GatewayError, Result};
pub use gateway::Gateway;
pub use params::Params;
pub use providers::factory::{Connection, ProviderKind};
pub use providers::DatabaseProvider;
pub use row::{Row, RowSet};
pub use value::Value;
