// ABOUTME: Unified error taxonomy for gateway connection and execution failures
// ABOUTME: Defines GatewayError variants and the crate-wide Result alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Error Handling
//!
//! Every fallible gateway operation surfaces one of the variants below to
//! its immediate caller. The gateway performs no internal recovery, no
//! retries, and no silent fallback; retry policy belongs to the caller.

use thiserror::Error;

/// Errors surfaced by gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider name is not present in the provider registry
    #[error("unknown database provider: {0:?}")]
    UnknownProvider(String),

    /// Opening the backend connection failed; carries the provider's cause
    #[error("failed to open database connection: {0}")]
    Connect(String),

    /// `connect` was called while a connection is already open
    #[error("a database connection is already open; disconnect it first")]
    AlreadyConnected,

    /// An operation requiring an open connection found none
    #[error("no open database connection")]
    NotConnected,

    /// A table or column name failed identifier validation
    #[error("invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The statement references a parameter with no supplied value
    #[error("statement references parameter @{0} but no value was supplied")]
    MissingParameter(String),

    /// An insert was requested with no columns at all
    #[error("insert into {0:?} requires at least one column")]
    EmptyInsert(String),

    /// The provider rejected the statement or its parameters
    #[error("statement execution failed: {0}")]
    Execution(#[from] sqlx::Error),

    /// A result cell could not be mapped into a tagged value
    #[error("cannot decode column {column:?} of provider type {type_name}")]
    Decode {
        /// Column name as reported by the provider
        column: String,
        /// Provider-side type name that has no tagged-value mapping
        type_name: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GatewayError>;
