// ABOUTME: Gateway configuration types for connection pool pass-through settings
// ABOUTME: Environment-driven loaders with sensible single-connection defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Configuration
//!
//! The gateway imposes nothing on the backend beyond what is configured
//! here; values of `None` defer to the driver's defaults. The default pool
//! size is a single connection, matching the one-handle contract of
//! [`Gateway`](crate::Gateway).

use std::env;

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Connection pool pass-through settings
    pub pool: PoolConfig,
}

impl GatewayConfig {
    /// Load gateway configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            pool: PoolConfig::from_env(),
        }
    }
}

/// Connection pool settings handed through to the backend driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of pooled connections
    /// Set via `DBGATEWAY_MAX_CONNECTIONS`; defaults to 1
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    /// Set via `DBGATEWAY_ACQUIRE_TIMEOUT_SECS`; `None` uses the driver default
    pub acquire_timeout_secs: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 1,
            acquire_timeout_secs: None,
        }
    }
}

impl PoolConfig {
    /// Load pool configuration from environment (or defaults)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_connections: env::var("DBGATEWAY_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            acquire_timeout_secs: env::var("DBGATEWAY_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}
