// ABOUTME: Unit tests for the provider registry and connection factory
// ABOUTME: Validates name resolution, feature gating, and backend dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use dbgateway::config::PoolConfig;
use dbgateway::{Connection, DatabaseProvider, GatewayError, ProviderKind};

#[test]
fn resolve_accepts_registered_names() {
    assert_eq!(ProviderKind::resolve("sqlite").unwrap(), ProviderKind::Sqlite);
    assert_eq!(ProviderKind::resolve("sqlite3").unwrap(), ProviderKind::Sqlite);
    assert_eq!(ProviderKind::resolve("SQLITE").unwrap(), ProviderKind::Sqlite);

    #[cfg(feature = "postgresql")]
    {
        assert_eq!(
            ProviderKind::resolve("postgres").unwrap(),
            ProviderKind::Postgres
        );
        assert_eq!(
            ProviderKind::resolve("postgresql").unwrap(),
            ProviderKind::Postgres
        );
    }
}

#[test]
fn resolve_rejects_unregistered_names() {
    assert!(matches!(
        ProviderKind::resolve("mysql"),
        Err(GatewayError::UnknownProvider(name)) if name == "mysql"
    ));
    assert!(ProviderKind::resolve("").is_err());
    assert!(ProviderKind::resolve("oracle").is_err());
}

#[cfg(not(feature = "postgresql"))]
#[test]
fn postgres_without_the_feature_names_the_flag() {
    let err = ProviderKind::resolve("postgresql").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("postgresql"), "got: {message}");
}

#[tokio::test]
async fn open_dispatches_to_the_sqlite_backend() {
    let connection = Connection::open(
        ProviderKind::Sqlite,
        "sqlite::memory:",
        &PoolConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(connection.provider_kind(), ProviderKind::Sqlite);
    assert!(connection.is_open());
    assert!(connection.backend_info().contains("SQLite"));

    connection.close().await;
    assert!(!connection.is_open());
}

#[tokio::test]
async fn open_failure_carries_the_cause() {
    let err = Connection::open(
        ProviderKind::Sqlite,
        "sqlite:/no/such/dir/at/all/x.db?mode=ro",
        &PoolConfig::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, GatewayError::Connect(_)));
}
