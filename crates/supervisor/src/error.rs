// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("resolve_order: {0}")]
    ResolveOrder(#[from] ResolverError),

    #[error("not_found: {0}")]
    NotFound(String),

    #[error("spawn_failed: {0}: {1}")]
    SpawnFailed(String, String),

    #[error("state_store: {0}")]
    StateStore(#[from] StateStoreError),

    #[error("config: {0}")]
    Config(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    #[error("circular_dependency: {0}")]
    CircularDependency(String),

    #[error("unknown_dependency: {0} depends on unknown service {1:?}")]
    UnknownDependency(String, String),
}

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}
