// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("bus_disconnected: {0}")]
    Disconnected(String),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("request timed out")]
    Timeout,

    #[error("no responders for subject")]
    NoResponders,
}
