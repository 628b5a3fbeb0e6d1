// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("bus: {0}")]
    Bus(#[from] svc_bus::BusError),

    #[error("protocol: {0}")]
    Protocol(#[from] svc_protocol::ProtocolError),

    #[error("unmarshal: {0}")]
    Unmarshal(#[from] serde_json::Error),
}
