// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! svc-protocol: control-subject builder and verb wire types for the
//! `$SRV` introspection protocol (PING/INFO/STATS/HEALTH/DOCS).

mod error;
mod headers;
mod responses;
mod verb;

pub use error::ProtocolError;
pub use headers::{ERROR_CODE_HEADER, ERROR_HEADER};
pub use responses::{
    DocsResponse, EndpointInfo, EndpointStatsWire, HealthResponse, InfoResponse, PingResponse,
    StatsResponse,
};
pub use verb::{control_subject, Verb, API_PREFIX};
