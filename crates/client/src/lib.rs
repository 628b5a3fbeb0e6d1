// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! svc-client: a thin request/reply shim over the bus for external callers
//! of one named service (§4.8), grounded on `oj-cli`'s `client_queries*`
//! modules — one typed method per wire call, context-bound with an ambient
//! timeout.

mod error;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use svc_bus::Bus;
use svc_protocol::{control_subject, HealthResponse, InfoResponse, PingResponse, StatsResponse, Verb};

pub use error::ClientError;

/// Default request timeout applied to every call when the caller does not
/// override it (§4.8 "ambient timeout (default 2s)").
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize)]
struct EchoRequest {
    message: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EchoResponse {
    pub reply: String,
}

/// Request/response helper bound to one target service name.
pub struct BusClient {
    bus: Arc<dyn Bus>,
    service_name: String,
    timeout: Duration,
}

impl BusClient {
    pub fn new(bus: Arc<dyn Bus>, service_name: impl Into<String>) -> Self {
        Self { bus, service_name: service_name.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Overrides the ambient per-call timeout (default [`DEFAULT_TIMEOUT`]).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request/response on subject `"echo"` with `{message: s}`, expecting
    /// `{reply: s}` back.
    pub async fn echo(&self, msg: impl Into<String>) -> Result<EchoResponse, ClientError> {
        let payload = serde_json::to_vec(&EchoRequest { message: msg.into() })?;
        let response = self.bus.request("echo", payload, self.timeout).await?;
        Ok(serde_json::from_slice(&response.payload)?)
    }

    pub async fn ping(&self) -> Result<PingResponse, ClientError> {
        self.verb_call(Verb::Ping).await
    }

    pub async fn info(&self) -> Result<InfoResponse, ClientError> {
        self.verb_call(Verb::Info).await
    }

    pub async fn stats(&self) -> Result<StatsResponse, ClientError> {
        self.verb_call(Verb::Stats).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.verb_call(Verb::Health).await
    }

    async fn verb_call<T: for<'de> Deserialize<'de>>(&self, verb: Verb) -> Result<T, ClientError> {
        let subject = control_subject(verb.as_str(), &self.service_name, "")?;
        let response = self.bus.request(&subject, Vec::new(), self.timeout).await?;
        Ok(serde_json::from_slice(&response.payload)?)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
