// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One delivered bus message, wrapped with the response operations
//! available to a handler (§4.4).

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use svc_bus::{Bus, Headers, Message};
use svc_protocol::{ERROR_CODE_HEADER, ERROR_HEADER};

use crate::error::ServiceError;

/// Wraps one delivered message. At most one response may be produced; a
/// later `error()` call still records a `respond_error` even after a
/// successful `respond()`, so the stats path can count the request as
/// failed without retracting the response already sent.
pub struct Request {
    message: Message,
    bus: Arc<dyn Bus>,
    respond_error: Mutex<Option<String>>,
}

impl Request {
    pub(crate) fn new(message: Message, bus: Arc<dyn Bus>) -> Self {
        Self { message, bus, respond_error: Mutex::new(None) }
    }

    pub fn data(&self) -> &[u8] {
        &self.message.payload
    }

    pub fn headers(&self) -> &Headers {
        &self.message.headers
    }

    pub fn subject(&self) -> &str {
        &self.message.subject
    }

    pub fn reply(&self) -> Option<&str> {
        self.message.reply.as_deref()
    }

    /// The synthetic `code:description` recorded by a prior `error()` call,
    /// if any. Consulted by the service's stats path after the handler
    /// returns.
    pub(crate) fn respond_error(&self) -> Option<String> {
        self.respond_error.lock().clone()
    }

    pub async fn respond(&self, bytes: Vec<u8>) -> Result<(), ServiceError> {
        self.respond_with_headers(bytes, Headers::new()).await
    }

    pub async fn respond_with_headers(
        &self,
        bytes: Vec<u8>,
        headers: Headers,
    ) -> Result<(), ServiceError> {
        let Some(reply) = self.reply() else {
            return Ok(());
        };
        self.bus
            .publish(reply, headers, bytes)
            .await
            .map_err(|e| ServiceError::Respond(e.to_string()))
    }

    pub async fn respond_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ServiceError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| ServiceError::MarshalResponse(e.to_string()))?;
        self.respond(bytes).await
    }

    /// Publishes an error response with `Nats-Service-Error`/
    /// `Nats-Service-Error-Code` headers, then records `code:description`
    /// as this request's `respond_error`.
    pub async fn error(
        &self,
        code: &str,
        description: &str,
        data: Option<Vec<u8>>,
        headers: Option<Headers>,
    ) -> Result<(), ServiceError> {
        if code.is_empty() {
            return Err(ServiceError::ArgRequired("code".into()));
        }
        if description.is_empty() {
            return Err(ServiceError::ArgRequired("description".into()));
        }

        let mut hdrs = headers.unwrap_or_default();
        hdrs.insert(ERROR_HEADER, description);
        hdrs.insert(ERROR_CODE_HEADER, code);

        if let Some(reply) = self.reply() {
            self.bus
                .publish(reply, hdrs, data.unwrap_or_default())
                .await
                .map_err(|e| ServiceError::Respond(e.to_string()))?;
        }
        *self.respond_error.lock() = Some(format!("{code}:{description}"));
        Ok(())
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
