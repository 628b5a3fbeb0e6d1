// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{BusError, Headers, Message, StreamConfig, Subscription, SubscriptionInfo};

/// Invoked when the bus connection transitions to closed.
pub type ClosedHandler = Arc<dyn Fn() + Send + Sync>;

/// Invoked when the bus reports an asynchronous subscription error.
/// `None` as the subscription means the error was not tied to any specific
/// subscription.
pub type AsyncErrorHandler = Arc<dyn Fn(Option<SubscriptionInfo>, BusError) + Send + Sync>;

/// The message bus: publish/subscribe/request with wildcard subjects and
/// queue-group load balancing. This is the external collaborator the
/// service runtime and supervisor are layered over (§1, §6) — the core
/// never implements the wire transport itself.
#[async_trait]
pub trait Bus: Send + Sync + 'static {
    async fn publish(
        &self,
        subject: &str,
        headers: Headers,
        payload: Vec<u8>,
    ) -> Result<(), BusError>;

    async fn request(
        &self,
        subject: &str,
        payload: Vec<u8>,
        timeout: Duration,
    ) -> Result<Message, BusError>;

    async fn subscribe(
        &self,
        subject: &str,
        queue_group: Option<String>,
    ) -> Result<Subscription, BusError>;

    async fn subscribe_stream(
        &self,
        subject: &str,
        queue_group: Option<String>,
        config: StreamConfig,
    ) -> Result<Subscription, BusError>;

    fn is_closed(&self) -> bool;

    /// Installs (or clears, with `None`) the closed-connection callback,
    /// returning whatever was previously installed.
    fn set_closed_handler(&self, handler: Option<ClosedHandler>) -> Option<ClosedHandler>;

    /// Installs (or clears, with `None`) the async-error callback,
    /// returning whatever was previously installed.
    fn set_async_error_handler(
        &self,
        handler: Option<AsyncErrorHandler>,
    ) -> Option<AsyncErrorHandler>;
}
