// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tokio::sync::mpsc;

use crate::Message;

/// Identifying information about a live subscription, passed to the
/// async-error handler when the bus reports a delivery failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInfo {
    pub id: u64,
    pub subject: String,
    pub queue_group: Option<String>,
}

/// A live subscription handle. Drop without calling [`Subscription::drain`]
/// to unsubscribe immediately; `drain` lets already-queued messages flush
/// before the subscription is torn down.
pub struct Subscription {
    info: SubscriptionInfo,
    rx: mpsc::Receiver<Message>,
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(
        info: SubscriptionInfo,
        rx: mpsc::Receiver<Message>,
        unsubscribe: Box<dyn FnOnce() + Send>,
    ) -> Self {
        Self { info, rx, unsubscribe: Some(unsubscribe) }
    }

    pub fn info(&self) -> &SubscriptionInfo {
        &self.info
    }

    pub fn subject(&self) -> &str {
        &self.info.subject
    }

    /// Awaits the next delivered message, or `None` once the subscription
    /// is closed and drained.
    pub async fn next(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Stops accepting new deliveries but lets already-queued messages be
    /// received via `next` until the channel is empty. Idempotent.
    pub fn drain(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Drains, then drops the subscription, discarding anything still queued.
    pub fn unsubscribe(mut self) {
        self.drain();
    }
}
