// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `LocalBus`: an in-process reference implementation of [`Bus`].
//!
//! Used by the service runtime's own tests and by examples — never by
//! production code, which wires `Bus` to whatever real message-bus client
//! the platform runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use svc_core::subject_match;
use tokio::sync::mpsc;

use crate::{
    AsyncErrorHandler, Bus, BusError, ClosedHandler, Headers, Message, StreamConfig,
    Subscription, SubscriptionInfo,
};

const MAILBOX_CAPACITY: usize = 256;

struct Entry {
    id: u64,
    subject: String,
    queue_group: Option<String>,
    tx: mpsc::Sender<Message>,
}

struct Inner {
    closed: bool,
    subs: Vec<Entry>,
    group_rr: HashMap<String, usize>,
    closed_handler: Option<ClosedHandler>,
    async_error_handler: Option<AsyncErrorHandler>,
}

/// Cheaply cloneable in-process message bus.
#[derive(Clone)]
pub struct LocalBus {
    inner: Arc<Mutex<Inner>>,
    next_id: Arc<AtomicU64>,
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                closed: false,
                subs: Vec::new(),
                group_rr: HashMap::new(),
                closed_handler: None,
                async_error_handler: None,
            })),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Simulates the bus transitioning to closed, invoking the installed
    /// closed handler if any. Idempotent.
    pub fn simulate_close(&self) {
        let handler = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;
            inner.closed_handler.clone()
        };
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Simulates the bus reporting an async subscription error, invoking the
    /// installed async-error handler if any.
    pub fn simulate_async_error(&self, subscription: Option<SubscriptionInfo>, err: BusError) {
        let handler = self.inner.lock().async_error_handler.clone();
        if let Some(handler) = handler {
            handler(subscription, err);
        }
    }

    fn deliver(&self, msg: Message) {
        let mut inner = self.inner.lock();
        let matches: Vec<(u64, Option<String>, mpsc::Sender<Message>)> = inner
            .subs
            .iter()
            .filter(|entry| subject_match(&entry.subject, &msg.subject))
            .map(|entry| (entry.id, entry.queue_group.clone(), entry.tx.clone()))
            .collect();

        let mut fan_out = Vec::new();
        let mut groups: HashMap<String, Vec<(u64, mpsc::Sender<Message>)>> = HashMap::new();
        for (id, queue_group, tx) in matches {
            match queue_group {
                Some(group) if !group.is_empty() => {
                    groups.entry(group).or_default().push((id, tx));
                }
                _ => fan_out.push(tx),
            }
        }

        for tx in fan_out {
            let _ = tx.try_send(msg.clone());
        }
        for (group, members) in groups {
            let idx = {
                let slot = inner.group_rr.entry(group).or_insert(0);
                let chosen = *slot % members.len();
                *slot = (*slot + 1) % members.len().max(1);
                chosen
            };
            let _ = members[idx].1.try_send(msg.clone());
        }
    }

    fn register(&self, subject: &str, queue_group: Option<String>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
        self.inner.lock().subs.push(Entry {
            id,
            subject: subject.to_string(),
            queue_group: queue_group.clone(),
            tx,
        });

        let inner = Arc::clone(&self.inner);
        let info = SubscriptionInfo { id, subject: subject.to_string(), queue_group };
        let unsub_info = info.clone();
        Subscription::new(
            info,
            rx,
            Box::new(move || {
                inner.lock().subs.retain(|entry| entry.id != unsub_info.id);
            }),
        )
    }
}

#[async_trait]
impl Bus for LocalBus {
    async fn publish(
        &self,
        subject: &str,
        headers: Headers,
        payload: Vec<u8>,
    ) -> Result<(), BusError> {
        if self.is_closed() {
            return Err(BusError::Disconnected(subject.to_string()));
        }
        self.deliver(Message::new(subject, payload).with_headers(headers));
        Ok(())
    }

    async fn request(
        &self,
        subject: &str,
        payload: Vec<u8>,
        timeout: Duration,
    ) -> Result<Message, BusError> {
        if self.is_closed() {
            return Err(BusError::Disconnected(subject.to_string()));
        }
        let reply_subject = format!("_INBOX.{}", nanoid::nanoid!(12));
        let mut inbox = self.register(&reply_subject, None);
        self.deliver(Message::new(subject, payload).with_reply(reply_subject));

        match tokio::time::timeout(timeout, inbox.next()).await {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(BusError::NoResponders),
            Err(_) => Err(BusError::Timeout),
        }
    }

    async fn subscribe(
        &self,
        subject: &str,
        queue_group: Option<String>,
    ) -> Result<Subscription, BusError> {
        if self.is_closed() {
            return Err(BusError::Disconnected(subject.to_string()));
        }
        Ok(self.register(subject, queue_group))
    }

    async fn subscribe_stream(
        &self,
        subject: &str,
        queue_group: Option<String>,
        _config: StreamConfig,
    ) -> Result<Subscription, BusError> {
        // LocalBus has no persistent stream storage; delivery semantics are
        // identical to a plain subscription, matching the spec's treatment
        // of the bus as an external collaborator whose stream guarantees
        // are assumed rather than reimplemented here.
        self.subscribe(subject, queue_group).await
    }

    fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    fn set_closed_handler(&self, handler: Option<ClosedHandler>) -> Option<ClosedHandler> {
        std::mem::replace(&mut self.inner.lock().closed_handler, handler)
    }

    fn set_async_error_handler(
        &self,
        handler: Option<AsyncErrorHandler>,
    ) -> Option<AsyncErrorHandler> {
        std::mem::replace(&mut self.inner.lock().async_error_handler, handler)
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
