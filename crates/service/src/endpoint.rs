// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One named handler bound to a subject within a service (§3 `Endpoint`).

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use svc_bus::StreamConfig;
use tokio::sync::oneshot;

use crate::handler::Handler;
use crate::stats::EndpointStats;

/// A handle to an endpoint's live subscription task. Draining signals the
/// task to stop accepting new deliveries but keep flushing what is already
/// queued; dropping without draining tears the subscription down outright.
pub(crate) struct SubscriptionHandle {
    drain_tx: Option<oneshot::Sender<()>>,
}

impl SubscriptionHandle {
    pub(crate) fn new(drain_tx: oneshot::Sender<()>) -> Self {
        Self { drain_tx: Some(drain_tx) }
    }

    pub(crate) fn drain(&mut self) {
        if let Some(tx) = self.drain_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Optional doc-producer: called lazily when the `DOCS` verb is served.
pub type DocProducer = Arc<dyn Fn() -> Value + Send + Sync>;

pub struct Endpoint {
    pub(crate) name: String,
    pub(crate) subject: String,
    pub(crate) queue_group: String,
    pub(crate) metadata: HashMap<String, String>,
    pub(crate) doc: Option<DocProducer>,
    pub(crate) stream_config: Option<StreamConfig>,
    pub(crate) disabled: bool,
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) stats: EndpointStats,
    pub(crate) subscription: Option<SubscriptionHandle>,
}

impl Endpoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn queue_group(&self) -> &str {
        &self.queue_group
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn doc(&self) -> Option<Value> {
        self.doc.as_ref().map(|producer| producer())
    }

    pub fn stats(&self) -> &EndpointStats {
        &self.stats
    }

    /// `true` once `add_endpoint` has installed a live subscription.
    pub fn has_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    /// Drains the live subscription, if any. Idempotent.
    pub(crate) fn drain_subscription(&mut self) {
        if let Some(handle) = self.subscription.as_mut() {
            handle.drain();
        }
        self.subscription = None;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use super::*;

    struct NoopHandler;

    #[async_trait]
    impl Handler for NoopHandler {
        async fn handle(&self, _request: Arc<crate::request::Request>) {}
    }

    pub(crate) fn bare_endpoint(name: &str, subject: &str) -> Endpoint {
        Endpoint {
            name: name.to_string(),
            subject: subject.to_string(),
            queue_group: "q".to_string(),
            metadata: HashMap::new(),
            doc: None,
            stream_config: None,
            disabled: false,
            handler: Arc::new(NoopHandler),
            stats: EndpointStats::new(name, subject),
            subscription: None,
        }
    }
}
