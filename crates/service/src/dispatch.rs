// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single-consumer cooperative queue of zero-argument closures (§4.2),
//! backed by a bounded `tokio::sync::mpsc` channel and a dedicated worker
//! task — the same `mpsc::Sender<Event>` shape the teacher's executor uses
//! for its own event loop.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

/// Default bounded capacity for the dispatcher's internal queue.
pub const DEFAULT_CAPACITY: usize = 256;

pub type Job = Box<dyn FnOnce() + Send>;

/// A single-consumer cooperative queue. `push` is a no-op after `close`;
/// `close` is idempotent and lets the worker drain before exiting.
pub struct AsyncDispatcher {
    tx: Mutex<Option<mpsc::Sender<Job>>>,
    worker: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl AsyncDispatcher {
    pub fn start() -> Self {
        Self::start_with_capacity(DEFAULT_CAPACITY)
    }

    pub fn start_with_capacity(capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Job>(capacity);
        let worker = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job();
            }
        });
        Self { tx: Mutex::new(Some(tx)), worker: Mutex::new(Some(worker)) }
    }

    /// Enqueues `job`. A no-op once the dispatcher is closed.
    pub async fn push(&self, job: Job) {
        let tx = self.tx.lock().clone();
        let Some(tx) = tx else {
            warn!("async dispatcher: push after close ignored");
            return;
        };
        if tx.send(job).await.is_err() {
            warn!("async dispatcher: worker already gone");
        }
    }

    /// Signals end-of-stream and lets the worker exit after draining
    /// whatever was already queued. Idempotent.
    pub async fn close(&self) {
        let sender = self.tx.lock().take();
        drop(sender);
        if let Some(worker) = self.worker.lock().take() {
            let _ = worker.await;
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
