// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The handler contract: a single type-erased capability, `handle(request)`.
//!
//! Typed payloads are expected to be layered on top via a decode-and-dispatch
//! wrapper rather than by widening this trait (design note §9). `Request` is
//! handed to handlers behind an `Arc` so an async-wrapped handler can clone
//! it into a detached task while the dispatcher keeps its own handle to read
//! back `respond_error` once the (possibly synchronous) call returns.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::request::Request;

/// One endpoint's request handler.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, request: Arc<Request>);
}

/// Adapts a plain async closure into a [`Handler`].
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Arc<Request>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, request: Arc<Request>) {
        (self.0)(request).await
    }
}

/// Wraps a handler in a fresh, independent task: `handle` returns as soon as
/// the task is scheduled rather than waiting for the inner handler to run.
pub struct AsyncHandler {
    inner: Arc<dyn Handler>,
}

impl AsyncHandler {
    pub fn wrap(inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Self { inner })
    }
}

#[async_trait]
impl Handler for AsyncHandler {
    async fn handle(&self, request: Arc<Request>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.handle(request).await;
        });
    }
}

/// A middleware wraps a handler in another handler, same type signature. The
/// outermost middleware applied is the first one the caller listed (reverse
/// installation order per spec §4.1).
pub type Middleware = Arc<dyn Fn(Arc<dyn Handler>) -> Arc<dyn Handler> + Send + Sync>;

/// Applies `middlewares` to `handler` in reverse order, so the first
/// middleware in the slice ends up as the outermost wrapper.
pub fn apply_middleware(handler: Arc<dyn Handler>, middlewares: &[Middleware]) -> Arc<dyn Handler> {
    middlewares.iter().rev().fold(handler, |inner, mw| mw(inner))
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
