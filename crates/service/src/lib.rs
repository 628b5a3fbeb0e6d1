// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! svc-service: the micro-services runtime layered over [`svc_bus::Bus`] —
//! endpoint registration, naming groups, per-endpoint stats, the five
//! `$SRV` introspection verbs, and the async request dispatcher.

mod config;
mod dispatch;
mod endpoint;
mod error;
mod group;
mod handler;
mod registry;
mod request;
mod service;
mod stats;
mod verbs;

pub use config::{DefaultEndpointConfig, ServiceConfig};
pub use endpoint::{DocProducer, Endpoint};
pub use error::ServiceError;
pub use group::{resolve_queue_group, Group};
pub use handler::{apply_middleware, AsyncHandler, FnHandler, Handler, Middleware};
pub use registry::EndpointRegistry;
pub use request::Request;
pub use service::{BusService, EndpointOptions, GroupHandle, GroupOptions, Hooks, ServiceBuilder};
pub use stats::EndpointStats;
