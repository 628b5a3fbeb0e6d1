// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S3 (spec.md §8): nested groups concatenate prefixes with `.`, and an
//! empty segment is dropped from the concatenation.

use std::sync::Arc;

use svc_bus::{Bus, LocalBus};
use svc_core::ServiceIdentity;
use svc_service::{EndpointOptions, FnHandler, GroupOptions, Handler, Request, ServiceBuilder};

fn noop_handler() -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(|_request: Arc<Request>| async move {}))
}

#[tokio::test]
async fn s3_nested_groups_build_a_dotted_prefix() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let identity = ServiceIdentity::new("platform", "1.0.0");
    let service = ServiceBuilder::new(identity).queue_group("q").build(Arc::clone(&bus));

    let g1 = service.add_group("g1", GroupOptions::default());
    let g2 = g1.add_group("g2", GroupOptions::default());
    let g3 = g2.add_group("g3", GroupOptions::default());
    g3.add_endpoint("foo", noop_handler(), EndpointOptions::default()).await.unwrap();
    service.start().await.unwrap();

    let info = service.info();
    assert_eq!(info.endpoints[0].subject, "g1.g2.g3.foo");
    assert_eq!(info.endpoints[0].queue_group, "q");

    service.stop().await;
}

#[tokio::test]
async fn s3_empty_segment_is_dropped_from_the_prefix() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let identity = ServiceIdentity::new("platform", "1.0.0");
    let service = ServiceBuilder::new(identity).build(Arc::clone(&bus));

    let root = service.add_group("", GroupOptions::default());
    root.add_endpoint("foo", noop_handler(), EndpointOptions::default()).await.unwrap();
    service.start().await.unwrap();

    let info = service.info();
    assert_eq!(info.endpoints[0].subject, "foo");

    service.stop().await;
}
