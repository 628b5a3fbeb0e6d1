// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invariants 2-4 (spec.md §8): stats accumulate correctly per request,
//! `reset()` clears everything but name/subject, and `stop()` is
//! idempotent.

use std::sync::Arc;
use std::time::Duration;

use svc_bus::{Bus, LocalBus};
use svc_core::ServiceIdentity;
use svc_service::{EndpointOptions, FnHandler, Handler, Request, ServiceBuilder};

fn echo_handler() -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(|request: Arc<Request>| async move {
        let data = request.data().to_vec();
        let _ = request.respond(data).await;
    }))
}

#[tokio::test]
async fn stats_accumulate_and_average_exactly() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let identity = ServiceIdentity::new("echo-service", "1.0.0");
    let service = ServiceBuilder::new(identity).build(Arc::clone(&bus));
    service
        .add_endpoint("echo", echo_handler(), EndpointOptions { subject: Some("echo".into()), ..Default::default() })
        .await
        .unwrap();
    service.start().await.unwrap();

    for _ in 0..3 {
        bus.request("echo", b"x".to_vec(), Duration::from_secs(1)).await.unwrap();
    }

    let stats = service.stats();
    let entry = &stats.endpoints[0];
    assert_eq!(entry.num_requests, 3);
    assert_eq!(entry.num_errors, 0);
    assert_eq!(entry.average_processing_time, entry.processing_time / entry.num_requests);

    service.reset();
    let after_reset = service.stats();
    let reset_entry = &after_reset.endpoints[0];
    assert_eq!(reset_entry.num_requests, 0);
    assert_eq!(reset_entry.processing_time, 0);
    assert!(reset_entry.last_error.is_empty());
    assert_eq!(reset_entry.name, entry.name);
    assert_eq!(reset_entry.subject, entry.subject);

    service.stop().await;
    service.stop().await;
    assert!(service.is_stopped());
}
