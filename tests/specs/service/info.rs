// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S2 (spec.md §8): `$SRV.INFO.math-service` must return the documented
//! info-response shape via the client shim.

use std::sync::Arc;

use svc_bus::{Bus, LocalBus};
use svc_client::BusClient;
use svc_core::ServiceIdentity;
use svc_protocol::InfoResponse;
use svc_service::{EndpointOptions, FnHandler, Handler, Request, ServiceBuilder};

fn noop_handler() -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(|_request: Arc<Request>| async move {}))
}

#[tokio::test]
async fn s2_info_matches_documented_shape() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let identity = ServiceIdentity::new("math-service", "1.2.3");
    let service =
        ServiceBuilder::new(identity).description("performs math operations").build(Arc::clone(&bus));
    service
        .add_endpoint(
            "default",
            noop_handler(),
            EndpointOptions { subject: Some("math.add".into()), ..Default::default() },
        )
        .await
        .unwrap();
    service.start().await.unwrap();

    let client = BusClient::new(Arc::clone(&bus), "math-service");
    let info: InfoResponse = client.info().await.unwrap();

    assert_eq!(info.name, "math-service");
    assert_eq!(info.version, "1.2.3");
    assert_eq!(info.kind, InfoResponse::TYPE);
    assert_eq!(info.description, "performs math operations");
    assert_eq!(info.endpoints.len(), 1);
    assert_eq!(info.endpoints[0].name, "default");
    assert_eq!(info.endpoints[0].subject, "math.add");
    assert_eq!(info.endpoints[0].queue_group, "q");
    assert!(info.endpoints[0].metadata.is_empty());
    assert!(!info.id.to_string().is_empty());

    service.stop().await;
}
