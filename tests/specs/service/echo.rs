// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! S1 (spec.md §8): register `math-service` with a `math.add` endpoint,
//! publish a request through the bus, and confirm both the reply and the
//! resulting stats via the `svc-client` shim — exercising `svc-bus`,
//! `svc-service`, and `svc-client` assembled together.

use std::sync::Arc;

use svc_bus::{Bus, LocalBus};
use svc_client::BusClient;
use svc_core::ServiceIdentity;
use svc_service::{EndpointOptions, FnHandler, Handler, Request, ServiceBuilder};

fn add_handler() -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(|request: Arc<Request>| async move {
        #[derive(serde::Deserialize)]
        struct Args {
            x: i64,
            y: i64,
        }
        #[derive(serde::Serialize)]
        struct Sum {
            sum: i64,
        }
        let args: Args = serde_json::from_slice(request.data()).unwrap();
        let _ = request.respond_json(&Sum { sum: args.x + args.y }).await;
    }))
}

#[tokio::test]
async fn s1_echo_and_stats_round_trip() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let identity = ServiceIdentity::new("math-service", "1.2.3");
    let service = ServiceBuilder::new(identity).build(Arc::clone(&bus));
    service
        .add_endpoint("add", add_handler(), EndpointOptions { subject: Some("math.add".into()), ..Default::default() })
        .await
        .unwrap();
    service.start().await.unwrap();

    let reply = bus
        .request("math.add", br#"{"x":2,"y":3}"#.to_vec(), std::time::Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(reply.payload, br#"{"sum":5}"#);

    let stats = service.stats();
    assert_eq!(stats.endpoints[0].num_requests, 1);

    let client = BusClient::new(Arc::clone(&bus), "math-service");
    let client_stats = client.stats().await.unwrap();
    assert_eq!(client_stats.endpoints[0].num_requests, 1);

    service.stop().await;
}
