// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use svc_bus::{Bus, LocalBus};
use svc_core::ServiceIdentity;
use svc_service::{EndpointOptions, Request as SvcRequest, ServiceBuilder};

use super::*;

fn echo_handler() -> Arc<dyn svc_service::Handler> {
    Arc::new(svc_service::FnHandler::new(|request: Arc<SvcRequest>| async move {
        let data = request.data().to_vec();
        let _ = request.respond(data).await;
    }))
}

async fn running_math_service(bus: Arc<dyn Bus>) -> svc_service::BusService {
    let identity = ServiceIdentity::new("math-service", "1.2.3");
    let service = ServiceBuilder::new(identity).description("adds numbers").build(Arc::clone(&bus));
    service
        .add_endpoint("echo", echo_handler(), EndpointOptions { subject: Some("echo".to_string()), ..Default::default() })
        .await
        .unwrap();
    service.start().await.unwrap();
    service
}

#[tokio::test]
async fn echo_round_trips_a_json_message() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let service = running_math_service(Arc::clone(&bus)).await;

    let client = BusClient::new(Arc::clone(&bus), "math-service");
    let reply = client.echo("hi there").await.unwrap();
    assert_eq!(reply.reply, "hi there");

    service.stop().await;
}

#[tokio::test]
async fn ping_info_stats_health_delegate_to_control_subjects() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let service = running_math_service(Arc::clone(&bus)).await;

    let client = BusClient::new(Arc::clone(&bus), "math-service");

    let ping = client.ping().await.unwrap();
    assert_eq!(ping.name, "math-service");
    assert_eq!(ping.kind, PingResponse::TYPE);

    let info = client.info().await.unwrap();
    assert_eq!(info.endpoints.len(), 1);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.endpoints.len(), 1);

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    service.stop().await;
}

#[tokio::test]
async fn custom_timeout_is_honored() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let service = running_math_service(Arc::clone(&bus)).await;

    let client = BusClient::new(Arc::clone(&bus), "math-service").with_timeout(Duration::from_millis(200));
    let ping = client.ping().await.unwrap();
    assert_eq!(ping.name, "math-service");

    service.stop().await;
}

#[tokio::test]
async fn request_to_unknown_service_times_out() {
    let bus: Arc<dyn Bus> = Arc::new(LocalBus::new());
    let client =
        BusClient::new(bus, "nobody-home").with_timeout(Duration::from_millis(50));
    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, ClientError::Bus(_)));
}
