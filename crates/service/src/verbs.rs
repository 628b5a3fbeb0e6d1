// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response-body construction for the five introspection verbs (§4.1, §6).
//! Subscription wiring and dispatch live in [`crate::service`]; this module
//! only builds the JSON-serializable wire types from service/endpoint state.

use std::collections::HashMap;

use svc_core::ServiceId;
use svc_protocol::{
    DocsResponse, EndpointInfo, EndpointStatsWire, HealthResponse, InfoResponse, PingResponse,
    StatsResponse, Verb,
};

use crate::endpoint::Endpoint;

/// The three control subjects installed for one verb: bare, name-scoped, and
/// instance-scoped.
pub fn verb_subjects(verb: Verb, name: &str, id: &str) -> [String; 3] {
    // `verb.as_str()` is always a recognized verb name and `id` is only ever
    // passed alongside a non-empty `name` here, so `control_subject` cannot
    // fail with `VerbNotSupported`/`ServiceNameRequired` at any of these
    // three call sites.
    #[allow(clippy::expect_used)]
    {
        [
            svc_protocol::control_subject(verb.as_str(), "", "").expect("bare subject always valid"),
            svc_protocol::control_subject(verb.as_str(), name, "")
                .expect("name-scoped subject always valid"),
            svc_protocol::control_subject(verb.as_str(), name, id)
                .expect("instance-scoped subject always valid"),
        ]
    }
}

fn endpoint_info(endpoint: &Endpoint) -> EndpointInfo {
    let mut metadata = endpoint.metadata().clone();
    if endpoint.is_disabled() {
        metadata.insert("disabled".to_string(), "true".to_string());
    }
    EndpointInfo {
        name: endpoint.name().to_string(),
        subject: endpoint.subject().to_string(),
        queue_group: endpoint.queue_group().to_string(),
        metadata,
    }
}

pub fn build_info_response(
    name: &str,
    id: &ServiceId,
    version: &str,
    metadata: &HashMap<String, String>,
    description: &str,
    endpoints: &[Endpoint],
) -> InfoResponse {
    InfoResponse {
        name: name.to_string(),
        id: id.clone(),
        version: version.to_string(),
        metadata: metadata.clone(),
        kind: InfoResponse::TYPE.to_string(),
        description: description.to_string(),
        endpoints: endpoints.iter().map(endpoint_info).collect(),
    }
}

pub fn build_ping_response(
    name: &str,
    id: &ServiceId,
    version: &str,
    metadata: &HashMap<String, String>,
) -> PingResponse {
    PingResponse {
        name: name.to_string(),
        id: id.clone(),
        version: version.to_string(),
        metadata: metadata.clone(),
        kind: PingResponse::TYPE.to_string(),
    }
}

fn endpoint_stats_wire(endpoint: &Endpoint) -> EndpointStatsWire {
    let stats = endpoint.stats();
    EndpointStatsWire {
        name: stats.name.clone(),
        subject: stats.subject.clone(),
        queue_group: endpoint.queue_group().to_string(),
        num_requests: stats.num_requests,
        num_errors: stats.num_errors,
        last_error: stats.last_error.clone(),
        processing_time: stats.processing_time_ns,
        average_processing_time: stats.average_processing_time_ns(),
        min_processing_time: stats.min_processing_time_ns,
        max_processing_time: stats.max_processing_time_ns,
        last_request_time: stats.last_request_time_ms.map(|ms| ms.to_string()),
        data: stats.data.clone(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn build_stats_response(
    name: &str,
    id: &ServiceId,
    version: &str,
    metadata: &HashMap<String, String>,
    started: &str,
    endpoints: &[Endpoint],
) -> StatsResponse {
    StatsResponse {
        name: name.to_string(),
        id: id.clone(),
        version: version.to_string(),
        metadata: metadata.clone(),
        kind: StatsResponse::TYPE.to_string(),
        started: started.to_string(),
        endpoints: endpoints.iter().map(endpoint_stats_wire).collect(),
    }
}

pub fn build_health_response() -> HealthResponse {
    HealthResponse::ok()
}

pub fn build_docs_response(endpoints: &[Endpoint]) -> DocsResponse {
    let docs = endpoints
        .iter()
        .filter_map(|e| e.doc().map(|doc| (e.name().to_string(), doc)))
        .collect();
    DocsResponse { kind: DocsResponse::TYPE.to_string(), docs }
}

#[cfg(test)]
#[path = "verbs_tests.rs"]
mod tests;
