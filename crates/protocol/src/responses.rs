// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON response bodies for the five introspection verbs (§6).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use svc_core::ServiceId;

/// Endpoint descriptor embedded in [`InfoResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub name: String,
    pub subject: String,
    pub queue_group: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub id: ServiceId,
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

impl InfoResponse {
    pub const TYPE: &'static str = "io.nats.micro.v1.info_response";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub name: String,
    pub id: ServiceId,
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PingResponse {
    pub const TYPE: &'static str = "io.nats.micro.v1.ping_response";
}

/// Per-endpoint stats entry embedded in [`StatsResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStatsWire {
    pub name: String,
    pub subject: String,
    pub queue_group: String,
    pub num_requests: u64,
    pub num_errors: u64,
    #[serde(default)]
    pub last_error: String,
    /// Cumulative processing time, in nanoseconds.
    pub processing_time: u64,
    /// `processing_time / num_requests`, in nanoseconds.
    pub average_processing_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_processing_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processing_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_request_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub name: String,
    pub id: ServiceId,
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub started: String,
    pub endpoints: Vec<EndpointStatsWire>,
}

impl StatsResponse {
    pub const TYPE: &'static str = "io.nats.micro.v1.stats_response";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl HealthResponse {
    pub const TYPE: &'static str = "io.nats.micro.v1.health_response";

    pub fn ok() -> Self {
        Self { status: "ok".to_string(), kind: Self::TYPE.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub docs: HashMap<String, Value>,
}

impl DocsResponse {
    pub const TYPE: &'static str = "io.nats.micro.v1.docs_response";
}

#[cfg(test)]
#[path = "responses_tests.rs"]
mod tests;
