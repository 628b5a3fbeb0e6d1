// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Acknowledgement policy for a stream subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckPolicy {
    None,
    All,
    Explicit,
}

/// Where a stream subscription starts delivering from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverPolicy {
    All,
    Last,
    New,
    ByStartSeq,
    ByStartTime,
    LastPerSubject,
}

/// Stream-delivery configuration for a durable, explicitly-acknowledged
/// endpoint subscription (data model §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub durable: String,
    pub ack_policy: AckPolicy,
    pub deliver_policy: DeliverPolicy,
    pub ack_wait: Duration,
    pub max_deliver: i64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            durable: String::new(),
            ack_policy: AckPolicy::Explicit,
            deliver_policy: DeliverPolicy::All,
            ack_wait: Duration::from_secs(30),
            max_deliver: -1,
        }
    }
}
