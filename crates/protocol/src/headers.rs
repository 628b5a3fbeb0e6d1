// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Header names used by the service-error wire protocol.

/// Header carrying the human-readable error description.
pub const ERROR_HEADER: &str = "Nats-Service-Error";

/// Header carrying the caller-supplied error code.
pub const ERROR_CODE_HEADER: &str = "Nats-Service-Error-Code";
