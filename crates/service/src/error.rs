// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("config_validation: {0}")]
    ConfigValidation(String),

    #[error("verb_not_supported: {0}")]
    VerbNotSupported(String),

    #[error("service_name_required")]
    ServiceNameRequired,

    #[error("respond: {0}")]
    Respond(String),

    #[error("marshal_response: {0}")]
    MarshalResponse(String),

    #[error("arg_required: {0}")]
    ArgRequired(String),

    #[error("bus_disconnected: {0}")]
    BusDisconnected(String),
}

impl From<svc_protocol::ProtocolError> for ServiceError {
    fn from(err: svc_protocol::ProtocolError) -> Self {
        match err {
            svc_protocol::ProtocolError::VerbNotSupported(v) => ServiceError::VerbNotSupported(v),
            svc_protocol::ProtocolError::ServiceNameRequired => ServiceError::ServiceNameRequired,
        }
    }
}

impl From<svc_bus::BusError> for ServiceError {
    fn from(err: svc_bus::BusError) -> Self {
        ServiceError::BusDisconnected(err.to_string())
    }
}
