// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors raised while building or parsing control subjects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("verb_not_supported: {0:?} is not a recognized verb")]
    VerbNotSupported(String),

    #[error("service_name_required: id given without name")]
    ServiceNameRequired,
}
