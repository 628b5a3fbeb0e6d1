// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The five introspection verbs and the `$SRV` control-subject builder.

use std::fmt;

use crate::error::ProtocolError;

/// API prefix under which every control subject is rooted.
pub const API_PREFIX: &str = "$SRV";

/// One of the five well-known introspection verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Ping,
    Info,
    Stats,
    Health,
    Docs,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Ping, Verb::Info, Verb::Stats, Verb::Health, Verb::Docs];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Ping => "PING",
            Verb::Info => "INFO",
            Verb::Stats => "STATS",
            Verb::Health => "HEALTH",
            Verb::Docs => "DOCS",
        }
    }

    /// Parses a verb name (case-sensitive, e.g. `"PING"`). Fails with
    /// [`ProtocolError::VerbNotSupported`] for anything else.
    pub fn parse(s: &str) -> Result<Verb, ProtocolError> {
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ProtocolError::VerbNotSupported(s.to_string()))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a `$SRV` control subject for `verb`, optionally scoped to a
/// service `name` and, within that, a specific instance `id`.
///
/// `verb` may be a recognized verb name (e.g. `"PING"`) or a [`Verb`]'s
/// `as_str()`. An unrecognized verb fails with
/// [`ProtocolError::VerbNotSupported`]; supplying `id` without `name` fails
/// with [`ProtocolError::ServiceNameRequired`].
pub fn control_subject(verb: &str, name: &str, id: &str) -> Result<String, ProtocolError> {
    let verb = Verb::parse(verb)?;
    if !id.is_empty() && name.is_empty() {
        return Err(ProtocolError::ServiceNameRequired);
    }
    let mut subject = format!("{API_PREFIX}.{verb}");
    if !name.is_empty() {
        subject.push('.');
        subject.push_str(name);
    }
    if !id.is_empty() {
        subject.push('.');
        subject.push_str(id);
    }
    Ok(subject)
}

#[cfg(test)]
#[path = "verb_tests.rs"]
mod tests;
