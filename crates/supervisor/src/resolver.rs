// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topological ordering of a declared service catalog (§4.6), via Kahn's
//! algorithm: repeatedly peel off services with no unresolved dependency.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::decl::ServiceDecl;
use crate::error::ResolverError;

/// Computes an order over `services` in which every service appears after
/// all of its `depends_on`. Ties are broken by catalog order, so the output
/// is stable for a given input.
pub fn resolve_order(services: &[ServiceDecl]) -> Result<Vec<String>, ResolverError> {
    let names: HashSet<&str> = services.iter().map(|s| s.name.as_str()).collect();
    for service in services {
        for dep in &service.depends_on {
            if !names.contains(dep.as_str()) {
                return Err(ResolverError::UnknownDependency(service.name.clone(), dep.clone()));
            }
        }
    }

    let mut in_degree: HashMap<&str, usize> =
        services.iter().map(|s| (s.name.as_str(), 0)).collect();
    let mut dependents: HashMap<&str, Vec<&str>> =
        services.iter().map(|s| (s.name.as_str(), Vec::new())).collect();

    for service in services {
        for dep in &service.depends_on {
            // Every `dep` was checked against `names` above, and `dependents`/
            // `in_degree` were seeded from that same catalog, so both lookups
            // always hit.
            #[allow(clippy::expect_used)]
            {
                dependents.get_mut(dep.as_str()).expect("validated above").push(service.name.as_str());
                *in_degree.get_mut(service.name.as_str()).expect("validated above") += 1;
            }
        }
    }

    let mut ready: VecDeque<&str> = services
        .iter()
        .map(|s| s.name.as_str())
        .filter(|name| in_degree[name] == 0)
        .collect();

    let mut order = Vec::with_capacity(services.len());
    while let Some(name) = ready.pop_front() {
        order.push(name.to_string());
        for &dependent in &dependents[name] {
            // `dependent` came from `dependents`, which was seeded with the
            // same key set as `in_degree` above, so the entry always exists.
            #[allow(clippy::expect_used)]
            let degree = in_degree.get_mut(dependent).expect("present by construction");
            *degree -= 1;
            if *degree == 0 {
                ready.push_back(dependent);
            }
        }
    }

    if order.len() != services.len() {
        let stuck = services
            .iter()
            .map(|s| s.name.as_str())
            .find(|name| in_degree[name] > 0)
            .unwrap_or("<unknown>");
        return Err(ResolverError::CircularDependency(stuck.to_string()));
    }

    Ok(order)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
