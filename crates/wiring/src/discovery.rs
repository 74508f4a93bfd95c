//! Convention-based discovery over the bootstrap catalog.
//!
//! For every contract named `FooRepository` the scan looks for an
//! implementation entry named exactly `FooRepositoryImpl` and registers
//! the pairing. Contracts without a matching implementation stay unmapped;
//! asking for them later is a hard resolution failure, not a discovery
//! failure. A module that fails to load is skipped, never fatal.

use std::collections::HashMap;

use crate::catalog::{Catalog, ImplementationEntry, ServiceEntry};
use crate::key::ContractKey;

/// Suffix identifying repository contracts.
const CONTRACT_SUFFIX: &str = "Repository";

/// Suffix identifying repository implementations.
const IMPLEMENTATION_SUFFIX: &str = "RepositoryImpl";

/// Suffix identifying services.
const SERVICE_SUFFIX: &str = "Service";

/// The immutable result of one discovery scan.
#[derive(Debug, Default)]
pub(crate) struct Discovered {
    /// Contract identity → paired implementation.
    pub repositories: HashMap<ContractKey, ImplementationEntry>,

    /// All discovered services.
    pub services: Vec<ServiceEntry>,
}

/// Runs the discovery scan over a catalog.
pub(crate) fn discover(catalog: &Catalog) -> Discovered {
    let mut contracts = Vec::new();
    let mut implementations: HashMap<&'static str, ImplementationEntry> = HashMap::new();
    let mut services = Vec::new();

    for module in catalog.modules() {
        match module.load() {
            Ok(entries) => {
                contracts.extend(entries.contracts);
                for implementation in entries.implementations {
                    implementations.insert(implementation.name(), implementation);
                }
                services.extend(entries.services);
            }
            Err(error) => {
                // One broken module must not abort the overall scan.
                tracing::warn!(module = module.name(), %error, "skipping catalog module");
            }
        }
    }

    let mut repositories = HashMap::new();
    for contract in contracts {
        let Some(base) = contract.name().strip_suffix(CONTRACT_SUFFIX) else {
            tracing::warn!(
                contract = contract.name(),
                "ignoring contract without the {CONTRACT_SUFFIX} suffix"
            );
            continue;
        };

        let expected = format!("{base}{IMPLEMENTATION_SUFFIX}");
        match implementations.get(expected.as_str()) {
            Some(implementation) => {
                tracing::debug!(
                    contract = contract.name(),
                    implementation = implementation.name(),
                    "registered repository pairing"
                );
                repositories.insert(contract.key(), implementation.clone());
            }
            None => {
                // Left unmapped on purpose: resolution will fail hard and
                // make the missing implementation visible immediately.
                tracing::warn!(
                    contract = contract.name(),
                    expected = expected.as_str(),
                    "no implementation found for contract"
                );
            }
        }
    }

    let services = services
        .into_iter()
        .filter(|service| {
            let name = service.name();
            let keep = name.ends_with(SERVICE_SUFFIX) && name != SERVICE_SUFFIX;
            if !keep {
                tracing::warn!(service = name, "ignoring non-conforming service entry");
            }
            keep
        })
        .collect();

    Discovered {
        repositories,
        services,
    }
}
