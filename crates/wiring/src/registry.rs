//! Process-wide dependency registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::catalog::{Catalog, ImplementationEntry, ServiceEntry, default_catalog};
use crate::discovery::{Discovered, discover};
use crate::key::ContractKey;

/// Registry mapping repository contracts to implementations and listing
/// discovered services.
///
/// The registry is created once at process start and passed by handle to
/// all request-handling code. Discovery runs lazily on the first lookup
/// and exactly once per registry, even under concurrent first access; all
/// later reads go against the immutable discovered map without locking.
///
/// Manual registrations act as overrides: they win over discovered
/// pairings whether made before or after the scan, and a later manual
/// registration replaces an earlier one. They never trigger a re-scan.
pub struct DependencyRegistry {
    catalog: Catalog,
    discovered: OnceLock<Discovered>,
    overrides: RwLock<HashMap<ContractKey, ImplementationEntry>>,
    scans: AtomicUsize,
}

impl DependencyRegistry {
    /// Creates a registry over a catalog. Discovery does not run yet.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            discovered: OnceLock::new(),
            overrides: RwLock::new(HashMap::new()),
            scans: AtomicUsize::new(0),
        }
    }

    /// Creates a registry over the default application catalog.
    pub fn with_default_catalog() -> Self {
        Self::new(default_catalog())
    }

    fn discovered(&self) -> &Discovered {
        self.discovered.get_or_init(|| {
            self.scans.fetch_add(1, Ordering::SeqCst);
            let discovered = discover(&self.catalog);
            tracing::debug!(
                repositories = discovered.repositories.len(),
                services = discovered.services.len(),
                "dependency discovery complete"
            );
            discovered
        })
    }

    /// Returns the implementation paired with a contract, if any.
    ///
    /// Triggers the lazy discovery scan on first call; a pure lookup
    /// thereafter. Manual overrides take precedence over discovered
    /// pairings.
    pub fn implementation(&self, key: ContractKey) -> Option<ImplementationEntry> {
        let discovered = self.discovered();

        let overrides = self
            .overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = overrides.get(&key) {
            return Some(entry.clone());
        }

        discovered.repositories.get(&key).cloned()
    }

    /// Returns true if the contract has an implementation registered.
    pub fn is_registered(&self, key: ContractKey) -> bool {
        self.implementation(key).is_some()
    }

    /// Manually registers an implementation for a contract.
    ///
    /// Bypasses discovery entirely; the override wins over any discovered
    /// pairing and over earlier manual registrations for the same
    /// contract (last write wins).
    pub fn register_manually(&self, key: ContractKey, entry: ImplementationEntry) {
        tracing::debug!(contract = key.name(), implementation = entry.name(), "manual registration");
        self.overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    /// Returns all discovered services.
    pub fn services(&self) -> &[ServiceEntry] {
        &self.discovered().services
    }

    /// Returns the discovered service with the given key, if any.
    pub fn service(&self, key: ContractKey) -> Option<&ServiceEntry> {
        self.discovered()
            .services
            .iter()
            .find(|service| service.key() == key)
    }

    /// Returns the names of all discovered services.
    pub fn service_names(&self) -> Vec<&'static str> {
        self.discovered()
            .services
            .iter()
            .map(ServiceEntry::name)
            .collect()
    }

    /// Number of discovery scans that have run (0 or 1).
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("initialized", &self.discovered.get().is_some())
            .field("scans", &self.scan_count())
            .finish_non_exhaustive()
    }
}
