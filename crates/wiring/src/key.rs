//! Type-identity keys for contracts and services.

use std::any::TypeId;

/// Identity of a repository contract or service type.
///
/// Wraps the `TypeId` (the actual key) together with the unqualified type
/// name, which drives the naming convention used by discovery and shows up
/// in diagnostics.
#[derive(Clone, Copy)]
pub struct ContractKey {
    id: TypeId,
    name: &'static str,
}

impl ContractKey {
    /// Creates the key for a type.
    ///
    /// For a contract this is the trait object type, e.g.
    /// `ContractKey::of::<dyn CartRepository>()`; for a service the plain
    /// type, e.g. `ContractKey::of::<CartService>()`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
        }
    }

    /// Returns the unqualified type name, e.g. `"CartRepository"`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ContractKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ContractKey {}

impl std::hash::Hash for ContractKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for ContractKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContractKey").field(&self.name).finish()
    }
}

impl std::fmt::Display for ContractKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Strips the module path (and any `dyn ` prefix) from a type name.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let full = full.strip_prefix("dyn ").unwrap_or(full);
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    trait ProbeRepository: Send + Sync {}

    struct ProbeService;

    #[test]
    fn test_trait_object_key_uses_unqualified_name() {
        let key = ContractKey::of::<dyn ProbeRepository>();
        assert_eq!(key.name(), "ProbeRepository");
    }

    #[test]
    fn test_struct_key_uses_unqualified_name() {
        let key = ContractKey::of::<ProbeService>();
        assert_eq!(key.name(), "ProbeService");
    }

    #[test]
    fn test_keys_compare_by_type_identity() {
        assert_eq!(
            ContractKey::of::<dyn ProbeRepository>(),
            ContractKey::of::<dyn ProbeRepository>()
        );
        assert_ne!(
            ContractKey::of::<dyn ProbeRepository>(),
            ContractKey::of::<ProbeService>()
        );
    }
}
