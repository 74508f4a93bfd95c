//! Wiring error types.

use thiserror::Error;

/// Errors that can occur while resolving or constructing dependencies.
#[derive(Debug, Error)]
pub enum WiringError {
    /// No implementation is registered for a repository contract.
    ///
    /// This signals a deployment/wiring defect: the contract exists but
    /// discovery found nothing to pair it with. It should surface loudly
    /// on the first resolution attempt rather than be caught and retried.
    #[error("No implementation registered for contract {contract}")]
    UnmappedContract { contract: &'static str },

    /// The requested service type was not discovered.
    #[error("No service registered for type {service}")]
    UnknownService { service: &'static str },

    /// A constructor required a parameter that resolution left unresolved.
    #[error("Missing required dependency `{parameter}`")]
    MissingDependency { parameter: &'static str },

    /// A resolved instance could not be downcast to the requested type.
    #[error("Resolved instance for `{expected}` has an unexpected type")]
    TypeMismatch { expected: &'static str },

    /// A catalog module failed to produce its entries.
    #[error("Catalog module {module} failed to load: {reason}")]
    Module {
        module: &'static str,
        reason: String,
    },
}
