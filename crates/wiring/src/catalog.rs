//! Bootstrap registration catalog.
//!
//! The catalog is the statically-declared equivalent of a filesystem scan:
//! each module is a named, fallible provider of the contract,
//! implementation and service entries it contributes. Discovery consumes
//! the catalog once per process and pairs contracts with implementations
//! by naming convention (see [`crate::discovery`]).

use std::any::Any;
use std::sync::Arc;

use service::{CartService, OrderService};
use store::{
    CartRepository, CartRepositoryImpl, DbSession, OrderRepository, OrderRepositoryImpl,
};

use crate::error::WiringError;
use crate::key::ContractKey;
use crate::resolver::ResolvedDependencies;

/// A type-erased shared instance produced by a factory or constructor.
///
/// The erased value is always the typed `Arc` itself (`Arc<dyn Contract>`
/// for repositories, `Arc<Service>` for services), so consumers downcast
/// back to that `Arc` and clones share one allocation.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// Erases a value into a [`SharedInstance`].
pub fn shared<T: Send + Sync + 'static>(value: T) -> SharedInstance {
    Arc::new(value)
}

/// What a constructor parameter needs bound to it.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    /// The shared persistence session held by the resolver.
    Session,

    /// An implementation of the given repository contract.
    Contract(ContractKey),
}

/// One declared constructor parameter.
#[derive(Debug, Clone)]
pub struct DependencySpec {
    /// Parameter name, used as the key in the resolved set.
    pub parameter: &'static str,

    /// What the parameter requires.
    pub requirement: Requirement,
}

impl DependencySpec {
    /// Declares a parameter bound to the resolver's session.
    pub fn session(parameter: &'static str) -> Self {
        Self {
            parameter,
            requirement: Requirement::Session,
        }
    }

    /// Declares a parameter bound to a repository contract.
    pub fn contract<C: ?Sized + 'static>(parameter: &'static str) -> Self {
        Self {
            parameter,
            requirement: Requirement::Contract(ContractKey::of::<C>()),
        }
    }
}

type BuildFn = Arc<dyn Fn(&ResolvedDependencies) -> Result<SharedInstance, WiringError> + Send + Sync>;

/// A repository contract declared by a catalog module.
#[derive(Debug, Clone, Copy)]
pub struct ContractEntry {
    key: ContractKey,
}

impl ContractEntry {
    /// Declares a contract, e.g. `ContractEntry::new::<dyn CartRepository>()`.
    pub fn new<C: ?Sized + 'static>() -> Self {
        Self {
            key: ContractKey::of::<C>(),
        }
    }

    /// Returns the contract key.
    pub fn key(&self) -> ContractKey {
        self.key
    }

    /// Returns the contract name.
    pub fn name(&self) -> &'static str {
        self.key.name()
    }
}

/// A concrete repository implementation declared by a catalog module.
///
/// The entry name is what discovery matches against the convention
/// (`FooRepository` → `FooRepositoryImpl`); the factory builds the
/// instance from its resolved constructor parameters.
#[derive(Clone)]
pub struct ImplementationEntry {
    name: &'static str,
    dependencies: Vec<DependencySpec>,
    build: BuildFn,
}

impl ImplementationEntry {
    /// Declares an implementation.
    pub fn new(
        name: &'static str,
        dependencies: Vec<DependencySpec>,
        build: impl Fn(&ResolvedDependencies) -> Result<SharedInstance, WiringError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            name,
            dependencies,
            build: Arc::new(build),
        }
    }

    /// Returns the implementation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared constructor parameters.
    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    /// Builds an instance from resolved parameters.
    pub fn build(&self, deps: &ResolvedDependencies) -> Result<SharedInstance, WiringError> {
        (self.build)(deps)
    }
}

impl std::fmt::Debug for ImplementationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImplementationEntry")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// A service declared by a catalog module.
#[derive(Clone)]
pub struct ServiceEntry {
    key: ContractKey,
    dependencies: Vec<DependencySpec>,
    construct: BuildFn,
}

impl ServiceEntry {
    /// Declares a service, keyed by its concrete type.
    pub fn new<S: 'static>(
        dependencies: Vec<DependencySpec>,
        construct: impl Fn(&ResolvedDependencies) -> Result<SharedInstance, WiringError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            key: ContractKey::of::<S>(),
            dependencies,
            construct: Arc::new(construct),
        }
    }

    /// Returns the service key.
    pub fn key(&self) -> ContractKey {
        self.key
    }

    /// Returns the service name.
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Returns the declared constructor parameters.
    pub fn dependencies(&self) -> &[DependencySpec] {
        &self.dependencies
    }

    /// Constructs the service from resolved parameters.
    pub fn construct(&self, deps: &ResolvedDependencies) -> Result<SharedInstance, WiringError> {
        (self.construct)(deps)
    }
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("name", &self.name())
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Entries contributed by one catalog module.
#[derive(Debug, Default)]
pub struct ModuleEntries {
    pub contracts: Vec<ContractEntry>,
    pub implementations: Vec<ImplementationEntry>,
    pub services: Vec<ServiceEntry>,
}

type EntriesFn = Box<dyn Fn() -> Result<ModuleEntries, WiringError> + Send + Sync>;

/// A named provider of catalog entries.
///
/// A module whose provider fails is skipped by discovery without aborting
/// the overall scan.
pub struct CatalogModule {
    name: &'static str,
    entries: EntriesFn,
}

impl CatalogModule {
    /// Creates a catalog module.
    pub fn new(
        name: &'static str,
        entries: impl Fn() -> Result<ModuleEntries, WiringError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            entries: Box::new(entries),
        }
    }

    /// Returns the module name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Produces the module's entries.
    pub fn load(&self) -> Result<ModuleEntries, WiringError> {
        (self.entries)()
    }
}

impl std::fmt::Debug for CatalogModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogModule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The bootstrap registration catalog consumed by discovery.
#[derive(Debug, Default)]
pub struct Catalog {
    modules: Vec<CatalogModule>,
}

impl Catalog {
    /// Creates a catalog from a list of modules.
    pub fn new(modules: Vec<CatalogModule>) -> Self {
        Self { modules }
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the modules in the catalog.
    pub fn modules(&self) -> &[CatalogModule] {
        &self.modules
    }
}

/// The catalog wiring the real application: cart and order modules.
pub fn default_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogModule::new("carts", || Ok(cart_entries())),
        CatalogModule::new("orders", || Ok(order_entries())),
    ])
}

fn cart_entries() -> ModuleEntries {
    ModuleEntries {
        contracts: vec![ContractEntry::new::<dyn CartRepository>()],
        implementations: vec![ImplementationEntry::new(
            "CartRepositoryImpl",
            vec![DependencySpec::session("session")],
            |deps| {
                let session: DbSession = deps.get("session")?;
                let repository: Arc<dyn CartRepository> =
                    Arc::new(CartRepositoryImpl::new(session));
                Ok(shared(repository))
            },
        )],
        services: vec![ServiceEntry::new::<CartService>(
            vec![DependencySpec::contract::<dyn CartRepository>("cart_repo")],
            |deps| {
                let cart_repo: Arc<dyn CartRepository> = deps.get("cart_repo")?;
                Ok(shared(Arc::new(CartService::new(cart_repo))))
            },
        )],
    }
}

fn order_entries() -> ModuleEntries {
    ModuleEntries {
        contracts: vec![ContractEntry::new::<dyn OrderRepository>()],
        implementations: vec![ImplementationEntry::new(
            "OrderRepositoryImpl",
            vec![DependencySpec::session("session")],
            |deps| {
                let session: DbSession = deps.get("session")?;
                let repository: Arc<dyn OrderRepository> =
                    Arc::new(OrderRepositoryImpl::new(session));
                Ok(shared(repository))
            },
        )],
        services: vec![ServiceEntry::new::<OrderService>(
            vec![DependencySpec::contract::<dyn OrderRepository>("order_repo")],
            |deps| {
                let order_repo: Arc<dyn OrderRepository> = deps.get("order_repo")?;
                Ok(shared(Arc::new(OrderService::new(order_repo))))
            },
        )],
    }
}
