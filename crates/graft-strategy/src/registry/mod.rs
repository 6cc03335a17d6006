//! Typed extension registry and strategy loading.
//!
//! Runtime class loading has no direct Rust analogue, so the dynamic lookup
//! is modelled as a typed plugin registry: a mapping from qualified name to
//! a type-erased extension payload, populated by scanning the invocation's
//! loading realm root by root. Loading a strategy then has three explicit
//! failure modes — the name resolves to nothing, the name resolves to an
//! extension of a different kind, or the strategy's factory fails — instead
//! of one opaque reflection error.
//!
//! Discovery itself sits behind the [`ExtensionScanner`] seam so embedders
//! decide how a loadable root maps to registrations; [`StaticScanner`] is
//! the in-process catalogue implementation and test code can supply doubles.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use graft_classpath::LoaderRealm;

use crate::capability::RewriteStrategy;
use crate::descriptor::StrategyDescriptor;
use crate::error::{ConstructionError, StrategyError};

/// Tracing target for registry operations.
const REGISTRY_TARGET: &str = "graft_strategy::registry";

type Constructor =
    Box<dyn Fn() -> Result<Box<dyn RewriteStrategy>, ConstructionError> + Send + Sync>;

/// Factory producing a fresh strategy instance for one invocation.
///
/// The factory is the broker's stand-in for a constructor looked up
/// reflectively: it either yields a ready strategy or reports why
/// construction is impossible.
pub struct StrategyFactory {
    construct: Constructor,
}

impl StrategyFactory {
    /// Wraps an arbitrary construction function.
    #[must_use]
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn() -> Result<Box<dyn RewriteStrategy>, ConstructionError> + Send + Sync + 'static,
    {
        Self {
            construct: Box::new(construct),
        }
    }

    /// Factory for strategies with a self-sufficient `Default` constructor.
    ///
    /// This is the common case; strategies requiring inputs the broker
    /// cannot supply must use [`StrategyFactory::new`] and report the gap
    /// as a construction failure.
    #[must_use]
    pub fn from_default<S>() -> Self
    where
        S: RewriteStrategy + Default + 'static,
    {
        Self::new(|| Ok(Box::new(S::default()) as Box<dyn RewriteStrategy>))
    }

    /// Constructs one strategy instance.
    ///
    /// # Errors
    ///
    /// Propagates whatever failure the wrapped construction function
    /// reports.
    pub fn construct(&self) -> Result<Box<dyn RewriteStrategy>, ConstructionError> {
        (self.construct)()
    }
}

impl std::fmt::Debug for StrategyFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyFactory").finish_non_exhaustive()
    }
}

/// A named extension contributed by one loadable root.
///
/// The payload is type-erased: the registry stores every kind of extension
/// a root may contribute, and each lookup downcasts to the capability it
/// expects.
#[derive(Clone)]
pub struct Registration {
    qualified_name: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Registration {
    /// Registers a rewrite-strategy factory under the given qualified name.
    #[must_use]
    pub fn strategy(qualified_name: impl Into<String>, factory: StrategyFactory) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            payload: Arc::new(factory),
        }
    }

    /// Registers an extension of any other kind under the given name.
    ///
    /// Looking such an entry up as a rewrite strategy fails with
    /// [`StrategyError::TypeMismatch`].
    #[must_use]
    pub fn extension(
        qualified_name: impl Into<String>,
        payload: Arc<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            payload,
        }
    }

    /// Returns the name the extension is registered under.
    #[must_use]
    pub const fn qualified_name(&self) -> &str {
        self.qualified_name.as_str()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("qualified_name", &self.qualified_name)
            .finish_non_exhaustive()
    }
}

/// Discovers the extensions one loadable root contributes.
#[cfg_attr(test, mockall::automock)]
pub trait ExtensionScanner {
    /// Returns the registrations contributed by `root`.
    fn registrations(&self, root: &Utf8Path) -> Vec<Registration>;
}

/// Scanner backed by an in-process catalogue keyed by contributing root.
///
/// Roots absent from the catalogue contribute nothing, mirroring a
/// dependency jar that carries no extensions.
#[derive(Debug, Default)]
pub struct StaticScanner {
    catalogue: HashMap<Utf8PathBuf, Vec<Registration>>,
}

impl StaticScanner {
    /// Creates an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the registrations contributed by one root.
    #[must_use]
    pub fn with_root(
        mut self,
        root: impl Into<Utf8PathBuf>,
        registrations: Vec<Registration>,
    ) -> Self {
        self.catalogue
            .entry(root.into())
            .or_default()
            .extend(registrations);
        self
    }
}

impl ExtensionScanner for StaticScanner {
    fn registrations(&self, root: &Utf8Path) -> Vec<Registration> {
        self.catalogue.get(root).cloned().unwrap_or_default()
    }
}

/// Registry of the extensions reachable through one invocation's realm.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by scanning the realm's roots in injection order.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::DuplicateRegistration`] when two roots
    /// contribute the same qualified name.
    pub fn populate(
        realm: &LoaderRealm,
        scanner: &dyn ExtensionScanner,
    ) -> Result<Self, StrategyError> {
        let mut registry = Self::new();
        for root in realm.roots() {
            for registration in scanner.registrations(root) {
                debug!(
                    target: REGISTRY_TARGET,
                    root = root.as_str(),
                    extension = registration.qualified_name(),
                    "registering extension"
                );
                registry.insert(registration)?;
            }
        }
        Ok(registry)
    }

    /// Inserts one registration.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::DuplicateRegistration`] when the name is
    /// already taken.
    pub fn insert(&mut self, registration: Registration) -> Result<(), StrategyError> {
        let Registration {
            qualified_name,
            payload,
        } = registration;
        if self.entries.contains_key(&qualified_name) {
            return Err(StrategyError::DuplicateRegistration { qualified_name });
        }
        self.entries.insert(qualified_name, payload);
        Ok(())
    }

    /// Returns whether an extension is registered under the given name.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.entries.contains_key(qualified_name)
    }

    /// Returns the number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no extensions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn payload(&self, qualified_name: &str) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.entries.get(qualified_name)
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("ExtensionRegistry")
            .field("entries", &names)
            .finish()
    }
}

/// Resolves and constructs the strategy named by the descriptor.
///
/// Read-only with respect to the registry: a failed load leaves no partial
/// state behind.
///
/// # Errors
///
/// Returns [`StrategyError::EmptyName`] for a blank descriptor,
/// [`StrategyError::NotFound`] when nothing is registered under the name,
/// [`StrategyError::TypeMismatch`] when the entry is not a strategy
/// factory, and [`StrategyError::Instantiation`] when the factory fails.
pub fn load_strategy(
    registry: &ExtensionRegistry,
    descriptor: &StrategyDescriptor,
) -> Result<Box<dyn RewriteStrategy>, StrategyError> {
    descriptor.validate()?;
    let qualified_name = descriptor.qualified_name();
    let payload = registry
        .payload(qualified_name)
        .ok_or_else(|| StrategyError::NotFound {
            qualified_name: qualified_name.to_owned(),
        })?;
    let factory =
        payload
            .downcast_ref::<StrategyFactory>()
            .ok_or_else(|| StrategyError::TypeMismatch {
                qualified_name: qualified_name.to_owned(),
            })?;
    debug!(target: REGISTRY_TARGET, strategy = qualified_name, "constructing strategy");
    factory
        .construct()
        .map_err(|source| StrategyError::Instantiation {
            qualified_name: qualified_name.to_owned(),
            source,
        })
}
