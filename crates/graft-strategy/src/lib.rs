//! Strategy resolution and composition for the Graft rewrite broker.
//!
//! A rewrite strategy is the pluggable policy object the external engine
//! executes: which rewrite operations to perform, which files to consider,
//! and which extra classpath entries symbol resolution needs. Strategies
//! are named by the operator with a qualified name and resolved at
//! invocation time against the extensions discoverable through the
//! invocation's loading realm.
//!
//! The crate supplies the [`RewriteStrategy`] capability trait, the typed
//! [`ExtensionRegistry`] with its enumerated load-failure modes, and the
//! [`AugmentedStrategy`] decorator that swaps in the broker-computed
//! classpath-entry set while forwarding everything else to the loaded
//! strategy.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use std::path::PathBuf;
//!
//! use graft_classpath::LoaderRealm;
//! use graft_strategy::{
//!     ExtensionRegistry, Registration, StaticScanner, StrategyDescriptor,
//!     StrategyFactory, augment, load_strategy,
//! };
//! # use std::collections::BTreeSet as Set;
//! # use camino::Utf8Path;
//! # use graft_strategy::{OperationDescriptor, RewriteStrategy};
//! # #[derive(Default)]
//! # struct TidyImports;
//! # impl RewriteStrategy for TidyImports {
//! #     fn operations(&self) -> Set<OperationDescriptor> {
//! #         Set::from([OperationDescriptor::new("tidy-imports")])
//! #     }
//! #     fn prefilter(&self, path: &Utf8Path) -> bool {
//! #         path.as_str().ends_with(".java")
//! #     }
//! #     fn additional_classpath_entries(&self) -> Set<String> {
//! #         Set::new()
//! #     }
//! # }
//!
//! let mut realm = LoaderRealm::new();
//! realm
//!     .inject(PathBuf::from("/repo/tools.jar"))
//!     .expect("absolute UTF-8 location");
//!
//! let scanner = StaticScanner::new().with_root(
//!     "/repo/tools.jar",
//!     vec![Registration::strategy(
//!         "com.example.TidyImports",
//!         StrategyFactory::from_default::<TidyImports>(),
//!     )],
//! );
//!
//! let registry = ExtensionRegistry::populate(&realm, &scanner).expect("no duplicates");
//! let descriptor = StrategyDescriptor::new("com.example.TidyImports");
//! let strategy = load_strategy(&registry, &descriptor).expect("strategy resolves");
//! let augmented = augment(strategy, BTreeSet::from(["/repo/lib.jar".to_owned()]));
//! assert_eq!(augmented.additional_classpath_entries().len(), 1);
//! ```

pub mod augment;
pub mod capability;
pub mod descriptor;
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::augment::{AugmentedStrategy, augment};
pub use self::capability::RewriteStrategy;
pub use self::descriptor::{OperationDescriptor, StrategyDescriptor};
pub use self::error::{ConstructionError, StrategyError};
pub use self::registry::{
    ExtensionRegistry, ExtensionScanner, Registration, StaticScanner, StrategyFactory,
    load_strategy,
};
