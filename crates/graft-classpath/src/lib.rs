//! Classpath assembly for the Graft rewrite broker.
//!
//! The `graft-classpath` crate owns the dependency-graph side of a rewrite
//! invocation: extracting the filesystem locations of build artifacts for a
//! chosen dependency scope, removing entries that point into the module's
//! own build output (mid-regeneration and therefore unsafe to resolve
//! against), and accumulating the per-invocation [`LoaderRealm`] through
//! which strategy implementations become loadable.
//!
//! The realm is an explicit value handed from stage to stage rather than
//! process-global state, so independent invocations can run concurrently
//! without observing each other's roots.
//!
//! # Example
//!
//! ```
//! use camino::Utf8Path;
//! use graft_classpath::{
//!     DependencyScope, LoaderRealm, ResolvedArtifact, loadable_root, sanitize,
//!     scoped_locations,
//! };
//!
//! let artifacts = vec![
//!     ResolvedArtifact::new("com.example:lib:1.0", DependencyScope::Test)
//!         .with_location("/repo/lib-1.0.jar"),
//!     ResolvedArtifact::new("com.example:app:1.0", DependencyScope::Compile)
//!         .with_location("/repo/app-1.0.jar"),
//! ];
//!
//! let locations = scoped_locations(&artifacts, &DependencyScope::Test);
//! let mut realm = LoaderRealm::new();
//! realm.inject_all(locations.clone()).expect("locations are absolute UTF-8");
//!
//! let entries = locations
//!     .into_iter()
//!     .map(loadable_root)
//!     .collect::<Result<Vec<_>, _>>()
//!     .expect("locations are absolute UTF-8");
//! let kept = sanitize(entries, Utf8Path::new("/proj/module/target"));
//! assert_eq!(kept.len(), 1);
//! ```

pub mod artifact;
pub mod realm;
pub mod sanitize;

pub use self::artifact::{DependencyScope, ResolvedArtifact, scoped_locations};
pub use self::realm::{InjectionError, LoaderRealm, loadable_root};
pub use self::sanitize::sanitize;
