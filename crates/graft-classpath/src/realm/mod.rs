//! The per-invocation dynamic loading realm.
//!
//! Strategy implementations may live in the module's own test-scoped
//! dependencies, so before any strategy lookup the broker extends a
//! [`LoaderRealm`] with the resolved dependency locations. The realm is
//! created empty for each invocation, augmented exactly once, threaded by
//! reference through registry population, and discarded when the engine
//! call returns. Nothing is ever removed: re-adding a root the realm
//! already holds is a no-op, which keeps concurrent invocations over a
//! shared artifact set conflict-free.

use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::debug;

/// Tracing target for realm operations.
const REALM_TARGET: &str = "graft_classpath::realm";

/// Errors raised while converting resolved locations into loadable roots.
///
/// These are fatal configuration problems, deliberately distinct from the
/// silent skip of artifacts that resolved without any file location: here a
/// location exists but cannot be represented as a loadable root.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InjectionError {
    /// The location is not representable as UTF-8.
    #[error("classpath location '{}' is not valid UTF-8", path.display())]
    NonUnicode {
        /// The rejected location.
        path: PathBuf,
    },

    /// Relative locations would silently re-anchor if the working directory
    /// moves between injection and loading.
    #[error("classpath location '{path}' must be absolute")]
    Relative {
        /// The rejected location.
        path: Utf8PathBuf,
    },
}

/// Converts one resolved dependency location into a loadable realm root.
///
/// # Errors
///
/// Returns [`InjectionError::NonUnicode`] for paths that are not valid
/// UTF-8 and [`InjectionError::Relative`] for paths that are not absolute.
pub fn loadable_root(location: PathBuf) -> Result<Utf8PathBuf, InjectionError> {
    let root =
        Utf8PathBuf::from_path_buf(location).map_err(|path| InjectionError::NonUnicode { path })?;
    if !root.is_absolute() {
        return Err(InjectionError::Relative { path: root });
    }
    Ok(root)
}

/// Ordered, deduplicated set of loadable roots for one invocation.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
///
/// use camino::Utf8Path;
/// use graft_classpath::LoaderRealm;
///
/// let mut realm = LoaderRealm::new();
/// realm
///     .inject_all(vec![
///         PathBuf::from("/repo/a.jar"),
///         PathBuf::from("/repo/b.jar"),
///         PathBuf::from("/repo/a.jar"),
///     ])
///     .expect("absolute UTF-8 locations");
/// assert_eq!(realm.len(), 2);
/// assert!(realm.contains(Utf8Path::new("/repo/b.jar")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderRealm {
    roots: Vec<Utf8PathBuf>,
}

impl LoaderRealm {
    /// Creates an empty realm.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one location as a loadable root.
    ///
    /// Roots accumulate monotonically: a location the realm already holds
    /// is accepted without effect.
    ///
    /// # Errors
    ///
    /// Returns an [`InjectionError`] when the location cannot be converted
    /// to a loadable root.
    pub fn inject(&mut self, location: PathBuf) -> Result<(), InjectionError> {
        let root = loadable_root(location)?;
        if self.roots.contains(&root) {
            return Ok(());
        }
        debug!(target: REALM_TARGET, root = root.as_str(), "adding loadable root to realm");
        self.roots.push(root);
        Ok(())
    }

    /// Adds every location in sequence order.
    ///
    /// # Errors
    ///
    /// Fails on the first location that cannot be converted; roots added
    /// before the failure remain in the realm, matching the fatal-error
    /// contract (the invocation aborts, the realm is discarded).
    pub fn inject_all(
        &mut self,
        locations: impl IntoIterator<Item = PathBuf>,
    ) -> Result<(), InjectionError> {
        for location in locations {
            self.inject(location)?;
        }
        Ok(())
    }

    /// Returns the loadable roots in injection order.
    #[must_use]
    pub const fn roots(&self) -> &[Utf8PathBuf] {
        self.roots.as_slice()
    }

    /// Returns whether the realm holds the given root.
    #[must_use]
    pub fn contains(&self, root: &Utf8Path) -> bool {
        self.roots.iter().any(|held| held == root)
    }

    /// Returns the number of distinct roots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` when no roots have been injected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
