//! Resolved build artifacts and scope-based classpath extraction.
//!
//! The build tool has already resolved the module's dependency graph by the
//! time the broker runs; this module reads that result. A
//! [`ResolvedArtifact`] pairs a display coordinate with a
//! [`DependencyScope`] and, when resolution produced a physical file, its
//! location. [`scoped_locations`] reduces the artifact set to the ordered
//! location list for one scope.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, warn};

/// Tracing target for artifact resolution.
const ARTIFACT_TARGET: &str = "graft_classpath::artifact";

/// Classification of a dependency artifact by when it is needed.
///
/// Scope tokens are parsed case-insensitively. Tokens outside the known set
/// are preserved in [`DependencyScope::Other`] so they can be reported as a
/// configuration warning instead of disappearing silently.
///
/// # Example
///
/// ```
/// use graft_classpath::DependencyScope;
///
/// assert_eq!(DependencyScope::from("TEST"), DependencyScope::Test);
/// assert_eq!(
///     DependencyScope::from("shaded"),
///     DependencyScope::Other("shaded".into())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DependencyScope {
    /// Needed to compile and run the module's own sources.
    Compile,
    /// Needed only for verification and testing.
    Test,
    /// Needed at run time but not for compilation.
    Runtime,
    /// Supplied by the deployment environment.
    Provided,
    /// Supplied by the local system at a fixed location.
    System,
    /// A scope token this broker does not recognise.
    #[strum(default)]
    Other(String),
}

impl FromStr for DependencyScope {
    type Err = strum::ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.eq_ignore_ascii_case("compile") {
            Ok(Self::Compile)
        } else if token.eq_ignore_ascii_case("test") {
            Ok(Self::Test)
        } else if token.eq_ignore_ascii_case("runtime") {
            Ok(Self::Runtime)
        } else if token.eq_ignore_ascii_case("provided") {
            Ok(Self::Provided)
        } else if token.eq_ignore_ascii_case("system") {
            Ok(Self::System)
        } else {
            Err(strum::ParseError::VariantNotFound)
        }
    }
}

impl From<&str> for DependencyScope {
    fn from(token: &str) -> Self {
        // The catch-all variant makes parsing total.
        Self::from_str(token).unwrap_or_else(|_| Self::Other(token.to_owned()))
    }
}

impl Serialize for DependencyScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DependencyScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from(token.as_str()))
    }
}

/// One entry of the build tool's dependency-resolution result.
///
/// Read-only input to the broker. `location` is absent when resolution did
/// not produce a physical file for the artifact; that is the build tool's
/// concern, not this layer's, so such artifacts are skipped rather than
/// rejected.
///
/// # Example
///
/// ```
/// use graft_classpath::{DependencyScope, ResolvedArtifact};
///
/// let artifact = ResolvedArtifact::new("com.example:lib:2.1", DependencyScope::Test)
///     .with_location("/repo/com/example/lib-2.1.jar");
/// assert_eq!(artifact.scope(), &DependencyScope::Test);
/// assert!(artifact.location().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    coordinates: String,
    scope: DependencyScope,
    #[serde(default)]
    location: Option<PathBuf>,
}

impl ResolvedArtifact {
    /// Creates an artifact record without a resolved file location.
    #[must_use]
    pub fn new(coordinates: impl Into<String>, scope: DependencyScope) -> Self {
        Self {
            coordinates: coordinates.into(),
            scope,
            location: None,
        }
    }

    /// Attaches the filesystem location resolution produced.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the artifact's display coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> &str {
        self.coordinates.as_str()
    }

    /// Returns the artifact's dependency scope.
    #[must_use]
    pub const fn scope(&self) -> &DependencyScope {
        &self.scope
    }

    /// Returns the resolved file location, when one exists.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

/// Extracts the ordered locations of artifacts matching the given scope.
///
/// Input order is preserved so repeated builds assemble the same classpath.
/// Artifacts without a file location are skipped (logged at debug level);
/// artifacts carrying an unrecognised scope token are reported with a
/// warning and excluded unless the target scope is that same token.
#[must_use]
pub fn scoped_locations(artifacts: &[ResolvedArtifact], scope: &DependencyScope) -> Vec<PathBuf> {
    let mut locations = Vec::new();
    for artifact in artifacts {
        if let DependencyScope::Other(token) = artifact.scope() {
            warn!(
                target: ARTIFACT_TARGET,
                coordinates = artifact.coordinates(),
                scope = token.as_str(),
                "artifact declares an unrecognised dependency scope"
            );
        }
        if artifact.scope() != scope {
            continue;
        }
        let Some(location) = artifact.location() else {
            debug!(
                target: ARTIFACT_TARGET,
                coordinates = artifact.coordinates(),
                "artifact resolved without a file location; skipping"
            );
            continue;
        };
        locations.push(location.to_path_buf());
    }
    locations
}
