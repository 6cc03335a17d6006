//! The per-invocation parameter set handed over by the build tool.
//!
//! A [`RewriteRequest`] carries everything one broker invocation needs:
//! the source root to rewrite, the module's build output directory (whose
//! contents must be excluded from the engine's classpath), the qualified
//! name of the strategy to run, the dependency scope to resolve, and the
//! logging settings. Requests are immutable once built and are validated
//! before the pipeline starts.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogFormat;

/// Dependency scope resolved when the request does not name one.
const DEFAULT_SCOPE: &str = "test";

/// Log filter applied when the request does not name one.
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors reported when a [`RewriteRequest`] fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No strategy qualified name was supplied.
    #[error("strategy qualified name must not be empty")]
    MissingStrategy,

    /// The source root is not an absolute path.
    #[error("source root '{path}' must be an absolute path")]
    RelativeSourceRoot {
        /// The rejected path.
        path: Utf8PathBuf,
    },

    /// The build output directory is not an absolute path.
    #[error("build output directory '{path}' must be an absolute path")]
    RelativeBuildOutput {
        /// The rejected path.
        path: Utf8PathBuf,
    },
}

/// Parameters for one rewrite invocation.
///
/// Constructed via [`RewriteRequest::new`] plus the `with_*` builder
/// methods; unset fields take the same defaults the serde representation
/// uses (`skip = false`, `scope = "test"`, `log_filter = "info"`,
/// compact log format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    source_root: Utf8PathBuf,
    build_output_dir: Utf8PathBuf,
    strategy: String,
    #[serde(default)]
    skip: bool,
    #[serde(default = "default_scope")]
    scope: String,
    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default)]
    log_format: LogFormat,
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_owned()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

impl RewriteRequest {
    /// Creates a request with default skip, scope, and logging settings.
    #[must_use]
    pub fn new(
        source_root: impl Into<Utf8PathBuf>,
        build_output_dir: impl Into<Utf8PathBuf>,
        strategy: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            build_output_dir: build_output_dir.into(),
            strategy: strategy.into(),
            skip: false,
            scope: default_scope(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }

    /// Marks the invocation as skipped; the broker then performs no work.
    #[must_use]
    pub const fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Overrides the dependency scope to resolve.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Overrides the log filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Overrides the log output format.
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Validates the request, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingStrategy`] when the strategy name is
    /// blank, or a `Relative*` variant when either directory is not an
    /// absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy.trim().is_empty() {
            return Err(ConfigError::MissingStrategy);
        }
        if !self.source_root.is_absolute() {
            return Err(ConfigError::RelativeSourceRoot {
                path: self.source_root.clone(),
            });
        }
        if !self.build_output_dir.is_absolute() {
            return Err(ConfigError::RelativeBuildOutput {
                path: self.build_output_dir.clone(),
            });
        }
        Ok(())
    }

    /// Returns the source root the engine rewrites.
    #[must_use]
    pub fn source_root(&self) -> &Utf8Path {
        &self.source_root
    }

    /// Returns the module's build output directory.
    #[must_use]
    pub fn build_output_dir(&self) -> &Utf8Path {
        &self.build_output_dir
    }

    /// Returns the strategy qualified name.
    #[must_use]
    pub const fn strategy(&self) -> &str {
        self.strategy.as_str()
    }

    /// Returns whether the invocation should be skipped entirely.
    #[must_use]
    pub const fn skip(&self) -> bool {
        self.skip
    }

    /// Returns the dependency scope token to resolve.
    #[must_use]
    pub const fn scope(&self) -> &str {
        self.scope.as_str()
    }

    /// Returns the log filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn request() -> RewriteRequest {
        RewriteRequest::new("/proj/module", "/proj/module/target", "com.example.Tidy")
    }

    #[rstest]
    fn defaults_are_applied(request: RewriteRequest) {
        assert!(!request.skip());
        assert_eq!(request.scope(), "test");
        assert_eq!(request.log_filter(), "info");
        assert_eq!(request.log_format(), LogFormat::Compact);
    }

    #[rstest]
    fn builders_override_defaults(request: RewriteRequest) {
        let tuned = request
            .with_skip(true)
            .with_scope("runtime")
            .with_log_filter("graft=debug")
            .with_log_format(LogFormat::Json);
        assert!(tuned.skip());
        assert_eq!(tuned.scope(), "runtime");
        assert_eq!(tuned.log_filter(), "graft=debug");
        assert_eq!(tuned.log_format(), LogFormat::Json);
    }

    #[rstest]
    fn valid_request_passes(request: RewriteRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn blank_strategy_is_rejected(#[case] strategy: &str) {
        let invalid = RewriteRequest::new("/proj/module", "/proj/module/target", strategy);
        assert_eq!(invalid.validate(), Err(ConfigError::MissingStrategy));
    }

    #[test]
    fn relative_source_root_is_rejected() {
        let invalid = RewriteRequest::new("module", "/proj/module/target", "com.example.Tidy");
        assert!(matches!(
            invalid.validate(),
            Err(ConfigError::RelativeSourceRoot { .. })
        ));
    }

    #[test]
    fn relative_build_output_is_rejected() {
        let invalid = RewriteRequest::new("/proj/module", "target", "com.example.Tidy");
        assert!(matches!(
            invalid.validate(),
            Err(ConfigError::RelativeBuildOutput { .. })
        ));
    }
}
