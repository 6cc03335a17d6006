//! Boundary to the external source-rewrite engine.
//!
//! The engine owns traversal, matching, and code transformation; the
//! broker only hands it a source root and a fully augmented strategy.
//! [`EngineInvoker`] makes that hand-off exactly once per invocation and
//! decorates any failure with the invocation context, leaving the engine's
//! own error untouched underneath.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::info;

use graft_strategy::RewriteStrategy;

/// Tracing target for engine invocation.
const ENGINE_TARGET: &str = "graft_broker::engine";

/// Failure type an engine implementation reports.
pub type EngineFailure = Box<dyn std::error::Error + Send + Sync>;

/// Entry point of the external rewrite engine.
///
/// A single blocking call per invocation; the broker imposes no timeout
/// and relies on the build tool's process-level controls. On internal
/// failure the engine is trusted to leave the source tree untouched; the
/// broker performs no rollback.
pub trait RewriteEngine {
    /// Runs one rewrite pass over `source_root` driven by `strategy`.
    ///
    /// # Errors
    ///
    /// Implementations surface their own failure type; the broker wraps
    /// it with invocation context without transforming it.
    fn run(
        &self,
        source_root: &Utf8Path,
        strategy: &dyn RewriteStrategy,
    ) -> Result<(), EngineFailure>;
}

/// An engine failure decorated with its invocation context.
#[derive(Debug, Error)]
#[error("rewrite engine failed over '{source_root}' running strategy '{strategy}': {source}")]
pub struct EngineExecutionError {
    source_root: Utf8PathBuf,
    strategy: String,
    #[source]
    source: EngineFailure,
}

impl EngineExecutionError {
    /// Returns the source root the failed pass ran over.
    #[must_use]
    pub fn source_root(&self) -> &Utf8Path {
        &self.source_root
    }

    /// Returns the qualified name of the strategy that was running.
    #[must_use]
    pub const fn strategy(&self) -> &str {
        self.strategy.as_str()
    }
}

/// Calls the external engine exactly once per invocation.
///
/// No retries: a rewrite pass is safe for the operator to rerun, so a
/// failure surfaces immediately instead of being re-attempted here.
#[derive(Debug)]
pub struct EngineInvoker<E> {
    engine: E,
}

impl<E> EngineInvoker<E> {
    /// Wraps an engine implementation.
    #[must_use]
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Returns the wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: RewriteEngine> EngineInvoker<E> {
    /// Runs the engine, decorating any failure with invocation context.
    ///
    /// # Errors
    ///
    /// Returns [`EngineExecutionError`] carrying the source root, the
    /// strategy name, and the engine's own error as its cause.
    pub fn invoke(
        &self,
        source_root: &Utf8Path,
        strategy_name: &str,
        strategy: &dyn RewriteStrategy,
    ) -> Result<(), EngineExecutionError> {
        info!(
            target: ENGINE_TARGET,
            source_root = source_root.as_str(),
            strategy = strategy_name,
            "invoking rewrite engine"
        );
        self.engine
            .run(source_root, strategy)
            .map_err(|source| EngineExecutionError {
                source_root: source_root.to_owned(),
                strategy: strategy_name.to_owned(),
                source,
            })
    }
}
