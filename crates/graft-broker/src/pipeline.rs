//! The linear rewrite pipeline.
//!
//! One invocation moves through a fixed stage sequence with no branching,
//! looping, or retries: extend the loading realm, resolve the scoped
//! classpath, sanitize it, load the strategy, augment it, invoke the
//! engine. The realm extension runs before strategy loading because the
//! strategy implementation may itself live in one of the module's scoped
//! dependencies.

use std::collections::BTreeSet;

use camino::Utf8PathBuf;
use strum::Display;
use tracing::{debug, info};

use graft_classpath::{
    DependencyScope, LoaderRealm, ResolvedArtifact, loadable_root, sanitize, scoped_locations,
};
use graft_config::RewriteRequest;
use graft_strategy::{
    ExtensionRegistry, ExtensionScanner, StrategyDescriptor, augment, load_strategy,
};

use crate::engine::{EngineInvoker, RewriteEngine};
use crate::error::BrokerError;

/// Tracing target for pipeline progress.
const PIPELINE_TARGET: &str = "graft_broker::pipeline";

/// Stages of the rewrite pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    /// Request validation before any work happens.
    Start,
    /// Extending the loading realm with scoped dependency locations.
    InjectClasspath,
    /// Computing the scoped classpath reported to the engine.
    ResolveArtifacts,
    /// Dropping entries under the module's build output directory.
    Sanitize,
    /// Resolving and constructing the requested strategy.
    LoadStrategy,
    /// Composing the strategy with the sanitized classpath.
    Augment,
    /// Running the external rewrite engine.
    InvokeEngine,
}

/// Successful completion modes of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The skip flag was set; no stage ran.
    Skipped,
    /// The full pipeline ran and the engine returned.
    Completed,
}

/// Runs one rewrite invocation end to end.
///
/// When the request's skip flag is set the function returns
/// [`Outcome::Skipped`] without touching the artifact set, the scanner, or
/// the engine. Otherwise every stage runs exactly once and the first
/// failure aborts the invocation.
///
/// # Errors
///
/// Returns a [`BrokerError`] attributing the failure to its pipeline
/// stage; see the error type for the taxonomy.
pub fn execute<E: RewriteEngine>(
    request: &RewriteRequest,
    artifacts: &[ResolvedArtifact],
    scanner: &dyn ExtensionScanner,
    invoker: &EngineInvoker<E>,
) -> Result<Outcome, BrokerError> {
    request
        .validate()
        .map_err(|source| BrokerError::Configuration { source })?;

    if request.skip() {
        info!(target: PIPELINE_TARGET, "rewrite invocation skipped by request");
        return Ok(Outcome::Skipped);
    }

    let scope = DependencyScope::from(request.scope());
    info!(
        target: PIPELINE_TARGET,
        strategy = request.strategy(),
        scope = %scope,
        "starting rewrite invocation"
    );

    // The strategy may live in the module's own scoped dependencies, so
    // the realm must be complete before any lookup.
    let mut realm = LoaderRealm::new();
    realm
        .inject_all(scoped_locations(artifacts, &scope))
        .map_err(|source| BrokerError::Injection {
            stage: Stage::InjectClasspath,
            source,
        })?;
    debug!(target: PIPELINE_TARGET, roots = realm.len(), "loading realm assembled");

    let resolved = scoped_locations(artifacts, &scope)
        .into_iter()
        .map(loadable_root)
        .collect::<Result<Vec<Utf8PathBuf>, _>>()
        .map_err(|source| BrokerError::Injection {
            stage: Stage::ResolveArtifacts,
            source,
        })?;

    let sanitized = sanitize(resolved, request.build_output_dir());
    debug!(target: PIPELINE_TARGET, entries = sanitized.len(), "classpath sanitized");

    let registry = ExtensionRegistry::populate(&realm, scanner)
        .map_err(|source| BrokerError::StrategyResolution { source })?;
    let descriptor = StrategyDescriptor::new(request.strategy());
    let strategy = load_strategy(&registry, &descriptor)
        .map_err(|source| BrokerError::StrategyResolution { source })?;

    let entries: BTreeSet<String> = sanitized
        .into_iter()
        .map(Utf8PathBuf::into_string)
        .collect();
    let augmented = augment(strategy, entries);

    invoker.invoke(request.source_root(), request.strategy(), &augmented)?;
    info!(target: PIPELINE_TARGET, "rewrite invocation completed");
    Ok(Outcome::Completed)
}
