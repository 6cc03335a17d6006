//! Build-tool integration broker for a pluggable source-rewrite engine.
//!
//! The broker assembles, at build-invocation time, the exact classpath
//! context an external rewrite engine needs to analyse a module's sources:
//! it extends the invocation's loading realm with the build's resolved
//! dependency locations (so strategies living in test-scoped dependencies
//! become loadable), computes and sanitizes the scoped classpath (entries
//! under the module's own build output are stale mid-build and would
//! corrupt symbol resolution), resolves the operator-chosen strategy, and
//! invokes the engine once with the strategy augmented by the resolved
//! classpath.
//!
//! The pipeline is strictly sequential and per-invocation: no state is
//! shared across invocations, so independent build modules can run
//! concurrently.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use camino::Utf8Path;
//! use graft_broker::{EngineFailure, EngineInvoker, Outcome, RewriteEngine, execute};
//! use graft_classpath::{DependencyScope, ResolvedArtifact};
//! use graft_config::RewriteRequest;
//! use graft_strategy::{
//!     OperationDescriptor, Registration, RewriteStrategy, StaticScanner, StrategyFactory,
//! };
//!
//! #[derive(Default)]
//! struct TidyImports;
//!
//! impl RewriteStrategy for TidyImports {
//!     fn operations(&self) -> BTreeSet<OperationDescriptor> {
//!         BTreeSet::from([OperationDescriptor::new("tidy-imports")])
//!     }
//!
//!     fn prefilter(&self, path: &Utf8Path) -> bool {
//!         path.as_str().ends_with(".java")
//!     }
//!
//!     fn additional_classpath_entries(&self) -> BTreeSet<String> {
//!         BTreeSet::new()
//!     }
//! }
//!
//! struct NullEngine;
//!
//! impl RewriteEngine for NullEngine {
//!     fn run(&self, _: &Utf8Path, _: &dyn RewriteStrategy) -> Result<(), EngineFailure> {
//!         Ok(())
//!     }
//! }
//!
//! let request = RewriteRequest::new(
//!     "/proj/module",
//!     "/proj/module/target",
//!     "com.example.TidyImports",
//! );
//! let artifacts = vec![
//!     ResolvedArtifact::new("com.example:tools:1.0", DependencyScope::Test)
//!         .with_location("/repo/tools-1.0.jar"),
//! ];
//! let scanner = StaticScanner::new().with_root(
//!     "/repo/tools-1.0.jar",
//!     vec![Registration::strategy(
//!         "com.example.TidyImports",
//!         StrategyFactory::from_default::<TidyImports>(),
//!     )],
//! );
//! let invoker = EngineInvoker::new(NullEngine);
//!
//! let outcome = execute(&request, &artifacts, &scanner, &invoker).expect("pipeline succeeds");
//! assert_eq!(outcome, Outcome::Completed);
//! ```

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod telemetry;

pub use self::engine::{EngineExecutionError, EngineFailure, EngineInvoker, RewriteEngine};
pub use self::error::BrokerError;
pub use self::pipeline::{Outcome, Stage, execute};
pub use self::telemetry::{TelemetryError, TelemetryHandle};
