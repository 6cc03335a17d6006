//! End-to-end behaviour tests for the rewrite pipeline.
//!
//! These tests drive [`graft_broker::execute`] with in-memory collaborators:
//! a recording engine standing in for the external rewriter and a static
//! extension catalogue standing in for discovery.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use rstest::rstest;

use graft_broker::{
    BrokerError, EngineFailure, EngineInvoker, Outcome, RewriteEngine, Stage, execute,
};
use graft_classpath::{DependencyScope, InjectionError, ResolvedArtifact};
use graft_config::{ConfigError, RewriteRequest};
use graft_strategy::{
    ExtensionScanner, OperationDescriptor, Registration, RewriteStrategy, StaticScanner,
    StrategyError, StrategyFactory,
};

const STRATEGY_NAME: &str = "com.example.TidyImports";
const TOOLS_JAR: &str = "/repo/tools-1.0.jar";

#[derive(Default)]
struct TidyImports;

impl RewriteStrategy for TidyImports {
    fn operations(&self) -> BTreeSet<OperationDescriptor> {
        BTreeSet::from([OperationDescriptor::new("tidy-imports")])
    }

    fn prefilter(&self, path: &Utf8Path) -> bool {
        path.as_str().ends_with(".java")
    }

    fn additional_classpath_entries(&self) -> BTreeSet<String> {
        BTreeSet::from(["/declared/by-strategy.jar".to_owned()])
    }
}

/// One observed engine call.
struct EngineCall {
    source_root: Utf8PathBuf,
    operations: BTreeSet<OperationDescriptor>,
    entries: BTreeSet<String>,
}

#[derive(Clone, Default)]
struct RecordingEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl RecordingEngine {
    fn calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn last_call<T>(&self, inspect: impl FnOnce(&EngineCall) -> T) -> Option<T> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(inspect)
    }
}

impl RewriteEngine for RecordingEngine {
    fn run(
        &self,
        source_root: &Utf8Path,
        strategy: &dyn RewriteStrategy,
    ) -> Result<(), EngineFailure> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EngineCall {
                source_root: source_root.to_owned(),
                operations: strategy.operations(),
                entries: strategy.additional_classpath_entries(),
            });
        Ok(())
    }
}

struct FailingEngine;

impl RewriteEngine for FailingEngine {
    fn run(
        &self,
        _source_root: &Utf8Path,
        _strategy: &dyn RewriteStrategy,
    ) -> Result<(), EngineFailure> {
        Err("unbalanced braces in Main.java".into())
    }
}

#[derive(Default)]
struct CountingScanner {
    calls: AtomicUsize,
}

impl ExtensionScanner for CountingScanner {
    fn registrations(&self, _root: &Utf8Path) -> Vec<Registration> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}

/// A module checkout on disk, with its build output directory.
struct ModuleDirs {
    _workspace: tempfile::TempDir,
    source_root: Utf8PathBuf,
    build_output: Utf8PathBuf,
}

fn module_dirs() -> ModuleDirs {
    let workspace = tempfile::tempdir().expect("create workspace");
    let source_root = Utf8PathBuf::from_path_buf(workspace.path().join("module"))
        .expect("workspace path is UTF-8");
    let build_output = source_root.join("target");
    std::fs::create_dir_all(&build_output).expect("create build output");
    ModuleDirs {
        _workspace: workspace,
        source_root,
        build_output,
    }
}

fn request_for(dirs: &ModuleDirs) -> RewriteRequest {
    RewriteRequest::new(dirs.source_root.clone(), dirs.build_output.clone(), STRATEGY_NAME)
}

fn tools_scanner() -> StaticScanner {
    StaticScanner::new().with_root(
        TOOLS_JAR,
        vec![Registration::strategy(
            STRATEGY_NAME,
            StrategyFactory::from_default::<TidyImports>(),
        )],
    )
}

fn artifacts_for(dirs: &ModuleDirs) -> Vec<ResolvedArtifact> {
    vec![
        ResolvedArtifact::new("com.example:tools:1.0", DependencyScope::Test)
            .with_location(TOOLS_JAR),
        ResolvedArtifact::new("com.example:module:1.0", DependencyScope::Test)
            .with_location(dirs.build_output.join("classes")),
        ResolvedArtifact::new("com.example:runtime-lib:1.0", DependencyScope::Compile)
            .with_location("/repo/runtime-lib-1.0.jar"),
    ]
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn full_pipeline_reports_sanitized_scoped_entries_to_engine() {
    let dirs = module_dirs();
    let engine = RecordingEngine::default();
    let invoker = EngineInvoker::new(engine.clone());

    let outcome = execute(
        &request_for(&dirs),
        &artifacts_for(&dirs),
        &tools_scanner(),
        &invoker,
    )
    .expect("pipeline succeeds");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(engine.calls(), 1);

    let entries = engine
        .last_call(|call| call.entries.clone())
        .expect("one engine call");
    // Test-scoped jar survives; build-output and compile-scoped entries
    // do not, and the strategy's declared entry is replaced wholesale.
    assert_eq!(entries, BTreeSet::from([TOOLS_JAR.to_owned()]));

    let source_root = engine
        .last_call(|call| call.source_root.clone())
        .expect("one engine call");
    assert_eq!(source_root, dirs.source_root);

    let operations = engine
        .last_call(|call| call.operations.clone())
        .expect("one engine call");
    assert!(operations.iter().any(|op| op.id() == "tidy-imports"));
}

// ---------------------------------------------------------------------------
// Skip flag
// ---------------------------------------------------------------------------

#[test]
fn skip_flag_short_circuits_without_any_collaborator_call() {
    let dirs = module_dirs();
    let engine = RecordingEngine::default();
    let invoker = EngineInvoker::new(engine.clone());
    let scanner = CountingScanner::default();

    let outcome = execute(
        &request_for(&dirs).with_skip(true),
        &artifacts_for(&dirs),
        &scanner,
        &invoker,
    )
    .expect("skip reports success");

    assert_eq!(outcome, Outcome::Skipped);
    assert_eq!(engine.calls(), 0);
    assert_eq!(scanner.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Failure attribution
// ---------------------------------------------------------------------------

#[test]
fn invalid_request_fails_before_any_stage() {
    let dirs = module_dirs();
    let engine = RecordingEngine::default();
    let invoker = EngineInvoker::new(engine.clone());
    let scanner = CountingScanner::default();
    let request = RewriteRequest::new(dirs.source_root.clone(), dirs.build_output.clone(), "");

    let err = execute(&request, &artifacts_for(&dirs), &scanner, &invoker)
        .expect_err("blank strategy should fail");

    assert!(matches!(
        err,
        BrokerError::Configuration {
            source: ConfigError::MissingStrategy,
        }
    ));
    assert_eq!(err.stage(), Stage::Start);
    assert_eq!(engine.calls(), 0);
    assert_eq!(scanner.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn relative_artifact_location_fails_injection() {
    let dirs = module_dirs();
    let invoker = EngineInvoker::new(RecordingEngine::default());
    let artifacts = vec![
        ResolvedArtifact::new("com.example:odd:1.0", DependencyScope::Test)
            .with_location("relative/odd-1.0.jar"),
    ];

    let err = execute(&request_for(&dirs), &artifacts, &tools_scanner(), &invoker)
        .expect_err("relative location should fail");

    assert_eq!(err.stage(), Stage::InjectClasspath);
    assert!(matches!(
        err,
        BrokerError::Injection {
            source: InjectionError::Relative { .. },
            ..
        }
    ));
}

#[rstest]
#[case::unknown_name("com.example.Missing")]
#[case::misspelled("com.example.tidyimports")]
fn unresolvable_strategy_fails_at_load_stage(#[case] name: &str) {
    let dirs = module_dirs();
    let engine = RecordingEngine::default();
    let invoker = EngineInvoker::new(engine.clone());
    let request = RewriteRequest::new(dirs.source_root.clone(), dirs.build_output.clone(), name);

    let err = execute(&request, &artifacts_for(&dirs), &tools_scanner(), &invoker)
        .expect_err("unknown strategy should fail");

    assert_eq!(err.stage(), Stage::LoadStrategy);
    assert!(matches!(
        err,
        BrokerError::StrategyResolution {
            source: StrategyError::NotFound { .. },
        }
    ));
    assert_eq!(engine.calls(), 0);
}

#[test]
fn non_strategy_extension_fails_with_type_mismatch() {
    let dirs = module_dirs();
    let invoker = EngineInvoker::new(RecordingEngine::default());
    let scanner = StaticScanner::new().with_root(
        TOOLS_JAR,
        vec![Registration::extension(
            STRATEGY_NAME,
            Arc::new("a reporter, not a strategy"),
        )],
    );

    let err = execute(&request_for(&dirs), &artifacts_for(&dirs), &scanner, &invoker)
        .expect_err("non-strategy extension should fail");

    assert!(matches!(
        err,
        BrokerError::StrategyResolution {
            source: StrategyError::TypeMismatch { .. },
        }
    ));
}

#[test]
fn engine_failure_is_wrapped_with_invocation_context() {
    let dirs = module_dirs();
    let invoker = EngineInvoker::new(FailingEngine);

    let err = execute(
        &request_for(&dirs),
        &artifacts_for(&dirs),
        &tools_scanner(),
        &invoker,
    )
    .expect_err("engine failure should surface");

    assert_eq!(err.stage(), Stage::InvokeEngine);
    let message = err.to_string();
    assert!(message.contains(dirs.source_root.as_str()));
    assert!(message.contains(STRATEGY_NAME));
    assert!(message.contains("unbalanced braces"));
}
