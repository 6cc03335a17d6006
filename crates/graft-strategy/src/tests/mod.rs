//! Shared test doubles for the strategy crate.

use std::collections::BTreeSet;

use camino::Utf8Path;

use crate::capability::RewriteStrategy;
use crate::descriptor::OperationDescriptor;

/// Strategy double with fixed operations and classpath entries.
///
/// The prefilter accepts `.java` sources only, so tests can observe that
/// decorators forward the predicate rather than re-deriving it.
#[derive(Debug, Clone)]
pub(crate) struct StubStrategy {
    operations: BTreeSet<OperationDescriptor>,
    entries: BTreeSet<String>,
}

impl StubStrategy {
    pub(crate) fn with_operation(id: &str, entries: &[&str]) -> Self {
        Self {
            operations: BTreeSet::from([OperationDescriptor::new(id)]),
            entries: entries.iter().map(|entry| (*entry).to_owned()).collect(),
        }
    }
}

impl Default for StubStrategy {
    fn default() -> Self {
        Self::with_operation("noop", &[])
    }
}

impl RewriteStrategy for StubStrategy {
    fn operations(&self) -> BTreeSet<OperationDescriptor> {
        self.operations.clone()
    }

    fn prefilter(&self, path: &Utf8Path) -> bool {
        path.as_str().ends_with(".java")
    }

    fn additional_classpath_entries(&self) -> BTreeSet<String> {
        self.entries.clone()
    }
}
