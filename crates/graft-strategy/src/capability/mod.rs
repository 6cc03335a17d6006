//! The rewrite-strategy capability contract.
//!
//! A strategy exposes three read-only facets: the rewrite operations it
//! wants the engine to perform, a pre-filtering predicate deciding which
//! source files the engine should consider at all, and any extra classpath
//! entries symbol resolution needs beyond what the build supplies.
//! Instances are created once per invocation and never mutated by the
//! broker.

use std::collections::BTreeSet;

use camino::Utf8Path;

use crate::descriptor::OperationDescriptor;

/// The pluggable policy object the external rewrite engine executes.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use camino::Utf8Path;
/// use graft_strategy::{OperationDescriptor, RewriteStrategy};
///
/// #[derive(Default)]
/// struct TidyImports;
///
/// impl RewriteStrategy for TidyImports {
///     fn operations(&self) -> BTreeSet<OperationDescriptor> {
///         BTreeSet::from([OperationDescriptor::new("tidy-imports")])
///     }
///
///     fn prefilter(&self, path: &Utf8Path) -> bool {
///         path.as_str().ends_with(".java")
///     }
///
///     fn additional_classpath_entries(&self) -> BTreeSet<String> {
///         BTreeSet::new()
///     }
/// }
///
/// let strategy = TidyImports;
/// assert!(strategy.prefilter(Utf8Path::new("/proj/src/Main.java")));
/// assert!(!strategy.prefilter(Utf8Path::new("/proj/README.md")));
/// ```
pub trait RewriteStrategy {
    /// Returns the rewrite operations the engine should perform.
    fn operations(&self) -> BTreeSet<OperationDescriptor>;

    /// Returns whether the engine should consider the given source file.
    fn prefilter(&self, path: &Utf8Path) -> bool;

    /// Returns extra classpath entries symbol resolution needs.
    fn additional_classpath_entries(&self) -> BTreeSet<String>;
}

impl<S: RewriteStrategy + ?Sized> RewriteStrategy for Box<S> {
    fn operations(&self) -> BTreeSet<OperationDescriptor> {
        (**self).operations()
    }

    fn prefilter(&self, path: &Utf8Path) -> bool {
        (**self).prefilter(path)
    }

    fn additional_classpath_entries(&self) -> BTreeSet<String> {
        (**self).additional_classpath_entries()
    }
}

/// Minimal `Debug` for the type-erased strategy so `Result` helpers such as
/// `expect_err` can name the success type in assertions. Test-only plumbing;
/// the trait object carries no inspectable state.
#[cfg(test)]
impl std::fmt::Debug for dyn RewriteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriteStrategy").finish_non_exhaustive()
    }
}
