//! Non-destructive strategy augmentation.
//!
//! The broker knows the complete, sanitized dependency classpath of the
//! module being rewritten; the loaded strategy only knows what it declared
//! statically. [`AugmentedStrategy`] composes the two: the strategy's
//! operations and prefiltering predicate pass through untouched while the
//! classpath-entry facet is replaced outright with the broker-computed set.
//! Replacement rather than merging — by the time augmentation runs the
//! caller has already assembled the full desired set.

use std::collections::BTreeSet;

use camino::Utf8Path;

use crate::capability::RewriteStrategy;
use crate::descriptor::OperationDescriptor;

/// A strategy view whose classpath-entry facet is overridden.
///
/// The base strategy is owned but never mutated; the view lives for one
/// invocation and is discarded after the engine call returns.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use graft_strategy::{RewriteStrategy, augment};
/// # use camino::Utf8Path;
/// # use graft_strategy::OperationDescriptor;
/// # #[derive(Default)]
/// # struct TidyImports;
/// # impl RewriteStrategy for TidyImports {
/// #     fn operations(&self) -> BTreeSet<OperationDescriptor> {
/// #         BTreeSet::from([OperationDescriptor::new("tidy-imports")])
/// #     }
/// #     fn prefilter(&self, path: &Utf8Path) -> bool {
/// #         true
/// #     }
/// #     fn additional_classpath_entries(&self) -> BTreeSet<String> {
/// #         BTreeSet::from(["/declared.jar".to_owned()])
/// #     }
/// # }
///
/// let entries = BTreeSet::from(["/resolved/lib.jar".to_owned()]);
/// let augmented = augment(TidyImports, entries.clone());
/// // The resolved set replaces the declared one; it is not merged in.
/// assert_eq!(augmented.additional_classpath_entries(), entries);
/// ```
pub struct AugmentedStrategy<S> {
    base: S,
    entries: BTreeSet<String>,
}

impl<S: RewriteStrategy> AugmentedStrategy<S> {
    /// Composes a base strategy with a replacement classpath-entry set.
    #[must_use]
    pub const fn new(base: S, entries: BTreeSet<String>) -> Self {
        Self { base, entries }
    }
}

impl<S: RewriteStrategy> RewriteStrategy for AugmentedStrategy<S> {
    fn operations(&self) -> BTreeSet<OperationDescriptor> {
        self.base.operations()
    }

    fn prefilter(&self, path: &Utf8Path) -> bool {
        self.base.prefilter(path)
    }

    fn additional_classpath_entries(&self) -> BTreeSet<String> {
        self.entries.clone()
    }
}

/// Composes `base` with `entries`; alias for [`AugmentedStrategy::new`].
#[must_use]
pub const fn augment<S: RewriteStrategy>(
    base: S,
    entries: BTreeSet<String>,
) -> AugmentedStrategy<S> {
    AugmentedStrategy::new(base, entries)
}
