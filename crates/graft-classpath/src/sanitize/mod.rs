//! Removal of classpath entries that would poison symbol resolution.
//!
//! While the broker runs, the module's own build output directory is
//! mid-regeneration: it may hold half-written or outdated class files.
//! Letting the rewrite engine resolve symbols against it produces wrong
//! answers, so every entry under that directory is dropped before the
//! classpath reaches the engine.

use camino::{Utf8Path, Utf8PathBuf};

/// Returns the entries that do not live under `exclude_prefix`.
///
/// Pure and order-preserving: the result is exactly the input subsequence
/// outside the prefix, so applying the function twice changes nothing.
/// Prefix matching is component-wise, meaning `/r/target-reports` survives
/// an exclude prefix of `/r/target`.
///
/// # Example
///
/// ```
/// use camino::{Utf8Path, Utf8PathBuf};
/// use graft_classpath::sanitize;
///
/// let entries = vec![
///     Utf8PathBuf::from("/r/a.jar"),
///     Utf8PathBuf::from("/proj/target/classes"),
/// ];
/// let kept = sanitize(entries, Utf8Path::new("/proj/target"));
/// assert_eq!(kept, vec![Utf8PathBuf::from("/r/a.jar")]);
/// ```
#[must_use]
pub fn sanitize(entries: Vec<Utf8PathBuf>, exclude_prefix: &Utf8Path) -> Vec<Utf8PathBuf> {
    entries
        .into_iter()
        .filter(|entry| !entry.starts_with(exclude_prefix))
        .collect()
}

#[cfg(test)]
mod tests;
