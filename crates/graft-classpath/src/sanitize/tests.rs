//! Unit tests for classpath sanitization.

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};

use super::sanitize;

#[fixture]
fn entries() -> Vec<Utf8PathBuf> {
    vec![
        Utf8PathBuf::from("/r/a.jar"),
        Utf8PathBuf::from("/proj/target/classes"),
        Utf8PathBuf::from("/r/b.jar"),
        Utf8PathBuf::from("/proj/target/test-classes"),
    ]
}

#[rstest]
fn removes_entries_under_prefix_preserving_order(entries: Vec<Utf8PathBuf>) {
    let kept = sanitize(entries, Utf8Path::new("/proj/target"));
    assert_eq!(
        kept,
        vec![Utf8PathBuf::from("/r/a.jar"), Utf8PathBuf::from("/r/b.jar")]
    );
}

#[rstest]
fn is_idempotent(entries: Vec<Utf8PathBuf>) {
    let prefix = Utf8Path::new("/proj/target");
    let once = sanitize(entries, prefix);
    let twice = sanitize(once.clone(), prefix);
    assert_eq!(once, twice);
}

#[test]
fn leaves_disjoint_entries_untouched() {
    let entries = vec![Utf8PathBuf::from("/r/a.jar")];
    let kept = sanitize(entries.clone(), Utf8Path::new("/r/target"));
    assert_eq!(kept, entries);
}

#[test]
fn matches_whole_components_only() {
    let entries = vec![
        Utf8PathBuf::from("/r/target-reports/x.jar"),
        Utf8PathBuf::from("/r/target/x.jar"),
    ];
    let kept = sanitize(entries, Utf8Path::new("/r/target"));
    assert_eq!(kept, vec![Utf8PathBuf::from("/r/target-reports/x.jar")]);
}

#[test]
fn empty_input_stays_empty() {
    let kept = sanitize(Vec::new(), Utf8Path::new("/proj/target"));
    assert!(kept.is_empty());
}
