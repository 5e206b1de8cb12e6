use dupfind::duplicates::{
    group_by_digest, report, DuplicateFinder, FinderError, GroupConfig, ScanOutcome,
};
use dupfind::scanner::{HashError, Hasher, ScanError, ScanFailure, Walker, WalkerConfig};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

/// Sink that keeps every failure for inspection.
#[derive(Default)]
struct Recorder {
    failures: Mutex<Vec<ScanFailure>>,
}

impl Recorder {
    fn sink(&self) -> impl Fn(ScanFailure) + Send + Sync + '_ {
        move |failure| self.failures.lock().unwrap().push(failure)
    }

    fn paths(&self) -> Vec<PathBuf> {
        self.failures
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.path().to_path_buf())
            .collect()
    }
}

#[test]
fn test_file_vanishing_before_hashing_is_isolated() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "identical").unwrap();
    fs::write(&b, "identical").unwrap();

    let recorder = Recorder::default();
    let files = Walker::new(dir.path(), WalkerConfig::default()).scan(&recorder.sink());
    assert_eq!(files.len(), 2);

    fs::remove_file(&b).unwrap();

    let (index, stats) = group_by_digest(
        files,
        &Hasher::new(),
        &GroupConfig::default(),
        &recorder.sink(),
    );

    assert_eq!(recorder.paths(), vec![b.clone()]);
    assert!(matches!(
        recorder.failures.lock().unwrap()[0],
        ScanFailure::Read(HashError::NotFound(_))
    ));
    assert_eq!(stats.hashed_files, 1);
    assert_eq!(stats.failed_files, 1);
    assert!(index.contains_path(&a));
    assert!(!index.contains_path(&b));

    let result = report(&index);
    assert_eq!(result.count, 0);
    assert_eq!(ScanOutcome::classify(2, &result), ScanOutcome::NoDuplicates);
}

#[test]
fn test_failure_does_not_remove_other_members() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        fs::write(dir.path().join(name), "shared").unwrap();
    }
    let files = vec![
        dir.path().join("a"),
        dir.path().join("missing"),
        dir.path().join("b"),
        dir.path().join("c"),
    ];

    let recorder = Recorder::default();
    let (index, _) = group_by_digest(
        files,
        &Hasher::new(),
        &GroupConfig::default().with_io_threads(4),
        &recorder.sink(),
    );

    let result = report(&index);
    assert_eq!(result.count, 1);
    assert_eq!(
        result.groups[0].files,
        vec![dir.path().join("a"), dir.path().join("b"), dir.path().join("c")]
    );
    assert_eq!(recorder.paths(), vec![dir.path().join("missing")]);
}

#[test]
fn test_nonexistent_root_reports_single_failure() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let recorder = Recorder::default();
    let files = Walker::new(&missing, WalkerConfig::default()).scan(&recorder.sink());

    assert!(files.is_empty());
    let failures = recorder.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0],
        ScanFailure::Traversal(ScanError::NotFound(_))
    ));
}

#[test]
fn test_finder_rejects_nonexistent_root() {
    let dir = tempdir().unwrap();
    let err = DuplicateFinder::with_defaults()
        .find_duplicates(&dir.path().join("nope"))
        .unwrap_err();
    assert!(matches!(err, FinderError::PathNotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_locked_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.txt"), "hidden away").unwrap();
    let x = dir.path().join("x.txt");
    fs::write(&x, "visible").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still list the directory.
    let enforced = fs::read_dir(&locked).is_err();

    let recorder = Recorder::default();
    let result = DuplicateFinder::with_defaults()
        .find_duplicates_with_sink(dir.path(), &recorder.sink());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let result = result.unwrap();
    assert!(result.summary.hashed_files >= 1);
    assert_eq!(result.outcome, ScanOutcome::NoDuplicates);

    if enforced {
        let failures = recorder.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_traversal());
        assert_eq!(result.summary.traversal_failures, 1);
        assert_eq!(result.summary.total_files, 1);
    } else {
        eprintln!("note: permissions not enforced for this user, traversal failure unchecked");
    }
}

#[cfg(unix)]
#[test]
fn test_broken_subtree_is_skipped_with_sibling_hashed() {
    use dupfind::duplicates::FinderConfig;

    let dir = tempdir().unwrap();
    let x = dir.path().join("x.txt");
    fs::write(&x, "visible").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken")).unwrap();

    let recorder = Recorder::default();
    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(true));
    let result = DuplicateFinder::new(config)
        .find_duplicates_with_sink(dir.path(), &recorder.sink())
        .unwrap();

    let failures = recorder.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].is_traversal());
    assert_eq!(result.summary.traversal_failures, 1);
    assert_eq!(result.summary.total_files, 1);
    assert_eq!(result.summary.hashed_files, 1);
    assert_eq!(result.outcome, ScanOutcome::NoDuplicates);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_counted() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let secret = dir.path().join("secret.txt");
    fs::write(&secret, "same").unwrap();
    fs::write(dir.path().join("open.txt"), "same").unwrap();

    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
    let enforced = fs::File::open(&secret).is_err();

    let recorder = Recorder::default();
    let result = DuplicateFinder::with_defaults()
        .find_duplicates_with_sink(dir.path(), &recorder.sink());

    fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();

    let result = result.unwrap();
    if enforced {
        assert_eq!(result.summary.read_failures, 1);
        assert_eq!(result.summary.hashed_files, 1);
        assert_eq!(result.outcome, ScanOutcome::NoDuplicates);
        assert_eq!(recorder.paths(), vec![secret]);
    } else {
        eprintln!("note: permissions not enforced for this user, read failure unchecked");
        assert_eq!(result.outcome, ScanOutcome::Duplicates(1));
    }
}
