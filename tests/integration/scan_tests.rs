use dupfind::duplicates::{DuplicateFinder, FinderConfig, ScanOutcome};
use dupfind::scanner::WalkerConfig;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: PathBuf, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_duplicate_pair() {
    let dir = tempdir().unwrap();
    write(dir.path().join("a.txt"), b"duplicate");
    write(dir.path().join("b.txt"), b"duplicate");
    write(dir.path().join("c.txt"), b"unique");

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 1);
    assert_eq!(result.outcome, ScanOutcome::Duplicates(1));
    assert_eq!(
        result.report.groups[0].files,
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    let c = dir.path().join("c.txt");
    assert!(result.report.groups.iter().all(|g| !g.files.contains(&c)));
    assert_eq!(result.summary.total_files, 3);
    assert_eq!(result.summary.duplicate_files, 1);
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.outcome, ScanOutcome::NoFiles);
    assert!(result.report.groups.is_empty());
    assert_eq!(result.summary.total_files, 0);
}

#[test]
fn test_scan_only_empty_subdirectories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("one/two")).unwrap();
    fs::create_dir(dir.path().join("three")).unwrap();

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.outcome, ScanOutcome::NoFiles);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        write(dir.path().join(format!("{i}.txt")), format!("content {i}").as_bytes());
    }

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 0);
    assert_eq!(result.outcome, ScanOutcome::NoDuplicates);
    assert_eq!(result.summary.total_files, 5);
    assert_eq!(result.summary.hashed_files, 5);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let deep = dir.path().join("a/b/c");
    fs::create_dir_all(&deep).unwrap();
    write(dir.path().join("top.bin"), b"same bytes");
    write(deep.join("bottom.bin"), b"same bytes");
    write(dir.path().join("a/other.bin"), b"different");

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 1);
    let members: BTreeSet<PathBuf> = result.report.groups[0].files.iter().cloned().collect();
    assert!(members.contains(&deep.join("bottom.bin")));
    assert!(members.contains(&dir.path().join("top.bin")));
}

#[test]
fn test_scan_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path().join("empty1"), b"");
    write(dir.path().join("empty2"), b"");

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 1);
    assert_eq!(result.report.groups[0].len(), 2);
}

#[test]
fn test_scan_hidden_files_included() {
    let dir = tempdir().unwrap();
    write(dir.path().join(".hidden"), b"secret");
    write(dir.path().join("visible"), b"secret");

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 1);
}

#[test]
fn test_scan_multiple_groups_in_discovery_order() {
    let dir = tempdir().unwrap();
    write(dir.path().join("1_x"), b"xxx");
    write(dir.path().join("2_y"), b"yyy");
    write(dir.path().join("3_y"), b"yyy");
    write(dir.path().join("4_x"), b"xxx");
    write(dir.path().join("5_x"), b"xxx");

    let result = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.report.count, 2);
    assert_eq!(result.report.groups[0].len(), 3);
    assert_eq!(result.report.groups[0].files[0], dir.path().join("1_x"));
    assert_eq!(result.report.groups[1].len(), 2);
    assert_eq!(result.summary.duplicate_files, 3);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(dir.path().join("a"), b"one");
    write(dir.path().join("sub/a"), b"one");
    write(dir.path().join("b"), b"two");
    write(dir.path().join("sub/b"), b"two");
    write(dir.path().join("c"), b"three");

    let finder = DuplicateFinder::with_defaults();
    let first = finder.find_duplicates(dir.path()).unwrap();
    let second = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first.report, second.report);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        write(
            dir.path().join(format!("f{i:02}")),
            format!("content {}", i % 7).as_bytes(),
        );
    }

    let sequential = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(dir.path())
        .unwrap();
    let parallel = DuplicateFinder::new(FinderConfig::default().with_io_threads(8))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(sequential.report, parallel.report);
    assert_eq!(sequential.report.count, 7);
}

#[cfg(unix)]
#[test]
fn test_symlinks_not_followed_by_default() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real.txt");
    write(real.clone(), b"linked content");
    std::os::unix::fs::symlink(&real, dir.path().join("link.txt")).unwrap();

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.summary.total_files, 1);
    assert_eq!(result.outcome, ScanOutcome::NoDuplicates);
}

#[cfg(unix)]
#[test]
fn test_symlinks_followed_when_enabled() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real.txt");
    write(real.clone(), b"linked content");
    std::os::unix::fs::symlink(&real, dir.path().join("link.txt")).unwrap();

    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(true));
    let result = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.summary.total_files, 2);
    assert_eq!(result.report.count, 1);
}
