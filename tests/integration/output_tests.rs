use clap::Parser;
use dupfind::cli::Cli;
use dupfind::duplicates::DuplicateFinder;
use dupfind::error::ExitCode;
use dupfind::output::{JsonOutput, TextOutput};
use std::ffi::OsStr;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_text_report_for_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();
    fs::write(dir.path().join("c.txt"), "other").unwrap();

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let output = TextOutput::new(&result);
    let lines = output.lines();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("duplicate found ["));
    assert!(lines[0].ends_with("] (2):"));
    assert_eq!(lines[1], dir.path().join("a.txt").display().to_string());
    assert_eq!(lines[2], dir.path().join("b.txt").display().to_string());
    assert_eq!(lines[3], "found 1 duplicate(s)");
}

#[test]
fn test_text_report_distinguishes_empty_outcomes() {
    let empty = tempdir().unwrap();
    let unique = tempdir().unwrap();
    fs::write(unique.path().join("only.txt"), "alone").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let no_files = TextOutput::new(&finder.find_duplicates(empty.path()).unwrap());
    let no_dups = TextOutput::new(&finder.find_duplicates(unique.path()).unwrap());

    assert_eq!(no_files.lines(), ["no files found"]);
    assert_eq!(no_dups.lines(), ["no duplicates found"]);
}

#[test]
fn test_json_report_shape() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "same").unwrap();
    fs::write(dir.path().join("b"), "same").unwrap();

    let result = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let json = JsonOutput::new(&result).to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["root"], &*dir.path().to_string_lossy());
    assert_eq!(parsed["outcome"], "duplicates");
    assert_eq!(parsed["duplicates"][0]["count"], 2);
    assert_eq!(
        parsed["duplicates"][0]["hash"],
        result.report.groups[0].digest_hex()
    );
    assert_eq!(parsed["summary"]["total_files"], 2);
    assert_eq!(parsed["summary"]["duplicate_groups"], 1);
}

#[test]
fn test_run_app_without_directory_fails() {
    let cli = Cli::try_parse_from(["dupfind", "-q"]).unwrap();
    assert_eq!(dupfind::run_app(cli).unwrap(), ExitCode::GeneralError);
}

#[test]
fn test_run_app_missing_root_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let cli = Cli::try_parse_from([
        OsStr::new("dupfind"),
        OsStr::new("-q"),
        OsStr::new("-d"),
        missing.as_os_str(),
    ])
    .unwrap();

    let err = dupfind::run_app(cli).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_run_app_completes_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "same").unwrap();
    fs::write(dir.path().join("b"), "same").unwrap();
    let cli = Cli::try_parse_from([
        OsStr::new("dupfind"),
        OsStr::new("-o"),
        OsStr::new("json"),
        OsStr::new("-d"),
        dir.path().as_os_str(),
    ])
    .unwrap();

    assert_eq!(dupfind::run_app(cli).unwrap(), ExitCode::Success);
}

#[test]
fn test_run_app_invalid_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "only").unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "io_threads = \"many\"\n").unwrap();
    let cli = Cli::try_parse_from([
        OsStr::new("dupfind"),
        OsStr::new("-q"),
        OsStr::new("--config"),
        config.as_os_str(),
        OsStr::new("-d"),
        dir.path().as_os_str(),
    ])
    .unwrap();

    assert_eq!(dupfind::run_app(cli).unwrap(), ExitCode::Success);
}
