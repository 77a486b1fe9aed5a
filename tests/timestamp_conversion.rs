//! Directory-level timestamp conversion against real files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use thorconv::{ConvertError, FileOutcome, TimestampConfig, normalize_dir, normalize_file};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("failed to write fixture");
}

#[test]
fn converts_matching_lines_and_drops_the_rest() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "host1_thor.txt",
        "Jan 5 10:00:00 host1 THOR: Info: MODULE: Init\n\
         continuation without timestamp\n\
         Jan 15 10:00:01 host1 THOR: Alert: MODULE: FileScan\n",
    );

    let summary = normalize_dir(dir.path(), &TimestampConfig::new("2024")).unwrap();

    let out = fs::read_to_string(dir.path().join("host1_thor.txt.new")).unwrap();
    assert_eq!(
        out,
        "2024-01-05T10:00:00Z host1 THOR: Info: MODULE: Init\n\
         2024-01-15T10:00:01Z host1 THOR: Alert: MODULE: FileScan\n"
    );
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.lines_converted, 2);
}

#[test]
fn file_without_matches_produces_no_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plain.txt", "nothing here\nor here\n");
    write(dir.path(), "scan.txt", "Feb 2 02:02:02 x\n");

    let summary = normalize_dir(dir.path(), &TimestampConfig::new("2024")).unwrap();

    assert!(!dir.path().join("plain.txt.new").exists());
    assert!(dir.path().join("scan.txt.new").exists());
    assert_eq!(summary.files_seen, 2);
    assert_eq!(summary.files_without_matches, 1);
    assert_eq!(summary.files_written, 1);
}

#[test]
fn subdirectories_are_skipped() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir.path().join("nested"), "inner.txt", "Mar 3 03:03:03 x\n");

    let summary = normalize_dir(dir.path(), &TimestampConfig::new("2024")).unwrap();

    assert_eq!(summary.entries_skipped, 1);
    assert_eq!(summary.files_seen, 0);
    assert!(!dir.path().join("nested/inner.txt.new").exists());
}

#[test]
fn custom_extension_and_overwrite() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "scan.txt", "Apr 4 04:04:04 x\n");
    write(dir.path(), "scan.txt.iso", "stale\n");
    let config = TimestampConfig::new("2021").with_extension(".iso");

    let outcome = normalize_file(&dir.path().join("scan.txt"), &config).unwrap();

    let output = dir.path().join("scan.txt.iso");
    assert_eq!(
        outcome,
        FileOutcome::Written {
            output: output.clone(),
            lines: 1
        }
    );
    assert_eq!(fs::read_to_string(output).unwrap(), "2021-04-04T04:04:04Z x\n");
}

#[test]
fn unknown_month_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "May 5 05:05:05 ok\n");
    write(dir.path(), "b.txt", "Jun 6 06:06:06 ok\nXyz 6 06:06:06 bad\n");
    write(dir.path(), "c.txt", "Jul 7 07:07:07 never reached\n");

    let err = normalize_dir(dir.path(), &TimestampConfig::new("2024")).unwrap_err();

    assert!(matches!(err.root(), ConvertError::UnknownMonth { month } if month == "Xyz"));
    assert!(err.to_string().contains("b.txt"));
    // files handled before the failure keep their output
    assert!(dir.path().join("a.txt.new").exists());
    assert!(!dir.path().join("b.txt.new").exists());
    assert!(!dir.path().join("c.txt.new").exists());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = normalize_dir(&dir.path().join("absent"), &TimestampConfig::new("2024")).unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
}
