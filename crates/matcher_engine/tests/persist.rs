use std::fs;

use matcher_engine::{ensure_dir, write_atomic, Upload, UploadError};
use tempfile::TempDir;

#[test]
fn creates_missing_directories() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("reports").join("2026");
    assert!(!nested.exists());

    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn atomic_write_creates_and_replaces() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("report.md");

    let written = write_atomic(&target, "first").unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "first");

    write_atomic(&target, "second").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    // Only the report remains; no temp files are left behind.
    assert_eq!(fs::read_dir(target.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn write_fails_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = write_atomic(&blocker.join("report.md"), "data");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}

#[test]
fn upload_reads_file_name_and_bytes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("resume.pdf");
    fs::write(&path, b"%PDF-1.7").unwrap();

    let upload = Upload::from_path(&path).unwrap();
    assert_eq!(upload.file_name, "resume.pdf");
    assert_eq!(upload.mime, "application/pdf");
    assert_eq!(upload.bytes, b"%PDF-1.7");
}

#[test]
fn upload_rejects_missing_files_and_directories() {
    let temp = TempDir::new().unwrap();

    let missing = Upload::from_path(&temp.path().join("missing.pdf")).unwrap_err();
    assert!(matches!(missing, UploadError::Read { .. }));

    let dir = Upload::from_path(temp.path()).unwrap_err();
    assert!(matches!(dir, UploadError::NotAFile { .. }));
}
