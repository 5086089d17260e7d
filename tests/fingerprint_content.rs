use std::error::Error;
use std::fs;

use tempfile::tempdir;

use scanwatch::config::ConfigFile;
use scanwatch::watch::{hash_file, Fingerprinter, Snapshot, WatchSpec};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn hash_is_stable_and_tracks_content_changes() -> TestResult {
    let dir = tempdir()?;
    let file = dir.path().join("a.txt");

    fs::write(&file, "hello")?;
    let h1 = hash_file(&file);
    let h2 = hash_file(&file);
    assert_eq!(h1, h2);

    fs::write(&file, "HELLO")?;
    let h3 = hash_file(&file);
    assert_ne!(h1, h3);
    Ok(())
}

#[test]
fn unreadable_file_hashes_as_empty_content() -> TestResult {
    let dir = tempdir()?;
    let missing = dir.path().join("vanished.txt");

    // A path that cannot be opened fingerprints as empty content rather than
    // erroring; the empty hash is a stable sentinel.
    let h = hash_file(&missing);
    assert_eq!(h, blake3::Hasher::new().finalize().to_hex().to_string());
    Ok(())
}

#[test]
fn content_hash_snapshot_covers_the_enumerated_set() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app"))?;
    fs::write(dir.path().join("app/a.go"), "package a")?;
    fs::write(dir.path().join("app/b.go"), "package b")?;
    fs::write(dir.path().join("app/skip.md"), "nope")?;

    let mut cfg = ConfigFile::default();
    cfg.watch.dir = vec!["app".to_string()];
    cfg.watch.ext = vec![".go".to_string()];
    let spec = WatchSpec::from_config(&cfg, dir.path())?;

    let fingerprinter = Fingerprinter::for_mode(spec.mode());
    let snap = fingerprinter.snapshot(&spec, &Snapshot::new());

    assert_eq!(snap.len(), 2);
    assert!(snap.contains_key(&spec.root().join("app/a.go")));
    assert!(snap.contains_key(&spec.root().join("app/b.go")));
    assert!(snap.values().all(|fp| fp.len() == 64));
    Ok(())
}

#[test]
fn identical_content_in_different_files_yields_identical_fingerprints() -> TestResult {
    // The differ compares per path, so shared fingerprint values across
    // distinct files are harmless; assert the precondition here.
    let dir = tempdir()?;
    fs::write(dir.path().join("a.txt"), "same bytes")?;
    fs::write(dir.path().join("b.txt"), "same bytes")?;

    assert_eq!(
        hash_file(&dir.path().join("a.txt")),
        hash_file(&dir.path().join("b.txt"))
    );
    Ok(())
}

