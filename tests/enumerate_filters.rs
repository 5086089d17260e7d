use std::error::Error;
use std::fs;
use std::path::Path;

use tempfile::tempdir;

use scanwatch::config::ConfigFile;
use scanwatch::watch::{enumerate, WatchSpec};

type TestResult = Result<(), Box<dyn Error>>;

fn spec_for(
    root: &Path,
    dirs: &[&str],
    files: &[&str],
    exts: &[&str],
    exclude: &[&str],
) -> anyhow::Result<WatchSpec> {
    let mut cfg = ConfigFile::default();
    cfg.watch.dir = dirs.iter().map(|s| s.to_string()).collect();
    cfg.watch.file = files.iter().map(|s| s.to_string()).collect();
    cfg.watch.ext = exts.iter().map(|s| s.to_string()).collect();
    cfg.watch.exclude = exclude.iter().map(|s| s.to_string()).collect();
    WatchSpec::from_config(&cfg, root)
}

#[test]
fn only_matching_extensions_are_returned() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app/nested"))?;
    fs::write(dir.path().join("app/a.go"), "package a")?;
    fs::write(dir.path().join("app/nested/b.go"), "package b")?;
    fs::write(dir.path().join("app/readme.md"), "# nope")?;
    fs::write(dir.path().join("app/nested/c.txt"), "nope")?;

    let spec = spec_for(dir.path(), &["app"], &[], &[".go"], &[])?;
    let paths = enumerate(&spec);

    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|p| p.to_string_lossy().ends_with(".go")));
    assert!(paths.iter().all(|p| p.starts_with(spec.root())));
    Ok(())
}

#[test]
fn root_file_suffixes_are_scanned_non_recursively() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("sub"))?;
    fs::write(dir.path().join(".env"), "A=1")?;
    fs::write(dir.path().join("local.env"), "B=2")?;
    // Matching suffix but not at the root: must not be picked up.
    fs::write(dir.path().join("sub/.env"), "C=3")?;

    let spec = spec_for(dir.path(), &[], &[".env"], &[], &[])?;
    let paths = enumerate(&spec);

    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&spec.root().join(".env")));
    assert!(paths.contains(&spec.root().join("local.env")));
    Ok(())
}

#[test]
fn directories_outside_the_spec_are_never_visited() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app"))?;
    fs::create_dir_all(dir.path().join("elsewhere"))?;
    fs::write(dir.path().join("app/a.go"), "a")?;
    fs::write(dir.path().join("elsewhere/b.go"), "b")?;

    let spec = spec_for(dir.path(), &["app"], &[], &[".go"], &[])?;
    let paths = enumerate(&spec);

    assert_eq!(paths, vec![spec.root().join("app/a.go")]);
    Ok(())
}

#[test]
fn excluded_globs_are_filtered_out() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app/target/debug"))?;
    fs::write(dir.path().join("app/a.go"), "a")?;
    fs::write(dir.path().join("app/target/debug/gen.go"), "generated")?;

    let spec = spec_for(dir.path(), &["app"], &[], &[".go"], &["**/target/**"])?;
    let paths = enumerate(&spec);

    assert_eq!(paths, vec![spec.root().join("app/a.go")]);
    Ok(())
}

#[test]
fn missing_watch_dir_is_skipped_silently() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app"))?;
    fs::write(dir.path().join("app/a.go"), "a")?;

    let spec = spec_for(dir.path(), &["app", "does-not-exist"], &[], &[".go"], &[])?;
    let paths = enumerate(&spec);

    assert_eq!(paths, vec![spec.root().join("app/a.go")]);
    Ok(())
}

#[test]
fn empty_extension_list_matches_no_directory_files() -> TestResult {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("app"))?;
    fs::write(dir.path().join("app/a.go"), "a")?;

    let spec = spec_for(dir.path(), &["app"], &[], &[], &[])?;
    assert!(enumerate(&spec).is_empty());
    Ok(())
}
