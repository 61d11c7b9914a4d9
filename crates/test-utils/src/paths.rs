//! Locating archive captures used by the optional real-data tests.
//!
//! Captures are not checked in. Tests that need one look in `TEST_DATA_DIR`
//! first, then in the `testdata/` folders of the workspace.

use std::path::PathBuf;

/// Workspace root: two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// Directories searched for captures, in priority order.
pub fn testdata_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    let mut dirs: Vec<PathBuf> = std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .collect();
    dirs.push(root.join("crates/satmap-loaders/testdata"));
    dirs.push(root.join("crates/satmap/testdata"));
    dirs.push(root.join("testdata"));
    dirs
}

/// First existing file called `name` in [`testdata_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    testdata_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Scratch directory removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("aigean_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
