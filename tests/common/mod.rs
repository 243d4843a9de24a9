use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use assert_cmd::Command;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Writes `source` to a scratch file and runs it through the compiled
/// `ember` binary, returning `(stdout, stderr)` as strings. Stands in for
/// the fixture-file-per-test layout the teacher's `tests!` macro used.
pub fn run_source(source: &str) -> (String, String) {
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = PathBuf::from(std::env::temp_dir());
    path.push(format!("ember_test_{}_{id}.ember", std::process::id()));
    fs::write(&path, source).expect("should be able to write a scratch script");

    let output = Command::cargo_bin("ember")
        .expect("ember binary should be built for integration tests")
        .arg(&path)
        .output()
        .expect("ember should run to completion");

    let _ = fs::remove_file(&path);

    (
        String::from_utf8(output.stdout).expect("stdout should be UTF-8"),
        String::from_utf8(output.stderr).expect("stderr should be UTF-8"),
    )
}
