//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Get the path to test fixtures
pub fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("tests").join("fixtures")
}

/// The reference CAP 1.2 update message shared with the capkit-cap tests
pub fn update_alert_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates")
        .join("capkit-cap")
        .join("tests")
        .join("fixtures")
        .join("update_alert.xml")
}

pub fn load_update_alert() -> String {
    let path = update_alert_path();
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read CAP fixture from {:?}", path))
}

/// Run the capkit binary with `RUST_LOG` cleared so config decides logging
pub fn run_capkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_capkit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run capkit")
}

pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "capkit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("capkit wrote invalid UTF-8")
}
