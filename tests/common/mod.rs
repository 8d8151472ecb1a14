// tests/common/mod.rs

#![allow(dead_code)]

use std::error::Error;
use std::path::PathBuf;

pub type TestResult = Result<(), Box<dyn Error>>;

/// Path to a sample config under `demos/`.
pub fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

/// Index of `name` in `lines`, panicking with the full output when absent.
pub fn position(lines: &[String], name: &str) -> usize {
    lines
        .iter()
        .position(|l| l == name)
        .unwrap_or_else(|| panic!("{name} missing from {lines:?}"))
}
