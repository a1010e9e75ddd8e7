use std::path::PathBuf;
use std::process::{Command, Output};

/// Cargo builds the binary for integration tests and exports its path.
pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mingle"))
}

pub fn mingle(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to spawn the mingle binary")
}
