//! # Pipeline Orchestration
//!
//! The linear success/fail chain: provision, activate, install, clean,
//! package. Each stage is a gate; the first failure propagates out and stops
//! everything after it (fail-fast, no retries, no partial-success reporting).
//!
//! Execution is intentionally synchronous and single-threaded: every stage's
//! output (a provisioned environment, an installed package set) is a hard
//! precondition for the next, so there is nothing to overlap. Concurrent
//! invocations against the same project root are unsupported.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::BuildConfig;
use crate::system::SystemOps;
use crate::{clean, deps, packager, venv};

/// Runs the whole packaging pipeline and returns the absolute path of the
/// produced executable.
///
/// Numbered lines narrate progress for the operator; they are informational
/// only and not a machine-readable contract.
pub fn run_build(build: &BuildConfig, system: &impl SystemOps) -> Result<PathBuf> {
    // Stage 0: no mutation may happen on a machine without Python.
    venv::probe_launcher(build, system)?;

    println!("[1/4] Provisioning virtual environment");
    venv::ensure_venv(build, system)?;
    let python = venv::activate(build, system)?;

    println!("[2/4] Installing dependencies");
    deps::install_dependencies(build, system, &python)?;

    println!("[3/4] Cleaning previous build artifacts");
    clean::clean_artifacts(build, system)?;

    println!("[4/4] Packaging with PyInstaller");
    packager::run_packager(build, system, &python)
}
