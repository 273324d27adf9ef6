//! # Environment Provisioning & Activation
//!
//! Stage 1 of the pipeline: guarantee an isolated Python environment exists,
//! then resolve its interpreter for every later stage.
//!
//! The existence check is deliberately a presence test, not a validity test
//! (best-effort idempotence): a half-built or corrupted `venv/` from an
//! interrupted earlier run is reused as-is. Deleting `venv/` forces a clean
//! recreation on the next run. Strengthening this check would change observable
//! behavior on corrupted environments, so it stays a presence test.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::config::{BuildConfig, PYTHON_LAUNCHER, VENV_DIR};
use crate::system::SystemOps;

/// Verifies the interpreter launcher is reachable on the search path.
///
/// This is the pipeline's stage-0 gate: it runs before anything touches the
/// file system, so a machine without Python aborts with zero side effects.
pub fn probe_launcher(build: &BuildConfig, system: &impl SystemOps) -> Result<()> {
    system
        .run_tool(&build.root, Path::new(PYTHON_LAUNCHER), &["--version"])
        .context("Python launcher not reachable (is 'python' on your PATH?)")
}

/// Idempotently guarantees the virtual environment directory exists.
///
/// Creates it with `python -m venv` on first run; every later run sees the
/// directory and skips straight through. Creation failure is fatal — without
/// an environment, every subsequent stage is meaningless.
pub fn ensure_venv(build: &BuildConfig, system: &impl SystemOps) -> Result<()> {
    let venv = build.venv_dir();
    if system.path_exists(&venv) {
        info!("Reusing existing virtual environment at {}", venv.display());
        return Ok(());
    }

    info!("Creating virtual environment at {}", venv.display());
    system
        .run_tool(
            &build.root,
            Path::new(PYTHON_LAUNCHER),
            &["-m", "venv", VENV_DIR],
        )
        .context("virtual environment creation failed")
}

/// "Activates" the environment by resolving its interpreter binary.
///
/// Rather than mutating the process PATH the way `activate` scripts do, the
/// resolved interpreter path is handed to later stages explicitly, so they
/// always invoke the environment's binaries and never the system-wide ones.
/// A missing interpreter means the environment directory is corrupt — fatal.
pub fn activate(build: &BuildConfig, system: &impl SystemOps) -> Result<PathBuf> {
    let python = build.venv_python();
    if !system.path_exists(&python) {
        bail!(
            "cannot activate environment: no interpreter at {} (delete '{}' and re-run to recreate it)",
            python.display(),
            VENV_DIR
        );
    }
    debug!("Environment interpreter: {}", python.display());
    Ok(python)
}
