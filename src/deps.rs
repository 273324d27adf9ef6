//! # Dependency Installation
//!
//! Stage 2: bring the environment's package set up to what both the
//! application and the packaging step need. Three sequential pip invocations,
//! each independently fatal. On failure the environment is left partially
//! updated for operator inspection — no rollback, no repair.

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use crate::config::{BuildConfig, REQUIREMENTS};
use crate::system::SystemOps;

/// Upgrades pip, installs the dependency manifest, then installs PyInstaller.
///
/// PyInstaller is declared here and not in `requirements.txt` because it is a
/// build-time tool of this pipeline, not a runtime dependency of the app.
///
/// # Arguments
/// * `python` - The environment's interpreter, resolved by activation.
pub fn install_dependencies(
    build: &BuildConfig,
    system: &impl SystemOps,
    python: &Path,
) -> Result<()> {
    info!("Upgrading pip");
    system
        .run_tool(
            &build.root,
            python,
            &["-m", "pip", "install", "--upgrade", "pip"],
        )
        .context("pip self-upgrade failed")?;

    // The manifest is consumed as-is; this pipeline never writes or edits it.
    if !system.path_exists(&build.requirements()) {
        bail!(
            "dependency manifest missing: {}",
            build.requirements().display()
        );
    }

    info!("Installing application requirements from {}", REQUIREMENTS);
    system
        .run_tool(
            &build.root,
            python,
            &["-m", "pip", "install", "-r", REQUIREMENTS],
        )
        .context("requirements installation failed")?;

    info!("Installing PyInstaller");
    system
        .run_tool(&build.root, python, &["-m", "pip", "install", "pyinstaller"])
        .context("PyInstaller installation failed")
}
