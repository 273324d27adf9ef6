//! # Artifact Cleaning
//!
//! Stage 3: unconditionally remove the outputs of any previous build so
//! PyInstaller never reuses intermediate state produced from different source
//! or dependency versions. Removal is unconditional rather than
//! timestamp-based; an artifact that is already absent is a no-op.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::BuildConfig;
use crate::system::SystemOps;

/// Removes the intermediate build directory, the output directory, and the
/// generated packaging descriptor, if present.
pub fn clean_artifacts(build: &BuildConfig, system: &impl SystemOps) -> Result<()> {
    for dir in [build.build_dir(), build.dist_dir()] {
        if system.path_exists(&dir) {
            info!("Removing stale {}", dir.display());
            system
                .remove_dir_tree(&dir)
                .with_context(|| format!("cleaning {} failed", dir.display()))?;
        } else {
            debug!("{} already absent", dir.display());
        }
    }

    let spec = build.spec_file();
    if system.path_exists(&spec) {
        info!("Removing stale {}", spec.display());
        system
            .remove_file(&spec)
            .with_context(|| format!("cleaning {} failed", spec.display()))?;
    } else {
        debug!("{} already absent", spec.display());
    }

    Ok(())
}
