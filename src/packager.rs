//! # Packager Invocation
//!
//! Stage 4: run PyInstaller against the application's entry point with a
//! fixed, non-configurable option set, and report where the artifact landed.
//!
//! The option set is deliberate:
//! - `--onefile`: bundle the interpreter and every dependency into one binary.
//! - `--noconsole`: the target is a GUI app; no terminal window.
//! - `--collect-all PySide6 / matplotlib`: both packages load resources
//!   dynamically, so PyInstaller's static import scanner misses them.
//! - `--noconfirm`: overwrite previous output without prompting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;

use crate::config::{APP_NAME, BuildConfig, COLLECT_ALL_PACKAGES, ENTRY_POINT};
use crate::system::SystemOps;

/// Invokes PyInstaller and returns the absolute path of the produced
/// executable. A non-zero exit is fatal; no alternate configuration is tried.
pub fn run_packager(
    build: &BuildConfig,
    system: &impl SystemOps,
    python: &Path,
) -> Result<PathBuf> {
    if !system.path_exists(&build.entry_point()) {
        bail!(
            "application entry point missing: {}",
            build.entry_point().display()
        );
    }

    let mut args: Vec<&str> = vec![
        "-m",
        "PyInstaller",
        "--noconfirm",
        "--onefile",
        "--noconsole",
        "--name",
        APP_NAME,
    ];
    for &pkg in COLLECT_ALL_PACKAGES {
        args.push("--collect-all");
        args.push(pkg);
    }
    args.push(ENTRY_POINT);

    info!("Packaging {} from {}", APP_NAME, ENTRY_POINT);
    system
        .run_tool(&build.root, python, &args)
        .context("PyInstaller failed")?;

    std::path::absolute(build.artifact())
        .with_context(|| format!("cannot resolve artifact path {}", build.artifact().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    fn setup() -> (BuildConfig, MockSystem) {
        let build = BuildConfig::new("/proj");
        let system = MockSystem::with_paths(&[&build.entry_point()]);
        (build, system)
    }

    #[test]
    fn test_fixed_option_set() {
        let (build, system) = setup();

        run_packager(&build, &system, &build.venv_python()).unwrap();

        let log = system.invocation_log();
        assert_eq!(log.len(), 1);
        let line = &log[0];
        assert!(line.contains("-m PyInstaller"));
        assert!(line.contains("--noconfirm"));
        assert!(line.contains("--onefile"));
        assert!(line.contains("--noconsole"));
        assert!(line.contains(&format!("--name {}", APP_NAME)));
        assert!(line.contains("--collect-all PySide6"));
        assert!(line.contains("--collect-all matplotlib"));
        // Entry point is the single positional argument, at the end
        assert!(line.ends_with(ENTRY_POINT));
    }

    #[test]
    fn test_returns_absolute_artifact_path() {
        let (build, system) = setup();

        let artifact = run_packager(&build, &system, &build.venv_python()).unwrap();
        assert!(artifact.is_absolute());
        assert!(artifact.starts_with(build.dist_dir()));
    }

    #[test]
    fn test_packager_failure_is_fatal() {
        let (build, system) = setup();
        system.fail_matching("PyInstaller");

        let err = run_packager(&build, &system, &build.venv_python()).unwrap_err();
        assert!(err.to_string().contains("PyInstaller failed"));
    }

    #[test]
    fn test_missing_entry_point_is_fatal() {
        let build = BuildConfig::new("/proj");
        let system = MockSystem::new();

        let err = run_packager(&build, &system, &build.venv_python()).unwrap_err();
        assert!(err.to_string().contains("entry point missing"));
        assert!(system.invocation_log().is_empty());
    }
}
