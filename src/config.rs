//! # Build Configuration
//!
//! Every path and name the pipeline touches is fixed by convention and derived
//! here from a single project root. `BuildConfig` is the explicit context value
//! threaded through each stage, so no stage depends on ambient process state
//! (current directory, an "activated" PATH) and each can be exercised in
//! isolation.

use std::path::PathBuf;

/// Name of the interpreter launcher expected on the search path.
pub const PYTHON_LAUNCHER: &str = "python";

/// Fixed name of the produced executable and the generated `.spec` descriptor.
pub const APP_NAME: &str = "StegoStudio";

/// Directory name of the virtual environment, relative to the project root.
pub const VENV_DIR: &str = "venv";

/// The application's entry-point source file.
pub const ENTRY_POINT: &str = "main_qt.py";

/// The runtime dependency manifest consumed by pip.
///
/// The pipeline only reads this; it never writes or validates it.
pub const REQUIREMENTS: &str = "requirements.txt";

/// Packages whose resources PyInstaller's static scanner cannot discover
/// because they load them dynamically at runtime. Each gets a `--collect-all`.
pub const COLLECT_ALL_PACKAGES: &[&str] = &["PySide6", "matplotlib"];

/// Fixed locations of the packaging workspace.
pub const BUILD_DIR: &str = "build";
pub const DIST_DIR: &str = "dist";

/// The build context: a project root plus derived fixed paths.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root of the application source tree (where `main_qt.py` lives).
    pub root: PathBuf,
}

impl BuildConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The virtual environment directory. Persistent across runs.
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(VENV_DIR)
    }

    /// The interpreter inside the virtual environment.
    ///
    /// venv lays its binaries out differently per platform:
    /// `Scripts\python.exe` on Windows, `bin/python` everywhere else.
    pub fn venv_python(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir().join("Scripts").join("python.exe")
        } else {
            self.venv_dir().join("bin").join("python")
        }
    }

    /// The dependency manifest location.
    pub fn requirements(&self) -> PathBuf {
        self.root.join(REQUIREMENTS)
    }

    /// The application entry point handed to PyInstaller.
    pub fn entry_point(&self) -> PathBuf {
        self.root.join(ENTRY_POINT)
    }

    /// PyInstaller's intermediate object directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// PyInstaller's output directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// The generated packaging descriptor, named after the application.
    pub fn spec_file(&self) -> PathBuf {
        self.root.join(format!("{}.spec", APP_NAME))
    }

    /// Where the final single-file executable lands on success.
    pub fn artifact(&self) -> PathBuf {
        let name = if cfg!(windows) {
            format!("{}.exe", APP_NAME)
        } else {
            APP_NAME.to_string()
        };
        self.dist_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted() {
        let build = BuildConfig::new("/tmp/app");
        assert!(build.venv_dir().starts_with("/tmp/app"));
        assert!(build.requirements().ends_with(REQUIREMENTS));
        assert!(build.entry_point().ends_with(ENTRY_POINT));
    }

    #[test]
    fn test_spec_file_named_after_app() {
        let build = BuildConfig::new(".");
        assert_eq!(
            build.spec_file().file_name().unwrap().to_string_lossy(),
            format!("{}.spec", APP_NAME)
        );
    }

    #[test]
    fn test_artifact_inside_dist() {
        let build = BuildConfig::new("/work");
        let artifact = build.artifact();
        assert!(artifact.starts_with(build.dist_dir()));
        assert!(
            artifact
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(APP_NAME)
        );
    }

    #[test]
    fn test_venv_python_layout() {
        let build = BuildConfig::new("/work");
        let python = build.venv_python();
        if cfg!(windows) {
            assert!(python.ends_with("Scripts/python.exe"));
        } else {
            assert!(python.ends_with("bin/python"));
        }
    }
}
