use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::debug;

/// Abstraction for the side effects the pipeline performs (spawning external
/// tools, probing and deleting files). This allows the stage logic to be
/// tested against a mock without touching a real interpreter or file system.
pub trait SystemOps {
    /// Run an external tool to completion inside `cwd`, blocking until it
    /// exits. A non-zero exit status is an error; there is no retry.
    fn run_tool(&self, cwd: &Path, program: &Path, args: &[&str]) -> Result<()>;

    /// Check whether a path exists on the file system.
    fn path_exists(&self, path: &Path) -> bool;

    /// Remove a directory tree. Absence is a no-op, not an error.
    fn remove_dir_tree(&self, path: &Path) -> Result<()>;

    /// Remove a single file. Absence is a no-op, not an error.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// The Real System implementation (Production).
pub struct HostSystem;

impl SystemOps for HostSystem {
    fn run_tool(&self, cwd: &Path, program: &Path, args: &[&str]) -> Result<()> {
        debug!(
            "Running: {} {} (cwd: {})",
            program.display(),
            args.join(" "),
            cwd.display()
        );

        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("failed to launch '{}'", program.display()))?;

        if !status.success() {
            match status.code() {
                Some(code) => bail!("'{}' exited with code {}", program.display(), code),
                None => bail!("'{}' was terminated by a signal", program.display()),
            }
        }
        Ok(())
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_tree(&self, path: &Path) -> Result<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove directory {}", path.display()))
            }
        }
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove file {}", path.display())),
        }
    }
}

/// A Mock System for Testing.
///
/// Records every tool invocation and simulates a minimal file system as a set
/// of known paths. Failures are scripted by substring match against the
/// rendered command line.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockSystem {
    pub invocations: std::sync::Mutex<Vec<String>>,
    pub fail_on: std::sync::Mutex<Vec<String>>,
    pub fs: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    pub removed: std::sync::Mutex<Vec<std::path::PathBuf>>,
}

#[cfg(test)]
impl MockSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the simulated file system.
    pub fn with_paths(paths: &[&Path]) -> Self {
        let system = Self::default();
        for p in paths {
            system.add_path(p);
        }
        system
    }

    pub fn add_path(&self, path: &Path) {
        self.fs.lock().unwrap().insert(path.to_path_buf());
    }

    /// Script a failure for any invocation whose command line contains `needle`.
    pub fn fail_matching(&self, needle: &str) {
        self.fail_on.lock().unwrap().push(needle.to_string());
    }

    pub fn invocation_log(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SystemOps for MockSystem {
    fn run_tool(&self, cwd: &Path, program: &Path, args: &[&str]) -> Result<()> {
        let line = format!("{} {}", program.display(), args.join(" "));
        self.invocations.lock().unwrap().push(line.clone());

        for needle in self.fail_on.lock().unwrap().iter() {
            if line.contains(needle.as_str()) {
                bail!("'{}' exited with code 1", line);
            }
        }

        // Mirror what `python -m venv <dir>` leaves on disk, so the
        // activation step finds a usable interpreter afterwards.
        if args.len() >= 3 && args[0] == "-m" && args[1] == "venv" {
            let venv = cwd.join(args[2]);
            let python = if cfg!(windows) {
                venv.join("Scripts").join("python.exe")
            } else {
                venv.join("bin").join("python")
            };
            let mut fs = self.fs.lock().unwrap();
            fs.insert(venv);
            fs.insert(python);
        }
        Ok(())
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.fs.lock().unwrap().contains(path)
    }

    fn remove_dir_tree(&self, path: &Path) -> Result<()> {
        self.fs.lock().unwrap().remove(path);
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.fs.lock().unwrap().remove(path);
        self.removed.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
