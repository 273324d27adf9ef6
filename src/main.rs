//! # Stego Build: The Main Entry Point
//!
//! This module handles Command Line Interface (CLI) parsing, logging
//! initialization, and dispatching into the packaging pipeline. The pipeline
//! itself takes no configuration: every path, name, and packaging option is
//! fixed by convention (see `config`). Run it from the root of the Stego
//! Studio source tree.
//!
//! Exit status is binary: 0 when the executable was produced, 1 when any
//! stage failed.

use clap::Parser;
use log::{LevelFilter, error};
use simplelog::{Config, SimpleLogger};

mod clean;
mod config;
mod deps;
mod packager;
mod pipeline;
mod system;
mod venv;

/// The primary Command Line Interface (CLI) configuration.
///
/// There are no pipeline-configuring flags; verbosity is the only switch.
#[derive(Parser)]
#[command(name = "stego-build")]
#[command(about = "Packages the Stego Studio app into a single executable", long_about = None)]
struct Cli {
    /// Turn on verbose logging.
    ///
    /// - `-v`: Debug
    /// - `-vv`: Trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    // Determine log level based on verbosity flag
    let log_level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // Initialize logger
    // We ignore the result here as logging failure shouldn't stop the build
    let _ = SimpleLogger::init(log_level, Config::default());

    // The project root is wherever the operator ran us from; all fixed paths
    // hang off it.
    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!("Cannot determine working directory: {}", e);
            std::process::exit(1);
        }
    };

    let build = config::BuildConfig::new(root);

    match pipeline::run_build(&build, &system::HostSystem) {
        Ok(artifact) => {
            println!();
            println!("Build complete: {}", artifact.display());
        }
        Err(e) => {
            error!("Build failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
