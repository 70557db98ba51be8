//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Brave Build - resolve the checkout configuration and drive the build tools
#[derive(Parser, Debug)]
#[command(name = "brave-build")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the package manifest describing the checkout.
    #[arg(long, global = true, value_name = "FILE", default_value = "package.json")]
    manifest: PathBuf,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate build files and build the browser
    Build(commands::build::BuildArgs),
    /// Run an official Release build with CI settings
    Cibuild(commands::cibuild::CibuildArgs),
    /// Fetch every project at its resolved ref
    Sync(commands::sync::SyncArgs),
    /// Print the resolved ref of every project and the release version
    Versions(commands::versions::VersionsArgs),
    /// Print the resolved build plan without invoking any tool
    Info(commands::info::InfoArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        match self.command {
            Commands::Build(args) => commands::build::execute(&self.manifest, args),
            Commands::Cibuild(args) => commands::cibuild::execute(&self.manifest, args),
            Commands::Sync(args) => commands::sync::execute(&self.manifest, args),
            Commands::Versions(args) => commands::versions::execute(&self.manifest, args),
            Commands::Info(args) => commands::info::execute(&self.manifest, args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
