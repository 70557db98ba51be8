//! # CI Build Command Implementation
//!
//! The `cibuild` subcommand is the CI entry point: a Release build with
//! official settings forced on, regardless of what the environment would
//! otherwise derive. It reuses the `build` command with a pinned option set.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use super::build::{self, BuildArgs};

/// Run an official Release build with CI settings
#[derive(Args, Debug)]
pub struct CibuildArgs {
    /// Target architecture
    #[arg(long, value_name = "ARCH")]
    pub target_arch: Option<String>,
}

/// Execute the `cibuild` command.
pub fn execute(manifest: &Path, args: CibuildArgs) -> Result<()> {
    build::execute(
        manifest,
        BuildArgs {
            build_config: Some("Release".to_string()),
            official_build: Some(true),
            target_arch: args.target_arch,
            channel: "release".to_string(),
            ..BuildArgs::default()
        },
    )
}
