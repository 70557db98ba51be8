//! # Versions Command Implementation
//!
//! The `versions` subcommand prints the release version and the resolved
//! source-control ref of every project. It is a safe, read-only operation
//! that resolves the plan without invoking any external tool - useful for
//! checking what a `sync` or `build` would act on.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use brave_build::config::Config;

/// Print the resolved ref of every project and the release version
#[derive(Args, Debug)]
pub struct VersionsArgs {}

/// Execute the `versions` command.
pub fn execute(manifest: &Path, _args: VersionsArgs) -> Result<()> {
    let config = Config::load(manifest)?;

    println!("release version: {}", config.brave_core_version);
    println!("release tag:     {}", config.release_tag);
    println!();
    for (name, project) in &config.projects {
        println!("{:<12} {}", name, project.r#ref);
    }
    Ok(())
}
