//! # Info Command Implementation
//!
//! The `info` subcommand resolves the full build plan - including any
//! overrides the `build` command would apply - and prints it, along with the
//! exact argument map the build-file generator would receive. It is a safe,
//! read-only operation that does not invoke any external tool, which makes
//! it the way to inspect what a given option set resolves to.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use brave_build::config::Config;

use super::build::{gn_value, BuildArgs};

/// Print the resolved build plan without invoking any tool
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub build: BuildArgs,
}

/// Execute the `info` command.
pub fn execute(manifest: &Path, args: InfoArgs) -> Result<()> {
    let mut config = Config::load(manifest)?;
    if let Some(build_config) = &args.build.build_config {
        config.build_config = build_config.clone();
    }
    let config = config.update(&args.build.to_options()?);

    println!("build config:    {}", config.build_config);
    println!("target arch:     {} (gyp: {})", config.target_arch, config.gyp_target_arch);
    println!("official build:  {}", config.official_build);
    println!("debug build:     {}", config.debug_build);
    println!(
        "channel:         {}",
        if config.channel.is_empty() {
            "stable"
        } else {
            &config.channel
        }
    );
    println!("component:       {}", config.component());
    println!("output dir:      {}", config.output_dir().display());
    println!("gclient file:    {}", config.gclient_file.display());
    println!("release version: {}", config.brave_core_version);
    println!();
    println!("projects:");
    for (name, project) in &config.projects {
        println!("  {:<12} {}", name, project.r#ref);
    }
    println!();
    println!("gn args:");
    for (key, value) in config.build_args() {
        println!("  {} = {}", key, gn_value(&value));
    }
    Ok(())
}
