//! # Sync Command Implementation
//!
//! The `sync` subcommand hands every resolved project descriptor to the
//! dependency-fetch tool: each project with a dedicated repository becomes a
//! `--revision <dir>@<ref>` pin on the `gclient sync` invocation, which runs
//! under the composed environment (so it sees the solution file and the depot
//! tools on its search path).

use std::path::Path;

use anyhow::Result;
use clap::Args;

use brave_build::config::{Config, Options};
use brave_build::exec;

/// Fetch every project at its resolved ref
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Solution file for the fetch tool; "default" keeps the resolved one
    #[arg(long, value_name = "FILE")]
    pub gclient_file: Option<String>,

    /// Override a project ref as NAME=REF (repeatable)
    #[arg(long = "ref", value_name = "NAME=REF")]
    pub refs: Vec<String>,

    /// Run the fetch tool's post-sync hooks as well
    #[arg(long)]
    pub run_hooks: bool,
}

/// Execute the `sync` command.
pub fn execute(manifest: &Path, args: SyncArgs) -> Result<()> {
    let options = Options {
        gclient_file: args.gclient_file.clone(),
        project_refs: super::parse_project_refs(&args.refs)?,
        ..Options::default()
    };
    let config = Config::load(manifest)?.update(&options);

    let mut sync_args = vec!["sync".to_string(), "--force".to_string()];
    if !args.run_hooks {
        sync_args.push("--nohooks".to_string());
    }
    for project in config.projects.values() {
        if project.url.is_none() {
            continue;
        }
        sync_args.push("--revision".to_string());
        sync_args.push(format!("{}@{}", project.gclient_name, project.r#ref));
    }

    let exec_options = exec::default_options(&config)?;
    exec::run("gclient", &sync_args, &exec_options)?;
    Ok(())
}
