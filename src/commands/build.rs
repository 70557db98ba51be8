//! # Build Command Implementation
//!
//! This module implements the `build` subcommand: it resolves the build plan,
//! applies the CLI overrides, then hands the derived values to the external
//! tools - `gn gen` receives the argument map and the output directory, and
//! `ninja` drives the actual build. Both run under the composed invocation
//! environment with streams inherited, so tool output is visible as it
//! happens.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use brave_build::config::{Config, Options};
use brave_build::exec;

/// Generate build files and build the browser
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Build mode (e.g. Release, Debug)
    #[arg(value_name = "BUILD_CONFIG")]
    pub build_config: Option<String>,

    /// Output directory; its base name becomes the build mode
    #[arg(short = 'C', value_name = "BUILD_DIR")]
    pub output_dir: Option<std::path::PathBuf>,

    /// Target architecture
    #[arg(long, value_name = "ARCH")]
    pub target_arch: Option<String>,

    /// Keep debugging symbols
    #[arg(long, value_name = "BOOL")]
    pub debug_build: Option<bool>,

    /// Force official build settings
    #[arg(long, value_name = "BOOL")]
    pub official_build: Option<bool>,

    /// Geolocation API key baked into the build
    #[arg(long, value_name = "KEY")]
    pub brave_google_api_key: Option<String>,

    /// Geolocation API endpoint baked into the build
    #[arg(long, value_name = "URL")]
    pub brave_google_api_endpoint: Option<String>,

    /// Target channel to build
    #[arg(long, value_name = "CHANNEL", default_value = "release",
          value_parser = ["beta", "canary", "dev", "release"])]
    pub channel: String,

    /// Solution file for the fetch tool; "default" keeps the resolved one
    #[arg(long, value_name = "FILE")]
    pub gclient_file: Option<String>,

    /// Override a project ref as NAME=REF (repeatable)
    #[arg(long = "ref", value_name = "NAME=REF")]
    pub refs: Vec<String>,
}

impl BuildArgs {
    /// Convert the parsed arguments into plan overrides.
    pub fn to_options(&self) -> Result<Options> {
        Ok(Options {
            output_dir: self.output_dir.clone(),
            target_arch: self.target_arch.clone(),
            gclient_file: self.gclient_file.clone(),
            brave_google_api_key: self.brave_google_api_key.clone(),
            brave_google_api_endpoint: self.brave_google_api_endpoint.clone(),
            debug_build: self.debug_build,
            official_build: self.official_build,
            channel: Some(self.channel.clone()),
            component: None,
            project_refs: super::parse_project_refs(&self.refs)?,
        })
    }
}

/// Execute the `build` command.
pub fn execute(manifest: &Path, args: BuildArgs) -> Result<()> {
    let mut config = Config::load(manifest)?;
    if let Some(build_config) = &args.build_config {
        config.build_config = build_config.clone();
    }
    let config = config.update(&args.to_options()?);

    run_build(&config)
}

/// Generate build files and drive the build for a finalized plan.
pub fn run_build(config: &Config) -> Result<()> {
    let output_dir = config.output_dir().to_string_lossy().into_owned();
    let gn_args = gn_args_line(&config.build_args());
    let exec_options = exec::default_options(config)?;

    exec::run(
        "gn",
        &[
            "gen".to_string(),
            output_dir.clone(),
            format!("--args={}", quote(&gn_args)),
        ],
        &exec_options,
    )?;

    exec::run(
        "ninja",
        &["-C".to_string(), output_dir, "brave".to_string()],
        &exec_options,
    )?;
    Ok(())
}

/// Render the argument map in gn's `key = value` syntax, one line.
pub fn gn_args_line(args: &std::collections::BTreeMap<String, Value>) -> String {
    args.iter()
        .map(|(key, value)| format!("{}={}", key, gn_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a single value in gn syntax: bools and numbers bare, strings
/// quoted, lists bracketed.
pub fn gn_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(gn_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        other => format!("\"{}\"", other),
    }
}

/// Quote a composed `--args` value for the platform shell.
fn quote(value: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", value)
    } else {
        format!("'{}'", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_gn_value_rendering() {
        assert_eq!(gn_value(&json!(true)), "true");
        assert_eq!(gn_value(&json!(1)), "1");
        assert_eq!(gn_value(&json!("Chrome")), "\"Chrome\"");
        assert_eq!(gn_value(&json!(["//brave"])), "[\"//brave\"]");
    }

    #[test]
    fn test_gn_args_line_is_sorted_key_value() {
        let mut args = BTreeMap::new();
        args.insert("is_debug".to_string(), json!(false));
        args.insert("brave_channel".to_string(), json!("beta"));
        assert_eq!(
            gn_args_line(&args),
            "brave_channel=\"beta\" is_debug=false"
        );
    }

    #[test]
    fn test_to_options_parses_refs() {
        let args = BuildArgs {
            refs: vec!["brave-core=origin/feature".to_string()],
            channel: "release".to_string(),
            ..BuildArgs::default()
        };
        let options = args.to_options().unwrap();
        assert_eq!(options.project_refs["brave-core"], "origin/feature");
        assert_eq!(options.channel.as_deref(), Some("release"));
    }
}
