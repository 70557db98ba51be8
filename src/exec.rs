//! # Tool Invocation Environment
//!
//! Every external tool the commands spawn (the dependency-fetch tool, the
//! build-file generator, the build driver) runs under the same composed
//! environment: the base process environment with the depot tools prepended
//! to the search path, the checkout's helper-script directories appended to
//! the interpreter path, and the fixed toolchain variables the scripts
//! expect. [`default_options`] composes that bundle as a pure function of
//! the resolved [`Config`]; [`run`] spawns a tool under it with inherited
//! output streams.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use crate::config::{Config, Platform};
use crate::error::{Error, Result};
use crate::path::{add_path_to_env, add_python_path_to_env};

/// The invocation bundle for spawned tools.
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Full environment for the child process.
    pub env: BTreeMap<String, String>,
    /// Working directory, pinned to the source root.
    pub cwd: PathBuf,
    /// Run the command line through the platform shell.
    pub shell: bool,
}

/// Compose the default invocation options for a resolved plan.
pub fn default_options(config: &Config) -> Result<ExecOptions> {
    let mut env = config.env().vars().clone();

    add_path_to_env(&mut env, &config.depot_tools_dir.to_string_lossy(), true)?;
    for python_dir in [
        config
            .src_dir
            .join("brave")
            .join("chromium_src")
            .join("python_modules"),
        config.src_dir.join("brave").join("script"),
        config
            .src_dir
            .join("tools")
            .join("grit")
            .join("grit")
            .join("extern"),
    ] {
        add_python_path_to_env(&mut env, &python_dir.to_string_lossy())?;
    }

    env.insert(
        "GCLIENT_FILE".to_string(),
        config.gclient_file.to_string_lossy().into_owned(),
    );
    env.insert("DEPOT_TOOLS_WIN_TOOLCHAIN".to_string(), "0".to_string());
    env.insert("PYTHONUNBUFFERED".to_string(), "1".to_string());
    // The legacy build scripts read the gyp spelling of the architecture.
    env.insert("TARGET_ARCH".to_string(), config.gyp_target_arch.clone());
    env.entry("GYP_MSVS_VERSION".to_string())
        .or_insert_with(|| "2017".to_string());

    if let Some(sccache) = &config.sccache {
        env.insert("CC_WRAPPER".to_string(), sccache.clone());
    }

    if config.platform == Platform::Linux {
        env.insert("LLVM_DOWNLOAD_GOLD_PLUGIN".to_string(), "1".to_string());
    }

    Ok(ExecOptions {
        env,
        cwd: config.src_dir.clone(),
        shell: true,
    })
}

/// Spawn an external tool under the composed bundle and wait for it.
///
/// Output and error streams are inherited from the caller. A non-zero exit
/// status is an error naming the command line.
pub fn run(program: &str, args: &[String], options: &ExecOptions) -> Result<()> {
    let line = std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");
    log::info!("running: {}", line);

    let mut command = if options.shell {
        if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(&line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(&line);
            command
        }
    } else {
        let mut command = Command::new(program);
        command.args(args);
        command
    };

    let status = command
        .env_clear()
        .envs(&options.env)
        .current_dir(&options.cwd)
        .status()
        .map_err(|e| Error::Command {
            command: line.clone(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::Command {
            command: line,
            message: format!("exited with {}", status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvReader;
    use crate::manifest::Manifest;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let manifest = Manifest::parse(
            r#"{
                "config": {
                    "projects": {
                        "chrome": {"dir": "src"},
                        "brave-core": {"dir": "src/brave"}
                    }
                }
            }"#,
        )
        .unwrap();
        let env = EnvReader::from_vars(vars.iter().copied());
        Config::new(env, &manifest, PathBuf::from("/work/brave")).unwrap()
    }

    #[test]
    fn test_default_options_composes_search_paths() {
        let config = config_with(&[("PATH", "/usr/bin")]).with_platform(Platform::Linux);
        let options = default_options(&config).unwrap();

        assert!(options.env["PATH"].starts_with("/work/brave/vendor/depot_tools"));
        assert!(options.env["PATH"].ends_with("/usr/bin"));

        let python_path = &options.env["PYTHONPATH"];
        let entries: Vec<&str> = python_path.split(crate::path::DELIMITER).collect();
        assert_eq!(
            entries,
            vec![
                "/work/brave/src/brave/chromium_src/python_modules",
                "/work/brave/src/brave/script",
                "/work/brave/src/tools/grit/grit/extern",
            ]
        );
    }

    #[test]
    fn test_default_options_toolchain_variables() {
        let config = config_with(&[]).with_platform(Platform::Linux);
        let options = default_options(&config).unwrap();

        assert_eq!(options.env["GCLIENT_FILE"], "/work/brave/.gclient");
        assert_eq!(options.env["DEPOT_TOOLS_WIN_TOOLCHAIN"], "0");
        assert_eq!(options.env["PYTHONUNBUFFERED"], "1");
        assert_eq!(options.env["TARGET_ARCH"], "x64");
        assert_eq!(options.env["GYP_MSVS_VERSION"], "2017");
        assert_eq!(options.env["LLVM_DOWNLOAD_GOLD_PLUGIN"], "1");
        assert!(!options.env.contains_key("CC_WRAPPER"));
        assert_eq!(options.cwd, PathBuf::from("/work/brave/src"));
        assert!(options.shell);
    }

    #[test]
    fn test_default_options_preserves_existing_msvs_version() {
        let config = config_with(&[("GYP_MSVS_VERSION", "2019")]);
        let options = default_options(&config).unwrap();
        assert_eq!(options.env["GYP_MSVS_VERSION"], "2019");
    }

    #[test]
    fn test_default_options_compiler_cache_wrapper() {
        let config = config_with(&[("npm_config_sccache", "/usr/bin/sccache")]);
        let options = default_options(&config).unwrap();
        assert_eq!(options.env["CC_WRAPPER"], "/usr/bin/sccache");
    }

    #[test]
    fn test_default_options_no_gold_plugin_off_linux() {
        let config = config_with(&[]).with_platform(Platform::MacOs);
        let options = default_options(&config).unwrap();
        assert!(!options.env.contains_key("LLVM_DOWNLOAD_GOLD_PLUGIN"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_exit_status() {
        let options = ExecOptions {
            env: BTreeMap::new(),
            cwd: std::env::temp_dir(),
            shell: true,
        };
        assert!(run("true", &[], &options).is_ok());

        let err = run("false", &[], &options).unwrap_err();
        assert!(format!("{}", err).contains("false"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_missing_program_is_an_error() {
        let options = ExecOptions {
            env: BTreeMap::new(),
            cwd: std::env::temp_dir(),
            shell: false,
        };
        assert!(run("definitely-not-a-real-tool", &[], &options).is_err());
    }
}
