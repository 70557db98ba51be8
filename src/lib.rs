//! # Brave Build Library
//!
//! This library resolves the build configuration for a Brave multi-repository
//! checkout. It is designed to be used by the `brave-build` command-line tool
//! but can also be integrated into other tooling that needs the resolved
//! plan, the per-project source-control references, or the composed tool
//! environment.
//!
//! ## Quick Example
//!
//! ```
//! use brave_build::config::{Config, Options};
//! use brave_build::env::EnvReader;
//! use brave_build::manifest::Manifest;
//! use std::path::PathBuf;
//!
//! let manifest = Manifest::parse(r#"{
//!     "version": "1.2.3",
//!     "config": {"projects": {
//!         "chrome": {"dir": "src", "tag": "71.0.3578.80"},
//!         "brave-core": {"dir": "src/brave", "version": "1.2.3"}
//!     }}
//! }"#).unwrap();
//!
//! let env = EnvReader::from_vars([("npm_config_brave_version", "1.2.3")]);
//! let config = Config::new(env, &manifest, PathBuf::from("/work/brave")).unwrap();
//! let config = config.update(&Options::default());
//!
//! assert_eq!(config.project("chrome").unwrap().r#ref, "refs/tags/71.0.3578.80");
//! assert_eq!(config.build_args()["brave_version_major"], "1");
//! ```
//!
//! ## Core Concepts
//!
//! - **Environment Reader (`env`)**: the two-tier configuration namespace;
//!   user-level variables shadow manifest-declared defaults.
//! - **Manifest (`manifest`)**: the `package.json`-style declaration table
//!   for the projects making up the checkout.
//! - **Project Registry (`projects`)**: one resolved descriptor per project,
//!   with the ref-resolution precedence rules.
//! - **Build Plan (`config`)**: the central configuration object - seeded
//!   once, updated exactly once with CLI overrides, read-only thereafter.
//!   Derived values (output directory, component linkage, the gn argument
//!   map) are pure functions of its state.
//! - **Tool Environment (`path`, `exec`)**: path-list splicing and the
//!   composed invocation bundle external tools run under.
//!
//! ## Execution Flow
//!
//! 1. Parse the manifest and snapshot the process environment.
//! 2. Seed the plan: scalars with documented fallbacks, then the registry.
//! 3. Apply the command's overrides via the consuming `update`.
//! 4. Read derived values and hand them to the external tools.

pub mod config;
pub mod defaults;
pub mod env;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod path;
pub mod projects;

#[cfg(test)]
mod path_proptest;
