//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `brave-build` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the manifest path and the parsed
//!   `Args` and performs the command's logic.
//!
//! Commands are thin glue: they seed a plan from the manifest, apply their
//! overrides exactly once, and hand the derived values to the external
//! tools. All resolution logic lives in the `brave_build` library.

pub mod build;
pub mod cibuild;
pub mod completions;
pub mod info;
pub mod sync;
pub mod versions;

use std::collections::BTreeMap;

use anyhow::{bail, Result};

/// Parse repeated `NAME=REF` override values into a project-ref map.
pub fn parse_project_refs(values: &[String]) -> Result<BTreeMap<String, String>> {
    let mut refs = BTreeMap::new();
    for value in values {
        match value.split_once('=') {
            Some((name, r#ref)) if !name.is_empty() => {
                refs.insert(name.to_string(), r#ref.to_string());
            }
            _ => bail!("invalid --ref value (expected NAME=REF): {}", value),
        }
    }
    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_refs() {
        let refs = parse_project_refs(&[
            "brave-core=origin/my-feature".to_string(),
            "chrome=refs/tags/71.0.3578.80".to_string(),
        ])
        .unwrap();
        assert_eq!(refs["brave-core"], "origin/my-feature");
        assert_eq!(refs["chrome"], "refs/tags/71.0.3578.80");
    }

    #[test]
    fn test_parse_project_refs_rejects_missing_separator() {
        assert!(parse_project_refs(&["brave-core".to_string()]).is_err());
        assert!(parse_project_refs(&["=ref".to_string()]).is_err());
    }

    #[test]
    fn test_parse_project_refs_keeps_empty_ref_for_update_to_skip() {
        // An empty ref is not a parse error; the update step treats it as
        // "leave the resolved ref alone".
        let refs = parse_project_refs(&["brave-core=".to_string()]).unwrap();
        assert_eq!(refs["brave-core"], "");
    }
}
