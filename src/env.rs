//! # Environment Reader
//!
//! Configuration for a checkout arrives through an environment-style
//! key/value namespace with two tiers: user-level `npm_config_*` variables
//! shadow manifest-declared `npm_package_config_*` defaults. This module
//! provides the single lookup function that evaluates that resolution order,
//! plus typed variants for boolean values.
//!
//! The reader operates on a snapshot of variables taken at construction, so
//! lookups are side-effect free and the same reader always resolves the same
//! values. Tests construct readers from explicit maps instead of the real
//! process environment.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Resolution order for namespaced lookups. Earlier prefixes shadow later
/// ones; the first non-empty match wins.
const PREFIXES: [&str; 2] = ["npm_config_", "npm_package_config_"];

/// A snapshot of the configuration namespace.
#[derive(Debug, Clone, Default)]
pub struct EnvReader {
    vars: BTreeMap<String, String>,
}

impl EnvReader {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a reader from an explicit variable map.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Seed the manifest-declared tier with flattened config entries.
    ///
    /// Entries land under `npm_package_config_<key>`. A variable already
    /// present in the snapshot keeps its value, so real environment entries
    /// always win over manifest defaults.
    pub fn seed_package_tier<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            let full = format!("npm_package_config_{}", normalize(&key.into()));
            self.vars.entry(full).or_insert_with(|| value.into());
        }
    }

    /// Look up a namespaced value.
    ///
    /// Segments are joined with `_` (dashes normalized to underscores) and
    /// tried against each tier in resolution order. Returns the first
    /// non-empty match, or `None`.
    pub fn lookup(&self, segments: &[&str]) -> Option<String> {
        let key = normalize(&segments.join("_"));
        for prefix in PREFIXES {
            match self.vars.get(&format!("{}{}", prefix, key)) {
                Some(value) if !value.is_empty() => return Some(value.clone()),
                _ => {}
            }
        }
        None
    }

    /// Look up a namespaced boolean.
    ///
    /// Only the literals `true` and `false` (case-sensitive) are accepted;
    /// anything else is a [`Error::ConfigParse`] naming the key.
    pub fn lookup_bool(&self, segments: &[&str]) -> Result<Option<bool>> {
        match self.lookup(segments) {
            None => Ok(None),
            Some(value) => match value.as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(Error::ConfigParse {
                    key: normalize(&segments.join("_")),
                    message: format!("expected \"true\" or \"false\", got \"{}\"", other),
                }),
            },
        }
    }

    /// Untiered lookup of a raw variable name, for variables that live
    /// outside the config namespace (e.g. `BRAVE_GCLIENT_FILE`).
    pub fn raw(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }

    /// The full variable snapshot, used as the base when composing a process
    /// environment for external tools.
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

/// Dashes are not valid in environment variable names, so project names like
/// `brave-core` flatten to `brave_core` in keys.
fn normalize(key: &str) -> String {
    key.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(vars: &[(&str, &str)]) -> EnvReader {
        EnvReader::from_vars(vars.iter().copied())
    }

    #[test]
    fn test_lookup_user_tier_shadows_package_tier() {
        let env = reader(&[
            ("npm_config_projects_chrome_dir", "src-override"),
            ("npm_package_config_projects_chrome_dir", "src"),
        ]);
        assert_eq!(
            env.lookup(&["projects", "chrome", "dir"]),
            Some("src-override".to_string())
        );
    }

    #[test]
    fn test_lookup_falls_back_to_package_tier() {
        let env = reader(&[("npm_package_config_projects_chrome_dir", "src")]);
        assert_eq!(
            env.lookup(&["projects", "chrome", "dir"]),
            Some("src".to_string())
        );
    }

    #[test]
    fn test_lookup_skips_empty_values() {
        let env = reader(&[
            ("npm_config_channel", ""),
            ("npm_package_config_channel", "beta"),
        ]);
        assert_eq!(env.lookup(&["channel"]), Some("beta".to_string()));
    }

    #[test]
    fn test_lookup_missing_returns_none() {
        let env = reader(&[]);
        assert_eq!(env.lookup(&["projects", "chrome", "tag"]), None);
    }

    #[test]
    fn test_lookup_normalizes_dashes() {
        let env = reader(&[("npm_config_projects_brave_core_branch", "beta")]);
        assert_eq!(
            env.lookup(&["projects", "brave-core", "branch"]),
            Some("beta".to_string())
        );
    }

    #[test]
    fn test_lookup_bool_parses_literals() {
        let env = reader(&[
            ("npm_config_brave_debug_build", "true"),
            ("npm_package_config_official", "false"),
        ]);
        assert_eq!(env.lookup_bool(&["brave_debug_build"]).unwrap(), Some(true));
        assert_eq!(env.lookup_bool(&["official"]).unwrap(), Some(false));
        assert_eq!(env.lookup_bool(&["missing"]).unwrap(), None);
    }

    #[test]
    fn test_lookup_bool_rejects_other_literals() {
        let env = reader(&[("npm_config_brave_debug_build", "True")]);
        let err = env.lookup_bool(&["brave_debug_build"]).unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("brave_debug_build"));
        assert!(display.contains("True"));
    }

    #[test]
    fn test_seed_package_tier_does_not_clobber() {
        let mut env = reader(&[("npm_package_config_projects_chrome_dir", "existing")]);
        env.seed_package_tier([("projects_chrome_dir", "seeded"), ("brave_version", "1.2.3")]);
        assert_eq!(
            env.lookup(&["projects", "chrome", "dir"]),
            Some("existing".to_string())
        );
        assert_eq!(env.lookup(&["brave_version"]), Some("1.2.3".to_string()));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_process_snapshots_environment() {
        std::env::set_var("npm_config_brave_build_probe", "probe-value");
        let env = EnvReader::from_process();
        // Mutations after the snapshot are invisible to the reader.
        std::env::remove_var("npm_config_brave_build_probe");
        assert_eq!(
            env.lookup(&["brave_build_probe"]),
            Some("probe-value".to_string())
        );
        assert_eq!(EnvReader::from_process().lookup(&["brave_build_probe"]), None);
    }

    #[test]
    fn test_raw_lookup() {
        let env = reader(&[("BRAVE_GCLIENT_FILE", "/tmp/.gclient"), ("EMPTY", "")]);
        assert_eq!(env.raw("BRAVE_GCLIENT_FILE"), Some("/tmp/.gclient".to_string()));
        assert_eq!(env.raw("EMPTY"), None);
        assert_eq!(env.raw("MISSING"), None);
    }
}
