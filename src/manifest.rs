//! # Package Manifest
//!
//! The root of a checkout carries a `package.json`-style manifest whose
//! `config.projects` section is the static declaration table for every
//! project in the multi-repository tree: the local directory name, optional
//! pinned tag/branch/version, the repository location, and opaque
//! `custom_deps` overrides passed through to the dependency-fetch tool.
//!
//! The manifest is also how the release version is derived: the core
//! project's own manifest declares the `version` field that drives the
//! overall release tag.
//!
//! Declared config values seed the manifest tier of the environment
//! namespace (see [`crate::env::EnvReader::seed_package_tier`]), so a real
//! `npm_config_*` variable always shadows what the manifest declares.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// A parsed package manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Declared package version (e.g. `0.55.12`). Empty when absent.
    #[serde(default)]
    pub version: String,

    /// The `config` section holding the project declaration table.
    #[serde(default)]
    pub config: ManifestConfig,
}

/// The `config` section of a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestConfig {
    /// Declared projects, keyed by project name.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectDecl>,
}

/// A single project declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDecl {
    /// Directory name for the project under the checkout root.
    #[serde(default)]
    pub dir: Option<String>,

    /// Pinned tag; resolves to `refs/tags/<tag>`.
    #[serde(default)]
    pub tag: Option<String>,

    /// Tracking branch.
    #[serde(default)]
    pub branch: Option<String>,

    /// Pinned version; resolves to `origin/<version>`.
    #[serde(default)]
    pub version: Option<String>,

    /// Repository location and optional explicit ref.
    #[serde(default)]
    pub repository: Option<RepositoryDecl>,

    /// Dependency-path overrides handed verbatim to the fetch tool. A null
    /// value means the dependency is skipped entirely.
    #[serde(default)]
    pub custom_deps: BTreeMap<String, serde_json::Value>,
}

/// The `repository` block of a project declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryDecl {
    /// Repository URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Explicit full ref, used verbatim when present.
    #[serde(default, rename = "ref")]
    pub r#ref: Option<String>,
}

impl Manifest {
    /// Parse a manifest from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a manifest from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Flatten the declared config into `(key, value)` entries for seeding
    /// the manifest tier of the environment namespace.
    ///
    /// Nested declaration fields join with `_`, mirroring how npm exposes
    /// `package.json` config: `projects.<name>.repository.url` becomes
    /// `projects_<name>_repository_url`.
    pub fn config_entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for (name, decl) in &self.config.projects {
            let mut push = |field: &str, value: &Option<String>| {
                if let Some(value) = value {
                    entries.push((format!("projects_{}_{}", name, field), value.clone()));
                }
            };
            push("dir", &decl.dir);
            push("tag", &decl.tag);
            push("branch", &decl.branch);
            push("version", &decl.version);
            if let Some(repository) = &decl.repository {
                push("repository_url", &repository.url);
                push("repository_ref", &repository.r#ref);
            }
        }
        entries
    }
}
