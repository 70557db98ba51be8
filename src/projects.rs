//! # Project Registry
//!
//! Every project declared in the manifest resolves to exactly one
//! [`ProjectDescriptor`]: the source-control reference to fetch, the
//! repository location, and the directory the project occupies under the
//! checkout root. The descriptor is what gets handed to the dependency-fetch
//! tool.
//!
//! ## Ref resolution
//!
//! References resolve with a fixed precedence, first match wins:
//!
//! 1. An explicit `projects.<name>.repository.ref` value, used verbatim.
//! 2. A pinned tag, as `refs/tags/<tag>`.
//! 3. Neither branch nor version declared: the `origin/master` fallback.
//! 4. A branch without a version: `origin/<branch>`.
//! 5. A version: `origin/<version>`. For the core project, when the parent
//!    project pins its own tag or branch, the ref gains a `+<parent-pin>`
//!    suffix so the dependent repository tracks the parent's exact revision.
//!
//! Resolution is deterministic: the same environment snapshot always yields
//! the same descriptor.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::env::EnvReader;
use crate::error::{Error, Result};
use crate::manifest::Manifest;

/// The project whose version drives the overall release version.
pub const CORE_PROJECT: &str = "brave-core";

/// The project whose pin composes into the core project's ref.
pub const PARENT_PROJECT: &str = "chrome";

/// A fully-resolved project entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Unique project name, the key into the project mapping.
    pub name: String,
    /// Resolved source-control reference. Never empty once resolved.
    pub r#ref: String,
    /// Repository location; absent for projects with no dedicated repository.
    pub url: Option<String>,
    /// Directory name declared for the project under the checkout root.
    pub gclient_name: String,
    /// Absolute project directory: checkout root joined with the declared
    /// directory name.
    pub dir: PathBuf,
    /// Dependency overrides copied verbatim from the manifest declaration.
    pub custom_deps: BTreeMap<String, serde_json::Value>,
}

/// The resolved set of projects for one checkout.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: BTreeMap<String, ProjectDescriptor>,
}

impl ProjectRegistry {
    /// Resolve a descriptor for every project declared in the manifest.
    ///
    /// Fails when a declared project carries no directory name, since the
    /// checkout layout would be unknowable.
    pub fn build(env: &EnvReader, manifest: &Manifest, root_dir: &Path) -> Result<Self> {
        let mut projects = BTreeMap::new();
        for (name, decl) in &manifest.config.projects {
            let gclient_name =
                env.lookup(&["projects", name.as_str(), "dir"])
                    .ok_or_else(|| Error::Config {
                        message: format!("project declares no dir: {}", name),
                    })?;
            let descriptor = ProjectDescriptor {
                name: name.clone(),
                r#ref: resolve_ref(env, name),
                url: env.lookup(&["projects", name.as_str(), "repository", "url"]),
                dir: root_dir.join(&gclient_name),
                gclient_name,
                custom_deps: decl.custom_deps.clone(),
            };
            log::debug!("resolved project {} -> {}", name, descriptor.r#ref);
            projects.insert(name.clone(), descriptor);
        }
        Ok(Self { projects })
    }

    /// Look up a project by name; an undeclared name is a fatal
    /// configuration error.
    pub fn get(&self, name: &str) -> Result<&ProjectDescriptor> {
        self.projects.get(name).ok_or_else(|| Error::Config {
            message: format!("project not declared in manifest: {}", name),
        })
    }

    /// The resolved project mapping, ordered by name.
    pub fn into_projects(self) -> BTreeMap<String, ProjectDescriptor> {
        self.projects
    }
}

/// Resolve the source-control reference for one project.
pub fn resolve_ref(env: &EnvReader, name: &str) -> String {
    if let Some(r#ref) = env.lookup(&["projects", name, "repository", "ref"]) {
        return r#ref;
    }

    if let Some(tag) = env.lookup(&["projects", name, "tag"]) {
        return format!("refs/tags/{}", tag);
    }

    let version = env.lookup(&["projects", name, "version"]);
    let branch = env.lookup(&["projects", name, "branch"]);
    match (version, branch) {
        (None, None) => defaults::PROJECT_REF.to_string(),
        (None, Some(branch)) => format!("origin/{}", branch),
        (Some(version), _) => {
            let mut r#ref = format!("origin/{}", version);
            // The core repository pins itself to the parent's exact revision
            // via build metadata.
            if name == CORE_PROJECT {
                if let Some(parent) = project_pin(env, PARENT_PROJECT) {
                    r#ref = format!("{}+{}", r#ref, parent);
                }
            }
            r#ref
        }
    }
}

/// The tag-or-branch pin a project declares for itself, tag preferred.
fn project_pin(env: &EnvReader, name: &str) -> Option<String> {
    env.lookup(&["projects", name, "tag"])
        .or_else(|| env.lookup(&["projects", name, "branch"]))
}
