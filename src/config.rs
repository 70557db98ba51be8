//! # Build Configuration
//!
//! [`Config`] is the resolved build plan for one command invocation. It is
//! seeded from the environment namespace and the package manifest, mutated
//! exactly once with the CLI overrides via the consuming [`Config::update`],
//! and read-only from then on. Derived values (output directory, component
//! linkage mode, the gn argument map) are computed on read and are pure
//! functions of the scalar state, so repeated reads always agree.
//!
//! ## Lifecycle
//!
//! ```text
//! Config::load(manifest)        seed scalars + project registry
//!     .update(&options)?        apply CLI overrides, consumes the plan
//!                               -> frozen: only &self accessors remain
//! ```
//!
//! `update` takes the plan by value and hands back the finalized one; there
//! is no other mutation path, which makes the "mutate once, read many"
//! contract structural rather than documentation-only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::defaults;
use crate::env::EnvReader;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::projects::{ProjectDescriptor, ProjectRegistry, CORE_PROJECT};

/// Host platform the build runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the platform this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

/// CLI overrides applied to a seeded plan. Every field is optional; absent
/// fields leave the seeded value in place.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Literal output directory (`-C`); its base name becomes the build mode.
    pub output_dir: Option<PathBuf>,
    /// Target architecture; `x86` and `ia32` select the 32-bit pair.
    pub target_arch: Option<String>,
    /// Solution file for the fetch tool; the sentinel `default` is ignored.
    pub gclient_file: Option<String>,
    /// Geolocation API key; applied only when non-empty.
    pub brave_google_api_key: Option<String>,
    /// Geolocation API endpoint; applied only when non-empty.
    pub brave_google_api_endpoint: Option<String>,
    /// Keep debugging symbols.
    pub debug_build: Option<bool>,
    /// Force official build settings.
    pub official_build: Option<bool>,
    /// Target channel; `release` means stable and stores as empty.
    pub channel: Option<String>,
    /// Component linkage mode override.
    pub component: Option<String>,
    /// Per-project ref overrides, keyed by project name.
    pub project_refs: BTreeMap<String, String>,
}

/// The resolved build plan.
///
/// Constructed once per invocation; see the module docs for the lifecycle.
#[derive(Debug, Clone)]
pub struct Config {
    /// Checkout root (the directory holding the manifest).
    pub root_dir: PathBuf,
    /// Source root: the parent project's directory under the checkout root.
    pub src_dir: PathBuf,
    /// Location of the bundled depot tools.
    pub depot_tools_dir: PathBuf,
    /// Solution file handed to the fetch tool.
    pub gclient_file: PathBuf,
    /// Build mode (e.g. `Release`, `Debug`).
    pub build_config: String,
    /// Target CPU architecture as gn understands it.
    pub target_arch: String,
    /// Target CPU architecture as the legacy build scripts understand it.
    pub gyp_target_arch: String,
    /// Official (release-quality) build settings.
    pub official_build: bool,
    /// Keep debugging symbols and assertions.
    pub debug_build: bool,
    /// Release channel; empty means stable.
    pub channel: String,
    /// Geolocation API key baked into the build.
    pub google_api_key: String,
    /// Geolocation API endpoint baked into the build.
    pub google_api_endpoint: String,
    /// Product name stamped into generated build files.
    pub product_name: String,
    /// Project name stamped into generated build files.
    pub project_name: String,
    /// Code-signing identity used on macOS.
    pub mac_signing_identifier: String,
    /// Optional compiler-cache wrapper for spawned builds.
    pub sccache: Option<String>,
    /// Release version of the core project (may carry `+` build metadata).
    pub brave_core_version: String,
    /// Version with build metadata stripped; drives the version components
    /// in the gn argument map.
    pub release_tag: String,
    /// Host platform, captured at construction.
    pub platform: Platform,
    /// Resolved project mapping, ordered by name.
    pub projects: BTreeMap<String, ProjectDescriptor>,

    env: EnvReader,
    output_dir_override: Option<PathBuf>,
    component_override: Option<String>,
}

impl Config {
    /// Seed a plan from a manifest file on disk, snapshotting the process
    /// environment. The checkout root is the manifest's directory.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest_path = manifest_path.canonicalize().map_err(|e| Error::Config {
            message: format!("cannot locate manifest {}: {}", manifest_path.display(), e),
        })?;
        let manifest = Manifest::from_file(&manifest_path)?;
        let root_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::Config {
                message: format!("manifest has no parent directory: {}", manifest_path.display()),
            })?;
        Self::new(EnvReader::from_process(), &manifest, root_dir)
    }

    /// Seed a plan from an environment snapshot and a parsed manifest.
    ///
    /// The manifest's config section seeds the second lookup tier before any
    /// value is read, so real environment variables shadow declarations.
    pub fn new(mut env: EnvReader, manifest: &Manifest, root_dir: PathBuf) -> Result<Self> {
        env.seed_package_tier(manifest.config_entries());

        let src_dir = root_dir.join(
            env.lookup(&["projects", "chrome", "dir"])
                .ok_or_else(|| Error::Config {
                    message: "projects.chrome.dir is not declared".to_string(),
                })?,
        );
        let depot_tools_dir = root_dir.join("vendor").join("depot_tools");
        let gclient_file = env
            .raw("BRAVE_GCLIENT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| root_dir.join(".gclient"));

        let debug_build = env.lookup_bool(&["brave_debug_build"])?.unwrap_or(false);
        let google_api_key = env
            .lookup(&["brave_google_api_key"])
            .unwrap_or_else(|| defaults::GOOGLE_API_KEY.to_string());
        let google_api_endpoint = env
            .lookup(&["brave_google_api_endpoint"])
            .unwrap_or_else(|| defaults::GOOGLE_API_ENDPOINT.to_string());
        let product_name = env
            .lookup(&["brave_product_name"])
            .unwrap_or_else(|| defaults::PRODUCT_NAME.to_string());
        let project_name = env
            .lookup(&["brave_project_name"])
            .unwrap_or_else(|| defaults::PRODUCT_NAME.to_string());
        let mac_signing_identifier = env
            .lookup(&["mac_signing_identifier"])
            .unwrap_or_default();
        let sccache = env.lookup(&["sccache"]);

        let projects = ProjectRegistry::build(&env, manifest, &root_dir)?.into_projects();

        let brave_core_version = match env.lookup(&["brave_version"]) {
            Some(version) => version,
            None => core_version_from_disk(&projects).unwrap_or_default(),
        };
        let release_tag = brave_core_version
            .split('+')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            root_dir,
            src_dir,
            depot_tools_dir,
            gclient_file,
            build_config: defaults::BUILD_CONFIG.to_string(),
            target_arch: defaults::TARGET_ARCH.to_string(),
            gyp_target_arch: defaults::TARGET_ARCH.to_string(),
            official_build: true,
            debug_build,
            channel: String::new(),
            google_api_key,
            google_api_endpoint,
            product_name,
            project_name,
            mac_signing_identifier,
            sccache,
            brave_core_version,
            release_tag,
            platform: Platform::host(),
            projects,
            env,
            output_dir_override: None,
            component_override: None,
        })
    }

    /// Override the detected host platform. Useful for inspecting the
    /// argument map another platform would receive.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Apply CLI overrides and finalize the plan.
    ///
    /// Consumes the seeded plan and returns the frozen one; this is the only
    /// mutation path, and it must run at most once per invocation. Each
    /// override applies independently, in a fixed order:
    ///
    /// - `-C` locks the output directory and renames the build mode to its
    ///   base name.
    /// - `target_arch` applies the 32-bit mapping table (see below).
    /// - `gclient_file` is skipped for the `default` sentinel.
    /// - API key/endpoint apply only when non-empty.
    /// - `debug_build`: explicit value wins, else derived from the mode.
    /// - `official_build`: explicit value wins and forces debug off when
    ///   true, else derived from the mode.
    /// - `channel`: `release` stores as empty (stable), others verbatim.
    /// - Per-project refs replace resolved refs unless the override is the
    ///   `default` sentinel or empty; projects with no ref are never touched.
    pub fn update(mut self, options: &Options) -> Self {
        if let Some(dir) = &options.output_dir {
            if let Some(base) = dir.file_name() {
                self.build_config = base.to_string_lossy().into_owned();
            }
            self.output_dir_override = Some(dir.clone());
        }

        // Both 32-bit spellings converge on the same (x86, ia32) pair, but
        // which field receives the raw option value differs per branch. The
        // mapping table is preserved exactly; do not re-derive it.
        if let Some(arch) = options.target_arch.as_deref() {
            if arch == "x86" {
                self.target_arch = arch.to_string();
                self.gyp_target_arch = "ia32".to_string();
            }
            if arch == "ia32" {
                self.target_arch = "x86".to_string();
                self.gyp_target_arch = arch.to_string();
            }
        }

        if let Some(gclient_file) = &options.gclient_file {
            if gclient_file != "default" {
                self.gclient_file = PathBuf::from(gclient_file);
            }
        }

        if let Some(key) = &options.brave_google_api_key {
            if !key.is_empty() {
                self.google_api_key = key.clone();
            }
        }

        if let Some(endpoint) = &options.brave_google_api_endpoint {
            if !endpoint.is_empty() {
                self.google_api_endpoint = endpoint.clone();
            }
        }

        self.debug_build = match options.debug_build {
            Some(debug_build) => debug_build,
            None => self.build_config != defaults::BUILD_CONFIG,
        };

        match options.official_build {
            Some(official_build) => {
                self.official_build = official_build;
                if official_build {
                    self.debug_build = false;
                }
            }
            None => self.official_build = self.build_config == defaults::BUILD_CONFIG,
        }

        // In the generated build files, an empty channel is the stable
        // channel.
        if let Some(channel) = &options.channel {
            self.channel = if channel == "release" {
                String::new()
            } else {
                channel.clone()
            };
        }

        if let Some(component) = &options.component {
            self.component_override = Some(component.clone());
        }

        for (name, project) in self.projects.iter_mut() {
            // Don't update refs for projects that don't have them.
            if project.r#ref.is_empty() {
                continue;
            }
            if let Some(r#ref) = options.project_refs.get(name) {
                if r#ref != "default" && !r#ref.is_empty() {
                    log::debug!("overriding {} ref -> {}", name, r#ref);
                    project.r#ref = r#ref.clone();
                }
            }
        }

        self
    }

    /// The target output directory.
    ///
    /// A `-C` override wins permanently; otherwise
    /// `<src>/out[_x86]/<build_config>`, with the `_x86` suffix when
    /// targeting the 32-bit architecture.
    pub fn output_dir(&self) -> PathBuf {
        if let Some(output_dir) = &self.output_dir_override {
            return output_dir.clone();
        }
        let base = if self.target_arch == "x86" {
            "out_x86"
        } else {
            "out"
        };
        self.src_dir.join(base).join(&self.build_config)
    }

    /// Component linkage mode: an explicit override wins, otherwise shared
    /// libraries for non-Release modes and static libraries for Release.
    pub fn component(&self) -> String {
        if let Some(component) = &self.component_override {
            return component.clone();
        }
        if self.build_config == defaults::BUILD_CONFIG {
            "static_library".to_string()
        } else {
            "shared_library".to_string()
        }
    }

    /// The argument map handed to the build-file generator.
    ///
    /// Pure function of the scalar state; the key names are a compatibility
    /// contract with the downstream tool. Version component keys are omitted
    /// when the release tag has fewer than three dot-separated components.
    pub fn build_args(&self) -> BTreeMap<String, Value> {
        let mut args = BTreeMap::new();
        let component_build = self.build_config != defaults::BUILD_CONFIG;

        args.insert("root_extra_deps".to_string(), json!(["//brave"]));
        args.insert("is_component_build".to_string(), json!(component_build));
        args.insert("proprietary_codecs".to_string(), json!(true));
        args.insert("ffmpeg_branding".to_string(), json!("Chrome"));
        args.insert(
            "enable_widevine".to_string(),
            json!(self.platform != Platform::Linux),
        );
        args.insert("target_cpu".to_string(), json!(self.target_arch));
        args.insert("is_official_build".to_string(), json!(self.official_build));
        args.insert("is_debug".to_string(), json!(component_build));
        args.insert("dcheck_always_on".to_string(), json!(component_build));
        args.insert("brave_channel".to_string(), json!(self.channel));
        args.insert("brave_google_api_key".to_string(), json!(self.google_api_key));
        args.insert(
            "brave_google_api_endpoint".to_string(),
            json!(self.google_api_endpoint),
        );
        args.insert("brave_product_name".to_string(), json!(self.product_name));
        args.insert("brave_project_name".to_string(), json!(self.project_name));

        let version_parts: Vec<&str> = self.release_tag.split('.').collect();
        let version_keys = ["brave_version_major", "brave_version_minor", "brave_version_build"];
        for (key, part) in version_keys.iter().zip(version_parts.iter()) {
            args.insert(key.to_string(), json!(part));
        }

        if self.platform == Platform::MacOs {
            args.insert(
                "mac_signing_identifier".to_string(),
                json!(self.mac_signing_identifier),
            );
        }

        if self.debug_build {
            if self.platform == Platform::MacOs {
                args.insert("enable_stripping".to_string(), json!(false));
            }
            args.insert("symbol_level".to_string(), json!(2));
            args.insert("enable_profiling".to_string(), json!(true));
            args.insert("is_win_fastlink".to_string(), json!(true));
        }

        // Minimal symbols for target Linux x86, because ELF32 cannot be > 4GiB
        if self.target_arch == "x86" && self.platform == Platform::Linux {
            args.insert("symbol_level".to_string(), json!(1));
        }

        let wrapper = if self.platform == Platform::Windows {
            "redirect-cc.cmd"
        } else {
            "redirect-cc.py"
        };
        args.insert(
            "cc_wrapper".to_string(),
            json!(self
                .src_dir
                .join("brave")
                .join("script")
                .join(wrapper)
                .to_string_lossy()),
        );

        args
    }

    /// Look up a resolved project; an undeclared name is a fatal
    /// configuration error.
    pub fn project(&self, name: &str) -> Result<&ProjectDescriptor> {
        self.projects.get(name).ok_or_else(|| Error::Config {
            message: format!("project not declared in manifest: {}", name),
        })
    }

    /// The environment snapshot the plan was resolved from.
    pub fn env(&self) -> &EnvReader {
        &self.env
    }
}

/// Read the core project's version from its on-disk manifest, if the
/// checkout has one. Absence is a valid state, not an error.
fn core_version_from_disk(projects: &BTreeMap<String, ProjectDescriptor>) -> Option<String> {
    let core = projects.get(CORE_PROJECT)?;
    let manifest_path = core.dir.join("package.json");
    if !manifest_path.exists() {
        return None;
    }
    match Manifest::from_file(&manifest_path) {
        Ok(manifest) => Some(manifest.version),
        Err(e) => {
            log::warn!("ignoring unreadable {}: {}", manifest_path.display(), e);
            None
        }
    }
}
