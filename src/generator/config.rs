//! Generator configuration
//!
//! A project can pin generator settings in a `schemaforge.toml` file that sits alongside the
//! schema. Every setting can still be overridden on the command line.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the schema.
pub const CONFIG_FILE_NAME: &str = "schemaforge.toml";

/// Template directory used when nothing else is configured.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Target version stamped into generated projects by default.
pub const DEFAULT_TARGET_VERSION: &str = "0.1.0";

/// One file the generator renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Template name, resolved by the template engine
    pub template: String,
    /// Output path relative to the output directory; may contain template expressions
    pub output: String,
    /// Render once per resource instead of once per project
    #[serde(default)]
    pub per_resource: bool,
}

impl ArtifactSpec {
    pub fn project(template: &str, output: &str) -> Self {
        Self {
            template: template.to_string(),
            output: output.to_string(),
            per_resource: false,
        }
    }

    pub fn per_resource(template: &str, output: &str) -> Self {
        Self {
            template: template.to_string(),
            output: output.to_string(),
            per_resource: true,
        }
    }
}

/// The artifacts of a generated TypeScript server.
pub fn default_artifacts() -> Vec<ArtifactSpec> {
    vec![
        ArtifactSpec::project("package.json", "package.json"),
        ArtifactSpec::project("tsconfig.json", "tsconfig.json"),
        ArtifactSpec::project("README.md", "README.md"),
        ArtifactSpec::project("src/server.ts", "src/server.ts"),
        ArtifactSpec::project("src/types.ts", "src/types.ts"),
        ArtifactSpec::per_resource(
            "src/resource.ts",
            "src/resources/{{ resource.name | kebab_case }}.ts",
        ),
    ]
}

/// Settings loaded from `schemaforge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Service name; defaults to the schema file stem
    #[serde(default)]
    pub service_name: Option<String>,

    /// Template directory; relative paths are taken from the config file's directory
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Framework subdirectory of the template directory
    #[serde(default)]
    pub framework: Option<String>,

    /// Version written into the generated project
    #[serde(default)]
    pub target_version: Option<String>,

    /// Replaces the default artifact list when non-empty
    #[serde(default)]
    pub artifacts: Vec<ArtifactSpec>,
}

impl GeneratorConfig {
    /// Artifacts to render: the configured list, or [`default_artifacts`].
    pub fn artifacts_or_default(&self) -> Vec<ArtifactSpec> {
        if self.artifacts.is_empty() {
            default_artifacts()
        } else {
            self.artifacts.clone()
        }
    }
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if file exists and parses successfully,
/// `Ok(None)` if file doesn't exist (not an error),
/// `Err` if file exists but fails to parse.
///
/// A relative `template_dir` is rebased onto the config file's directory.
pub fn load_generator_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!(
            "Failed to read generator config: {}",
            config_path.display()
        )
    })?;

    let mut config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!(
            "Failed to parse generator config: {}",
            config_path.display()
        )
    })?;

    if let (Some(dir), Some(parent)) = (config.template_dir.as_ref(), config_path.parent()) {
        if dir.is_relative() {
            config.template_dir = Some(parent.join(dir));
        }
    }

    Ok(Some(config))
}

/// Auto-detect `schemaforge.toml` alongside the schema
pub fn auto_detect_config_path(schema_path: &Path) -> Option<PathBuf> {
    let config_path = schema_path.parent()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the schema
/// 3. None (no config)
///
/// An explicit path that does not exist is returned as is, so loading it reports the problem
/// instead of silently falling back.
pub fn resolve_config_path(explicit_path: Option<&Path>, schema_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_config_path(schema_path)
}

/// Load the effective configuration for `schema_path`.
///
/// Missing auto-detected config → defaults. A missing explicit config is an error.
pub fn load_effective_config(
    explicit_path: Option<&Path>,
    schema_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit_path, schema_path) {
        Some(path) => {
            let loaded = load_generator_config(&path)?;
            match (loaded, explicit_path) {
                (Some(config), _) => Ok(config),
                (None, Some(_)) => {
                    anyhow::bail!("Generator config not found: {}", path.display())
                }
                (None, None) => Ok(GeneratorConfig::default()),
            }
        }
        None => Ok(GeneratorConfig::default()),
    }
}
