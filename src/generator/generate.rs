use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use super::config::{
    load_effective_config, ArtifactSpec, DEFAULT_TARGET_VERSION, DEFAULT_TEMPLATE_DIR,
};
use super::context::{ArtifactContext, RunMetadata};
use crate::engine::{is_valid_name, BlockingTemplateEngine, EngineConfig, TemplateEngine};
use crate::error::ErrorReport;
use crate::extractor::extract_with_diagnostics;
use crate::mapper::{MapperConfig, ResourceMapper, ServiceModel, DEFAULT_SERVICE_NAME};

/// Inputs of one generator run. Unset options fall back to `schemaforge.toml`, then defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub schema_path: PathBuf,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
    pub framework: Option<String>,
    pub service_name: Option<String>,
    pub target_version: Option<String>,
    /// Explicit config file; otherwise `schemaforge.toml` next to the schema is used if present
    pub config_path: Option<PathBuf>,
    /// Overwrite existing files
    pub force: bool,
    /// Render everything but write nothing
    pub dry_run: bool,
}

/// What a generator run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub service_name: String,
    pub resources: usize,
    /// Files written
    pub written: Vec<PathBuf>,
    /// Existing files left untouched
    pub skipped: Vec<PathBuf>,
    /// Files a dry run would have written
    pub planned: Vec<PathBuf>,
    /// Declarations the extractor skipped
    pub warnings: Vec<ErrorReport>,
}

/// Service name derived from the schema file name, e.g. `calendar.ts` → `calendar`.
pub fn default_service_name(schema_path: &Path) -> String {
    schema_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(crate::naming::to_kebab_case)
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string())
}

/// Read the schema, extract, map and render every artifact into `output_dir`.
pub fn generate_project(opts: &GenerateOptions) -> anyhow::Result<GenerationReport> {
    let config = load_effective_config(opts.config_path.as_deref(), &opts.schema_path)?;

    let source = fs::read_to_string(&opts.schema_path)
        .with_context(|| format!("Failed to read schema: {}", opts.schema_path.display()))?;
    let extraction = extract_with_diagnostics(&source, &opts.schema_path)?;
    for w in &extraction.warnings {
        println!("⚠️  {w}");
    }

    let service_name = opts
        .service_name
        .clone()
        .or_else(|| config.service_name.clone())
        .unwrap_or_else(|| default_service_name(&opts.schema_path));
    let service = ResourceMapper::new(MapperConfig {
        service_name: service_name.clone(),
    })
    .map(&extraction.model)?;

    let template_dir = opts
        .template_dir
        .clone()
        .or_else(|| config.template_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
    let framework = opts.framework.clone().or_else(|| config.framework.clone());
    let target_version = opts
        .target_version
        .clone()
        .or_else(|| config.target_version.clone())
        .unwrap_or_else(|| DEFAULT_TARGET_VERSION.to_string());

    let mut engine_config = EngineConfig::new(&template_dir);
    engine_config.framework = framework;
    let engine = BlockingTemplateEngine::from_engine(TemplateEngine::new(engine_config))?;

    let meta = RunMetadata::now(target_version, opts.schema_path.display().to_string());

    let mut report = GenerationReport {
        output_dir: opts.output_dir.clone(),
        service_name,
        resources: service.resources.len(),
        warnings: extraction.warnings.iter().map(|w| w.report()).collect(),
        ..Default::default()
    };

    for artifact in config.artifacts_or_default() {
        if artifact.per_resource {
            for resource in &service.resources {
                let ctx = ArtifactContext::for_resource(&service, resource, &meta);
                emit(&engine, &artifact, &ctx, opts, &mut report)?;
            }
        } else {
            let ctx = ArtifactContext::project(&service, &meta);
            emit(&engine, &artifact, &ctx, opts, &mut report)?;
        }
    }

    info!(
        service = %report.service_name,
        written = report.written.len(),
        skipped = report.skipped.len(),
        planned = report.planned.len(),
        "generation finished"
    );
    Ok(report)
}

fn emit(
    engine: &BlockingTemplateEngine,
    artifact: &ArtifactSpec,
    ctx: &ArtifactContext<'_>,
    opts: &GenerateOptions,
    report: &mut GenerationReport,
) -> anyhow::Result<()> {
    let relative = engine
        .render_source(&format!("output path of {}", artifact.template), &artifact.output, ctx)?;
    let relative = relative.trim();
    if !is_valid_name(relative) {
        anyhow::bail!(
            "Output path `{relative}` for template `{}` escapes the output directory",
            artifact.template
        );
    }
    let path = opts.output_dir.join(relative);

    if opts.dry_run {
        engine.render(&artifact.template, ctx)?;
        println!("ℹ️  Would write {path:?}");
        report.planned.push(path);
        return Ok(());
    }
    if path.exists() && !opts.force {
        println!("⚠️  Skipping existing file: {path:?} (use --force to overwrite)");
        report.skipped.push(path);
        return Ok(());
    }
    engine
        .render_to_file(&artifact.template, &path, ctx)
        .with_context(|| format!("Failed to generate {}", path.display()))?;
    println!("✅ Generated {path:?}");
    report.written.push(path);
    Ok(())
}

/// Extract and map a schema file without rendering anything.
pub fn load_service(
    schema_path: &Path,
    service_name: Option<&str>,
) -> anyhow::Result<ServiceModel> {
    let source = fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read schema: {}", schema_path.display()))?;
    let extraction = extract_with_diagnostics(&source, schema_path)?;
    for w in &extraction.warnings {
        warn!(error = %w, "declaration skipped");
    }
    let name = service_name
        .map(str::to_string)
        .unwrap_or_else(|| default_service_name(schema_path));
    Ok(ResourceMapper::new(MapperConfig { service_name: name }).map(&extraction.model)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        assert_eq!(default_service_name(Path::new("dir/CalendarApi.ts")), "calendar-api");
        assert_eq!(default_service_name(Path::new("")), DEFAULT_SERVICE_NAME);
    }
}
