use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::engine::{BlockingTemplateEngine, EngineConfig};
use crate::extractor::extract_with_diagnostics;
use crate::generator::{default_service_name, generate_project, load_service, GenerateOptions};
use crate::linter::{has_errors, lint_schema, print_lint_issues, LintSeverity};
use crate::mapper::{MapperConfig, ResourceMapper};

/// Command-line interface for SchemaForge
///
/// Provides commands for generating servers from TypeScript protocol schemas and for inspecting
/// the intermediate models.
#[derive(Parser)]
#[command(name = "schemaforge-gen")]
#[command(about = "SchemaForge code generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Serialization format for model dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a server project from a schema
    ///
    /// Options not given here are taken from `schemaforge.toml` next to the schema (or the file
    /// passed with `--config`), then from built-in defaults.
    Generate {
        /// Path to the TypeScript schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Output directory for the generated project
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Template directory (default: `templates`)
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Framework subdirectory of the template directory (e.g. `express`)
        #[arg(long)]
        framework: Option<String>,

        /// Service name; derived from the schema file name if omitted
        #[arg(long)]
        name: Option<String>,

        /// Version written into the generated project
        #[arg(long)]
        target_version: Option<String>,

        /// Path to the generator configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Render everything but write nothing
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the structural model extracted from a schema
    Extract {
        /// Path to the TypeScript schema file
        #[arg(short, long)]
        schema: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the service model mapped from a schema
    Map {
        /// Path to the TypeScript schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Service name; derived from the schema file name if omitted
        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Lint a schema
    ///
    /// Checks for route collisions, ambiguous role classification, empty resources, a missing
    /// protocol version, unresolved `extends` targets and irregular plurals.
    Lint {
        /// Path to the TypeScript schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// List the templates in a template directory and check that they load
    Templates {
        /// Template directory
        #[arg(short, long, default_value = "templates")]
        templates: PathBuf,

        /// Framework subdirectory searched first
        #[arg(long)]
        framework: Option<String>,
    },
}

/// Parse the process arguments and run the selected command
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already-parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            schema,
            output,
            templates,
            framework,
            name,
            target_version,
            config,
            force,
            dry_run,
        } => {
            let report = generate_project(&GenerateOptions {
                schema_path: schema,
                output_dir: output,
                template_dir: templates,
                framework,
                service_name: name,
                target_version,
                config_path: config,
                force,
                dry_run,
            })?;
            if dry_run {
                println!(
                    "ℹ️  Dry run: {} file(s) would be written to {:?}",
                    report.planned.len(),
                    report.output_dir
                );
            } else {
                println!(
                    "✅ Generated service `{}` ({} resource(s)): {} written, {} skipped",
                    report.service_name,
                    report.resources,
                    report.written.len(),
                    report.skipped.len()
                );
            }
            Ok(())
        }
        Commands::Extract { schema, format } => {
            let source = read_schema(&schema)?;
            let extraction = extract_with_diagnostics(&source, &schema)?;
            for w in &extraction.warnings {
                eprintln!("⚠️  {w}");
            }
            println!("{}", dump(&extraction.model, format)?);
            Ok(())
        }
        Commands::Map {
            schema,
            name,
            format,
        } => {
            let service = load_service(&schema, name.as_deref())?;
            println!("{}", dump(&service, format)?);
            Ok(())
        }
        Commands::Lint {
            schema,
            fail_on_error,
            errors_only,
        } => {
            let source = read_schema(&schema)?;
            let model = extract_with_diagnostics(&source, &schema)?.model;
            let service = ResourceMapper::new(MapperConfig {
                service_name: default_service_name(&schema),
            })
            .map(&model)?;
            let mut issues = lint_schema(&model, &service);
            if errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if fail_on_error && has_errors(&issues) {
                anyhow::bail!("Lint found errors in {}", schema.display());
            }
            Ok(())
        }
        Commands::Templates {
            templates,
            framework,
        } => {
            let mut config = EngineConfig::new(templates);
            config.framework = framework;
            let engine = BlockingTemplateEngine::new(config)?;
            let names = engine.list_templates("")?;
            for name in &names {
                let path = engine.resolve_path(name)?;
                println!("   {name} → {}", path.display());
            }
            let loaded = engine.preload_dir("")?;
            if loaded == names.len() {
                println!("✅ Loaded {loaded} template(s)");
            } else {
                println!("⚠️  Loaded {loaded} of {} template(s)", names.len());
                let cached = engine.engine().cache().names();
                for name in names.iter().filter(|n| !cached.contains(*n)) {
                    println!("   ✗ {name}");
                }
            }
            Ok(())
        }
    }
}

fn read_schema(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {}", path.display()))
}

/// Serialize a model in the requested format
pub fn dump<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}
