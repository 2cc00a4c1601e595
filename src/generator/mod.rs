//! # Generator Module
//!
//! Composes the extractor, the mapper and the template engine into a full project generator.
//!
//! ## Overview
//!
//! ```text
//! schema.ts → extract → SchemaModel → map → ServiceModel → render artifacts → output dir
//! ```
//!
//! Each run is a complete, stateless recomputation: nothing is remembered between runs and
//! existing files are either skipped or (with `force`) overwritten.
//!
//! ## Generated Structure
//!
//! With the default artifact list and template set:
//!
//! ```text
//! my-service/
//! ├── package.json
//! ├── tsconfig.json
//! ├── README.md
//! └── src/
//!     ├── server.ts           # JSON-RPC dispatch over stdio (or HTTP with `express`)
//!     ├── types.ts            # Interfaces and aliases from the schema
//!     └── resources/
//!         └── *.ts            # One in-memory store per resource
//! ```
//!
//! ## Configuration
//!
//! A `schemaforge.toml` next to the schema (or passed with `--config`) can set the service name,
//! template directory, framework, target version and replace the artifact list:
//!
//! ```toml
//! service_name = "calendar"
//! framework = "express"
//!
//! [[artifacts]]
//! template = "src/resource.ts"
//! output = "src/resources/{{ resource.name | kebab_case }}.ts"
//! per_resource = true
//! ```
//!
//! Output paths are themselves templates, rendered against the same context as the file.
//!
//! ## Template Context
//!
//! Every template receives:
//!
//! - `service` - the [`ServiceModel`](crate::mapper::ServiceModel)
//! - `resource` - the current resource, for per-resource artifacts only
//! - `meta` - [`RunMetadata`]: timestamp, generator version, target version, schema path

mod config;
mod context;
mod generate;

pub use config::{
    auto_detect_config_path, default_artifacts, load_effective_config, load_generator_config,
    resolve_config_path, ArtifactSpec, GeneratorConfig, CONFIG_FILE_NAME,
    DEFAULT_TARGET_VERSION, DEFAULT_TEMPLATE_DIR,
};
pub use context::{ArtifactContext, RunMetadata};
pub use generate::{
    default_service_name, generate_project, load_service, GenerateOptions, GenerationReport,
};
