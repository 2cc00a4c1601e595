//! # SchemaForge
//!
//! **SchemaForge** turns a TypeScript protocol schema (the kind used to describe Model Context
//! Protocol messages) into a runnable TypeScript server project.
//!
//! ## Overview
//!
//! The pipeline has three stages, each usable on its own:
//!
//! - **[`extractor`]** - Parses the schema with tree-sitter and produces a [`SchemaModel`]: exported
//!   interfaces, type aliases, constants, the protocol version and the component classification
//!   (resources, tools, prompts)
//! - **[`mapper`]** - Lowers the schema model into a [`ServiceModel`]: resources with routes, CRUD
//!   operations and scalar-mapped fields
//! - **[`engine`]** - Resolves, caches and renders minijinja templates, with framework-specific
//!   overrides and a blocking adapter
//!
//! The **[`generator`]** composes them into a project generator driven by a `schemaforge.toml`
//! configuration, and the **[`cli`]** exposes everything through the `schemaforge-gen` binary.
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(schemaforge-gen)
//!     participant Extract as extractor::extract
//!     participant Map as mapper::ResourceMapper
//!     participant Engine as engine::TemplateEngine
//!     participant FS as File System
//!
//!     User->>CLI: schemaforge-gen generate --schema schema.ts
//!     CLI->>Extract: extract(source, path)
//!     Extract->>Extract: Parse, walk exports,<br/>read JSDoc tags
//!     Extract->>Extract: Classify by naming convention
//!     Extract-->>CLI: SchemaModel
//!     CLI->>Map: map(&schema)
//!     Map->>Map: Routes, operations, fields
//!     Map-->>CLI: ServiceModel
//!     loop every artifact
//!         CLI->>Engine: render_to_file(template, context, path)
//!         Engine->>Engine: Resolve candidates,<br/>load (cached), render
//!         Engine->>FS: Write file
//!     end
//!     CLI-->>User: ✅ Generated service
//! ```
//!
//! ## Error Handling
//!
//! Stage boundaries report a [`GenError`] with a stable [`ErrorCode`] and structured details (see
//! [`error`]). Orchestration code (generator, CLI) uses `anyhow` and adds context as errors
//! bubble up.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`; the binary installs a subscriber configured from
//! `SCHEMAFORGE_LOG_*` environment variables (see [`logging`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use schemaforge::{extract, MapperConfig, ResourceMapper};
//!
//! let source = std::fs::read_to_string("schema.ts").expect("read schema");
//! let schema = extract(&source, "schema.ts").expect("extract");
//! let service = ResourceMapper::new(MapperConfig::default())
//!     .map(&schema)
//!     .expect("map");
//! for resource in &service.resources {
//!     println!("/{} ({} operations)", resource.plural_path, resource.operations.len());
//! }
//! ```
//!
//! ```bash
//! schemaforge-gen generate --schema schema.ts --output my-service
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod mapper;
pub mod naming;

pub use engine::{BlockingTemplateEngine, EngineConfig, TemplateEngine};
pub use error::{ErrorCode, GenError, GenResult};
pub use extractor::{extract, extract_with_diagnostics, SchemaModel};
pub use mapper::{MapperConfig, ResourceMapper, ServiceModel};
