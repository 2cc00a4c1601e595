//! # Template Engine Module
//!
//! Locates, caches and renders named templates against any serializable data object.
//!
//! ## Resolution
//!
//! A template is requested by a logical name such as `src/server.ts`. The engine tries a fixed
//! list of candidate paths (see [`candidate_paths`]), framework-specific directory first, and
//! uses the first file that exists. When none exists the error lists every path it tried.
//!
//! ## Caching
//!
//! Loaded sources are kept in a [`TemplateCache`] keyed by the requested name. The cache is
//! passed in at construction and can be shared between engines; a name is read from disk once.
//!
//! ## Rendering
//!
//! Rendering uses minijinja (`trim_blocks`, `lstrip_blocks`, trailing newline kept, no
//! auto-escaping). Every template sees these helpers, both as filters and as functions:
//! `camel_case`, `pascal_case`, `snake_case`, `kebab_case`, `pluralize`, `to_json`.
//!
//! ```text
//! {{ resource.name | kebab_case }}         → calendar-event
//! {{ pluralize(resource.name) }}           → CalendarEvents
//! ```
//!
//! ## Async and Blocking
//!
//! [`TemplateEngine`] is async; [`BlockingTemplateEngine`] runs the same operations on a private
//! current-thread runtime for callers without one.
//!
//! ```rust,no_run
//! use schemaforge::engine::{BlockingTemplateEngine, EngineConfig};
//! use serde_json::json;
//!
//! let engine = BlockingTemplateEngine::new(
//!     EngineConfig::new("templates").with_framework("express"),
//! )?;
//! let out = engine.render("src/server.ts", &json!({ "service": { "name": "calendar" } }))?;
//! # Ok::<(), schemaforge::error::GenError>(())
//! ```

mod blocking;
mod cache;
mod fs;
mod render;
mod resolve;
mod template;

pub use blocking::BlockingTemplateEngine;
pub use cache::{CachedTemplate, TemplateCache};
pub use fs::{DiskFs, MemoryFs, TemplateFs};
pub use render::{JinjaRenderer, Renderer, HELPER_NAMES};
pub use resolve::{candidate_paths, is_valid_name, template_name, TEMPLATE_EXTENSIONS};
pub use template::{EngineConfig, TemplateEngine};

#[cfg(test)]
mod tests;
