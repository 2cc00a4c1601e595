//! # Extractor Module
//!
//! Statically derives a [`SchemaModel`] from a TypeScript schema file without executing it.
//!
//! ## Overview
//!
//! The schema is parsed with the tree-sitter TypeScript grammar and walked once, in pre-order.
//! Every step of the walk folds one node into an accumulator value:
//!
//! - **Interfaces** - `export interface X { ... }` becomes an [`InterfaceDef`] with its property
//!   members, `extends` list and JSDoc description
//! - **Type aliases** - `export type X = ...` keeps the right-hand side as source text
//! - **Constants** - exported top-level constants with literal initializers; the
//!   `LATEST_PROTOCOL_VERSION` constant also sets [`SchemaModel::version`]
//! - **Role tags** - `@resource`, `@tool`, `@prompt` and `@capability` JSDoc tags
//!
//! After the walk, declarations that carry no tag but follow a naming convention
//! (`...Resource`, `...Tool`, `...Prompt`, `...Capabilit...`) are appended to the matching role
//! list. A declaration can end up in several role lists; the linter reports that.
//!
//! ## Failure Model
//!
//! Only a source that cannot be parsed at all fails with `PARSE_ERROR`. A declaration with a
//! syntax error is skipped with a `DECLARATION_ERROR` warning and the rest of the file is still
//! extracted.
//!
//! ## Example
//!
//! ```rust
//! use schemaforge::extractor::extract;
//!
//! let source = r#"
//! export const LATEST_PROTOCOL_VERSION = "2025-06-18";
//!
//! /**
//!  * A calendar event.
//!  * @resource
//!  */
//! export interface CalendarEvent {
//!   id: string;
//!   title?: string;
//! }
//! "#;
//!
//! let model = extract(source, "schema.ts").unwrap();
//! assert_eq!(model.version, "2025-06-18");
//! assert_eq!(model.component_tags.resources, vec!["CalendarEvent"]);
//! assert!(model.interfaces["CalendarEvent"].properties[1].optional);
//! ```

mod classify;
mod extract;
mod jsdoc;
mod model;

pub use classify::classify_by_name;
pub use extract::{extract, extract_with_diagnostics, Extraction};
pub use jsdoc::{parse_jsdoc, JsDoc, JsDocTag};
pub use model::{
    ComponentTags, ConstantValue, InterfaceDef, PropertyDef, Role, RoleFlags, SchemaModel,
    SchemaSummary, TypeAliasDef, PROTOCOL_VERSION_CONSTANT, UNKNOWN_VERSION,
};
