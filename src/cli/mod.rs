//! # CLI Module
//!
//! Command-line interface for the `schemaforge-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a server project from a schema:
//!
//! ```bash
//! schemaforge-gen generate --schema schema.ts --output my-service
//! ```
//!
//! Options:
//! - `--schema <FILE>` - Path to the TypeScript schema (required)
//! - `--output <DIR>` - Output directory (default: current directory)
//! - `--templates <DIR>` - Template directory (default: `templates`)
//! - `--framework <NAME>` - Framework-specific templates to prefer (e.g. `express`)
//! - `--name <NAME>` - Service name
//! - `--target-version <VERSION>` - Version of the generated project
//! - `--config <FILE>` - Generator config (default: `schemaforge.toml` next to the schema)
//! - `--force` - Overwrite existing files
//! - `--dry-run` - Show what would be written
//!
//! ### `extract` / `map`
//!
//! Print the extracted schema model or the mapped service model as JSON or YAML:
//!
//! ```bash
//! schemaforge-gen extract --schema schema.ts --format yaml
//! schemaforge-gen map --schema schema.ts --name calendar
//! ```
//!
//! ### `lint`
//!
//! ```bash
//! schemaforge-gen lint --schema schema.ts --fail-on-error
//! ```
//!
//! ### `templates`
//!
//! List the templates a directory provides and check that each one loads:
//!
//! ```bash
//! schemaforge-gen templates --templates templates --framework express
//! ```

mod commands;


pub use commands::{dump, run, run_cli, Cli, Commands, OutputFormat};
