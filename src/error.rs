//! # Error Module
//!
//! Every failure that crosses a stage boundary (extractor, mapper, template engine) is reported as a
//! [`GenError`]: a stable [`ErrorCode`], a human-readable message, a structured detail map and an
//! optional wrapped cause.
//!
//! ## Propagation
//!
//! - A `GenError` travelling up the call chain is passed through unchanged, keeping its original
//!   code and cause.
//! - Errors from the underlying I/O or templating layers are wrapped exactly once, at the boundary
//!   where they enter this crate's contract. [`GenError::wrap`] enforces this: wrapping a value that
//!   already is a `GenError` returns it untouched.
//!
//! ## Example
//!
//! ```rust
//! use schemaforge::error::{ErrorCode, GenError};
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
//! let err = GenError::wrap(ErrorCode::TemplateLoad, "cannot read template", io)
//!     .with_detail("template", "server.ts");
//! assert_eq!(err.code, ErrorCode::TemplateLoad);
//!
//! // Re-wrapping keeps the original code.
//! let again = GenError::wrap(ErrorCode::MapperFailed, "lowering failed", err);
//! assert_eq!(again.code, ErrorCode::TemplateLoad);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Boxed upstream cause carried by a [`GenError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the core stages.
pub type GenResult<T> = Result<T, GenError>;

/// Stable error codes. The string forms are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// The schema source could not be parsed at all
    #[serde(rename = "PARSE_ERROR")]
    Parse,
    /// A single declaration could not be processed and was skipped
    #[serde(rename = "DECLARATION_ERROR")]
    Declaration,
    /// Lowering the schema into a service model failed
    #[serde(rename = "MAPPER_ERROR")]
    MapperFailed,
    /// No candidate path exists for the requested template
    #[serde(rename = "TEMPLATE_NOT_FOUND")]
    TemplateNotFound,
    /// The template file exists but could not be read
    #[serde(rename = "TEMPLATE_LOAD_ERROR")]
    TemplateLoad,
    /// The template failed to render or produced no output
    #[serde(rename = "TEMPLATE_RENDER_ERROR")]
    TemplateRender,
    /// Rendered output could not be written
    #[serde(rename = "TEMPLATE_WRITE_ERROR")]
    TemplateWrite,
    /// Configuration could not be loaded or is invalid
    #[serde(rename = "CONFIG_ERROR")]
    Config,
    /// The blocking adapter could not start its runtime
    #[serde(rename = "RUNTIME_ERROR")]
    Runtime,
}

impl ErrorCode {
    /// The stable string form of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Parse => "PARSE_ERROR",
            ErrorCode::Declaration => "DECLARATION_ERROR",
            ErrorCode::MapperFailed => "MAPPER_ERROR",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ErrorCode::TemplateLoad => "TEMPLATE_LOAD_ERROR",
            ErrorCode::TemplateRender => "TEMPLATE_RENDER_ERROR",
            ErrorCode::TemplateWrite => "TEMPLATE_WRITE_ERROR",
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Runtime => "RUNTIME_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The uniform error value returned by every core operation.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct GenError {
    /// Stable machine-readable code
    pub code: ErrorCode,
    /// Human-readable description
    pub message: String,
    /// Structured diagnostics (declaration name, template path, candidate list, ...)
    pub details: BTreeMap<String, Value>,
    /// The upstream failure this error wraps, if any
    #[source]
    pub source: Option<BoxError>,
}

impl GenError {
    /// Create an error without an upstream cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
            source: None,
        }
    }

    /// Wrap an upstream failure.
    ///
    /// If `cause` already is a `GenError` it is returned as-is so that its code and cause survive.
    pub fn wrap<E>(code: ErrorCode, message: impl Into<String>, cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        match cause.into().downcast::<GenError>() {
            Ok(existing) => *existing,
            Err(other) => Self {
                code,
                message: message.into(),
                details: BTreeMap::new(),
                source: Some(other),
            },
        }
    }

    /// Attach one structured detail.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach the upstream cause, replacing any previous one.
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        self.source = Some(cause.into());
        self
    }

    /// Look up a detail by key.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// A serializable snapshot of this error (code, message, details, cause chain as text).
    pub fn report(&self) -> ErrorReport {
        let mut causes = Vec::new();
        let mut next = std::error::Error::source(self);
        while let Some(cause) = next {
            causes.push(cause.to_string());
            next = cause.source();
        }
        ErrorReport {
            code: self.code,
            message: self.message.clone(),
            details: self.details.clone(),
            causes,
        }
    }
}

/// Serializable form of a [`GenError`], used for JSON diagnostics output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, Value>,
    pub causes: Vec<String>,
}
