use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::mapper::{MappedResource, ServiceModel};

/// Facts about one generator run, available to every template as `meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
    /// Version of this generator
    pub generator_version: String,
    /// Version written into the generated project
    pub target_version: String,
    pub schema_path: String,
}

impl RunMetadata {
    /// Metadata stamped with the current time.
    pub fn now(target_version: impl Into<String>, schema_path: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            target_version: target_version.into(),
            schema_path: schema_path.into(),
        }
    }
}

/// Data passed to each artifact template.
///
/// `resource` is only set for per-resource artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactContext<'a> {
    pub service: &'a ServiceModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<&'a MappedResource>,
    pub meta: &'a RunMetadata,
}

impl<'a> ArtifactContext<'a> {
    pub fn project(service: &'a ServiceModel, meta: &'a RunMetadata) -> Self {
        Self {
            service,
            resource: None,
            meta,
        }
    }

    pub fn for_resource(
        service: &'a ServiceModel,
        resource: &'a MappedResource,
        meta: &'a RunMetadata,
    ) -> Self {
        Self {
            service,
            resource: Some(resource),
            meta,
        }
    }
}
