use serde::{Deserialize, Serialize};

/// Protocol-aligned description of the service to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceModel {
    /// Service name from the mapper configuration
    pub name: String,
    /// Protocol version carried over from the schema
    pub protocol_version: String,
    /// One entry per resource, in classification order
    pub resources: Vec<MappedResource>,
    /// Resources first, then other interfaces, then type aliases
    pub types: Vec<MappedType>,
}

impl ServiceModel {
    pub fn resource(&self, name: &str) -> Option<&MappedResource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// A resource together with its synthesized operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedResource {
    pub name: String,
    pub description: String,
    /// Route segment, e.g. `calendar-events` for `CalendarEvent`
    pub plural_path: String,
    pub fields: Vec<MappedField>,
    /// Always get, list, create, update, delete in that order
    pub operations: Vec<MappedOperation>,
}

/// One synthesized CRUD operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedOperation {
    /// camelCase operation name, e.g. `listCalendarEvents`
    pub name: String,
    pub kind: OperationKind,
    pub method: HttpMethod,
    pub route: String,
    pub input_type: String,
    pub output_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedField {
    pub name: String,
    /// Target-language type after the scalar table, `[]`-suffixed when repeated
    pub mapped_type: String,
    pub required: bool,
    pub repeated: bool,
    pub description: String,
}

/// A type emitted into the generated type definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedType {
    pub name: String,
    pub description: String,
    pub fields: Vec<MappedField>,
    /// Right-hand side for type aliases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    pub is_resource: bool,
}

/// The five operations synthesized for every resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Get,
        OperationKind::List,
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::Delete,
    ];

    /// Verb used as the prefix of request and result type names.
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Get => "Get",
            OperationKind::List => "List",
            OperationKind::Create => "Create",
            OperationKind::Update => "Update",
            OperationKind::Delete => "Delete",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            OperationKind::Get | OperationKind::List => HttpMethod::Get,
            OperationKind::Create => HttpMethod::Post,
            OperationKind::Update => HttpMethod::Put,
            OperationKind::Delete => HttpMethod::Delete,
        }
    }

    /// Whether the route addresses a single item (`/:id`).
    pub fn is_item_route(&self) -> bool {
        matches!(
            self,
            OperationKind::Get | OperationKind::Update | OperationKind::Delete
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
