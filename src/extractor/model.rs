use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the top-level constant that carries the protocol version.
pub const PROTOCOL_VERSION_CONSTANT: &str = "LATEST_PROTOCOL_VERSION";

/// Version reported when the schema declares no protocol version constant.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Structural model of one schema source file.
///
/// Built once per extraction and never mutated afterwards. Maps keep declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Protocol version, or [`UNKNOWN_VERSION`]
    pub version: String,
    /// Exported interfaces keyed by name
    pub interfaces: IndexMap<String, InterfaceDef>,
    /// Exported type aliases keyed by name
    pub types: IndexMap<String, TypeAliasDef>,
    /// Exported top-level constants with literal initializers
    pub constants: IndexMap<String, ConstantValue>,
    /// Declarations classified into protocol roles
    pub component_tags: ComponentTags,
    /// Counts of the collections above
    pub summary: SchemaSummary,
}

impl SchemaModel {
    /// Assemble a model and derive its summary from the collections.
    pub fn new(
        version: impl Into<String>,
        interfaces: IndexMap<String, InterfaceDef>,
        types: IndexMap<String, TypeAliasDef>,
        constants: IndexMap<String, ConstantValue>,
        component_tags: ComponentTags,
    ) -> Self {
        let summary = SchemaSummary {
            interfaces: interfaces.len(),
            types: types.len(),
            constants: constants.len(),
            resources: component_tags.resources.len(),
            tools: component_tags.tools.len(),
            prompts: component_tags.prompts.len(),
            capabilities: component_tags.capabilities.len(),
        };
        Self {
            version: version.into(),
            interfaces,
            types,
            constants,
            component_tags,
            summary,
        }
    }

    /// Whether `name` is declared as an interface or a type alias.
    pub fn is_declared(&self, name: &str) -> bool {
        self.interfaces.contains_key(name) || self.types.contains_key(name)
    }

    /// Description of a declaration, whichever kind it is.
    pub fn description_of(&self, name: &str) -> Option<&str> {
        self.interfaces
            .get(name)
            .and_then(|i| i.description.as_deref())
            .or_else(|| self.types.get(name).and_then(|t| t.description.as_deref()))
    }
}

/// An exported `interface` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Supertypes named in the `extends` clause, as written
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    /// Property members in source order
    pub properties: Vec<PropertyDef>,
}

/// One property member of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    /// Declared type as source text; never resolved
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An exported `type` alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasDef {
    pub name: String,
    /// Right-hand side as source text
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Literal value of an exported constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl std::fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstantValue::Bool(b) => write!(f, "{b}"),
            ConstantValue::Number(n) => write!(f, "{n}"),
            ConstantValue::String(s) => f.write_str(s),
        }
    }
}

/// Protocol roles a declaration can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resource,
    Tool,
    Prompt,
    Capability,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Resource, Role::Tool, Role::Prompt, Role::Capability];

    /// JSDoc tag that marks a declaration with this role (without the `@`).
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Resource => "resource",
            Role::Tool => "tool",
            Role::Prompt => "prompt",
            Role::Capability => "capability",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// Naming convention used by the fallback classification pass.
    pub fn matches_name(&self, name: &str) -> bool {
        match self {
            Role::Resource => name.ends_with("Resource"),
            Role::Tool => name.ends_with("Tool"),
            Role::Prompt => name.ends_with("Prompt"),
            Role::Capability => name.contains("Capabilit"),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Role flags read from a declaration's documentation tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub resource: bool,
    pub tool: bool,
    pub prompt: bool,
    pub capability: bool,
}

impl RoleFlags {
    pub fn set(&mut self, role: Role) {
        match role {
            Role::Resource => self.resource = true,
            Role::Tool => self.tool = true,
            Role::Prompt => self.prompt = true,
            Role::Capability => self.capability = true,
        }
    }

    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Resource => self.resource,
            Role::Tool => self.tool,
            Role::Prompt => self.prompt,
            Role::Capability => self.capability,
        }
    }
}

/// Ordered, duplicate-free name lists per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTags {
    pub resources: Vec<String>,
    pub tools: Vec<String>,
    pub prompts: Vec<String>,
    pub capabilities: Vec<String>,
}

impl ComponentTags {
    pub fn list(&self, role: Role) -> &[String] {
        match role {
            Role::Resource => &self.resources,
            Role::Tool => &self.tools,
            Role::Prompt => &self.prompts,
            Role::Capability => &self.capabilities,
        }
    }

    fn list_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Resource => &mut self.resources,
            Role::Tool => &mut self.tools,
            Role::Prompt => &mut self.prompts,
            Role::Capability => &mut self.capabilities,
        }
    }

    pub fn contains(&self, role: Role, name: &str) -> bool {
        self.list(role).iter().any(|n| n == name)
    }

    /// Append `name` to the role list unless it is already there. Returns whether it was added.
    pub fn insert(&mut self, role: Role, name: &str) -> bool {
        if self.contains(role, name) {
            return false;
        }
        self.list_mut(role).push(name.to_string());
        true
    }

    /// Roles `name` has been classified into.
    pub fn roles_of(&self, name: &str) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|r| self.contains(*r, name))
            .collect()
    }

    /// Every tagged name, across all roles, in role order.
    pub fn all_names(&self) -> impl Iterator<Item = &String> {
        self.resources
            .iter()
            .chain(&self.tools)
            .chain(&self.prompts)
            .chain(&self.capabilities)
    }
}

/// Derived collection counts. Reporting only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub interfaces: usize,
    pub types: usize,
    pub constants: usize,
    pub resources: usize,
    pub tools: usize,
    pub prompts: usize,
    pub capabilities: usize,
}
