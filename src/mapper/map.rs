use anyhow::{anyhow, Context};
use tracing::{debug, info};

use super::model::{
    MappedField, MappedOperation, MappedResource, MappedType, OperationKind, ServiceModel,
};
use super::scalars::map_type;
use crate::error::{ErrorCode, GenError, GenResult};
use crate::extractor::{PropertyDef, SchemaModel};
use crate::naming::{pluralize, resource_path_segment};

/// Name used when none is configured.
pub const DEFAULT_SERVICE_NAME: &str = "mcp-service";

/// Mapper settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub service_name: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

/// Lowers a [`SchemaModel`] into a [`ServiceModel`].
///
/// Stateless apart from its configuration; the same schema always maps to the same service.
#[derive(Debug, Clone, Default)]
pub struct ResourceMapper {
    config: MapperConfig,
}

impl ResourceMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    /// Map every resource in `schema` and collect the type definitions.
    ///
    /// # Errors
    ///
    /// `MAPPER_ERROR` when a tagged resource is not declared or yields an empty route segment.
    /// A [`GenError`] raised further down is returned unchanged.
    pub fn map(&self, schema: &SchemaModel) -> GenResult<ServiceModel> {
        self.lower(schema).map_err(|err| match err.downcast::<GenError>() {
            Ok(gen) => gen,
            Err(other) => GenError::wrap(
                ErrorCode::MapperFailed,
                format!("mapping service `{}` failed: {other:#}", self.config.service_name),
                other,
            )
            .with_detail("service", self.config.service_name.clone()),
        })
    }

    fn lower(&self, schema: &SchemaModel) -> anyhow::Result<ServiceModel> {
        let resources = schema
            .component_tags
            .resources
            .iter()
            .map(|name| {
                map_resource(schema, name).with_context(|| format!("resource `{name}`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let types = collect_types(schema, &resources);

        info!(
            service = %self.config.service_name,
            resources = resources.len(),
            types = types.len(),
            "mapped schema to service model"
        );

        Ok(ServiceModel {
            name: self.config.service_name.clone(),
            protocol_version: schema.version.clone(),
            resources,
            types,
        })
    }
}

fn map_resource(schema: &SchemaModel, name: &str) -> anyhow::Result<MappedResource> {
    if !schema.is_declared(name) {
        return Err(anyhow!("`{name}` is tagged as a resource but never declared"));
    }
    let plural_path = resource_path_segment(name);
    if plural_path.is_empty() {
        return Err(anyhow!("resource name `{name}` yields an empty route segment"));
    }

    let fields = schema
        .interfaces
        .get(name)
        .map(|i| i.properties.iter().map(map_field).collect())
        .unwrap_or_default();
    let operations = synthesize_operations(name, &plural_path);

    debug!(resource = name, route = %format!("/{plural_path}"), "mapped resource");

    Ok(MappedResource {
        name: name.to_string(),
        description: schema
            .description_of(name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name} resource")),
        plural_path,
        fields,
        operations,
    })
}

pub(crate) fn map_field(prop: &PropertyDef) -> MappedField {
    let mapped = map_type(&prop.ty);
    MappedField {
        name: prop.name.clone(),
        mapped_type: mapped.mapped_type,
        required: !prop.optional,
        repeated: mapped.repeated,
        description: prop.description.clone().unwrap_or_default(),
    }
}

/// The five CRUD operations for resource `name`, derived from the name alone.
pub fn synthesize_operations(name: &str, plural_path: &str) -> Vec<MappedOperation> {
    let collection = format!("/{plural_path}");
    let item = format!("{collection}/:id");
    OperationKind::ALL
        .into_iter()
        .map(|kind| {
            let verb = kind.verb();
            let (op_name, output_type, description) = match kind {
                OperationKind::Get => (
                    format!("get{name}"),
                    name.to_string(),
                    format!("Retrieve a single {name} by id"),
                ),
                OperationKind::List => (
                    format!("list{}", pluralize(name)),
                    format!("List{name}Result"),
                    format!("List {name} items"),
                ),
                OperationKind::Create => (
                    format!("create{name}"),
                    name.to_string(),
                    format!("Create a new {name}"),
                ),
                OperationKind::Update => (
                    format!("update{name}"),
                    name.to_string(),
                    format!("Update an existing {name}"),
                ),
                OperationKind::Delete => (
                    format!("delete{name}"),
                    format!("Delete{name}Result"),
                    format!("Delete a {name} by id"),
                ),
            };
            MappedOperation {
                name: op_name,
                kind,
                method: kind.method(),
                route: if kind.is_item_route() {
                    item.clone()
                } else {
                    collection.clone()
                },
                input_type: format!("{verb}{name}Request"),
                output_type,
                description,
            }
        })
        .collect()
}

fn collect_types(schema: &SchemaModel, resources: &[MappedResource]) -> Vec<MappedType> {
    let is_resource = |name: &str| resources.iter().any(|r| r.name == name);

    let resource_types = resources.iter().map(|r| MappedType {
        name: r.name.clone(),
        description: r.description.clone(),
        fields: r.fields.clone(),
        alias_of: if schema.interfaces.contains_key(&r.name) {
            None
        } else {
            schema.types.get(&r.name).map(|t| t.ty.clone())
        },
        is_resource: true,
    });

    let interface_types = schema
        .interfaces
        .values()
        .filter(|i| !is_resource(&i.name))
        .map(|i| MappedType {
            name: i.name.clone(),
            description: i.description.clone().unwrap_or_default(),
            fields: i.properties.iter().map(map_field).collect(),
            alias_of: None,
            is_resource: false,
        });

    let alias_types = schema
        .types
        .values()
        .filter(|t| !is_resource(&t.name))
        .map(|t| MappedType {
            name: t.name.clone(),
            description: t.description.clone().unwrap_or_default(),
            fields: Vec::new(),
            alias_of: Some(t.ty.clone()),
            is_resource: false,
        });

    resource_types
        .chain(interface_types)
        .chain(alias_types)
        .collect()
}
