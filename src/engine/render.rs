//! Template rendering backends.

use std::collections::BTreeMap;

use minijinja::{AutoEscape, Environment, Value};
use serde_json::Value as JsonValue;

use crate::error::BoxError;
use crate::naming;

/// Names of the helpers every template can use, as filters or as functions.
pub const HELPER_NAMES: [&str; 6] = [
    "camel_case",
    "pascal_case",
    "snake_case",
    "kebab_case",
    "pluralize",
    "to_json",
];

/// Renders template source against a data object.
///
/// `Ok(None)` means the backend produced no output at all, which is reported differently from
/// a backend error. An empty string is a valid result.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        name: &str,
        source: &str,
        data: &JsonValue,
    ) -> Result<Option<String>, BoxError>;
}

/// minijinja-backed [`Renderer`] with the helper set installed.
#[derive(Debug)]
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        // generated sources are not HTML; `package.json` must not be JSON-escaped either
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("camel_case", camel_case);
        env.add_filter("pascal_case", pascal_case);
        env.add_filter("snake_case", snake_case);
        env.add_filter("kebab_case", kebab_case);
        env.add_filter("pluralize", pluralize);
        env.add_filter("to_json", to_json);
        Self { env }
    }

    /// Render context: the data's top-level keys plus the helpers, helpers taking precedence.
    /// Data that is not an object is exposed as `data`.
    fn context(data: &JsonValue) -> Value {
        let mut ctx: BTreeMap<String, Value> = match data {
            JsonValue::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
                .collect(),
            JsonValue::Null => BTreeMap::new(),
            other => BTreeMap::from([("data".to_string(), Value::from_serialize(other))]),
        };
        ctx.insert("camel_case".into(), Value::from_function(camel_case));
        ctx.insert("pascal_case".into(), Value::from_function(pascal_case));
        ctx.insert("snake_case".into(), Value::from_function(snake_case));
        ctx.insert("kebab_case".into(), Value::from_function(kebab_case));
        ctx.insert("pluralize".into(), Value::from_function(pluralize));
        ctx.insert("to_json".into(), Value::from_function(to_json));
        Value::from(ctx)
    }
}

impl Renderer for JinjaRenderer {
    fn render(
        &self,
        name: &str,
        source: &str,
        data: &JsonValue,
    ) -> Result<Option<String>, BoxError> {
        let rendered = self
            .env
            .render_named_str(name, source, Self::context(data))?;
        Ok(Some(rendered))
    }
}

fn camel_case(value: &str) -> String {
    naming::to_camel_case(value)
}

fn pascal_case(value: &str) -> String {
    naming::to_pascal_case(value)
}

fn snake_case(value: &str) -> String {
    naming::to_snake_case(value)
}

fn kebab_case(value: &str) -> String {
    naming::to_kebab_case(value)
}

fn pluralize(value: &str) -> String {
    naming::pluralize(value)
}

fn to_json(value: Value) -> Result<String, minijinja::Error> {
    serde_json::to_string_pretty(&value).map_err(|e| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "value is not JSON serializable",
        )
        .with_source(e)
    })
}
