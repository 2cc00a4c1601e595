use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser, Tree, TreeCursor};

use super::classify::classify_by_name;
use super::jsdoc::doc_for;
use super::model::{
    ComponentTags, ConstantValue, InterfaceDef, PropertyDef, Role, RoleFlags, SchemaModel,
    TypeAliasDef, PROTOCOL_VERSION_CONSTANT, UNKNOWN_VERSION,
};
use crate::error::{ErrorCode, GenError, GenResult};

/// Result of one extraction pass: the model plus the declarations that were skipped.
#[derive(Debug)]
pub struct Extraction {
    pub model: SchemaModel,
    /// One `DECLARATION_ERROR` per skipped declaration or member
    pub warnings: Vec<GenError>,
}

/// Extract a [`SchemaModel`] from TypeScript schema source.
///
/// `path` is only used in diagnostics. Skipped declarations are logged at `warn` level; use
/// [`extract_with_diagnostics`] to get them back as values.
///
/// # Errors
///
/// Returns `PARSE_ERROR` when the source cannot be parsed at all.
pub fn extract(source: &str, path: impl AsRef<Path>) -> GenResult<SchemaModel> {
    extract_with_diagnostics(source, path).map(|e| e.model)
}

/// Same as [`extract`] but also returns the per-declaration warnings.
pub fn extract_with_diagnostics(source: &str, path: impl AsRef<Path>) -> GenResult<Extraction> {
    let path = path.as_ref();
    let tree = parse(source, path)?;
    let root = tree.root_node();
    ensure_parsable(root, path)?;

    let acc = PreOrder::new(root).fold(Accumulator::new(path), |acc, node| {
        acc.visit(node, source)
    });
    Ok(acc.finish())
}

fn parse(source: &str, path: &Path) -> GenResult<Tree> {
    let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
    let mut parser = Parser::new();
    parser.set_language(&language).map_err(|_| {
        GenError::new(ErrorCode::Parse, "TypeScript grammar could not be loaded")
            .with_detail("path", path.display().to_string())
    })?;
    parser.parse(source, None).ok_or_else(|| {
        GenError::new(ErrorCode::Parse, "parser produced no syntax tree")
            .with_detail("path", path.display().to_string())
    })
}

/// The source counts as unparseable when nothing but error nodes came out of it.
fn ensure_parsable(root: Node<'_>, path: &Path) -> GenResult<()> {
    let mut cursor = root.walk();
    let statements: Vec<Node<'_>> = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    let hopeless = root.is_error()
        || (!statements.is_empty() && statements.iter().all(|n| n.is_error()));
    if hopeless {
        let first = statements.first().copied().unwrap_or(root);
        return Err(GenError::new(
            ErrorCode::Parse,
            format!("{} could not be parsed as TypeScript", path.display()),
        )
        .with_detail("path", path.display().to_string())
        .with_detail("line", first.start_position().row + 1)
        .with_detail("column", first.start_position().column + 1));
    }
    Ok(())
}

/// Pre-order walk over every node below (and including) `root`.
struct PreOrder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> PreOrder<'tree> {
    fn new(root: Node<'tree>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'tree> Iterator for PreOrder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

/// One processed exported declaration.
#[derive(Debug)]
enum Declaration {
    Interface {
        def: InterfaceDef,
        roles: RoleFlags,
        member_warnings: Vec<GenError>,
    },
    TypeAlias {
        def: TypeAliasDef,
        roles: RoleFlags,
    },
    Constants(Vec<(String, ConstantValue)>),
}

/// Fold state for the traversal. Consumed and returned by every step.
struct Accumulator {
    path: PathBuf,
    version: Option<String>,
    interfaces: IndexMap<String, InterfaceDef>,
    types: IndexMap<String, TypeAliasDef>,
    constants: IndexMap<String, ConstantValue>,
    tags: ComponentTags,
    order: IndexSet<String>,
    warnings: Vec<GenError>,
}

impl Accumulator {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            version: None,
            interfaces: IndexMap::new(),
            types: IndexMap::new(),
            constants: IndexMap::new(),
            tags: ComponentTags::default(),
            order: IndexSet::new(),
            warnings: Vec::new(),
        }
    }

    fn visit(self, node: Node<'_>, source: &str) -> Self {
        match node.kind() {
            "export_statement" => match declaration_of(node, source, &self.path) {
                Some(Ok(decl)) => self.absorb(decl),
                Some(Err(err)) => self.warn(err),
                None => self,
            },
            "ERROR" if node.parent().map(|p| p.parent().is_none()).unwrap_or(false) => {
                let err = located(
                    GenError::new(ErrorCode::Declaration, "unparseable source region skipped"),
                    node,
                    &self.path,
                );
                self.warn(err)
            }
            _ => self,
        }
    }

    fn absorb(mut self, decl: Declaration) -> Self {
        match decl {
            Declaration::Interface {
                def,
                roles,
                member_warnings,
            } => {
                debug!(name = %def.name, properties = def.properties.len(), "extracted interface");
                let name = def.name.clone();
                self.tag(&name, roles);
                self.order.insert(name.clone());
                self.interfaces.insert(name, def);
                for w in member_warnings {
                    self = self.warn(w);
                }
                self
            }
            Declaration::TypeAlias { def, roles } => {
                debug!(name = %def.name, "extracted type alias");
                let name = def.name.clone();
                self.tag(&name, roles);
                self.order.insert(name.clone());
                self.types.insert(name, def);
                self
            }
            Declaration::Constants(values) => {
                for (name, value) in values {
                    if name == PROTOCOL_VERSION_CONSTANT {
                        self.version = Some(value.to_string());
                    }
                    debug!(name = %name, "extracted constant");
                    self.constants.insert(name, value);
                }
                self
            }
        }
    }

    fn tag(&mut self, name: &str, roles: RoleFlags) {
        for role in Role::ALL {
            if roles.has(role) {
                self.tags.insert(role, name);
            }
        }
    }

    fn warn(mut self, err: GenError) -> Self {
        warn!(
            code = %err.code,
            details = ?err.details,
            "skipping declaration: {}",
            err.message
        );
        self.warnings.push(err);
        self
    }

    fn finish(self) -> Extraction {
        let tags = classify_by_name(self.tags, self.order.iter().map(String::as_str));
        let model = SchemaModel::new(
            self.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            self.interfaces,
            self.types,
            self.constants,
            tags,
        );
        Extraction {
            model,
            warnings: self.warnings,
        }
    }
}

/// Process the declaration wrapped by an `export` statement, if it is one we model.
fn declaration_of(
    export: Node<'_>,
    source: &str,
    path: &Path,
) -> Option<Result<Declaration, GenError>> {
    let Some(decl) = export.child_by_field_name("declaration") else {
        if export.has_error() {
            let err = GenError::new(ErrorCode::Declaration, "malformed export statement skipped");
            return Some(Err(located(err, export, path)));
        }
        return None;
    };

    let top_level = export.parent().map(|p| p.kind() == "program").unwrap_or(false);
    let kind = decl.kind();
    let supported = matches!(kind, "interface_declaration" | "type_alias_declaration")
        || (top_level && matches!(kind, "lexical_declaration" | "variable_declaration"));
    if !supported {
        return None;
    }

    if export.has_error() {
        let name = field_text(decl, "name", source).unwrap_or_else(|| "<unnamed>".to_string());
        let err = GenError::new(
            ErrorCode::Declaration,
            format!("declaration `{name}` contains a syntax error"),
        )
        .with_detail("declaration", name)
        .with_detail("kind", kind);
        return Some(Err(located(err, decl, path)));
    }

    let result = match kind {
        "interface_declaration" => interface_from_node(decl, source, path),
        "type_alias_declaration" => type_alias_from_node(decl, source),
        _ => Ok(Declaration::Constants(constants_from_node(decl, source))),
    };
    Some(result.map_err(|err| located(err, decl, path)))
}

fn interface_from_node(decl: Node<'_>, source: &str, path: &Path) -> GenResult<Declaration> {
    let name = declaration_name(decl, source, "interface")?;
    let doc = doc_for(decl, source);

    let mut extends = Vec::new();
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        if child.kind() == "extends_type_clause" {
            let mut inner = child.walk();
            extends.extend(
                child
                    .named_children(&mut inner)
                    .filter(|n| n.kind() != "comment")
                    .filter_map(|n| text_of(n, source))
                    .map(|t| collapse_whitespace(&t)),
            );
        }
    }

    let mut properties = Vec::new();
    let mut member_warnings = Vec::new();
    if let Some(body) = decl.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "property_signature" => match property_from_node(member, source) {
                    Ok(prop) => properties.push(prop),
                    Err(err) => member_warnings.push(located(
                        err.with_detail("declaration", name.clone()),
                        member,
                        path,
                    )),
                },
                "comment" => {}
                other => debug!(interface = %name, member = other, "ignoring non-property member"),
            }
        }
    }

    Ok(Declaration::Interface {
        def: InterfaceDef {
            description: doc.as_ref().and_then(|d| d.description.clone()),
            name,
            extends,
            properties,
        },
        roles: doc.map(|d| d.roles()).unwrap_or_default(),
        member_warnings,
    })
}

fn property_from_node(member: Node<'_>, source: &str) -> GenResult<PropertyDef> {
    let name_node = member.child_by_field_name("name").ok_or_else(|| {
        GenError::new(ErrorCode::Declaration, "property member has no name")
    })?;
    let raw = text_of(name_node, source).unwrap_or_default();
    let name = match name_node.kind() {
        "property_identifier" | "private_property_identifier" | "number" => raw,
        "string" => unquote(&raw),
        other => {
            return Err(GenError::new(
                ErrorCode::Declaration,
                format!("unsupported property name `{raw}`"),
            )
            .with_detail("member", raw)
            .with_detail("kind", other));
        }
    };
    if name.is_empty() {
        return Err(GenError::new(ErrorCode::Declaration, "property member has an empty name"));
    }

    let mut cursor = member.walk();
    let optional = member.children(&mut cursor).any(|c| c.kind() == "?");

    // no annotation means an implicit `any`
    let ty = member
        .child_by_field_name("type")
        .and_then(|annotation| annotation.named_child(0))
        .and_then(|t| text_of(t, source))
        .map(|t| collapse_whitespace(&t))
        .unwrap_or_else(|| "any".to_string());

    Ok(PropertyDef {
        description: doc_for(member, source).and_then(|d| d.description),
        name,
        ty,
        optional,
    })
}

fn type_alias_from_node(decl: Node<'_>, source: &str) -> GenResult<Declaration> {
    let name = declaration_name(decl, source, "type alias")?;
    let ty = decl
        .child_by_field_name("value")
        .and_then(|v| text_of(v, source))
        .map(|t| collapse_whitespace(&t))
        .ok_or_else(|| {
            GenError::new(
                ErrorCode::Declaration,
                format!("type alias `{name}` has no right-hand side"),
            )
            .with_detail("declaration", name.clone())
        })?;
    let doc = doc_for(decl, source);
    Ok(Declaration::TypeAlias {
        def: TypeAliasDef {
            description: doc.as_ref().and_then(|d| d.description.clone()),
            name,
            ty,
        },
        roles: doc.map(|d| d.roles()).unwrap_or_default(),
    })
}

/// Every `name = <literal>` declarator. Non-literal initializers are not constants.
fn constants_from_node(decl: Node<'_>, source: &str) -> Vec<(String, ConstantValue)> {
    let mut cursor = decl.walk();
    decl.named_children(&mut cursor)
        .filter(|n| n.kind() == "variable_declarator")
        .filter_map(|declarator| {
            let name = declarator.child_by_field_name("name")?;
            if name.kind() != "identifier" {
                return None;
            }
            let value = literal_value(declarator.child_by_field_name("value")?, source)?;
            Some((text_of(name, source)?, value))
        })
        .collect()
}

fn literal_value(node: Node<'_>, source: &str) -> Option<ConstantValue> {
    match node.kind() {
        "string" => Some(ConstantValue::String(unquote(&text_of(node, source)?))),
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution")
            {
                return None;
            }
            Some(ConstantValue::String(unquote(&text_of(node, source)?)))
        }
        "number" => parse_number(&text_of(node, source)?).map(ConstantValue::Number),
        "true" => Some(ConstantValue::Bool(true)),
        "false" => Some(ConstantValue::Bool(false)),
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?.kind();
            let argument = node.child_by_field_name("argument")?;
            match (operator, literal_value(argument, source)?) {
                ("-", ConstantValue::Number(n)) => Some(ConstantValue::Number(-n)),
                ("+", ConstantValue::Number(n)) => Some(ConstantValue::Number(n)),
                _ => None,
            }
        }
        "as_expression" | "satisfies_expression" | "parenthesized_expression" => {
            literal_value(node.named_child(0)?, source)
        }
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();
    let radix = |prefix: &str, radix: u32| {
        lower
            .strip_prefix(prefix)
            .and_then(|digits| i64::from_str_radix(digits, radix).ok())
            .map(|v| v as f64)
    };
    radix("0x", 16)
        .or_else(|| radix("0o", 8))
        .or_else(|| radix("0b", 2))
        .or_else(|| lower.trim_end_matches('n').parse::<f64>().ok())
}

fn declaration_name(decl: Node<'_>, source: &str, what: &str) -> GenResult<String> {
    field_text(decl, "name", source)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GenError::new(ErrorCode::Declaration, format!("{what} has no name")))
}

fn field_text(node: Node<'_>, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| text_of(n, source))
}

fn text_of(node: Node<'_>, source: &str) -> Option<String> {
    node.utf8_text(source.as_bytes()).ok().map(str::to_string)
}

fn unquote(raw: &str) -> String {
    let mut chars = raw.chars();
    match (chars.next(), raw.chars().last()) {
        (Some(open), Some(close))
            if raw.len() >= 2 && open == close && matches!(open, '"' | '\'' | '`') =>
        {
            raw[1..raw.len() - 1].to_string()
        }
        _ => raw.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Attach path and 1-based position details to a declaration error.
fn located(err: GenError, node: Node<'_>, path: &Path) -> GenError {
    let pos = node.start_position();
    err.with_detail("path", path.display().to_string())
        .with_detail("line", pos.row + 1)
        .with_detail("column", pos.column + 1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"2025-06-18\""), "2025-06-18");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("`tpl`"), "tpl");
        assert_eq!(unquote("bare"), "bare");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("0xFF"), Some(255.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("1.5e3"), Some(1500.0));
        assert_eq!(parse_number("10n"), Some(10.0));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("{\n  a: string;\n  b:   number\n}"),
            "{ a: string; b: number }"
        );
    }

    #[test]
    fn test_pre_order_visits_root_first() {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        let tree = parser.parse("const a = 1;", None).unwrap();
        let kinds: Vec<&str> = PreOrder::new(tree.root_node()).map(|n| n.kind()).collect();
        assert_eq!(kinds.first(), Some(&"program"));
        assert!(kinds.contains(&"lexical_declaration"));
        assert!(kinds.contains(&"number"));
        let decl = kinds.iter().position(|k| *k == "lexical_declaration").unwrap();
        let num = kinds.iter().position(|k| *k == "number").unwrap();
        assert!(decl < num);
    }
}
