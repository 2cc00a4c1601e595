//! JSDoc lookup and parsing.
//!
//! Two strategies are tried in order:
//!
//! 1. the `/** ... */` comment node that immediately precedes the declaration in the syntax
//!    tree (or precedes its `export` wrapper);
//! 2. a scan of the raw source text right before the node, for when the comment was attached
//!    elsewhere in the tree.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use super::model::{Role, RoleFlags};

static DECORATION: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\s*\*?\s?").expect("static regex")
});

static TAG_LINE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^@([A-Za-z][\w-]*)\s*(.*)$").expect("static regex")
});

/// A parsed JSDoc block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
    /// Free text before the first tag, or `None` when empty
    pub description: Option<String>,
    pub tags: Vec<JsDocTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    pub text: String,
}

impl JsDoc {
    /// Role flags for the recognized role tags.
    pub fn roles(&self) -> RoleFlags {
        let mut flags = RoleFlags::default();
        for tag in &self.tags {
            if let Some(role) = Role::from_tag(&tag.name) {
                flags.set(role);
            }
        }
        flags
    }
}

/// Find and parse the documentation for `node`.
pub fn doc_for(node: Node<'_>, source: &str) -> Option<JsDoc> {
    comment_node_text(node, source)
        .or_else(|| preceding_block_comment(node, source))
        .map(|raw| parse_jsdoc(&raw))
}

/// Strategy 1: nearest preceding JSDoc comment node among adjacent siblings.
fn comment_node_text(node: Node<'_>, source: &str) -> Option<String> {
    if let Some(text) = adjacent_jsdoc(node, source) {
        return Some(text);
    }
    // `export interface X`: the comment precedes the export statement
    let parent = node.parent()?;
    if parent.kind() == "export_statement" {
        return adjacent_jsdoc(parent, source);
    }
    None
}

fn adjacent_jsdoc(node: Node<'_>, source: &str) -> Option<String> {
    let mut prev = node.prev_sibling();
    while let Some(sibling) = prev {
        match sibling.kind() {
            "comment" => {
                let text = sibling.utf8_text(source.as_bytes()).ok()?;
                if text.starts_with("/**") {
                    return Some(text.to_string());
                }
                prev = sibling.prev_sibling();
            }
            // member separators between a comment and the member it documents
            ";" | "," => prev = sibling.prev_sibling(),
            _ => return None,
        }
    }
    None
}

/// Strategy 2: the source text directly before the node must end with a `/** ... */` block.
fn preceding_block_comment(node: Node<'_>, source: &str) -> Option<String> {
    let start = match node.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent.start_byte(),
        _ => node.start_byte(),
    };
    let before = source.get(..start)?.trim_end();
    if !before.ends_with("*/") {
        return None;
    }
    let open = before.rfind("/**")?;
    let block = &before[open..];
    if block.len() < 5 {
        return None;
    }
    // a `*/` inside the block means the match spans two comments
    if block[3..block.len() - 2].contains("*/") {
        return None;
    }
    Some(block.to_string())
}

/// Parse a raw `/** ... */` block into description and tags.
pub fn parse_jsdoc(raw: &str) -> JsDoc {
    let inner = raw
        .trim()
        .strip_prefix("/**")
        .unwrap_or(raw)
        .strip_suffix("*/")
        .unwrap_or(raw);

    let mut description = Vec::new();
    let mut tags: Vec<JsDocTag> = Vec::new();

    for line in inner.lines() {
        let line = DECORATION.replace(line, "");
        let line = line.trim_end();
        if let Some(caps) = TAG_LINE.captures(line) {
            tags.push(JsDocTag {
                name: caps[1].to_string(),
                text: caps[2].trim().to_string(),
            });
        } else if let Some(last) = tags.last_mut() {
            if !line.is_empty() {
                if !last.text.is_empty() {
                    last.text.push(' ');
                }
                last.text.push_str(line.trim());
            }
        } else {
            description.push(line.to_string());
        }
    }

    while description.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        description.pop();
    }
    while description.first().map(|l| l.trim().is_empty()).unwrap_or(false) {
        description.remove(0);
    }
    let description = if description.is_empty() {
        None
    } else {
        Some(description.join("\n"))
    };

    JsDoc { description, tags }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tree_sitter::{Language, Parser, Tree};

    #[test]
    fn test_parse_description_and_tags() {
        let doc = parse_jsdoc(
            "/**\n * A calendar event.\n *\n * Spans one or more days.\n * @resource\n * @see https://example.com\n */",
        );
        assert_eq!(
            doc.description.as_deref(),
            Some("A calendar event.\n\nSpans one or more days.")
        );
        assert_eq!(doc.tags.len(), 2);
        assert_eq!(doc.tags[0].name, "resource");
        assert_eq!(doc.tags[1].text, "https://example.com");
        assert!(doc.roles().resource);
        assert!(!doc.roles().tool);
    }

    #[test]
    fn test_parse_single_line() {
        let doc = parse_jsdoc("/** The user id. */");
        assert_eq!(doc.description.as_deref(), Some("The user id."));
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_parse_tags_only() {
        let doc = parse_jsdoc("/**\n * @tool\n * @prompt\n */");
        assert!(doc.description.is_none());
        let roles = doc.roles();
        assert!(roles.tool && roles.prompt);
        assert!(!roles.capability);
    }

    #[test]
    fn test_multiline_tag_text_is_joined() {
        let doc = parse_jsdoc("/**\n * @deprecated use\n *   something else\n */");
        assert_eq!(doc.tags[0].name, "deprecated");
        assert_eq!(doc.tags[0].text, "use something else");
    }

    fn parse(source: &str) -> Tree {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        parser.parse(source, None).unwrap()
    }

    fn find<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        if node.kind() == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        children.into_iter().find_map(|child| find(child, kind))
    }

    fn block_before_interface(source: &str) -> Option<String> {
        let tree = parse(source);
        let decl = find(tree.root_node(), "interface_declaration").unwrap();
        preceding_block_comment(decl, source)
    }

    #[test]
    fn test_block_comment_before_declaration() {
        let source = "/** A user. */\ninterface User {\n  id: string;\n}\n";
        assert_eq!(
            block_before_interface(source).as_deref(),
            Some("/** A user. */")
        );
    }

    #[test]
    fn test_block_comment_before_export_wrapper() {
        let source = "/**\n * A user.\n * @resource\n */\nexport interface User {\n  id: string;\n}\n";
        let block = block_before_interface(source).unwrap();
        assert!(block.starts_with("/**"));
        assert!(block.ends_with("*/"));
        assert!(parse_jsdoc(&block).roles().resource);
    }

    #[test]
    fn test_block_comment_spanning_two_comments_is_rejected() {
        let source = "/** a */ /* b */\ninterface User {}\n";
        assert_eq!(block_before_interface(source), None);
    }

    #[test]
    fn test_plain_block_comment_is_rejected() {
        let source = "/* not documentation */\ninterface User {}\n";
        assert_eq!(block_before_interface(source), None);
    }

    #[test]
    fn test_degenerate_block_comment_is_rejected() {
        // `/**/` both opens with `/**` and closes with `*/`
        let source = "/**/\ninterface User {}\n";
        assert_eq!(block_before_interface(source), None);
    }

    #[test]
    fn test_no_comment_before_declaration() {
        let source = "const x = 1;\ninterface User {}\n";
        assert_eq!(block_before_interface(source), None);
    }
}
