#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the schema linter

use crate::extractor::extract;
use crate::linter::{has_errors, lint_schema, LintIssue, LintSeverity};
use crate::mapper::{MapperConfig, ResourceMapper};

/// Helper to extract, map and lint a schema source
fn lint_source(source: &str) -> Vec<LintIssue> {
    let schema = extract(source, "schema.ts").expect("extract");
    let service = ResourceMapper::new(MapperConfig::default())
        .map(&schema)
        .expect("map");
    lint_schema(&schema, &service)
}

fn of_kind<'a>(issues: &'a [LintIssue], kind: &str) -> Vec<&'a LintIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

const VERSION: &str = "export const LATEST_PROTOCOL_VERSION = \"2025-06-18\";\n";

#[test]
fn test_clean_schema_has_no_issues() {
    let source = format!(
        "{VERSION}
/**
 * @resource
 */
export interface Note {{
  id: string;
}}
"
    );
    assert!(lint_source(&source).is_empty());
}

#[test]
fn test_missing_protocol_version() {
    let issues = lint_source("export interface A { x: string }");
    let found = of_kind(&issues, "missing_protocol_version");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, LintSeverity::Warning);
    assert!(found[0].suggestion.is_some());
}

#[test]
fn test_route_collision_is_error() {
    // `Box` and `Boxe` both pluralize to `boxes`
    let source = format!(
        "{VERSION}
/**
 * @resource
 */
export interface Box {{ id: string }}
/**
 * @resource
 */
export interface Boxe {{ id: string }}
"
    );
    let issues = lint_source(&source);
    let found = of_kind(&issues, "route_collision");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location, "route:/boxes");
    assert!(has_errors(&issues));
}

#[test]
fn test_multiple_roles_warning() {
    let source = format!(
        "{VERSION}
/**
 * @tool
 */
export interface SearchResource {{ query: string }}
"
    );
    let issues = lint_source(&source);
    let found = of_kind(&issues, "multiple_roles");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location, "declaration:SearchResource");
    assert!(found[0].message.contains("resource and tool"));
}

#[test]
fn test_resource_without_fields() {
    let source = format!(
        "{VERSION}
/**
 * @resource
 */
export type Handle = string;
"
    );
    let issues = lint_source(&source);
    assert_eq!(of_kind(&issues, "resource_without_fields").len(), 1);
}

#[test]
fn test_unresolved_extends_is_info() {
    let source = format!(
        "{VERSION}
export interface Base {{ id: string }}
export interface Child extends Base, Missing<string> {{ name: string }}
"
    );
    let issues = lint_source(&source);
    let found = of_kind(&issues, "unresolved_extends");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, LintSeverity::Info);
    assert!(found[0].message.contains("Missing<string>"));
}

#[test]
fn test_irregular_plural_is_info() {
    let source = format!(
        "{VERSION}
/**
 * @resource
 */
export interface Person {{ id: string }}
"
    );
    let issues = lint_source(&source);
    let found = of_kind(&issues, "irregular_plural");
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("/persons"));
    assert!(!has_errors(&issues));
}
