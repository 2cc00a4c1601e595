//! # Schema Linter Module
//!
//! Checks an extracted schema and its service model for problems that would produce a broken or
//! surprising generated server.
//!
//! ## Checks Performed
//!
//! 1. **route_collision** (error) - two resources map to the same route segment
//! 2. **multiple_roles** (warning) - a declaration was classified into more than one role
//! 3. **resource_without_fields** (warning) - a resource has no properties to store
//! 4. **missing_protocol_version** (warning) - no `LATEST_PROTOCOL_VERSION` constant
//! 5. **unresolved_extends** (info) - an `extends` target is not declared in the schema
//! 6. **irregular_plural** (info) - the route segment uses a naive plural of an irregular noun
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemaforge::linter::{lint_schema, print_lint_issues};
//!
//! let issues = lint_schema(&schema, &service);
//! print_lint_issues(&issues);
//! ```

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::extractor::{SchemaModel, UNKNOWN_VERSION};
use crate::mapper::ServiceModel;

#[cfg(test)]
mod tests;

/// Nouns whose plural the route naming gets wrong.
const IRREGULAR_NOUNS: &[&str] = &[
    "Person", "Child", "Man", "Woman", "Mouse", "Goose", "Foot", "Tooth", "Datum", "Criterion",
    "Analysis", "Medium", "Leaf", "Life", "Knife", "Cactus", "Sheep", "Fish", "Deer", "Series",
    "Species",
];

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Error - the generated server will misbehave
    Error,
    /// Warning - likely unintended but generation works
    Warning,
    /// Info - worth a look
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        })
    }
}

/// A lint issue found in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "resource:CalendarEvent", "interface:Foo")
    pub location: String,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "route_collision")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a schema together with the service model mapped from it
pub fn lint_schema(schema: &SchemaModel, service: &ServiceModel) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    lint_route_collisions(service, &mut issues);
    lint_multiple_roles(schema, &mut issues);
    lint_empty_resources(service, &mut issues);
    lint_protocol_version(schema, &mut issues);
    lint_extends(schema, &mut issues);
    lint_irregular_plurals(service, &mut issues);
    issues
}

fn lint_route_collisions(service: &ServiceModel, issues: &mut Vec<LintIssue>) {
    let mut by_route: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for r in &service.resources {
        by_route.entry(&r.plural_path).or_default().push(&r.name);
    }
    for (route, names) in by_route {
        if names.len() > 1 {
            issues.push(
                LintIssue::new(
                    format!("route:/{route}"),
                    LintSeverity::Error,
                    "route_collision",
                    format!("Resources {} all map to /{route}", names.join(", ")),
                )
                .with_suggestion("Rename one of the resources"),
            );
        }
    }
}

fn lint_multiple_roles(schema: &SchemaModel, issues: &mut Vec<LintIssue>) {
    let mut seen = HashSet::new();
    for name in schema.component_tags.all_names() {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let roles = schema.component_tags.roles_of(name);
        if roles.len() > 1 {
            let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
            issues.push(
                LintIssue::new(
                    format!("declaration:{name}"),
                    LintSeverity::Warning,
                    "multiple_roles",
                    format!("`{name}` is classified as {}", roles.join(" and ")),
                )
                .with_suggestion("Keep one role tag or rename the declaration"),
            );
        }
    }
}

fn lint_empty_resources(service: &ServiceModel, issues: &mut Vec<LintIssue>) {
    for r in service.resources.iter().filter(|r| r.fields.is_empty()) {
        issues.push(LintIssue::new(
            format!("resource:{}", r.name),
            LintSeverity::Warning,
            "resource_without_fields",
            format!("Resource `{}` has no properties", r.name),
        ));
    }
}

fn lint_protocol_version(schema: &SchemaModel, issues: &mut Vec<LintIssue>) {
    if schema.version == UNKNOWN_VERSION {
        issues.push(
            LintIssue::new(
                "schema",
                LintSeverity::Warning,
                "missing_protocol_version",
                "No LATEST_PROTOCOL_VERSION constant; generated code reports version \"unknown\"",
            )
            .with_suggestion("export const LATEST_PROTOCOL_VERSION = \"...\";"),
        );
    }
}

fn lint_extends(schema: &SchemaModel, issues: &mut Vec<LintIssue>) {
    for iface in schema.interfaces.values() {
        for base in &iface.extends {
            // `Base<T>` → `Base`
            let base_name = base.split('<').next().unwrap_or(base).trim();
            if !schema.is_declared(base_name) {
                issues.push(LintIssue::new(
                    format!("interface:{}", iface.name),
                    LintSeverity::Info,
                    "unresolved_extends",
                    format!(
                        "`{}` extends `{base}`, which is not declared; inherited fields are not generated",
                        iface.name
                    ),
                ));
            }
        }
    }
}

fn lint_irregular_plurals(service: &ServiceModel, issues: &mut Vec<LintIssue>) {
    for r in &service.resources {
        if let Some(noun) = IRREGULAR_NOUNS.iter().find(|n| r.name.ends_with(*n)) {
            issues.push(LintIssue::new(
                format!("resource:{}", r.name),
                LintSeverity::Info,
                "irregular_plural",
                format!(
                    "`{noun}` has an irregular plural; the route is /{}",
                    r.plural_path
                ),
            ));
        }
    }
}

/// Whether any issue is an error
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Print lint issues in a formatted way
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let of = |severity: LintSeverity| -> Vec<&LintIssue> {
        issues.iter().filter(|i| i.severity == severity).collect()
    };
    let errors = of(LintSeverity::Error);
    let warnings = of(LintSeverity::Warning);
    let infos = of(LintSeverity::Info);

    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        errors.len(),
        warnings.len(),
        infos.len()
    );

    for (header, group) in [
        ("❌ Errors (must fix):", errors),
        ("⚠️  Warnings (should fix):", warnings),
        ("ℹ️  Info:", infos),
    ] {
        if group.is_empty() {
            continue;
        }
        println!("{header}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}
