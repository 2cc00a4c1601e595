#![allow(clippy::unwrap_used, clippy::expect_used)]

use schemaforge::error::ErrorCode;
use schemaforge::extractor::{extract, extract_with_diagnostics, ConstantValue};
use std::path::{Path, PathBuf};

fn fixture() -> (PathBuf, String) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("mcp_schema.ts");
    let source = std::fs::read_to_string(&path).expect("read fixture");
    (path, source)
}

#[test]
fn test_fixture_declarations() {
    let (path, source) = fixture();
    let model = extract(&source, &path).unwrap();

    assert_eq!(model.version, "2025-06-18");
    assert_eq!(model.constants["MAX_PAGE_SIZE"], ConstantValue::Number(100.0));

    let interfaces: Vec<&str> = model.interfaces.keys().map(String::as_str).collect();
    assert_eq!(
        interfaces,
        vec![
            "CalendarEvent",
            "TextResource",
            "FindSlotsTool",
            "SummaryPrompt",
            "ServerCapabilities",
            "DateRange",
        ]
    );
    assert!(model.types.contains_key("Cursor"));
    assert!(!model.is_declared("InternalOnly"));
}

#[test]
fn test_fixture_classification() {
    let (path, source) = fixture();
    let model = extract(&source, &path).unwrap();
    let tags = &model.component_tags;

    // tagged first, then by naming convention
    assert_eq!(tags.resources, vec!["CalendarEvent", "TextResource"]);
    assert_eq!(tags.tools, vec!["FindSlotsTool"]);
    assert_eq!(tags.prompts, vec!["SummaryPrompt"]);
    assert_eq!(tags.capabilities, vec!["ServerCapabilities"]);

    assert_eq!(model.summary.resources, 2);
    assert_eq!(model.summary.interfaces, 6);
    assert_eq!(model.summary.types, 1);
}

#[test]
fn test_fixture_properties() {
    let (path, source) = fixture();
    let model = extract(&source, &path).unwrap();
    let event = &model.interfaces["CalendarEvent"];

    assert_eq!(
        event.description.as_deref(),
        Some("A meeting or reminder on a calendar.")
    );
    let attendees = event
        .properties
        .iter()
        .find(|p| p.name == "attendees")
        .unwrap();
    assert!(attendees.optional);
    assert_eq!(attendees.ty, "string[]");

    let id = &event.properties[0];
    assert_eq!(id.name, "id");
    assert!(!id.optional);
    assert_eq!(id.description.as_deref(), Some("Unique identifier"));
}

#[test]
fn test_extraction_is_deterministic() {
    let (path, source) = fixture();
    let first = extract(&source, &path).unwrap();
    let second = extract(&source, &path).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_broken_declaration_is_isolated() {
    let source = r#"
export const LATEST_PROTOCOL_VERSION = "1";

export interface First {
  a: string;
}

export interface Second {
  b: number;
}

export interface Broken {
  c: ;
}

export interface Third {
  d: boolean;
}

export type Fourth = string;
"#;
    let result = extract_with_diagnostics(source, "partial.ts").unwrap();
    let model = &result.model;

    for name in ["First", "Second", "Third", "Fourth"] {
        assert!(model.is_declared(name), "{name} should survive");
    }
    assert!(!model.is_declared("Broken"));
    assert_eq!(model.version, "1");

    assert_eq!(model.interfaces.len() + model.types.len(), 4);

    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.code, ErrorCode::Declaration);
    assert_eq!(
        warning.detail("declaration"),
        Some(&serde_json::Value::from("Broken"))
    );
    assert_eq!(
        warning.detail("path"),
        Some(&serde_json::Value::from("partial.ts"))
    );
    assert!(warning.detail("line").is_some());
}

#[test]
fn test_unparseable_source_is_parse_error() {
    let err = extract("}}}} ))))", "bad.ts").unwrap_err();
    assert_eq!(err.code, ErrorCode::Parse);
    assert_eq!(err.code.as_str(), "PARSE_ERROR");
    assert_eq!(err.detail("path"), Some(&serde_json::Value::from("bad.ts")));
}
