#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("mcp_schema.ts")
}

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_schemaforge-gen"));
    cmd.env("SCHEMAFORGE_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_generate_creates_project() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("service");
    let status = cli()
        .arg("generate")
        .arg("--schema")
        .arg(fixture())
        .arg("--output")
        .arg(&out)
        .arg("--templates")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
        .arg("--name")
        .arg("calendar")
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(out.join("package.json").exists());
    assert!(out.join("src/resources/calendar-event.ts").exists());
}

#[test]
fn test_cli_extract_prints_json_model() {
    let output = cli()
        .args(["extract", "--schema"])
        .arg(fixture())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(model["version"], "2025-06-18");
    assert_eq!(model["component_tags"]["resources"][0], "CalendarEvent");
}

#[test]
fn test_cli_map_prints_yaml() {
    let output = cli()
        .args(["map", "--name", "calendar", "--format", "yaml", "--schema"])
        .arg(fixture())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("name: calendar"));
    assert!(stdout.contains("plural_path: calendar-events"));
}

#[test]
fn test_cli_lint_fail_on_error() {
    let dir = tempdir().unwrap();
    let schema = dir.path().join("clash.ts");
    fs::write(
        &schema,
        "export const LATEST_PROTOCOL_VERSION = \"1\";\n\
         /**\n * @resource\n */\nexport interface Box { id: string }\n\
         /**\n * @resource\n */\nexport interface Boxe { id: string }\n",
    )
    .unwrap();

    // without the flag lint only reports
    let status = cli().arg("lint").arg("--schema").arg(&schema).status().unwrap();
    assert!(status.success());

    let status = cli()
        .args(["lint", "--fail-on-error", "--schema"])
        .arg(&schema)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn test_cli_parse_error_fails() {
    let dir = tempdir().unwrap();
    let schema = dir.path().join("bad.ts");
    fs::write(&schema, "}}}} ))))").unwrap();
    let output = cli()
        .args(["extract", "--schema"])
        .arg(&schema)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("PARSE_ERROR"));
}

#[test]
fn test_cli_templates_reports_unloadable() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok.jinja"), "ok").unwrap();
    fs::write(dir.path().join("bad.jinja"), [0xff, 0xfe, 0x00]).unwrap();

    let output = cli()
        .arg("templates")
        .arg("--templates")
        .arg(dir.path())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Loaded 1 of 2 template(s)"));
    assert!(stdout.contains("✗ bad"));
    assert!(!stdout.contains("✗ ok"));
}
