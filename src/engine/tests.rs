#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for template resolution, caching and rendering

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use super::*;
use crate::error::{BoxError, ErrorCode};

fn memory_fs() -> MemoryFs {
    MemoryFs::new()
        .with_file("t/server.ts.jinja", "generic {{ service.name }}\n")
        .with_file("t/express/server.ts.jinja", "express {{ service.name }}\n")
        .with_file("t/README.md.j2", "# {{ service.name | pascal_case }}\n")
        .with_file("t/resource/resource.ts.jinja", "// {{ resource | kebab_case }}\n")
        .with_file("t/notes.txt", "not a template")
}

fn engine(framework: Option<&str>) -> TemplateEngine<MemoryFs> {
    let mut config = EngineConfig::new("t");
    config.framework = framework.map(str::to_string);
    TemplateEngine::with_fs(config, memory_fs())
}

struct NoOutput;

impl Renderer for NoOutput {
    fn render(&self, _: &str, _: &str, _: &JsonValue) -> Result<Option<String>, BoxError> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_framework_template_wins() {
    let path = engine(Some("express")).resolve_path("server.ts").await.unwrap();
    assert_eq!(path, PathBuf::from("t/express/server.ts.jinja"));

    let path = engine(None).resolve_path("server.ts").await.unwrap();
    assert_eq!(path, PathBuf::from("t/server.ts.jinja"));
}

#[tokio::test]
async fn test_generic_fallback_when_framework_lacks_template() {
    let path = engine(Some("express")).resolve_path("README.md").await.unwrap();
    assert_eq!(path, PathBuf::from("t/README.md.j2"));
}

#[tokio::test]
async fn test_stem_directory_candidate() {
    let path = engine(None).resolve_path("resource.ts").await.unwrap();
    assert_eq!(path, PathBuf::from("t/resource/resource.ts.jinja"));
}

#[tokio::test]
async fn test_not_found_lists_candidates() {
    let err = engine(Some("express")).resolve_path("missing.ts").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TemplateNotFound);
    let candidates = err.detail("candidates").and_then(|v| v.as_array()).unwrap();
    assert_eq!(candidates.len(), 10);
    assert_eq!(candidates[0], "t/express/missing.ts");
    assert_eq!(candidates[9], "t/missing/missing.ts.j2");
}

#[tokio::test]
async fn test_invalid_name_is_not_found() {
    let err = engine(None).load("../etc/passwd").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TemplateNotFound);
}

#[tokio::test]
async fn test_second_load_hits_cache() {
    let engine = engine(None);
    let first = engine.load("server.ts").await.unwrap();
    let second = engine.load("server.ts").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.fs().read_count("t/server.ts.jinja"), 1);
    assert!(engine.cache().contains("server.ts"));
}

#[tokio::test]
async fn test_shared_cache_across_engines() {
    let cache = TemplateCache::new();
    let renderer: Arc<dyn Renderer> = Arc::new(JinjaRenderer::new());
    let a = TemplateEngine::with_parts(
        EngineConfig::new("t"),
        memory_fs(),
        cache.clone(),
        Arc::clone(&renderer),
    );
    let b = TemplateEngine::with_parts(EngineConfig::new("t"), memory_fs(), cache, renderer);

    a.load("server.ts").await.unwrap();
    b.load("server.ts").await.unwrap();
    assert_eq!(b.fs().total_reads(), 0);
}

#[tokio::test]
async fn test_render_with_helpers() {
    let out = engine(None)
        .render("README.md", &json!({"service": {"name": "calendar_service"}}))
        .await
        .unwrap();
    assert_eq!(out, "# CalendarService\n");
}

#[tokio::test]
async fn test_undefined_result_is_render_error() {
    let engine = TemplateEngine::with_parts(
        EngineConfig::new("t"),
        memory_fs(),
        TemplateCache::new(),
        Arc::new(NoOutput),
    );
    let err = engine
        .render("server.ts", &json!({"service": {"name": "x"}, "meta": {}}))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TemplateRender);
    assert_eq!(err.detail("reason"), Some(&json!("undefined_result")));
    assert_eq!(err.detail("path"), Some(&json!("t/server.ts.jinja")));
    let mut keys: Vec<&str> = err
        .detail("data_keys")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .filter_map(|k| k.as_str())
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["meta", "service"]);
}

#[tokio::test]
async fn test_renderer_exception_is_render_error() {
    let fs = MemoryFs::new().with_file("t/broken.jinja", "{% for %}");
    let engine = TemplateEngine::with_fs(EngineConfig::new("t"), fs);
    let err = engine.render("broken", &json!({})).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TemplateRender);
    assert_eq!(err.detail("reason"), Some(&json!("exception")));
    assert_eq!(err.detail("preview"), Some(&json!("{% for %}")));
    assert!(err.source.is_some());
}

#[tokio::test]
async fn test_render_to_file_writes_output() {
    let engine = engine(Some("express"));
    engine
        .render_to_file(
            "server.ts",
            Path::new("out/src/server.ts"),
            &json!({"service": {"name": "cal"}}),
        )
        .await
        .unwrap();
    assert_eq!(
        engine.fs().contents("out/src/server.ts").as_deref(),
        Some("express cal\n")
    );
}

#[tokio::test]
async fn test_list_templates_strips_extensions() {
    let names = engine(None).list_templates("").await.unwrap();
    assert_eq!(
        names,
        vec!["README.md", "express/server.ts", "resource/resource.ts", "server.ts"]
    );
    let express = engine(None).list_templates("express").await.unwrap();
    assert_eq!(express, vec!["express/server.ts"]);
}

#[tokio::test]
async fn test_list_templates_rejects_dir_outside_base() {
    let engine = engine(None);
    for dir in ["../t", "/etc", "express/../.."] {
        let err = engine.list_templates(dir).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TemplateNotFound, "{dir}");
        assert_eq!(err.detail("path"), Some(&JsonValue::from(dir)));
    }
    assert!(engine.preload_dir("../t").await.is_err());
}

#[tokio::test]
async fn test_preload_counts_and_fills_cache() {
    let engine = engine(None);
    let loaded = engine.preload_dir("").await.unwrap();
    assert_eq!(loaded, 4);
    assert_eq!(engine.cache().len(), 4);

    let reads = engine.fs().total_reads();
    engine.load("README.md").await.unwrap();
    assert_eq!(engine.fs().total_reads(), reads);
}

#[test]
fn test_blocking_adapter_matches_async() {
    let blocking = BlockingTemplateEngine::from_engine(engine(Some("express"))).unwrap();
    let data = json!({"service": {"name": "cal"}});

    let async_engine = engine(Some("express"));
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let expected = runtime.block_on(async_engine.render("server.ts", &data)).unwrap();

    assert_eq!(blocking.render("server.ts", &data).unwrap(), expected);
    assert_eq!(
        blocking.resolve_path("server.ts").unwrap(),
        PathBuf::from("t/express/server.ts.jinja")
    );
    let err = blocking.load("nope").unwrap_err();
    assert_eq!(err.code, ErrorCode::TemplateNotFound);
    assert_eq!(blocking.preload_dir("").unwrap(), 4);
}

#[test]
fn test_render_source_for_inline_patterns() {
    let out = engine(None)
        .render_source(
            "output-path",
            "src/resources/{{ resource.name | kebab_case }}.ts",
            &json!({"resource": {"name": "CalendarEvent"}}),
        )
        .unwrap();
    assert_eq!(out, "src/resources/calendar-event.ts");
}

#[test]
fn test_helper_names_are_all_callable() {
    let engine = engine(None);
    for helper in HELPER_NAMES {
        let source = format!("{{{{ {helper}('AbcDef') }}}}");
        assert!(engine.render_source(helper, &source, &json!({})).is_ok(), "{helper}");
    }
}
