use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use super::cache::{CachedTemplate, TemplateCache};
use super::fs::{DiskFs, TemplateFs};
use super::render::{JinjaRenderer, Renderer};
use super::resolve::{candidate_paths, is_valid_name, template_name};
use crate::error::{ErrorCode, GenError, GenResult};

/// Characters of template source kept in render error details.
const PREVIEW_CHARS: usize = 200;

/// Where templates live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root of the template tree
    pub base_dir: PathBuf,
    /// Subdirectory of `base_dir` searched before the generic templates
    pub framework: Option<String>,
}

impl EngineConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            framework: None,
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }
}

/// Locates, caches and renders named templates.
///
/// All file access goes through the [`TemplateFs`] given at construction; the cache and the
/// renderer are injected too, so nothing here is global.
pub struct TemplateEngine<F: TemplateFs = DiskFs> {
    config: EngineConfig,
    fs: F,
    cache: TemplateCache,
    renderer: Arc<dyn Renderer>,
}

impl TemplateEngine<DiskFs> {
    /// Engine over the real file system with a fresh cache and the minijinja renderer.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_fs(config, DiskFs)
    }
}

impl<F: TemplateFs> TemplateEngine<F> {
    pub fn with_fs(config: EngineConfig, fs: F) -> Self {
        Self::with_parts(config, fs, TemplateCache::new(), Arc::new(JinjaRenderer::new()))
    }

    pub fn with_parts(
        config: EngineConfig,
        fs: F,
        cache: TemplateCache,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            config,
            fs,
            cache,
            renderer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Candidate paths for `name`, in lookup order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        candidate_paths(
            &self.config.base_dir,
            self.config.framework.as_deref(),
            name,
        )
    }

    /// First existing candidate path for `name`.
    ///
    /// # Errors
    ///
    /// `TEMPLATE_NOT_FOUND` with the full candidate list in the `candidates` detail.
    pub async fn resolve_path(&self, name: &str) -> GenResult<PathBuf> {
        if !is_valid_name(name) {
            return Err(GenError::new(
                ErrorCode::TemplateNotFound,
                format!("invalid template name `{name}`"),
            )
            .with_detail("template", name)
            .with_detail("candidates", Vec::<String>::new()));
        }
        let candidates = self.candidates(name);
        for candidate in &candidates {
            if self.fs.is_file(candidate).await {
                debug!(template = name, path = %candidate.display(), "resolved template");
                return Ok(candidate.clone());
            }
        }
        Err(GenError::new(
            ErrorCode::TemplateNotFound,
            format!("template `{name}` not found"),
        )
        .with_detail("template", name)
        .with_detail(
            "candidates",
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        ))
    }

    /// Source of template `name`, read at most once per cache.
    pub async fn load(&self, name: &str) -> GenResult<Arc<str>> {
        self.load_cached(name).await.map(|t| t.source)
    }

    async fn load_cached(&self, name: &str) -> GenResult<CachedTemplate> {
        if let Some(hit) = self.cache.get(name) {
            return Ok(hit);
        }
        let path = self.resolve_path(name).await?;
        let source = self.fs.read_to_string(&path).await.map_err(|e| {
            GenError::wrap(
                ErrorCode::TemplateLoad,
                format!("failed to read template `{name}`"),
                e,
            )
            .with_detail("template", name)
            .with_detail("path", path.display().to_string())
        })?;
        Ok(self.cache.insert_if_absent(
            name,
            CachedTemplate {
                path,
                source: Arc::from(source),
            },
        ))
    }

    /// Render template `name` with `data`.
    ///
    /// # Errors
    ///
    /// Resolution and load errors as for [`load`](Self::load); `TEMPLATE_RENDER_ERROR` when the
    /// renderer fails (`reason` = `exception`) or produces nothing (`reason` = `undefined_result`).
    pub async fn render<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> GenResult<String> {
        let template = self.load_cached(name).await?;
        self.render_loaded(name, &template, data)
    }

    /// Render inline template `source`, e.g. an output path pattern. `name` is used in errors.
    pub fn render_source<T: Serialize + ?Sized>(
        &self,
        name: &str,
        source: &str,
        data: &T,
    ) -> GenResult<String> {
        let template = CachedTemplate {
            path: PathBuf::from(name),
            source: Arc::from(source),
        };
        self.render_loaded(name, &template, data)
    }

    fn render_loaded<T: Serialize + ?Sized>(
        &self,
        name: &str,
        template: &CachedTemplate,
        data: &T,
    ) -> GenResult<String> {
        let data = serde_json::to_value(data).map_err(|e| {
            render_error(
                template,
                &JsonValue::Null,
                "exception",
                "template data is not serializable",
            )
            .with_detail("template", name)
            .with_source(e)
        })?;
        match self.renderer.render(name, &template.source, &data) {
            Ok(Some(out)) => Ok(out),
            Ok(None) => Err(render_error(
                template,
                &data,
                "undefined_result",
                &format!("template `{name}` produced no output"),
            )
            .with_detail("template", name)),
            Err(e) => Err(render_error(
                template,
                &data,
                "exception",
                &format!("template `{name}` failed to render: {e}"),
            )
            .with_detail("template", name)
            .with_source(e)),
        }
    }

    /// Render template `name` and write the result to `out`, creating parent directories.
    pub async fn render_to_file<T: Serialize + ?Sized>(
        &self,
        name: &str,
        out: &Path,
        data: &T,
    ) -> GenResult<()> {
        let rendered = self.render(name, data).await?;
        self.fs.write(out, &rendered).await.map_err(|e| {
            GenError::wrap(
                ErrorCode::TemplateWrite,
                format!("failed to write {}", out.display()),
                e,
            )
            .with_detail("template", name)
            .with_detail("path", out.display().to_string())
        })?;
        info!(template = name, path = %out.display(), "rendered template");
        Ok(())
    }

    /// Names of all templates under `dir` (relative to the base directory, `""` for all of it).
    ///
    /// Names are `/`-separated and relative to the base directory, so each can be passed to
    /// [`load`](Self::load) as is. Sorted and duplicate-free.
    ///
    /// # Errors
    ///
    /// `TEMPLATE_NOT_FOUND` when `dir` leaves the base directory; `TEMPLATE_LOAD_ERROR` when the
    /// directory cannot be read.
    pub async fn list_templates(&self, dir: &str) -> GenResult<Vec<String>> {
        if !dir.is_empty() && !is_valid_name(dir) {
            return Err(GenError::new(
                ErrorCode::TemplateNotFound,
                format!("invalid template directory `{dir}`"),
            )
            .with_detail("path", dir));
        }
        let root = if dir.is_empty() {
            self.config.base_dir.clone()
        } else {
            self.config.base_dir.join(dir)
        };
        let files = self.fs.list_files(&root).await.map_err(|e| {
            GenError::wrap(
                ErrorCode::TemplateLoad,
                format!("failed to list templates in {}", root.display()),
                e,
            )
            .with_detail("path", root.display().to_string())
        })?;
        let mut names: Vec<String> = files
            .iter()
            .filter_map(|f| template_name(&self.config.base_dir, f))
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Load every template under `dir` concurrently. Returns how many loaded.
    ///
    /// A template that fails to load is logged and skipped.
    pub async fn preload_dir(&self, dir: &str) -> GenResult<usize> {
        let names = self.list_templates(dir).await?;
        let results = join_all(names.iter().map(|name| self.load(name))).await;
        let mut loaded = 0;
        for (name, result) in names.iter().zip(results) {
            match result {
                Ok(_) => loaded += 1,
                Err(err) => warn!(template = %name, error = %err, "failed to preload template"),
            }
        }
        debug!(dir, loaded, total = names.len(), "preloaded templates");
        Ok(loaded)
    }
}

fn render_error(
    template: &CachedTemplate,
    data: &JsonValue,
    reason: &str,
    message: &str,
) -> GenError {
    let data_keys: Vec<String> = match data {
        JsonValue::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    let preview: String = template.source.chars().take(PREVIEW_CHARS).collect();
    GenError::new(ErrorCode::TemplateRender, message)
        .with_detail("reason", reason)
        .with_detail("path", template.path.display().to_string())
        .with_detail("data_keys", data_keys)
        .with_detail("preview", preview)
}
