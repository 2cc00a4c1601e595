use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::{Builder, Runtime};

use super::fs::{DiskFs, TemplateFs};
use super::template::{EngineConfig, TemplateEngine};
use crate::error::{ErrorCode, GenError, GenResult};

/// Blocking front end for [`TemplateEngine`].
///
/// Every method drives the async operation of the same name to completion on a private
/// current-thread runtime, so results and errors are identical. Calling it from inside an async
/// context panics in `block_on`; async callers use [`TemplateEngine`] directly.
pub struct BlockingTemplateEngine<F: TemplateFs = DiskFs> {
    inner: TemplateEngine<F>,
    runtime: Runtime,
}

impl BlockingTemplateEngine<DiskFs> {
    pub fn new(config: EngineConfig) -> GenResult<Self> {
        Self::from_engine(TemplateEngine::new(config))
    }
}

impl<F: TemplateFs> BlockingTemplateEngine<F> {
    /// Wrap an existing engine, keeping its file system, cache and renderer.
    pub fn from_engine(inner: TemplateEngine<F>) -> GenResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                GenError::wrap(ErrorCode::Runtime, "failed to start template runtime", e)
            })?;
        Ok(Self { inner, runtime })
    }

    pub fn engine(&self) -> &TemplateEngine<F> {
        &self.inner
    }

    pub fn resolve_path(&self, name: &str) -> GenResult<PathBuf> {
        self.runtime.block_on(self.inner.resolve_path(name))
    }

    pub fn load(&self, name: &str) -> GenResult<Arc<str>> {
        self.runtime.block_on(self.inner.load(name))
    }

    pub fn render<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> GenResult<String> {
        self.runtime.block_on(self.inner.render(name, data))
    }

    pub fn render_source<T: Serialize + ?Sized>(
        &self,
        name: &str,
        source: &str,
        data: &T,
    ) -> GenResult<String> {
        self.inner.render_source(name, source, data)
    }

    pub fn render_to_file<T: Serialize + ?Sized>(
        &self,
        name: &str,
        out: &Path,
        data: &T,
    ) -> GenResult<()> {
        self.runtime.block_on(self.inner.render_to_file(name, out, data))
    }

    pub fn list_templates(&self, dir: &str) -> GenResult<Vec<String>> {
        self.runtime.block_on(self.inner.list_templates(dir))
    }

    pub fn preload_dir(&self, dir: &str) -> GenResult<usize> {
        self.runtime.block_on(self.inner.preload_dir(dir))
    }
}
