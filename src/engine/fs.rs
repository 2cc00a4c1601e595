//! File system seam for the template engine.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The file operations the engine needs.
///
/// [`DiskFs`] is the production implementation; [`MemoryFs`] keeps everything in memory and counts
/// reads, which is what the cache tests rely on.
#[allow(async_fn_in_trait)]
pub trait TemplateFs: Send + Sync {
    /// Whether `path` exists and is a regular file.
    async fn is_file(&self, path: &Path) -> bool;

    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write `contents` to `path`, creating parent directories.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Every regular file below `dir`, recursively, sorted.
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`TemplateFs`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl TemplateFs for DiskFs {
    async fn is_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, contents).await
    }

    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&current).await?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    files.push(entry.path());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

/// In-memory [`TemplateFs`] that records how often each file was read.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    reads: Mutex<BTreeMap<PathBuf, usize>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFs::insert`].
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        lock(&self.files).insert(path.into(), contents.into());
    }

    /// Current contents of `path`, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }

    /// Number of successful reads of `path` so far.
    pub fn read_count(&self, path: impl AsRef<Path>) -> usize {
        lock(&self.reads).get(path.as_ref()).copied().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        lock(&self.reads).values().sum()
    }
}

// a panic while holding the lock leaves the maps intact
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TemplateFs for MemoryFs {
    async fn is_file(&self, path: &Path) -> bool {
        lock(&self.files).contains_key(path)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let contents = lock(&self.files).get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        *lock(&self.reads).entry(path.to_path_buf()).or_insert(0) += 1;
        Ok(contents)
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.insert(path, contents);
        Ok(())
    }

    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(lock(&self.files)
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect())
    }
}
