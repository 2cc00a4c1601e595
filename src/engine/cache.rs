use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;

/// A loaded template: where it was found and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTemplate {
    pub path: PathBuf,
    pub source: Arc<str>,
}

/// Loaded templates keyed by the name they were requested under.
///
/// Cloning shares the underlying map, so several engines can be handed the same cache. Entries
/// are only ever added, never replaced: two concurrent loads of the same name read the same file,
/// and whichever lands first is kept.
#[derive(Debug, Clone, Default)]
pub struct TemplateCache(Arc<DashMap<String, CachedTemplate>>);

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<CachedTemplate> {
        self.0.get(name).map(|entry| entry.value().clone())
    }

    /// Store `template` under `name` unless an entry exists. Returns the entry that is cached.
    pub fn insert_if_absent(&self, name: &str, template: CachedTemplate) -> CachedTemplate {
        self.0
            .entry(name.to_string())
            .or_insert(template)
            .value()
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn template(path: &str, source: &str) -> CachedTemplate {
        CachedTemplate {
            path: PathBuf::from(path),
            source: Arc::from(source),
        }
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let cache = TemplateCache::new();
        let first = cache.insert_if_absent("server.ts", template("a/server.ts.jinja", "A"));
        let second = cache.insert_if_absent("server.ts", template("b/server.ts.jinja", "B"));
        assert_eq!(first, second);
        assert_eq!(&*cache.get("server.ts").unwrap().source, "A");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = TemplateCache::new();
        let shared = cache.clone();
        shared.insert_if_absent("README.md", template("README.md.jinja", "# hi"));
        assert!(cache.contains("README.md"));
        assert_eq!(cache.names(), vec!["README.md"]);
    }
}
