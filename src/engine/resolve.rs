//! Template name → candidate file paths.

use std::path::{Component, Path, PathBuf};

/// Recognized template file extensions, in lookup order.
pub const TEMPLATE_EXTENSIONS: [&str; 2] = ["jinja", "j2"];

/// Ordered, duplicate-free list of paths that may hold template `name`.
///
/// For each base directory (`base/framework` first when a framework is set, then `base`):
///
/// 1. `name` as given
/// 2. `name.jinja`, `name.j2`
/// 3. `{stem}/{file}.jinja`, `{stem}/{file}.j2`
/// 4. `{parent}/{stem}/{file}.jinja`, `{parent}/{stem}/{file}.j2` when `name` has a parent
///
/// where `file` is the last component of `name` and `stem` is `file` up to its first dot.
pub fn candidate_paths(base: &Path, framework: Option<&str>, name: &str) -> Vec<PathBuf> {
    let rel = Path::new(name);
    let file = rel
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(name)
        .to_string();
    let stem = file.split('.').next().unwrap_or(&file).to_string();
    let parent = rel
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);

    let mut bases = Vec::with_capacity(2);
    if let Some(fw) = framework.filter(|f| !f.is_empty()) {
        bases.push(base.join(fw));
    }
    bases.push(base.to_path_buf());

    let mut out: Vec<PathBuf> = Vec::new();
    let mut push = |p: PathBuf| {
        if !out.contains(&p) {
            out.push(p);
        }
    };
    for dir in &bases {
        push(dir.join(rel));
        for ext in TEMPLATE_EXTENSIONS {
            push(dir.join(format!("{name}.{ext}")));
        }
        for ext in TEMPLATE_EXTENSIONS {
            push(dir.join(&stem).join(format!("{file}.{ext}")));
        }
        if let Some(parent) = &parent {
            for ext in TEMPLATE_EXTENSIONS {
                push(dir.join(parent).join(&stem).join(format!("{file}.{ext}")));
            }
        }
    }
    out
}

/// Template names are relative paths that stay inside the base directory.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Template name for a file found under `base`: relative path, `/`-separated, template
/// extension removed. `None` when the file is not under `base` or carries no template extension.
pub fn template_name(base: &Path, file: &Path) -> Option<String> {
    let rel = file.strip_prefix(base).ok()?;
    let ext = rel.extension().and_then(|e| e.to_str())?;
    if !TEMPLATE_EXTENSIONS.contains(&ext) {
        return None;
    }
    let without_ext = rel.with_extension("");
    let parts: Vec<&str> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
