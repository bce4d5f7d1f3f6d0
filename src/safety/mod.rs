use std::path::{Component, Path};

/// True for a relative path that stays inside its root: no absolute prefix,
/// no `..`, no empty segments.
pub fn is_contained_relative(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.contains('\\') {
        return false;
    }
    if candidate.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return false;
    }
    Path::new(candidate)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

/// A name the download route may serve: one plain `.zip` file name.
pub fn is_servable_archive_name(name: &str) -> bool {
    is_contained_relative(name)
        && !name.contains('/')
        && !name.starts_with('.')
        && name.ends_with(".zip")
}
