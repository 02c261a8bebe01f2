//! File name decomposition and simple renames

use std::path::{Path, PathBuf};

/// Where [`change_file_name`] inserts its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Prefix,
    Suffix,
}

/// Split a file name into stem and extension.
///
/// The extension runs from the last `.` to the end and keeps the dot. Names
/// without a dot, names whose only dot is the leading one (`.gitignore`) and
/// names ending with a dot have no extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Parent directory, stem and extension of `path`.
pub(crate) fn decompose(path: &Path) -> (PathBuf, String, String) {
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, extension) = split_file_name(&name);

    (parent, stem.to_string(), extension.to_string())
}

/// Add `change` before or after the stem of `path`, keeping its extension.
pub fn change_file_name(path: &Path, change: &str, position: Position) -> PathBuf {
    let (parent, stem, extension) = decompose(path);
    let name = match position {
        Position::Suffix => format!("{stem}{change}{extension}"),
        Position::Prefix => format!("{change}{stem}{extension}"),
    };
    parent.join(name)
}

/// Replace the extension of `path`. `new_extension` carries its own leading dot.
pub fn change_extension(path: &Path, new_extension: &str) -> PathBuf {
    let (parent, stem, _) = decompose(path);
    parent.join(format!("{stem}{new_extension}"))
}
