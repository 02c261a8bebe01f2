//! Versioned file names
//!
//! A versioned name is `<stem><marker><NN><extension>`, for example
//! `report_v03.csv`. Version numbers are zero-padded to at least two digits.
//!
//! Known limitations:
//! - Existing versions are always detected by splitting on
//!   [`DEFAULT_VERSIONING_MARKER`], while new names use
//!   [`VersioningOptions::marker`]. With a custom marker the output of one call
//!   is not recognised as versioned by the next.
//! - The latest sibling is picked by lexicographic order, which matches
//!   numeric order only while every sibling has the same padded width
//!   (`_v100` sorts before `_v99`).
//! - Nothing is locked. Two callers working on the same directory can compute
//!   the same next version.

#[cfg(test)]
use mockall::automock;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{DEFAULT_VERSIONING_MARKER, TRANSIENT_FILE_MARKER, VersioningOptions};
use crate::error::VersionError;
use crate::path::naming::{decompose, split_file_name};

/// Lists the entry names directly contained in a directory
#[cfg_attr(test, automock)]
pub trait DirectoryLister {
    /// Entry names of `dir`. An empty `dir` means the current directory.
    fn list(&self, dir: &Path) -> Result<Vec<String>, VersionError>;
}

/// [`DirectoryLister`] backed by the real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> Result<Vec<String>, VersionError> {
        let target = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };

        let entries = std::fs::read_dir(target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VersionError::DirectoryNotFound(target.to_path_buf()),
            _ => VersionError::Io(e),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

/// Computes versioned names for paths
#[derive(Debug, Clone, Default)]
pub struct VersionedPathResolver<L = FsLister> {
    lister: L,
}

impl VersionedPathResolver<FsLister> {
    pub fn new() -> Self {
        Self { lister: FsLister }
    }
}

impl<L: DirectoryLister> VersionedPathResolver<L> {
    pub fn with_lister(lister: L) -> Self {
        Self { lister }
    }

    /// Latest existing version of `path` among its siblings.
    ///
    /// Siblings match when the part of their name before the first `_v`
    /// equals the stem of `path`. Entries containing `$` are skipped. The
    /// greatest match loses its own extension and gets the extension of
    /// `path`. Without a match, `path` itself is returned.
    pub fn latest_existing(&self, path: &Path) -> Result<PathBuf, VersionError> {
        let (parent, stem, extension) = decompose(path);

        let latest = self
            .lister
            .list(&parent)?
            .into_iter()
            .filter(|entry| !entry.contains(TRANSIENT_FILE_MARKER))
            .filter(|entry| entry.split(DEFAULT_VERSIONING_MARKER).next() == Some(stem.as_str()))
            .max();

        let Some(latest) = latest else {
            debug!("No existing versions of {:?}", path);
            return Ok(parent.join(format!("{stem}{extension}")));
        };

        debug!("Latest existing version of {:?} is {:?}", path, latest);
        let (base, _) = split_file_name(&latest);
        Ok(parent.join(format!("{base}{extension}")))
    }

    /// Path for the next version of `path`.
    ///
    /// `report.csv` becomes `report_v01.csv`, `report_v09.csv` becomes
    /// `report_v10.csv`. Hidden names without an extension get the version in
    /// front: `.gitignore` becomes `_v01.gitignore`.
    pub fn next_version(
        &self,
        path: &Path,
        options: &VersioningOptions,
    ) -> Result<PathBuf, VersionError> {
        if options.overwrite {
            return Ok(path.to_path_buf());
        }

        let path = if options.from_last_version {
            self.latest_existing(path)?
        } else {
            path.to_path_buf()
        };

        let (parent, stem, extension) = decompose(&path);
        let (base, current) = parse_versioned_stem(&stem)?;

        let next = current
            .checked_add(1)
            .ok_or_else(|| VersionError::InvalidVersionToken {
                name: stem.clone(),
                token: current.to_string(),
            })?;
        let version = format_version(next);
        let marker = &options.marker;

        let name = if base.contains('.') && extension.is_empty() {
            format!("{marker}{version}{base}")
        } else {
            format!("{base}{marker}{version}{extension}")
        };

        debug!("Next version of {:?} is {:?}", path, name);
        Ok(parent.join(name))
    }
}

/// Latest existing version of `path`, read from the file system.
pub fn resolve_latest_existing(path: impl AsRef<Path>) -> Result<PathBuf, VersionError> {
    VersionedPathResolver::new().latest_existing(path.as_ref())
}

/// Next version of `path`, reading the file system only for `from_last_version`.
pub fn resolve_next_version(
    path: impl AsRef<Path>,
    options: &VersioningOptions,
) -> Result<PathBuf, VersionError> {
    VersionedPathResolver::new().next_version(path.as_ref(), options)
}

/// Zero-pad to at least two digits.
pub fn format_version(version: u64) -> String {
    format!("{version:02}")
}

/// Split a stem into its base and current version.
///
/// Exactly two parts around `_v` means versioned; anything else counts as
/// version 0 with the whole stem as base.
fn parse_versioned_stem(stem: &str) -> Result<(&str, u64), VersionError> {
    let parts: Vec<&str> = stem.split(DEFAULT_VERSIONING_MARKER).collect();

    match parts.as_slice() {
        &[base, token] => {
            let version = token
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| token.parse::<u64>().ok())
                .flatten()
                .ok_or_else(|| VersionError::InvalidVersionToken {
                    name: stem.to_string(),
                    token: token.to_string(),
                })?;
            Ok((base, version))
        }
        _ => Ok((stem, 0)),
    }
}
