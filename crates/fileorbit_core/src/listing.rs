//! Directory listing
//!
//! The scene only needs an ordered list of (name, kind) pairs. Where they come
//! from is behind [`DirectoryLister`] so tests can feed fixed batches and the
//! application can read the real filesystem through [`FsLister`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::EntryKind;

/// Name of the synthetic entry that leads to the parent directory
pub const PARENT_ENTRY: &str = "..";

/// One listed entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }
}

/// Which entries a listing keeps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFilter {
    #[default]
    All,
    Files,
    Directories,
}

impl ViewFilter {
    /// Whether an entry of this kind passes the filter
    #[inline]
    pub fn admits(self, kind: EntryKind) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Files => kind == EntryKind::File,
            ViewFilter::Directories => kind == EntryKind::Directory,
        }
    }
}

/// Error type for directory listing
#[derive(Debug)]
pub enum ListingError {
    /// Reading the directory failed
    Io { path: PathBuf, source: io::Error },
    /// The path exists but is not a directory
    NotADirectory(PathBuf),
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingError::Io { path, source } => {
                write!(f, "Failed to list {}: {}", path.display(), source)
            }
            ListingError::NotADirectory(path) => {
                write!(f, "Not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ListingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingError::Io { source, .. } => Some(source),
            ListingError::NotADirectory(_) => None,
        }
    }
}

/// Source of directory entries
pub trait DirectoryLister {
    /// List `dir`, keeping only entries admitted by `filter`
    ///
    /// Order is whatever the source yields; callers must not rely on sorting.
    fn list(&self, dir: &Path, filter: ViewFilter) -> Result<Vec<DirectoryEntry>, ListingError>;
}

/// Lists the real filesystem
#[derive(Clone, Copy, Debug)]
pub struct FsLister {
    /// Prepend a `..` entry when the directory has a parent
    pub include_parent: bool,
}

impl Default for FsLister {
    fn default() -> Self {
        Self { include_parent: true }
    }
}

impl FsLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable or disable the `..` entry
    pub fn with_parent_entry(mut self, include: bool) -> Self {
        self.include_parent = include;
        self
    }
}

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path, filter: ViewFilter) -> Result<Vec<DirectoryEntry>, ListingError> {
        let io_error = |source| ListingError::Io { path: dir.to_path_buf(), source };

        let metadata = fs::metadata(dir).map_err(io_error)?;
        if !metadata.is_dir() {
            return Err(ListingError::NotADirectory(dir.to_path_buf()));
        }

        let mut entries = Vec::new();

        if self.include_parent && filter.admits(EntryKind::Directory) {
            let has_parent = fs::canonicalize(dir)
                .map(|p| p.parent().is_some())
                .unwrap_or(false);
            if has_parent {
                entries.push(DirectoryEntry::directory(PARENT_ENTRY));
            }
        }

        for entry in fs::read_dir(dir).map_err(io_error)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            // Follow symlinks; a dangling link counts as a file
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);
            let kind = if is_dir { EntryKind::Directory } else { EntryKind::File };

            if filter.admits(kind) {
                entries.push(DirectoryEntry::new(entry.file_name().to_string_lossy(), kind));
            }
        }

        log::debug!("Listed {} entries in {} ({:?})", entries.len(), dir.display(), filter);
        Ok(entries)
    }
}
