//! Artifact persistence.
//!
//! A [`Filer`] creates each artifact path at most once per run. A second creation of the same path is an error for
//! the pass that attempted it.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ProcessError;

pub trait Filer {
    /// Create `relative` under the filer's root and return the path it was written to.
    fn create(&mut self, relative: &Path, contents: &str) -> Result<PathBuf, ProcessError>;
}

/// Writes artifacts below a root directory.
#[derive(Debug)]
pub struct FsFiler {
    root: PathBuf,
    created: HashSet<PathBuf>,
}

impl FsFiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Filer for FsFiler {
    fn create(&mut self, relative: &Path, contents: &str) -> Result<PathBuf, ProcessError> {
        let path = self.root.join(relative);
        if !self.created.insert(relative.to_path_buf()) {
            return Err(ProcessError::AlreadyCreated { path });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ProcessError::write(&path, e))?;
        }
        // Files left by an earlier run are rewritten only when they change, so cargo sees stable mtimes.
        if fs::read_to_string(&path).is_ok_and(|existing| existing == contents) {
            tracing::debug!(path = %path.display(), "artifact unchanged");
            return Ok(path);
        }
        fs::write(&path, contents).map_err(|e| ProcessError::write(&path, e))?;
        Ok(path)
    }
}

/// Keeps artifacts in memory; used by `fastfield emit` and tests.
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Filer for MemoryFiler {
    fn create(&mut self, relative: &Path, contents: &str) -> Result<PathBuf, ProcessError> {
        if self.files.contains_key(relative) {
            return Err(ProcessError::AlreadyCreated {
                path: relative.to_path_buf(),
            });
        }
        self.files.insert(relative.to_path_buf(), contents.to_string());
        Ok(relative.to_path_buf())
    }
}
