use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, Result};

/// Minimal filesystem abstraction used by the volume scanner.
pub trait FileSystem: Send + Sync {
    /// Check whether a path exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// List the direct children of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Fetch lightweight metadata.
    fn metadata(&self, path: &Path) -> Result<FsMetadata>;

    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|md| md.is_dir).unwrap_or(false)
    }
}

/// Lightweight metadata needed by the scanner.
#[derive(Debug, Clone, Copy)]
pub struct FsMetadata {
    pub is_dir: bool,
    pub is_file: bool,
    pub len: u64,
}

/// Real filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn path_exists(&self, path: &Path) -> bool {
        // try_exists reports permission problems as errors; treat them as absent
        path.try_exists().unwrap_or(false)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| IndexError::Filesystem {
            path: path.to_path_buf(),
            reason: format!("read_dir failed: {e}"),
        })?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IndexError::Filesystem {
                path: path.to_path_buf(),
                reason: format!("next_entry failed: {e}"),
            })?;
            children.push(entry.path());
        }
        Ok(children)
    }

    fn metadata(&self, path: &Path) -> Result<FsMetadata> {
        let md = std::fs::metadata(path).map_err(|e| IndexError::Filesystem {
            path: path.to_path_buf(),
            reason: format!("metadata failed: {e}"),
        })?;
        Ok(FsMetadata {
            is_dir: md.is_dir(),
            is_file: md.is_file(),
            len: md.len(),
        })
    }
}

/// In-memory filesystem for tests.
/// Note: Paths are treated literally; callers should use consistent absolute or relative paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFs {
    nodes: HashMap<PathBuf, Node>,
}

#[derive(Debug, Clone)]
enum Node {
    Dir { children: Vec<PathBuf> },
    File { len: u64 },
}

impl InMemoryFs {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub fn add_dir<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        if self.nodes.contains_key(&path) {
            return;
        }
        self.ensure_parent_link(&path);
        self.nodes.insert(
            path,
            Node::Dir {
                children: Vec::new(),
            },
        );
    }

    pub fn add_file<P: Into<PathBuf>>(&mut self, path: P, len: u64) {
        let path = path.into();
        self.ensure_parent_link(&path);
        self.nodes.insert(path, Node::File { len });
    }

    /// Add several empty files under one directory.
    pub fn add_files<P: AsRef<Path>>(&mut self, dir: P, names: &[&str]) {
        for name in names {
            self.add_file(dir.as_ref().join(name), 0);
        }
    }

    fn ensure_parent_link(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            if parent.as_os_str().is_empty() {
                return;
            }
            if !self.nodes.contains_key(parent) {
                self.nodes.insert(
                    parent.to_path_buf(),
                    Node::Dir {
                        children: Vec::new(),
                    },
                );
                self.ensure_parent_link(parent);
            }
            if let Some(Node::Dir { children }) = self.nodes.get_mut(parent)
                && !children.iter().any(|p| p.as_path() == path)
            {
                children.push(path.to_path_buf());
            }
        }
    }
}

impl FileSystem for InMemoryFs {
    fn path_exists(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.nodes.get(path) {
            Some(Node::Dir { children }) => Ok(children.clone()),
            Some(Node::File { .. }) => Err(IndexError::Filesystem {
                path: path.to_path_buf(),
                reason: "read_dir on file".to_string(),
            }),
            None => Err(IndexError::Filesystem {
                path: path.to_path_buf(),
                reason: "read_dir on missing path".to_string(),
            }),
        }
    }

    fn metadata(&self, path: &Path) -> Result<FsMetadata> {
        match self.nodes.get(path) {
            Some(Node::Dir { .. }) => Ok(FsMetadata {
                is_dir: true,
                is_file: false,
                len: 0,
            }),
            Some(Node::File { len }) => Ok(FsMetadata {
                is_dir: false,
                is_file: true,
                len: *len,
            }),
            None => Err(IndexError::Filesystem {
                path: path.to_path_buf(),
                reason: "metadata on missing path".to_string(),
            }),
        }
    }
}
