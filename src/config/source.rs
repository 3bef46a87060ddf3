//! Backing sources for prompt configuration documents.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Source-level failure, before it gains a document name. The processor
/// maps this onto [`super::ConfigError`].
#[derive(Error, Debug)]
pub enum SourceError {
    /// No document under the requested name.
    #[error("document not found")]
    NotFound,

    /// The underlying read failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A named-document store the processor reads from.
///
/// Implementations must be effectively immutable for the process lifetime
/// (or callers must clear the processor cache after a known update): the
/// cache has no TTL.
pub trait ConfigSource: Send + Sync {
    /// Raw text of the named document.
    fn read(&self, name: &str) -> Result<String, SourceError>;

    /// Names of every document the source can provide, for eager preload.
    fn list(&self) -> Result<Vec<String>, SourceError>;
}

/// Filesystem source: one `<name>.yaml` document per file in a directory.
pub struct FsConfigSource {
    dir: PathBuf,
}

impl FsConfigSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.yaml"))
    }
}

impl ConfigSource for FsConfigSource {
    fn read(&self, name: &str) -> Result<String, SourceError> {
        match std::fs::read_to_string(self.path_for(name)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SourceError::NotFound),
            Err(e) => Err(SourceError::Io(e)),
        }
    }

    fn list(&self) -> Result<Vec<String>, SourceError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        // read_dir order is platform-dependent; preload should be stable.
        names.sort();
        Ok(names)
    }
}
