//! Prompt configuration model and backing source.
//!
//! A prompt configuration is one named, versioned document (YAML) holding
//! model settings, an opaque output schema, and the template text. The
//! [`ConfigSource`] trait abstracts where documents come from; the default
//! [`FsConfigSource`] reads `<name>.yaml` files from a directory.

mod model;
mod source;

#[cfg(test)]
mod tests;

use thiserror::Error;

// Re-export public API
pub use model::{ModelConfig, PromptConfig};
pub use source::{ConfigSource, FsConfigSource, SourceError};

/// Configuration-loading errors. Every variant carries the name of the
/// offending document so callers can report which prompt failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The backing source has no document with this name.
    #[error("prompt config '{name}' not found")]
    NotFound {
        /// The requested document name.
        name: String,
    },

    /// The document exists but failed to parse or validate.
    #[error("prompt config '{name}' is invalid: {reason}")]
    Invalid {
        /// The requested document name.
        name: String,
        /// Parse error or the validation rule that failed.
        reason: String,
    },

    /// The underlying read failed (filesystem or network).
    #[error("failed to read prompt config '{name}': {source}")]
    ReadFailure {
        /// The requested document name.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Eager preload hit a failure. Wraps the first per-document error;
    /// enumeration failures use the pseudo-name `*`.
    #[error("preload failed on prompt config '{name}': {source}")]
    Preload {
        /// The document that failed, or `*` for the enumeration itself.
        name: String,
        /// The wrapped per-document error.
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Map a source-level error onto the taxonomy, attaching the name.
    pub(crate) fn from_source(name: &str, err: SourceError) -> Self {
        match err {
            SourceError::NotFound => ConfigError::NotFound {
                name: name.to_string(),
            },
            SourceError::Io(source) => ConfigError::ReadFailure {
                name: name.to_string(),
                source,
            },
        }
    }
}
