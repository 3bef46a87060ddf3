//! Crate-level error type for promptpipe.
//!
//! Uses thiserror for derive macros. Component errors (`ConfigError`,
//! `TemplateError`) live next to the code that produces them; this module
//! provides the umbrella type returned by operations that cross component
//! boundaries, such as [`crate::processor::TemplateProcessor::get_processed_prompt`].

use crate::config::ConfigError;
use crate::template::TemplateError;
use thiserror::Error;

/// Umbrella error for operations that compose configuration loading with
/// template rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded, parsed, or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Template markup was malformed during rendering.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type alias for promptpipe operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_passes_through() {
        let err = Error::from(ConfigError::NotFound {
            name: "recipe_wizard".to_string(),
        });
        assert_eq!(err.to_string(), "prompt config 'recipe_wizard' not found");
    }

    #[test]
    fn template_error_message_passes_through() {
        let err = Error::from(TemplateError::UnterminatedBlock {
            tag: "#each".to_string(),
            position: 12,
        });
        assert_eq!(
            err.to_string(),
            "unterminated '{{#each}}' block at byte 12 in template"
        );
    }
}
