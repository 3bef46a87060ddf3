//! Template processor: named config loading, caching, and rendering.
//!
//! The processor composes a [`ConfigSource`] with the template engine.
//! It owns the only shared mutable state in the crate: a by-name cache of
//! parsed configurations with no TTL. Construct one processor at process
//! start and pass it by reference - there is deliberately no global
//! singleton.
//!
//! Correctness of the cache depends on the backing source being
//! effectively immutable during the process lifetime, or on callers
//! invoking [`TemplateProcessor::clear_cache`] after a known update.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigError, ConfigSource, PromptConfig};
use crate::error::Result;
use crate::template::render;

/// Output of [`TemplateProcessor::get_processed_prompt`]: the rendered
/// prompt text plus the configuration it was rendered from (model settings
/// and schema travel with the prompt to the upstream caller).
#[derive(Debug, Clone)]
pub struct ProcessedPrompt {
    /// Final prompt text with variables substituted.
    pub prompt: String,
    /// The loaded configuration, shared with the cache.
    pub config: Arc<PromptConfig>,
}

/// Loads, caches, and renders named prompt configurations.
pub struct TemplateProcessor<S: ConfigSource> {
    source: S,
    cache: Mutex<HashMap<String, Arc<PromptConfig>>>,
}

impl<S: ConfigSource> TemplateProcessor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load the named configuration, reading from the source on first use
    /// and serving from the cache afterwards.
    ///
    /// Two concurrent misses for the same name may both read the source;
    /// the read is idempotent and the last insert wins, so no single-flight
    /// de-duplication is attempted.
    pub fn load_config(&self, name: &str) -> std::result::Result<Arc<PromptConfig>, ConfigError> {
        if let Some(config) = self.cache_guard().get(name) {
            debug!(name, "prompt config cache hit");
            return Ok(Arc::clone(config));
        }

        // Read outside the lock so a slow source does not serialize
        // unrelated loads.
        let raw = self
            .source
            .read(name)
            .map_err(|e| ConfigError::from_source(name, e))?;
        let config: PromptConfig = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            name: name.to_string(),
            reason,
        })?;

        let config = Arc::new(config);
        self.cache_guard()
            .insert(name.to_string(), Arc::clone(&config));
        debug!(name, version = %config.version, "prompt config loaded");
        Ok(config)
    }

    /// Load the named configuration and render its template against the
    /// supplied variables.
    pub fn get_processed_prompt(&self, name: &str, variables: &Value) -> Result<ProcessedPrompt> {
        let config = self.load_config(name)?;
        let prompt = render(&config.template, variables)?;
        Ok(ProcessedPrompt { prompt, config })
    }

    /// Eagerly load every configuration the source can enumerate, to fail
    /// fast at process start on malformed documents.
    ///
    /// Returns the number of configurations loaded. The first failure is
    /// wrapped in [`ConfigError::Preload`] with the offending name.
    pub fn preload_all(&self) -> std::result::Result<usize, ConfigError> {
        let names = self.source.list().map_err(|e| ConfigError::Preload {
            name: "*".to_string(),
            source: Box::new(ConfigError::from_source("*", e)),
        })?;

        for name in &names {
            self.load_config(name).map_err(|e| ConfigError::Preload {
                name: name.clone(),
                source: Box::new(e),
            })?;
        }

        debug!(count = names.len(), "prompt configs preloaded");
        Ok(names.len())
    }

    /// Drop one cached configuration, or all of them. Subsequent loads
    /// re-read the source.
    pub fn clear_cache(&self, name: Option<&str>) {
        let mut cache = self.cache_guard();
        match name {
            Some(name) => {
                cache.remove(name);
            }
            None => cache.clear(),
        }
    }

    fn cache_guard(&self) -> MutexGuard<'_, HashMap<String, Arc<PromptConfig>>> {
        // A panicked holder leaves the map structurally intact (worst case
        // a stale entry), so recover rather than propagate the poison.
        self.cache
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
