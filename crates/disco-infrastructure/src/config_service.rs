//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and turns it into the
//! validated pieces the controller needs.

use crate::paths::DiscoPaths;
use crate::storage::ConfigStorage;
use disco_core::config::RootConfig;
use disco_core::error::{DiscoError, Result};
use disco_core::prompt::PromptTemplate;
use disco_core::question::QuestionSet;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    storage: ConfigStorage,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &DiscoPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| DiscoError::config(format!("Failed to get config path: {e}")))?;
        Ok(Self::with_storage(ConfigStorage::with_path(path)))
    }

    pub fn with_storage(storage: ConfigStorage) -> Self {
        Self {
            storage,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| DiscoError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.storage.load().map_err(|e| {
            DiscoError::config(format!("{}: {}", self.storage.path().display(), e))
        })?;
        tracing::debug!(
            "Loaded configuration from {} ({} questions)",
            self.storage.path().display(),
            loaded.questions.len()
        );

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| DiscoError::internal("config cache lock poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Loads the configuration and validates the question set and prompt template.
    pub fn load_validated(&self) -> Result<ValidatedConfig> {
        let root = self.get_config()?;
        let questions = root.question_set()?;
        let prompt = root.prompt()?;

        Ok(ValidatedConfig {
            root,
            questions,
            prompt,
        })
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }
}

/// Configuration whose question set and prompt template have been checked.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub root: RootConfig,
    pub questions: QuestionSet,
    pub prompt: PromptTemplate,
}
