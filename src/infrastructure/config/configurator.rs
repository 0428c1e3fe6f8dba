//! Settings store backed by `client.toml`.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::storage::{Settings, StorageManager};
use crate::domain::errors::PersistenceError;
use crate::domain::ports::{ConfiguratorPort, keys};

/// Language used when none is stored.
pub const DEFAULT_LANGUAGE: &str = "en";

/// [`ConfiguratorPort`] keeping settings in memory until `save`.
pub struct TomlConfigurator {
    storage: Arc<StorageManager>,
    values: RwLock<Settings>,
}

impl TomlConfigurator {
    /// Loads stored settings, falling back to defaults for missing keys.
    #[must_use]
    pub fn load(storage: Arc<StorageManager>) -> Self {
        let mut values = storage.load_settings().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read client settings");
            Settings::new()
        });
        values
            .entry(keys::LANGUAGE.to_string())
            .or_insert_with(|| DEFAULT_LANGUAGE.to_string());

        Self {
            storage,
            values: RwLock::new(values),
        }
    }
}

impl ConfiguratorPort for TomlConfigurator {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }

    fn save(&self) -> Result<(), PersistenceError> {
        let snapshot = self.values.read().clone();
        self.storage.save_settings(&snapshot)?;
        debug!(entries = snapshot.len(), "Client settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_language_defaults_to_english() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(StorageManager::with_dir(dir.path().to_path_buf()));

        let configurator = TomlConfigurator::load(storage);

        assert_eq!(configurator.get(keys::LANGUAGE).as_deref(), Some("en"));
        assert_eq!(configurator.get(keys::SERVER_NAME), None);
    }

    #[test]
    fn test_values_survive_save_and_reload() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(StorageManager::with_dir(dir.path().to_path_buf()));

        let configurator = TomlConfigurator::load(Arc::clone(&storage));
        configurator.set(keys::SERVER_NAME, "cards.example");
        configurator.set(keys::LANGUAGE, "de");
        configurator.save().unwrap();

        let reloaded = TomlConfigurator::load(storage);
        assert_eq!(reloaded.get(keys::SERVER_NAME).as_deref(), Some("cards.example"));
        assert_eq!(reloaded.get(keys::LANGUAGE).as_deref(), Some("de"));
    }

    #[test]
    fn test_unsaved_values_are_not_persisted() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(StorageManager::with_dir(dir.path().to_path_buf()));

        TomlConfigurator::load(Arc::clone(&storage)).set(keys::LOGIN_NAME, "alice");

        assert_eq!(TomlConfigurator::load(storage).get(keys::LOGIN_NAME), None);
    }
}
