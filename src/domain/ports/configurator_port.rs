//! Persisted client settings port.

use crate::domain::errors::PersistenceError;

/// Well-known settings keys.
pub mod keys {
    /// Translation catalog code.
    pub const LANGUAGE: &str = "language";
    /// Last server host name.
    pub const SERVER_NAME: &str = "server_name";
    /// Last server port.
    pub const SERVER_PORT: &str = "server_port";
    /// Last account name.
    pub const LOGIN_NAME: &str = "login_name";
}

/// Key–value store for client settings.
pub trait ConfiguratorPort: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`; persisted on the next `save`.
    fn set(&self, key: &str, value: &str);

    /// Writes all settings to durable storage.
    ///
    /// # Errors
    /// Returns error if the settings cannot be written.
    fn save(&self) -> Result<(), PersistenceError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::RwLock;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory settings that count saves.
    #[derive(Default)]
    pub struct MockConfigurator {
        values: RwLock<BTreeMap<String, String>>,
        saves: AtomicUsize,
    }

    impl MockConfigurator {
        /// Creates empty settings.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns how many times `save` was called.
        pub fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl ConfiguratorPort for MockConfigurator {
        fn get(&self, key: &str) -> Option<String> {
            self.values.read().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.values.write().insert(key.to_string(), value.to_string());
        }

        fn save(&self) -> Result<(), PersistenceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
