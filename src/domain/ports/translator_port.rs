//! Translation catalog port.

/// Translates user-facing text.
///
/// Lookups fall back to the source text when no catalog entry exists, so a
/// missing or closed catalog never hides a message.
pub trait TranslatorPort: Send + Sync {
    /// Selects the catalog for `code`.
    fn set_language(&self, code: &str);

    /// Returns the translation of `text`.
    fn translate(&self, text: &str) -> String;

    /// Releases the catalog.
    fn close(&self);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::RwLock;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Identity translator with optional fixed entries.
    #[derive(Default)]
    pub struct MockTranslator {
        entries: RwLock<HashMap<String, String>>,
        language: RwLock<Option<String>>,
        closes: AtomicUsize,
    }

    impl MockTranslator {
        /// Creates identity translator.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a catalog entry.
        pub fn with_entry(self, source: &str, target: &str) -> Self {
            self.entries
                .write()
                .insert(source.to_string(), target.to_string());
            self
        }

        /// Returns the selected language.
        pub fn language(&self) -> Option<String> {
            self.language.read().clone()
        }

        /// Returns how many times `close` was called.
        pub fn close_count(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    impl TranslatorPort for MockTranslator {
        fn set_language(&self, code: &str) {
            *self.language.write() = Some(code.to_string());
        }

        fn translate(&self, text: &str) -> String {
            self.entries
                .read()
                .get(text)
                .cloned()
                .unwrap_or_else(|| text.to_string())
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}
