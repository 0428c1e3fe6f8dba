//! Translation catalogs read from `<assets>/translations/<code>.toml`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::ports::TranslatorPort;

type Catalog = HashMap<String, String>;

/// [`TranslatorPort`] over flat TOML catalogs mapping source text to
/// translated text.
///
/// A missing catalog or entry translates to the source text.
pub struct CatalogTranslator {
    dir: PathBuf,
    catalog: RwLock<Option<Catalog>>,
}

impl CatalogTranslator {
    /// Creates translator reading catalogs from `dir`.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            catalog: RwLock::new(None),
        }
    }

    fn load(&self, code: &str) -> Option<Catalog> {
        let path = self.dir.join(format!("{code}.toml"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = ?path, error = %e, "No translation catalog");
                return None;
            }
        };
        match toml::from_str::<Catalog>(&content) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(path = ?path, error = %e, "Malformed translation catalog");
                None
            }
        }
    }
}

impl TranslatorPort for CatalogTranslator {
    fn set_language(&self, code: &str) {
        let catalog = self.load(code.trim());
        debug!(
            language = code,
            entries = catalog.as_ref().map_or(0, HashMap::len),
            "Language selected"
        );
        *self.catalog.write() = catalog;
    }

    fn translate(&self, text: &str) -> String {
        self.catalog
            .read()
            .as_ref()
            .and_then(|catalog| catalog.get(text).cloned())
            .unwrap_or_else(|| text.to_string())
    }

    fn close(&self) {
        *self.catalog.write() = None;
    }
}
