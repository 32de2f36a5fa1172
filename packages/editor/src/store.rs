//! # Theme Stores
//!
//! The persistence boundary. A store receives the complete theme document on
//! every save and replaces whatever it held before; there is no versioning,
//! diffing or retry. Failures come back as `PersistError` values.
//!
//! - **Memory**: in-process map, for tests and embedding
//! - **File**: one pretty-printed JSON file per store under a directory

use crate::PersistError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use storefront_document::ThemeConfig;
use tracing::debug;

/// Load and save theme documents by store slug
pub trait ThemeStore {
    /// Stored theme, or `None` if the store has never saved one
    fn load(&self, store_slug: &str) -> Result<Option<ThemeConfig>, PersistError>;

    /// Overwrite the stored theme
    fn save(&self, store_slug: &str, theme: &ThemeConfig) -> Result<(), PersistError>;
}

/// In-process theme store
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    themes: RwLock<HashMap<String, ThemeConfig>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one theme
    pub fn with_theme(store_slug: impl Into<String>, theme: ThemeConfig) -> Self {
        let mut themes = HashMap::new();
        themes.insert(store_slug.into(), theme);
        Self {
            themes: RwLock::new(themes),
        }
    }

    pub fn len(&self) -> usize {
        self.themes.read().map(|themes| themes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, store_slug: &str) -> Result<Option<ThemeConfig>, PersistError> {
        let themes = self
            .themes
            .read()
            .map_err(|_| PersistError::Unavailable("theme map lock poisoned".to_string()))?;

        Ok(themes.get(store_slug).cloned())
    }

    fn save(&self, store_slug: &str, theme: &ThemeConfig) -> Result<(), PersistError> {
        validate_store_slug(store_slug)?;

        let mut themes = self
            .themes
            .write()
            .map_err(|_| PersistError::Unavailable("theme map lock poisoned".to_string()))?;

        themes.insert(store_slug.to_string(), theme.clone());
        Ok(())
    }
}

/// Theme store backed by `<dir>/<store_slug>.json`
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    dir: PathBuf,
}

impl FileThemeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a store's theme file
    pub fn path_for(&self, store_slug: &str) -> Result<PathBuf, PersistError> {
        validate_store_slug(store_slug)?;
        Ok(self.dir.join(format!("{}.json", store_slug)))
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self, store_slug: &str) -> Result<Option<ThemeConfig>, PersistError> {
        let path = self.path_for(store_slug)?;

        if !path.exists() {
            return Ok(None);
        }

        debug!(path = %path.display(), "Loading theme");
        let source = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&source)?))
    }

    fn save(&self, store_slug: &str, theme: &ThemeConfig) -> Result<(), PersistError> {
        let path = self.path_for(store_slug)?;
        let json = serde_json::to_string_pretty(theme)?;

        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a failed write never leaves
        // a truncated theme behind
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        debug!(path = %path.display(), "Saved theme");
        Ok(())
    }
}

/// Slugs become file names, so only `[a-z0-9_-]` is accepted
fn validate_store_slug(store_slug: &str) -> Result<(), PersistError> {
    let valid = !store_slug.is_empty()
        && store_slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(PersistError::InvalidStoreSlug(store_slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_document::{LayoutBlock, MarqueeProps};

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryThemeStore::new();
        assert!(store.load("batik").unwrap().is_none());

        let mut theme = ThemeConfig::default();
        theme
            .layout_home
            .push(LayoutBlock::marquee("m1", MarqueeProps::default()));

        store.save("batik", &theme).unwrap();

        assert_eq!(store.load("batik").unwrap(), Some(theme));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryThemeStore::with_theme("batik", ThemeConfig::default());

        let empty = ThemeConfig {
            layout_home: Default::default(),
            ..Default::default()
        };
        store.save("batik", &empty).unwrap();

        assert!(store.load("batik").unwrap().unwrap().layout_home.is_empty());
    }

    #[test]
    fn test_rejects_path_like_slugs() {
        let store = FileThemeStore::new("themes");

        assert!(matches!(
            store.path_for("../etc/passwd"),
            Err(PersistError::InvalidStoreSlug(_))
        ));
        assert!(store.path_for("").is_err());
        assert!(store.path_for("batik-house_2").is_ok());
    }
}
