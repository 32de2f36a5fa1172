use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storefront_document::Product;
use storefront_editor::FileThemeStore;
use storefront_renderer::StoreContext;

pub const DEFAULT_CONFIG_NAME: &str = "storefront.config.json";

/// Storefront configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one theme file per store
    #[serde(default = "default_themes_dir")]
    pub themes_dir: String,

    /// JSON array of products rendered by product grids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_path: Option<String>,

    /// Store identity used for theme lookup and product links
    #[serde(default = "default_store_slug")]
    pub store_slug: String,

    /// Served from the store's own subdomain
    #[serde(default)]
    pub is_subdomain: bool,

    /// ISO currency code for prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Output directory for rendered pages
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_themes_dir() -> String {
    "themes".to_string()
}

fn default_store_slug() -> String {
    "store".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Theme store rooted at the themes directory
    pub fn theme_store(&self, cwd: &Path) -> FileThemeStore {
        FileThemeStore::new(cwd.join(&self.themes_dir))
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    /// Render context with the configured catalog
    pub fn store_context(&self, cwd: &Path) -> anyhow::Result<StoreContext> {
        let products = match &self.products_path {
            Some(path) => {
                let path = cwd.join(path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Cannot read products from {}", path.display()))?;
                serde_json::from_str::<Vec<Product>>(&content)
                    .with_context(|| format!("Invalid products in {}", path.display()))?
            }
            None => Vec::new(),
        };

        Ok(StoreContext::new(self.store_slug.clone())
            .with_currency(self.currency.clone())
            .on_subdomain(self.is_subdomain)
            .with_products(products))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            themes_dir: default_themes_dir(),
            products_path: None,
            store_slug: default_store_slug(),
            is_subdomain: false,
            currency: default_currency(),
            out_dir: default_out_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "themesDir": "config/themes",
            "productsPath": "products.json",
            "storeSlug": "batik-house",
            "isSubdomain": true,
            "currency": "IDR",
            "outDir": "public"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.themes_dir, "config/themes");
        assert_eq!(config.products_path, Some("products.json".to_string()));
        assert_eq!(config.store_slug, "batik-house");
        assert!(config.is_subdomain);
        assert_eq!(config.currency, "IDR");
        assert_eq!(config.out_dir, "public");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_slug, "store");
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_store_context_reads_products() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("products.json"),
            r#"[{ "id": "1", "name": "Tote", "slug": "tote", "price": 12.5, "images": [] }]"#,
        )
        .unwrap();

        let config = Config {
            products_path: Some("products.json".to_string()),
            store_slug: "batik".to_string(),
            ..Default::default()
        };

        let store = config.store_context(dir.path()).unwrap();
        assert_eq!(store.products.len(), 1);
        assert_eq!(store.store_slug, "batik");
    }

    #[test]
    fn test_store_context_missing_products_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            products_path: Some("missing.json".to_string()),
            ..Default::default()
        };

        assert!(config.store_context(dir.path()).is_err());
    }
}
