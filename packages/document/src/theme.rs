//! # Theme Document
//!
//! `ThemeConfig` is the unit of persistence: it is embedded in the owning
//! store record and every save replaces it wholesale.

use crate::{DocumentError, HeroProps, Layout, LayoutBlock, ProductGridProps, ThemeTokens};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storefront page a layout belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Product,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Product => write!(f, "product"),
        }
    }
}

impl FromStr for Page {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Page::Home),
            "product" => Ok(Page::Product),
            other => Err(DocumentError::UnknownPage(other.to_string())),
        }
    }
}

/// Tokens plus per-page layouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub tokens: ThemeTokens,

    #[serde(default)]
    pub layout_home: Layout,

    /// Absent until the seller customizes the product page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_product: Option<Layout>,
}

impl Default for ThemeConfig {
    /// Document a store is provisioned with
    fn default() -> Self {
        Self {
            tokens: ThemeTokens::default(),
            layout_home: Layout::from(vec![
                LayoutBlock::hero("hero_v1-default", HeroProps::default()),
                LayoutBlock::product_grid("product_grid-default", ProductGridProps::default()),
            ]),
            layout_product: None,
        }
    }
}

impl ThemeConfig {
    /// Blocks of a page; a missing product layout is empty
    pub fn layout(&self, page: Page) -> &[LayoutBlock] {
        match page {
            Page::Home => &self.layout_home,
            Page::Product => self.layout_product.as_deref().unwrap_or(&[]),
        }
    }

    /// Mutable layout of a page, creating the product layout on first use
    pub fn layout_mut(&mut self, page: Page) -> &mut Layout {
        match page {
            Page::Home => &mut self.layout_home,
            Page::Product => self.layout_product.get_or_insert_with(Layout::new),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioned_document() {
        let theme = ThemeConfig::default();

        assert_eq!(theme.layout_home.ids(), vec!["hero_v1-default", "product_grid-default"]);
        assert!(theme.layout(Page::Product).is_empty());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let theme = ThemeConfig::from_json("{}").unwrap();

        assert_eq!(theme.tokens, ThemeTokens::default());
        assert!(theme.layout_home.is_empty());
        assert!(theme.layout_product.is_none());
    }

    #[test]
    fn test_layout_mut_creates_product_layout() {
        let mut theme = ThemeConfig::default();
        theme
            .layout_mut(Page::Product)
            .push(LayoutBlock::hero("p1", HeroProps::default()));

        assert_eq!(theme.layout(Page::Product).len(), 1);
        assert!(theme.to_json().unwrap().contains("layout_product"));
    }

    #[test]
    fn test_page_parse() {
        assert_eq!("product".parse::<Page>().unwrap(), Page::Product);
        assert!("checkout".parse::<Page>().is_err());
        assert_eq!(Page::Home.to_string(), "home");
    }
}
