//! # Storefront Document
//!
//! The persisted shape of a store's theme: design tokens plus ordered block
//! layouts for each page.
//!
//! ## Shape
//!
//! ```text
//! ThemeConfig
//!  ├─ tokens: ThemeTokens          (colors, font, radii)
//!  ├─ layout_home: [LayoutBlock]   (render order = list order)
//!  └─ layout_product?: [LayoutBlock]
//!
//! LayoutBlock  { "id": "...", "type": "hero_v1", "props": { ... } }
//! ```
//!
//! Block props are a tagged union ([`BlockProps`]) keyed by the block `type`.
//! Types the engine doesn't know are kept verbatim in [`BlockProps::Custom`]
//! so a document always survives a load → save cycle.
//!
//! ## Usage
//!
//! ```rust
//! use storefront_document::{ThemeConfig, Page};
//!
//! let json = r#"{ "layout_home": [{ "id": "h1", "type": "hero_v1", "props": { "title": "Hi" } }] }"#;
//! let theme = ThemeConfig::from_json(json).unwrap();
//! assert_eq!(theme.layout(Page::Home).len(), 1);
//! assert_eq!(theme.tokens.primary, "#FE7501");
//! ```

mod block;
mod error;
mod id;
mod layout;
mod product;
mod theme;
mod tokens;

pub use block::{
    block_types, BlockProps, HeroProps, ImageBannerProps, LayoutBlock, MarqueeProps,
    ProductGridProps, TypedProps,
};
pub use error::DocumentError;
pub use id::generate_block_id;
pub use layout::Layout;
pub use product::Product;
pub use theme::{Page, ThemeConfig};
pub use tokens::{ThemeTokens, TokensPatch};

/// Property bag as persisted in JSON
pub type PropMap = serde_json::Map<String, serde_json::Value>;
