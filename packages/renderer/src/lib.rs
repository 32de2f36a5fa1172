//! # Storefront Renderer
//!
//! Turns a theme's block layout into a virtual DOM.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: ThemeConfig (tokens + layouts)    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: layout → VNodes                   │
//! │  - BlockRegistry: type → BlockRenderer      │
//! │  - RenderContext: products, store, tokens   │
//! │  - Unknown types skipped (or placeholder)   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: VNodes → HTML                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The editor preview and the public storefront both render through
//! [`Renderer`], so what the seller sees while editing is what customers get.
//!
//! ## Usage
//!
//! ```rust
//! use storefront_document::{Page, ThemeConfig};
//! use storefront_renderer::{BlockRegistry, Renderer, StoreContext};
//!
//! let registry = BlockRegistry::with_built_ins();
//! let renderer = Renderer::new(&registry);
//!
//! let theme = ThemeConfig::default();
//! let page = renderer.render_page(&theme, Page::Home, &StoreContext::new("batik"));
//! assert_eq!(page.nodes.len(), 2);
//! ```

pub mod blocks;
mod context;
mod registry;
mod renderer;
mod vdom;

pub use context::{format_price, RenderContext, StoreContext};
pub use registry::{register_all_blocks, BlockRegistry, BlockRenderer};
pub use renderer::{theme_styles, RenderOptions, Renderer, PRODUCTS_ANCHOR};
pub use vdom::{is_safe_style_value, CssRule, RenderedPage, VNode};
