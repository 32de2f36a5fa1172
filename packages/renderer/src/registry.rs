//! # Block Registry
//!
//! Maps a block type identifier to the renderer for that type.
//!
//! The registry is a plain value: build it once at startup, then hand a
//! reference to every consumer (editor preview, storefront page handler).
//! Registration is last-write-wins and never fails, so populating the same
//! registry twice is harmless.

use crate::blocks::{HeroBlock, ImageBannerBlock, MarqueeBlock, ProductGridBlock};
use crate::{RenderContext, VNode};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use storefront_document::{block_types, generate_block_id, LayoutBlock, PropMap};
use tracing::debug;

/// Rendering logic for one block type.
///
/// Renderers must be pure: the same block and context produce the same
/// output. Returning `None` renders nothing for the block.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, block: &LayoutBlock, ctx: &RenderContext<'_>) -> Option<VNode>;

    /// Human-readable name for the editor palette
    fn label(&self) -> &str {
        ""
    }

    /// Props a freshly created block starts with
    fn default_props(&self) -> PropMap {
        PropMap::new()
    }
}

impl<F> BlockRenderer for F
where
    F: Fn(&LayoutBlock, &RenderContext<'_>) -> Option<VNode> + Send + Sync,
{
    fn render(&self, block: &LayoutBlock, ctx: &RenderContext<'_>) -> Option<VNode> {
        self(block, ctx)
    }
}

/// Lookup table from block type to renderer
#[derive(Clone, Default)]
pub struct BlockRegistry {
    renderers: HashMap<String, Arc<dyn BlockRenderer>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in block registered
    pub fn with_built_ins() -> Self {
        let mut registry = Self::new();
        register_all_blocks(&mut registry);
        registry
    }

    /// Register `renderer` for `block_type`, replacing any previous entry
    pub fn register(&mut self, block_type: impl Into<String>, renderer: impl BlockRenderer + 'static) {
        let block_type = block_type.into();
        let replaced = self
            .renderers
            .insert(block_type.clone(), Arc::new(renderer))
            .is_some();

        debug!(block_type = %block_type, replaced, "Registered block renderer");
    }

    /// Register a plain function or closure
    pub fn register_fn<F>(&mut self, block_type: impl Into<String>, render: F)
    where
        F: Fn(&LayoutBlock, &RenderContext<'_>) -> Option<VNode> + Send + Sync + 'static,
    {
        self.register(block_type, render);
    }

    pub fn resolve(&self, block_type: &str) -> Option<&dyn BlockRenderer> {
        self.renderers.get(block_type).map(|renderer| renderer.as_ref())
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.renderers.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Registered types, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// New block of `block_type` with a fresh id and the renderer's default props
    pub fn create_block(&self, block_type: &str) -> Option<LayoutBlock> {
        let renderer = self.resolve(block_type)?;
        Some(LayoutBlock::from_parts(
            generate_block_id(block_type),
            block_type,
            renderer.default_props(),
        ))
    }
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("types", &self.types())
            .finish()
    }
}

/// Register the built-in blocks. Safe to call any number of times.
pub fn register_all_blocks(registry: &mut BlockRegistry) {
    registry.register(block_types::HERO, HeroBlock);
    registry.register(block_types::PRODUCT_GRID, ProductGridBlock);
    registry.register(block_types::MARQUEE, MarqueeBlock);
    registry.register(block_types::IMAGE_BANNER, ImageBannerBlock);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreContext;
    use storefront_document::{BlockProps, ThemeTokens};

    #[test]
    fn test_register_all_blocks_is_idempotent() {
        let mut registry = BlockRegistry::new();

        for _ in 0..5 {
            register_all_blocks(&mut registry);
        }

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.types(),
            vec!["hero_v1", "image_banner", "marquee", "product_grid"]
        );
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = BlockRegistry::with_built_ins();
        registry.register_fn("hero_v1", |_block, _ctx| Some(VNode::text("override")));

        let store = StoreContext::default();
        let tokens = ThemeTokens::default();
        let ctx = RenderContext::new(&store, &tokens);
        let block = LayoutBlock::hero("h1", Default::default());

        let rendered = registry
            .resolve("hero_v1")
            .and_then(|renderer| renderer.render(&block, &ctx));

        assert_eq!(rendered, Some(VNode::text("override")));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_resolve_unknown_type() {
        let registry = BlockRegistry::with_built_ins();
        assert!(registry.resolve("carousel").is_none());
        assert!(!registry.contains("carousel"));
    }

    #[test]
    fn test_create_block_uses_default_props() {
        let registry = BlockRegistry::with_built_ins();

        let block = registry.create_block("marquee").expect("built-in type");
        assert!(block.id.starts_with("marquee-"));
        assert_eq!(block.props, BlockProps::defaults("marquee").unwrap());

        assert!(registry.create_block("carousel").is_none());
    }

    #[test]
    fn test_closure_renderer_has_empty_metadata() {
        let mut registry = BlockRegistry::new();
        registry.register_fn("badge", |block, _ctx| Some(VNode::text(block.id.clone())));

        let renderer = registry.resolve("badge").unwrap();
        assert_eq!(renderer.label(), "");
        assert!(renderer.default_props().is_empty());
    }
}
