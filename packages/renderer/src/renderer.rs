//! # Layout Renderer
//!
//! Walks a layout top to bottom and renders each block through the registry.
//!
//! ## Guarantees
//!
//! - One output node per rendered block, in layout order. Nothing is
//!   reordered, deduplicated or filtered except as below.
//! - A block whose type isn't registered is skipped, or replaced by a
//!   [`VNode::Placeholder`] when placeholders are enabled (editor preview).
//! - A block whose renderer returns `None` contributes nothing.
//! - Rendering holds no state between calls: the same layout and context
//!   always produce the same nodes.
//! - The first product grid of a layout carries the `products` element id,
//!   the default target of the hero call to action. Later grids carry none.

use crate::{BlockRegistry, CssRule, RenderContext, RenderedPage, StoreContext, VNode};
use storefront_document::{block_types, LayoutBlock, Page, ThemeConfig, ThemeTokens};
use tracing::{debug, info, warn};

/// Element id of the page's product grid
pub const PRODUCTS_ANCHOR: &str = "products";

/// Renderer options
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render unknown block types as visible diagnostics instead of skipping them
    pub placeholders: bool,
}

impl RenderOptions {
    /// Options for the editor preview
    pub fn preview() -> Self {
        Self { placeholders: true }
    }
}

/// Renders layouts against a block registry
#[derive(Debug, Clone)]
pub struct Renderer<'r> {
    registry: &'r BlockRegistry,
    options: RenderOptions,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(registry: &'r BlockRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &'r BlockRegistry {
        self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a block sequence in order
    pub fn render(&self, layout: &[LayoutBlock], ctx: &RenderContext<'_>) -> Vec<VNode> {
        let mut nodes: Vec<VNode> = layout
            .iter()
            .filter_map(|block| self.render_block(block, ctx))
            .collect();

        if let Some(grid) = nodes
            .iter_mut()
            .find(|node| node.attr("data-block-type") == Some(block_types::PRODUCT_GRID))
        {
            grid.set_attr("id", PRODUCTS_ANCHOR);
        }

        nodes
    }

    /// Render a single block, keyed by its id
    pub fn render_block(&self, block: &LayoutBlock, ctx: &RenderContext<'_>) -> Option<VNode> {
        let block_type = block.block_type();

        let Some(renderer) = self.registry.resolve(block_type) else {
            warn!(block_id = %block.id, block_type, "Unknown block type, skipping");
            return self.options.placeholders.then(|| {
                VNode::placeholder(
                    block.id.as_str(),
                    block_type,
                    format!("Unknown block type \"{}\"", block_type),
                )
            });
        };

        match renderer.render(block, ctx) {
            Some(node) => {
                debug!(block_id = %block.id, block_type, "Rendered block");
                Some(
                    node.with_key(block.id.as_str())
                        .with_attr("data-block-id", block.id.as_str()),
                )
            }
            None => {
                debug!(block_id = %block.id, block_type, "Block rendered nothing");
                None
            }
        }
    }

    /// Render one page of a theme, including the token style rules
    pub fn render_page(&self, theme: &ThemeConfig, page: Page, store: &StoreContext) -> RenderedPage {
        let layout = theme.layout(page);
        info!(page = %page, blocks = layout.len(), store = %store.store_slug, "Rendering page");

        let ctx = RenderContext::new(store, &theme.tokens);
        let nodes = self.render(layout, &ctx);

        info!(page = %page, nodes = nodes.len(), "Page render complete");

        RenderedPage {
            nodes,
            styles: theme_styles(&theme.tokens),
        }
    }
}

/// Page-level rules: token custom properties on `:root` plus base body styles
pub fn theme_styles(tokens: &ThemeTokens) -> Vec<CssRule> {
    let root = tokens
        .css_variables()
        .into_iter()
        .fold(CssRule::new(":root"), |rule, (name, value)| {
            rule.with_property(name, value)
        });

    let body = CssRule::new("body")
        .with_property("background", "var(--color-background)")
        .with_property("font-family", "var(--font-family)")
        .with_property("margin", "0");

    vec![root, body]
}
