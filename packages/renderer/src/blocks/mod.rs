//! Built-in blocks.
//!
//! Every block reads its props through [`BlockProps::typed`], which fills in
//! defaults for anything missing, and styles itself through the theme's CSS
//! custom properties so token edits apply without re-rendering block markup.
//!
//! [`BlockProps::typed`]: storefront_document::BlockProps::typed

mod hero;
mod image_banner;
mod marquee;
mod product_grid;

pub use hero::HeroBlock;
pub use image_banner::ImageBannerBlock;
pub use marquee::MarqueeBlock;
pub use product_grid::ProductGridBlock;

use storefront_document::{PropMap, TypedProps};

fn default_props_of<T: TypedProps>() -> PropMap {
    match serde_json::to_value(T::default()) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => PropMap::new(),
    }
}

/// Root element shared by all built-in blocks
fn block_root(tag: &str, block_type: &str) -> crate::VNode {
    crate::VNode::element(tag)
        .with_class(format!("block block-{}", block_type.replace('_', "-")))
        .with_attr("data-block-type", block_type)
}
