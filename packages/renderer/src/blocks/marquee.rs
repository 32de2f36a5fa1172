use super::{block_root, default_props_of};
use crate::{BlockRenderer, RenderContext, VNode};
use storefront_document::{block_types, LayoutBlock, MarqueeProps, PropMap};

pub struct MarqueeBlock;

impl BlockRenderer for MarqueeBlock {
    fn render(&self, block: &LayoutBlock, _ctx: &RenderContext<'_>) -> Option<VNode> {
        let props = block.props.typed::<MarqueeProps>();
        if props.text.is_empty() {
            return None;
        }

        let background = props
            .background
            .clone()
            .unwrap_or_else(|| "var(--color-primary)".to_string());
        let color = props.color.clone().unwrap_or_else(|| "#FFFFFF".to_string());

        let track = VNode::element("div")
            .with_class("marquee-track")
            .with_style("animation-duration", format!("{}s", props.speed.max(1)))
            .with_text(&props.text);

        Some(
            block_root("div", block_types::MARQUEE)
                .with_attr("role", "marquee")
                .with_style("background", background)
                .with_style("color", color)
                .with_style("overflow", "hidden")
                .with_style("padding", "12px 0")
                .with_style("white-space", "nowrap")
                .with_child(track),
        )
    }

    fn label(&self) -> &str {
        "Marquee"
    }

    fn default_props(&self) -> PropMap {
        default_props_of::<MarqueeProps>()
    }
}
