use super::{block_root, default_props_of};
use crate::{BlockRenderer, RenderContext, VNode};
use storefront_document::{block_types, ImageBannerProps, LayoutBlock, PropMap};

pub struct ImageBannerBlock;

impl BlockRenderer for ImageBannerBlock {
    fn render(&self, block: &LayoutBlock, _ctx: &RenderContext<'_>) -> Option<VNode> {
        let props = block.props.typed::<ImageBannerProps>();
        let url = props.image_url.as_deref().filter(|url| !url.is_empty())?;

        let image = VNode::element("img")
            .with_attr("src", url)
            .with_attr("alt", props.alt.as_str())
            .with_style("height", "100%")
            .with_style("object-fit", "cover")
            .with_style("width", "100%");

        let content = match props.link.as_deref().filter(|link| !link.is_empty()) {
            Some(link) => VNode::element("a").with_attr("href", link).with_child(image),
            None => image,
        };

        Some(
            block_root("div", block_types::IMAGE_BANNER)
                .with_style("border-radius", "var(--radius-large)")
                .with_style("height", props.height.as_str())
                .with_style("overflow", "hidden")
                .with_child(content),
        )
    }

    fn label(&self) -> &str {
        "Image banner"
    }

    fn default_props(&self) -> PropMap {
        default_props_of::<ImageBannerProps>()
    }
}
