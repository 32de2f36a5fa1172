use super::{block_root, default_props_of};
use crate::{BlockRenderer, RenderContext, VNode};
use storefront_document::{block_types, LayoutBlock, Product, ProductGridProps, PropMap};

const MAX_COLUMNS: u32 = 6;

pub struct ProductGridBlock;

impl BlockRenderer for ProductGridBlock {
    fn render(&self, block: &LayoutBlock, ctx: &RenderContext<'_>) -> Option<VNode> {
        let props = block.props.typed::<ProductGridProps>();
        let columns = props.columns.clamp(1, MAX_COLUMNS);

        let mut root = block_root("section", block_types::PRODUCT_GRID)
            .with_style("padding", "48px 24px");

        if !props.title.is_empty() {
            root = root.with_child(
                VNode::element("h2")
                    .with_class("product-grid-title")
                    .with_text(&props.title),
            );
        }

        if ctx.products().is_empty() {
            return Some(
                root.with_child(
                    VNode::element("p")
                        .with_class("product-grid-empty")
                        .with_text("No products yet"),
                ),
            );
        }

        let cards = ctx
            .products()
            .iter()
            .take(props.limit)
            .map(|product| product_card(product, props.show_price, ctx));

        let grid = VNode::element("div")
            .with_class("product-grid")
            .with_style("display", "grid")
            .with_style("gap", "24px")
            .with_style(
                "grid-template-columns",
                format!("repeat({}, minmax(0, 1fr))", columns),
            )
            .with_children(cards);

        Some(root.with_child(grid))
    }

    fn label(&self) -> &str {
        "Product grid"
    }

    fn default_props(&self) -> PropMap {
        default_props_of::<ProductGridProps>()
    }
}

fn product_card(product: &Product, show_price: bool, ctx: &RenderContext<'_>) -> VNode {
    let mut card = VNode::element("a")
        .with_class("product-card")
        .with_key(product.id.as_str())
        .with_attr("href", ctx.product_href(product));

    if let Some(image) = product.primary_image() {
        card = card.with_child(
            VNode::element("img")
                .with_attr("src", image)
                .with_attr("alt", product.name.as_str())
                .with_attr("loading", "lazy")
                .with_style("border-radius", "var(--radius-base)")
                .with_style("width", "100%"),
        );
    }

    card = card.with_child(
        VNode::element("h3")
            .with_class("product-name")
            .with_text(&product.name),
    );

    if show_price {
        card = card.with_child(
            VNode::element("span")
                .with_class("product-price")
                .with_style("color", "var(--color-primary)")
                .with_text(&ctx.format_price(product.price)),
        );
    }

    card
}
