use super::{block_root, default_props_of};
use crate::{BlockRenderer, RenderContext, VNode};
use storefront_document::{block_types, HeroProps, LayoutBlock, PropMap};

pub struct HeroBlock;

impl BlockRenderer for HeroBlock {
    fn render(&self, block: &LayoutBlock, _ctx: &RenderContext<'_>) -> Option<VNode> {
        let props = block.props.typed::<HeroProps>();

        let background = match &props.background_image {
            Some(url) if !url.is_empty() => format!(
                "linear-gradient(rgba(0, 0, 0, 0.35), rgba(0, 0, 0, 0.35)), url(\"{}\") center / cover",
                encode_css_url(url)
            ),
            _ => "var(--color-secondary)".to_string(),
        };

        let mut root = block_root("section", block_types::HERO)
            .with_style("background", background)
            .with_style("border-radius", "var(--radius-large)")
            .with_style("color", "#FFFFFF")
            .with_style("padding", "96px 24px")
            .with_style("text-align", "center")
            .with_child(
                VNode::element("h1")
                    .with_class("hero-title")
                    .with_text(&props.title),
            );

        if !props.subtitle.is_empty() {
            root = root.with_child(
                VNode::element("p")
                    .with_class("hero-subtitle")
                    .with_text(&props.subtitle),
            );
        }

        if !props.cta_text.is_empty() {
            root = root.with_child(
                VNode::element("a")
                    .with_class("hero-cta")
                    .with_attr("href", props.cta_link.as_str())
                    .with_style("background", "var(--color-primary)")
                    .with_style("border-radius", "var(--radius-base)")
                    .with_style("color", "#FFFFFF")
                    .with_style("display", "inline-block")
                    .with_style("padding", "12px 28px")
                    .with_text(&props.cta_text),
            );
        }

        Some(root)
    }

    fn label(&self) -> &str {
        "Hero banner"
    }

    fn default_props(&self) -> PropMap {
        default_props_of::<HeroProps>()
    }
}

/// Percent-encode the characters that could close a quoted `url()`
fn encode_css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreContext;
    use storefront_document::ThemeTokens;

    fn render(block: &LayoutBlock) -> VNode {
        let store = StoreContext::default();
        let tokens = ThemeTokens::default();
        HeroBlock
            .render(block, &RenderContext::new(&store, &tokens))
            .expect("hero always renders")
    }

    #[test]
    fn test_hero_defaults() {
        let node = render(&LayoutBlock::hero("h1", HeroProps::default()));

        assert_eq!(node.attr("data-block-type"), Some("hero_v1"));
        assert_eq!(
            node.text_content(),
            "Welcome to our storeDiscover our latest collectionShop Now"
        );
    }

    #[test]
    fn test_hero_without_cta() {
        let node = render(&LayoutBlock::hero(
            "h1",
            HeroProps {
                cta_text: String::new(),
                subtitle: String::new(),
                ..Default::default()
            },
        ));

        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_hero_background_image() {
        let node = render(&LayoutBlock::hero(
            "h1",
            HeroProps {
                background_image: Some("https://cdn.example.com/a.jpg".to_string()),
                ..Default::default()
            },
        ));

        match node {
            VNode::Element { styles, .. } => {
                assert!(styles["background"].contains("https://cdn.example.com/a.jpg"));
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_background_image_cannot_close_url() {
        let node = render(&LayoutBlock::hero(
            "h1",
            HeroProps {
                background_image: Some(
                    "https://cdn.example.com/a.jpg\"); color: red; background: url(\"x".to_string(),
                ),
                ..Default::default()
            },
        ));

        match node {
            VNode::Element { styles, .. } => {
                let background = &styles["background"];
                assert!(background.contains(
                    "url(\"https://cdn.example.com/a.jpg%22%29; color: red; background: url%28%22x\")"
                ));
                assert_eq!(background.matches('"').count(), 2);
            }
            other => panic!("Expected element, got {:?}", other),
        }
    }
}
