//! Layout rendering tests: determinism, ordering and unknown-type resilience

use storefront_document::{
    HeroProps, ImageBannerProps, Layout, LayoutBlock, MarqueeProps, Page, Product,
    ProductGridProps, ThemeConfig, ThemeTokens,
};
use storefront_renderer::{
    BlockRegistry, RenderContext, RenderOptions, RenderedPage, Renderer, StoreContext, VNode,
};

fn catalog() -> StoreContext {
    StoreContext::new("batik-house")
        .with_currency("IDR")
        .with_products(vec![
            Product::new("1", "Batik Shirt", "batik-shirt", 250000.0)
                .with_image("https://cdn.example.com/shirt.jpg"),
            Product::new("2", "Sarong", "sarong", 175000.0),
        ])
}

fn theme() -> ThemeConfig {
    ThemeConfig {
        tokens: ThemeTokens::default(),
        layout_home: Layout::from(vec![
            LayoutBlock::marquee("m1", MarqueeProps::default()),
            LayoutBlock::hero("h1", HeroProps::default()),
            LayoutBlock::product_grid("g1", ProductGridProps::default()),
            LayoutBlock::image_banner(
                "b1",
                ImageBannerProps {
                    image_url: Some("https://cdn.example.com/banner.jpg".to_string()),
                    ..Default::default()
                },
            ),
        ]),
        layout_product: None,
    }
}

#[test]
fn test_render_is_deterministic() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::new(&registry);
    let store = catalog();
    let theme = theme();

    let results: Vec<RenderedPage> = (0..10)
        .map(|_| renderer.render_page(&theme, Page::Home, &store))
        .collect();

    for i in 1..results.len() {
        assert_eq!(results[0], results[i], "Render {} differs from render 0", i);
    }

    let first = serde_json::to_string(&results[0]).unwrap();
    let last = serde_json::to_string(&results[9]).unwrap();
    assert_eq!(first, last);
}

#[test]
fn test_render_preserves_layout_order() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::new(&registry);

    let page = renderer.render_page(&theme(), Page::Home, &catalog());
    let keys: Vec<_> = page.nodes.iter().filter_map(VNode::key).collect();

    assert_eq!(keys, vec!["m1", "h1", "g1", "b1"]);
}

#[test]
fn test_unknown_block_is_skipped() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::new(&registry);
    let store = catalog();
    let tokens = ThemeTokens::default();
    let ctx = RenderContext::new(&store, &tokens);

    let mut layout = theme().layout_home.into_inner();
    layout.insert(2, LayoutBlock::from_parts("legacy", "slideshow_v0", Default::default()));

    let with_unknown = renderer.render(&layout, &ctx);
    let without_unknown = renderer.render(&theme().layout_home, &ctx);

    assert_eq!(with_unknown, without_unknown);
}

#[test]
fn test_unknown_block_placeholder_in_preview() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::with_options(&registry, RenderOptions::preview());
    let store = catalog();
    let tokens = ThemeTokens::default();
    let ctx = RenderContext::new(&store, &tokens);

    let layout = vec![
        LayoutBlock::hero("h1", HeroProps::default()),
        LayoutBlock::from_parts("legacy", "slideshow_v0", Default::default()),
        LayoutBlock::marquee("m1", MarqueeProps::default()),
    ];

    let nodes = renderer.render(&layout, &ctx);

    assert_eq!(nodes.len(), 3);
    assert!(matches!(&nodes[1], VNode::Placeholder { block_type, .. } if block_type == "slideshow_v0"));
    assert_eq!(nodes[2].key(), Some("m1"));
}

#[test]
fn test_custom_block_type_is_additive() {
    let mut registry = BlockRegistry::with_built_ins();
    registry.register_fn("countdown", |block, _ctx| {
        let label = match &block.props {
            storefront_document::BlockProps::Custom { props, .. } => props
                .get("label")
                .and_then(|value| value.as_str())
                .unwrap_or("Soon")
                .to_string(),
            _ => "Soon".to_string(),
        };
        Some(VNode::element("div").with_text(&label))
    });

    let renderer = Renderer::new(&registry);
    let store = catalog();
    let tokens = ThemeTokens::default();
    let ctx = RenderContext::new(&store, &tokens);

    let mut props = serde_json::Map::new();
    props.insert("label".to_string(), serde_json::json!("Ends tonight"));
    let nodes = renderer.render(&[LayoutBlock::from_parts("c1", "countdown", props)], &ctx);

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].text_content(), "Ends tonight");
    assert_eq!(nodes[0].key(), Some("c1"));
}

#[test]
fn test_empty_product_layout_renders_nothing() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::new(&registry);

    let page = renderer.render_page(&theme(), Page::Product, &catalog());

    assert!(page.nodes.is_empty());
    assert!(!page.styles.is_empty());
}

#[test]
fn test_zero_decimal_prices_in_grid() {
    let registry = BlockRegistry::with_built_ins();
    let renderer = Renderer::new(&registry);

    let page = renderer.render_page(&theme(), Page::Home, &catalog());
    let grid = page
        .nodes
        .iter()
        .find(|node| node.key() == Some("g1"))
        .expect("grid rendered");

    assert!(grid.text_content().contains("IDR 250,000"));
}
