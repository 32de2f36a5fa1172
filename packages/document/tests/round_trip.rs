//! Persistence round-trip tests

use serde_json::json;
use storefront_document::{
    BlockProps, HeroProps, ImageBannerProps, Layout, LayoutBlock, MarqueeProps, Page,
    ProductGridProps, ThemeConfig, ThemeTokens,
};

fn full_document() -> ThemeConfig {
    let mut custom_props = serde_json::Map::new();
    custom_props.insert("ends_at".to_string(), json!("2026-12-31T00:00:00Z"));
    custom_props.insert("style".to_string(), json!({ "compact": true }));

    ThemeConfig {
        tokens: ThemeTokens {
            primary: "#123456".to_string(),
            font_family: "Poppins".to_string(),
            ..Default::default()
        },
        layout_home: Layout::from(vec![
            LayoutBlock::hero(
                "h1",
                HeroProps {
                    title: "Batik Week".to_string(),
                    background_image: Some("https://cdn.example.com/hero.jpg".to_string()),
                    ..Default::default()
                },
            ),
            LayoutBlock::marquee("m1", MarqueeProps::default()),
            LayoutBlock::from_parts("c1", "countdown", custom_props),
            LayoutBlock::product_grid(
                "g1",
                ProductGridProps {
                    columns: 3,
                    limit: 6,
                    ..Default::default()
                },
            ),
        ]),
        layout_product: Some(Layout::from(vec![LayoutBlock::image_banner(
            "b1",
            ImageBannerProps {
                image_url: Some("https://cdn.example.com/banner.png".to_string()),
                link: Some("/sale".to_string()),
                ..Default::default()
            },
        )])),
    }
}

#[test]
fn test_round_trip_preserves_document() {
    let document = full_document();

    let json = document.to_json().expect("serialize");
    let restored = ThemeConfig::from_json(&json).expect("deserialize");

    assert_eq!(restored, document);
    assert_eq!(restored.layout_home.ids(), vec!["h1", "m1", "c1", "g1"]);
}

#[test]
fn test_round_trip_pretty_json() {
    let document = full_document();

    let json = document.to_json_pretty().expect("serialize");
    let restored = ThemeConfig::from_json(&json).expect("deserialize");

    assert_eq!(restored, document);
}

#[test]
fn test_round_trip_default_document() {
    let document = ThemeConfig::default();
    let restored = ThemeConfig::from_json(&document.to_json().unwrap()).unwrap();

    assert_eq!(restored, document);
}

#[test]
fn test_forward_compatible_keys() {
    let value = json!({
        "tokens": { "primary": "#000000", "shadow": "lg" },
        "layout_home": [
            { "id": "h1", "type": "hero_v1", "props": { "title": "Hello", "animation": "fade" }, "locked": true }
        ],
        "schema_version": 3
    });

    let theme = ThemeConfig::from_value(value).expect("unknown keys are tolerated");

    assert_eq!(theme.tokens.primary, "#000000");
    assert!(theme.layout_product.is_none());

    let saved = serde_json::to_value(&theme).unwrap();
    assert_eq!(saved["layout_home"][0]["props"]["animation"], "fade");
}

#[test]
fn test_legacy_block_survives() {
    let value = json!({
        "layout_home": [
            { "id": "old", "type": "slideshow_v0", "props": { "slides": [1, 2, 3] } }
        ]
    });

    let theme = ThemeConfig::from_value(value.clone()).unwrap();
    match &theme.layout(Page::Home)[0].props {
        BlockProps::Custom { block_type, props } => {
            assert_eq!(block_type, "slideshow_v0");
            assert_eq!(props["slides"], json!([1, 2, 3]));
        }
        other => panic!("Expected custom block, got {:?}", other),
    }

    let saved = serde_json::to_value(&theme).unwrap();
    assert_eq!(saved["layout_home"], value["layout_home"]);
}

#[test]
fn test_malformed_entries_do_not_lose_good_blocks() {
    let source = r##"{
        "tokens": { "primary": 5, "secondary": "#111111" },
        "layout_home": [
            { "id": "h1", "type": "hero_v1", "props": { "title": "Batik Week" } },
            { "id": 5, "type": "marquee", "props": { "text": "Free shipping" } },
            "legacy",
            { "id": "g1", "type": { "name": "product_grid" } },
            { "id": "g2", "type": "product_grid" }
        ]
    }"##;

    let theme = ThemeConfig::from_json(source).expect("malformed entries are tolerated");

    assert_eq!(theme.tokens.primary, ThemeTokens::default().primary);
    assert_eq!(theme.tokens.secondary, "#111111");
    assert_eq!(theme.layout_home.ids(), vec!["h1", "5", "g1", "g2"]);

    let blocks = theme.layout(Page::Home);
    match &blocks[0].props {
        BlockProps::Hero(hero) => assert_eq!(hero.title, "Batik Week"),
        other => panic!("Expected hero props, got {:?}", other),
    }
    assert_eq!(blocks[1].block_type(), "marquee");
    assert_eq!(blocks[2].block_type(), "");
    assert_eq!(blocks[3].block_type(), "product_grid");
}
