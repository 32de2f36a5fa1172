//! # Layout Blocks
//!
//! A block is one independently renderable section of a page. On disk it is
//! `{ "id", "type", "props" }`; in memory the `type` tag selects a typed
//! props variant.
//!
//! ## Decoding rules
//!
//! - Known types decode into their typed props. Missing fields take the
//!   documented defaults.
//! - A field with the wrong shape is dropped (and logged) while the rest of the
//!   props are kept. A block never fails to load because of its props.
//! - Unknown types are preserved untouched in [`BlockProps::Custom`].
//! - Keys a typed props struct doesn't declare are kept in its `extra` map.

use crate::PropMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use tracing::warn;

/// Identifiers of the built-in block types
pub mod block_types {
    pub const HERO: &str = "hero_v1";
    pub const PRODUCT_GRID: &str = "product_grid";
    pub const MARQUEE: &str = "marquee";
    pub const IMAGE_BANNER: &str = "image_banner";

    pub const BUILT_IN: [&str; 4] = [HERO, PRODUCT_GRID, MARQUEE, IMAGE_BANNER];
}

use block_types::{HERO, IMAGE_BANNER, MARQUEE, PRODUCT_GRID};

/// Full-width banner with a heading and a call to action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroProps {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(flatten)]
    pub extra: PropMap,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            title: "Welcome to our store".to_string(),
            subtitle: "Discover our latest collection".to_string(),
            cta_text: "Shop Now".to_string(),
            cta_link: "#products".to_string(),
            background_image: None,
            extra: PropMap::new(),
        }
    }
}

/// Grid of product cards drawn from the render context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductGridProps {
    pub title: String,
    pub columns: u32,
    /// Maximum number of products shown
    pub limit: usize,
    pub show_price: bool,
    #[serde(flatten)]
    pub extra: PropMap,
}

impl Default for ProductGridProps {
    fn default() -> Self {
        Self {
            title: "Featured Products".to_string(),
            columns: 4,
            limit: 8,
            show_price: true,
            extra: PropMap::new(),
        }
    }
}

/// Scrolling announcement strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeProps {
    pub text: String,
    /// Seconds per full scroll loop
    pub speed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: PropMap,
}

impl Default for MarqueeProps {
    fn default() -> Self {
        Self {
            text: "Free shipping on all orders".to_string(),
            speed: 20,
            background: None,
            color: None,
            extra: PropMap::new(),
        }
    }
}

/// Single image, optionally linked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageBannerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub height: String,
    #[serde(flatten)]
    pub extra: PropMap,
}

impl Default for ImageBannerProps {
    fn default() -> Self {
        Self {
            image_url: None,
            alt: String::new(),
            link: None,
            height: "400px".to_string(),
            extra: PropMap::new(),
        }
    }
}

/// Typed props of a built-in block type
pub trait TypedProps: Clone + Default + Serialize + DeserializeOwned {
    const BLOCK_TYPE: &'static str;

    fn extract(props: &BlockProps) -> Option<&Self>;
}

impl TypedProps for HeroProps {
    const BLOCK_TYPE: &'static str = HERO;

    fn extract(props: &BlockProps) -> Option<&Self> {
        match props {
            BlockProps::Hero(props) => Some(props),
            _ => None,
        }
    }
}

impl TypedProps for ProductGridProps {
    const BLOCK_TYPE: &'static str = PRODUCT_GRID;

    fn extract(props: &BlockProps) -> Option<&Self> {
        match props {
            BlockProps::ProductGrid(props) => Some(props),
            _ => None,
        }
    }
}

impl TypedProps for MarqueeProps {
    const BLOCK_TYPE: &'static str = MARQUEE;

    fn extract(props: &BlockProps) -> Option<&Self> {
        match props {
            BlockProps::Marquee(props) => Some(props),
            _ => None,
        }
    }
}

impl TypedProps for ImageBannerProps {
    const BLOCK_TYPE: &'static str = IMAGE_BANNER;

    fn extract(props: &BlockProps) -> Option<&Self> {
        match props {
            BlockProps::ImageBanner(props) => Some(props),
            _ => None,
        }
    }
}

/// Block props, tagged by block type
#[derive(Debug, Clone, PartialEq)]
pub enum BlockProps {
    Hero(HeroProps),
    ProductGrid(ProductGridProps),
    Marquee(MarqueeProps),
    ImageBanner(ImageBannerProps),

    /// Any type without typed props (legacy or third-party blocks)
    Custom { block_type: String, props: PropMap },
}

impl BlockProps {
    /// Default props for a built-in type, `None` for anything else
    pub fn defaults(block_type: &str) -> Option<Self> {
        match block_type {
            HERO => Some(BlockProps::Hero(HeroProps::default())),
            PRODUCT_GRID => Some(BlockProps::ProductGrid(ProductGridProps::default())),
            MARQUEE => Some(BlockProps::Marquee(MarqueeProps::default())),
            IMAGE_BANNER => Some(BlockProps::ImageBanner(ImageBannerProps::default())),
            _ => None,
        }
    }

    /// The runtime type tag
    pub fn block_type(&self) -> &str {
        match self {
            BlockProps::Hero(_) => HERO,
            BlockProps::ProductGrid(_) => PRODUCT_GRID,
            BlockProps::Marquee(_) => MARQUEE,
            BlockProps::ImageBanner(_) => IMAGE_BANNER,
            BlockProps::Custom { block_type, .. } => block_type,
        }
    }

    /// Decode a persisted property bag for the given type (never fails)
    pub fn decode(block_type: &str, props: PropMap) -> Self {
        let (decoded, dropped) = match block_type {
            HERO => decode_lenient(props, BlockProps::Hero),
            PRODUCT_GRID => decode_lenient(props, BlockProps::ProductGrid),
            MARQUEE => decode_lenient(props, BlockProps::Marquee),
            IMAGE_BANNER => decode_lenient(props, BlockProps::ImageBanner),
            _ => {
                return BlockProps::Custom {
                    block_type: block_type.to_string(),
                    props,
                }
            }
        };

        if !dropped.is_empty() {
            warn!(block_type, fields = ?dropped, "Dropped malformed block props, defaults apply");
        }

        decoded
    }

    /// View these props as `T`.
    ///
    /// Props of another variant are re-decoded as `T` from their property
    /// bag, so a renderer registered under an alias type still sees its
    /// fields; anything undecodable falls back to `T::default()`.
    pub fn typed<T: TypedProps>(&self) -> Cow<'_, T> {
        if let Some(props) = T::extract(self) {
            return Cow::Borrowed(props);
        }

        let decoded = Self::decode(T::BLOCK_TYPE, self.to_map());
        Cow::Owned(T::extract(&decoded).cloned().unwrap_or_default())
    }

    /// Property bag as it is persisted
    pub fn to_map(&self) -> PropMap {
        match self {
            BlockProps::Hero(props) => to_prop_map(props),
            BlockProps::ProductGrid(props) => to_prop_map(props),
            BlockProps::Marquee(props) => to_prop_map(props),
            BlockProps::ImageBanner(props) => to_prop_map(props),
            BlockProps::Custom { props, .. } => props.clone(),
        }
    }

    /// Shallow-merge `partial` into these props.
    ///
    /// Keys whose value doesn't fit the typed props are rejected and the
    /// current value is kept. Returns true if the props changed.
    pub fn merge(&mut self, partial: &PropMap) -> bool {
        let block_type = self.block_type().to_string();
        let mut merged = self.to_map();
        let mut rejected = Vec::new();

        for (key, value) in partial {
            let mut candidate = merged.clone();
            candidate.insert(key.clone(), value.clone());

            if accepts(&block_type, &candidate) {
                merged = candidate;
            } else {
                rejected.push(key.clone());
            }
        }

        if !rejected.is_empty() {
            warn!(block_type = %block_type, fields = ?rejected, "Rejected malformed prop update");
        }

        let next = Self::decode(&block_type, merged);
        if next == *self {
            return false;
        }

        *self = next;
        true
    }
}

/// Whether `props` decodes cleanly for `block_type`
fn accepts(block_type: &str, props: &PropMap) -> bool {
    let value = Value::Object(props.clone());
    match block_type {
        HERO => serde_json::from_value::<HeroProps>(value).is_ok(),
        PRODUCT_GRID => serde_json::from_value::<ProductGridProps>(value).is_ok(),
        MARQUEE => serde_json::from_value::<MarqueeProps>(value).is_ok(),
        IMAGE_BANNER => serde_json::from_value::<ImageBannerProps>(value).is_ok(),
        _ => true,
    }
}

/// Decode typed props, dropping any field that prevents decoding.
/// Returns the props and the names of the dropped fields.
fn decode_lenient<T>(props: PropMap, wrap: fn(T) -> BlockProps) -> (BlockProps, Vec<String>)
where
    T: DeserializeOwned + Default,
{
    if let Ok(value) = serde_json::from_value::<T>(Value::Object(props.clone())) {
        return (wrap(value), Vec::new());
    }

    let mut kept = PropMap::new();
    let mut dropped = Vec::new();

    for (key, value) in props {
        let mut candidate = kept.clone();
        candidate.insert(key.clone(), value.clone());

        if serde_json::from_value::<T>(Value::Object(candidate)).is_ok() {
            kept.insert(key, value);
        } else {
            dropped.push(key);
        }
    }

    let value = serde_json::from_value::<T>(Value::Object(kept)).unwrap_or_default();
    (wrap(value), dropped)
}

fn to_prop_map<T: Serialize>(props: &T) -> PropMap {
    match serde_json::to_value(props) {
        Ok(Value::Object(map)) => map,
        _ => PropMap::new(),
    }
}

/// One block instance in a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct LayoutBlock {
    /// Stable identity within the containing layout
    pub id: String,
    pub props: BlockProps,
}

impl LayoutBlock {
    pub fn new(id: impl Into<String>, props: BlockProps) -> Self {
        Self {
            id: id.into(),
            props,
        }
    }

    /// Block of any type from a raw property bag
    pub fn from_parts(id: impl Into<String>, block_type: &str, props: PropMap) -> Self {
        Self::new(id, BlockProps::decode(block_type, props))
    }

    pub fn hero(id: impl Into<String>, props: HeroProps) -> Self {
        Self::new(id, BlockProps::Hero(props))
    }

    pub fn product_grid(id: impl Into<String>, props: ProductGridProps) -> Self {
        Self::new(id, BlockProps::ProductGrid(props))
    }

    pub fn marquee(id: impl Into<String>, props: MarqueeProps) -> Self {
        Self::new(id, BlockProps::Marquee(props))
    }

    pub fn image_banner(id: impl Into<String>, props: ImageBannerProps) -> Self {
        Self::new(id, BlockProps::ImageBanner(props))
    }

    pub fn block_type(&self) -> &str {
        self.props.block_type()
    }
}

/// Wire shape of a block.
///
/// Every field is read as a raw value so a mistyped id or type degrades to an
/// empty string, which the save-time validator reports, instead of failing
/// the whole document.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: Value,
    #[serde(rename = "type", default)]
    block_type: Value,
    #[serde(default)]
    props: Value,
}

impl From<RawBlock> for LayoutBlock {
    fn from(raw: RawBlock) -> Self {
        let id = coerce_string("id", raw.id);
        let block_type = coerce_string("type", raw.block_type);

        let props = match raw.props {
            Value::Object(map) => map,
            Value::Null => PropMap::new(),
            other => {
                warn!(block_id = %id, props = %other, "Block props are not an object, ignoring");
                PropMap::new()
            }
        };

        LayoutBlock::from_parts(id, &block_type, props)
    }
}

impl From<LayoutBlock> for RawBlock {
    fn from(block: LayoutBlock) -> Self {
        RawBlock {
            block_type: Value::String(block.block_type().to_string()),
            props: Value::Object(block.props.to_map()),
            id: Value::String(block.id),
        }
    }
}

/// Scalars keep their text form; anything else becomes empty
fn coerce_string(field: &str, value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            warn!(field, value = %other, "Block field is not a string, using empty value");
            String::new()
        }
    }
}
