use crate::PropMap;
use serde::{Deserialize, Serialize};

/// Product as supplied by the catalog; passed to block renderers unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub extra: PropMap,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            price,
            images: Vec::new(),
            extra: PropMap::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
