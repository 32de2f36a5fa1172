use crate::LayoutBlock;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::ops::Deref;
use tracing::warn;

/// Ordered sequence of blocks; order is render order.
///
/// Lookup is by block id. Ids are expected to be unique but are not enforced;
/// every id-based operation acts on the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout(Vec<LayoutBlock>);

impl Layout {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|block| block.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&LayoutBlock> {
        self.0.iter().find(|block| block.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut LayoutBlock> {
        self.0.iter_mut().find(|block| block.id == id)
    }

    pub fn push(&mut self, block: LayoutBlock) {
        self.0.push(block);
    }

    /// Insert at `index`, clamped to the end. Returns the actual index.
    pub fn insert(&mut self, index: usize, block: LayoutBlock) -> usize {
        let index = index.min(self.0.len());
        self.0.insert(index, block);
        index
    }

    /// Remove the first block with `id`
    pub fn remove(&mut self, id: &str) -> Option<LayoutBlock> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    /// Move the block at `from` so it ends up at `to`.
    ///
    /// `from` must point at an existing block; `to` is clamped to the last
    /// index. Returns true if the order changed.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        if from >= self.0.len() {
            return false;
        }

        let to = to.min(self.0.len() - 1);
        if from == to {
            return false;
        }

        let block = self.0.remove(from);
        self.0.insert(to, block);
        true
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|block| block.id.as_str()).collect()
    }

    pub fn into_inner(self) -> Vec<LayoutBlock> {
        self.0
    }
}

/// Entries that are not block objects are dropped so the rest of the page
/// still loads.
impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = match Value::deserialize(deserializer)? {
            Value::Array(entries) => entries,
            Value::Null => Vec::new(),
            other => {
                warn!(layout = %other, "Layout is not an array, using an empty layout");
                Vec::new()
            }
        };

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                if !entry.is_object() {
                    warn!(index, entry = %entry, "Layout entry is not a block, skipping");
                    return None;
                }
                match serde_json::from_value::<LayoutBlock>(entry) {
                    Ok(block) => Some(block),
                    Err(err) => {
                        warn!(index, error = %err, "Layout entry failed to decode, skipping");
                        None
                    }
                }
            })
            .collect())
    }
}

impl Deref for Layout {
    type Target = [LayoutBlock];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<LayoutBlock>> for Layout {
    fn from(blocks: Vec<LayoutBlock>) -> Self {
        Self(blocks)
    }
}

impl FromIterator<LayoutBlock> for Layout {
    fn from_iter<I: IntoIterator<Item = LayoutBlock>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a LayoutBlock;
    type IntoIter = std::slice::Iter<'a, LayoutBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeroProps, MarqueeProps, ProductGridProps};

    fn sample() -> Layout {
        Layout::from(vec![
            LayoutBlock::hero("h1", HeroProps::default()),
            LayoutBlock::product_grid("g1", ProductGridProps::default()),
            LayoutBlock::marquee("m1", MarqueeProps::default()),
        ])
    }

    #[test]
    fn test_move_forward_and_back() {
        let mut layout = sample();

        assert!(layout.move_block(0, 2));
        assert_eq!(layout.ids(), vec!["g1", "m1", "h1"]);

        assert!(layout.move_block(2, 0));
        assert_eq!(layout.ids(), vec!["h1", "g1", "m1"]);
    }

    #[test]
    fn test_move_clamps_target() {
        let mut layout = sample();

        assert!(layout.move_block(0, 99));
        assert_eq!(layout.ids(), vec!["g1", "m1", "h1"]);
    }

    #[test]
    fn test_move_rejects_missing_source() {
        let mut layout = sample();

        assert!(!layout.move_block(3, 0));
        assert!(!layout.move_block(1, 1));
        assert_eq!(layout.ids(), vec!["h1", "g1", "m1"]);

        let mut empty = Layout::new();
        assert!(!empty.move_block(0, 0));
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut layout = sample();
        layout.push(LayoutBlock::hero("h1", HeroProps::default()));

        assert!(layout.remove("h1").is_some());
        assert_eq!(layout.ids(), vec!["g1", "m1", "h1"]);
        assert!(layout.remove("missing").is_none());
    }

    #[test]
    fn test_non_block_entries_are_skipped() {
        let layout: Layout = serde_json::from_value(serde_json::json!([
            { "id": "h1", "type": "hero_v1" },
            "legacy",
            42,
            { "id": "m1", "type": "marquee" }
        ]))
        .unwrap();

        assert_eq!(layout.ids(), vec!["h1", "m1"]);
    }

    #[test]
    fn test_non_array_layout_is_empty() {
        let layout: Layout = serde_json::from_str(r#""hero_v1""#).unwrap();

        assert!(layout.is_empty());
    }
}
