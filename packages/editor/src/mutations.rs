//! # Layout Mutations
//!
//! The complete set of edits the editor can make to a theme document.
//!
//! ## Mutation Semantics
//!
//! ### AddBlock / InsertBlock
//! - Appends (or inserts at a clamped index); block ids are not checked for
//!   uniqueness
//! - Fails only for a block with an empty id or type
//!
//! ### RemoveBlock
//! - Removes the first block with the id; no-op if absent
//!
//! ### UpdateBlock
//! - Shallow-merges into the block's props; no-op if absent
//! - Other blocks are never touched
//!
//! ### ReorderBlocks
//! - Moves exactly one block; `from` must exist, `to` is clamped
//!
//! ### UpdateTokens
//! - Shallow-merges into the token record

use serde::{Deserialize, Serialize};
use storefront_document::{Layout, LayoutBlock, Page, PropMap, ThemeConfig, TokensPatch};
use thiserror::Error;

/// Semantic edits to a theme document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a block to the end of a page
    AddBlock {
        #[serde(default)]
        page: Page,
        block: LayoutBlock,
    },

    /// Insert a block at `index` (clamped to the layout length)
    InsertBlock {
        #[serde(default)]
        page: Page,
        index: usize,
        block: LayoutBlock,
    },

    /// Remove a block by id
    RemoveBlock {
        #[serde(default)]
        page: Page,
        block_id: String,
    },

    /// Merge props into a block
    UpdateBlock {
        #[serde(default)]
        page: Page,
        block_id: String,
        props: PropMap,
    },

    /// Move the block at `from` to `to`
    ReorderBlocks {
        #[serde(default)]
        page: Page,
        from: usize,
        to: usize,
    },

    /// Merge a partial token record
    UpdateTokens { tokens: TokensPatch },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block id must not be empty")]
    EmptyBlockId,

    #[error("Block type must not be empty (block {0})")]
    EmptyBlockType(String),
}

impl Mutation {
    /// Apply to a document. Returns true if the document changed.
    pub fn apply(&self, theme: &mut ThemeConfig) -> Result<bool, MutationError> {
        self.validate()?;

        let changed = match self {
            Mutation::AddBlock { page, block } => {
                theme.layout_mut(*page).push(block.clone());
                true
            }

            Mutation::InsertBlock { page, index, block } => {
                theme.layout_mut(*page).insert(*index, block.clone());
                true
            }

            Mutation::RemoveBlock { page, block_id } => {
                Self::existing_layout(theme, *page)
                    .map(|layout| layout.remove(block_id).is_some())
                    .unwrap_or(false)
            }

            Mutation::UpdateBlock {
                page,
                block_id,
                props,
            } => Self::existing_layout(theme, *page)
                .and_then(|layout| layout.find_mut(block_id))
                .map(|block| block.props.merge(props))
                .unwrap_or(false),

            Mutation::ReorderBlocks { page, from, to } => Self::existing_layout(theme, *page)
                .map(|layout| layout.move_block(*from, *to))
                .unwrap_or(false),

            Mutation::UpdateTokens { tokens } => theme.tokens.merge(tokens),
        };

        Ok(changed)
    }

    /// Validate without applying
    pub fn validate(&self) -> Result<(), MutationError> {
        match self {
            Mutation::AddBlock { block, .. } | Mutation::InsertBlock { block, .. } => {
                if block.id.is_empty() {
                    return Err(MutationError::EmptyBlockId);
                }
                if block.block_type().is_empty() {
                    return Err(MutationError::EmptyBlockType(block.id.clone()));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Page this mutation targets, `None` for token edits
    pub fn page(&self) -> Option<Page> {
        match self {
            Mutation::AddBlock { page, .. }
            | Mutation::InsertBlock { page, .. }
            | Mutation::RemoveBlock { page, .. }
            | Mutation::UpdateBlock { page, .. }
            | Mutation::ReorderBlocks { page, .. } => Some(*page),
            Mutation::UpdateTokens { .. } => None,
        }
    }

    /// Layout of a page without creating a missing product layout
    fn existing_layout(theme: &mut ThemeConfig, page: Page) -> Option<&mut Layout> {
        match page {
            Page::Home => Some(&mut theme.layout_home),
            Page::Product => theme.layout_product.as_mut(),
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Whether the document changed
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_document::{HeroProps, MarqueeProps, ProductGridProps};

    fn theme() -> ThemeConfig {
        ThemeConfig {
            layout_home: vec![
                LayoutBlock::hero("h1", HeroProps::default()),
                LayoutBlock::product_grid("g1", ProductGridProps::default()),
            ]
            .into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::ReorderBlocks {
            page: Page::Home,
            from: 0,
            to: 1,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_page_defaults_to_home() {
        let mutation: Mutation =
            serde_json::from_str(r#"{ "RemoveBlock": { "block_id": "h1" } }"#).unwrap();

        assert_eq!(mutation.page(), Some(Page::Home));
    }

    #[test]
    fn test_validation_rejects_empty_ids() {
        let mutation = Mutation::AddBlock {
            page: Page::Home,
            block: LayoutBlock::marquee("", MarqueeProps::default()),
        };

        assert_eq!(mutation.validate(), Err(MutationError::EmptyBlockId));
        assert!(mutation.apply(&mut theme()).is_err());
    }

    #[test]
    fn test_insert_block_clamps_index() {
        let mut theme = theme();

        let mutation = Mutation::InsertBlock {
            page: Page::Home,
            index: 1,
            block: LayoutBlock::marquee("m1", MarqueeProps::default()),
        };
        assert_eq!(mutation.apply(&mut theme), Ok(true));
        assert_eq!(theme.layout_home.ids(), vec!["h1", "m1", "g1"]);

        let mutation = Mutation::InsertBlock {
            page: Page::Home,
            index: 99,
            block: LayoutBlock::marquee("m2", MarqueeProps::default()),
        };
        assert_eq!(mutation.apply(&mut theme), Ok(true));
        assert_eq!(theme.layout_home.ids(), vec!["h1", "m1", "g1", "m2"]);
    }

    #[test]
    fn test_missing_product_layout_is_not_created_by_removal() {
        let mut theme = theme();

        let mutation = Mutation::RemoveBlock {
            page: Page::Product,
            block_id: "h1".to_string(),
        };

        assert_eq!(mutation.apply(&mut theme), Ok(false));
        assert!(theme.layout_product.is_none());
    }

    #[test]
    fn test_add_to_product_page() {
        let mut theme = theme();

        let mutation = Mutation::AddBlock {
            page: Page::Product,
            block: LayoutBlock::marquee("m1", MarqueeProps::default()),
        };

        assert_eq!(mutation.apply(&mut theme), Ok(true));
        assert_eq!(theme.layout(Page::Product).len(), 1);
        assert_eq!(theme.layout_home.len(), 2);
    }
}
