//! # Editor State
//!
//! `Editor` is the in-memory mutation surface over one store's theme. Every
//! mutation is synchronous and visible to the next preview.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Mutate → Preview → begin_save → store.save → finish_save
//!  ↓        ↓         ↓          ↓                         ↓
//! Store  ThemeConfig VNodes   Snapshot               clean / error
//! ```
//!
//! Only one save may be in flight. A failed save leaves the document, its
//! version and the dirty flag exactly as they were.

use crate::validator::{has_errors, Validator};
use crate::{EditorError, Mutation, MutationResult, PersistError, ThemeStore};
use storefront_document::{LayoutBlock, Page, PropMap, ThemeConfig, TokensPatch};
use std::sync::atomic::{AtomicU64, Ordering};
use storefront_renderer::{RenderedPage, Renderer, StoreContext};
use tracing::{debug, info, warn};

/// Source of save ticket ids, unique across every editor in the process
static NEXT_SAVE_ID: AtomicU64 = AtomicU64::new(1);

/// Editable theme of one store
#[derive(Debug, Clone)]
pub struct Editor {
    store_slug: String,

    theme: ThemeConfig,

    /// Increments on each mutation that changes the document
    version: u64,

    /// Version last persisted
    saved_version: u64,

    /// Id of the ticket for the save in flight
    saving: Option<u64>,

    /// Block selected in the editor UI
    selection: Option<String>,
}

/// Snapshot handed to a theme store; proof that a save is in flight.
///
/// Each ticket completes at most one save: it is consumed by
/// [`Editor::finish_save`] and cannot be copied.
#[derive(Debug)]
pub struct SaveTicket {
    id: u64,
    version: u64,
    store_slug: String,
    theme: ThemeConfig,
}

impl SaveTicket {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn store_slug(&self) -> &str {
        &self.store_slug
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }
}

impl Editor {
    /// Editor over an existing theme, considered clean
    pub fn new(store_slug: impl Into<String>, theme: ThemeConfig) -> Self {
        Self {
            store_slug: store_slug.into(),
            theme,
            version: 0,
            saved_version: 0,
            saving: None,
            selection: None,
        }
    }

    /// Load a store's theme, provisioning the default document if it has none.
    ///
    /// A provisioned theme starts dirty so the first save persists it.
    pub fn load(store: &dyn ThemeStore, store_slug: &str) -> Result<Self, EditorError> {
        match store.load(store_slug)? {
            Some(theme) => {
                info!(store = store_slug, "Loaded theme");
                Ok(Self::new(store_slug, theme))
            }
            None => {
                info!(store = store_slug, "No stored theme, provisioning default");
                let mut editor = Self::new(store_slug, ThemeConfig::default());
                editor.version = 1;
                Ok(editor)
            }
        }
    }

    pub fn store_slug(&self) -> &str {
        &self.store_slug
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let changed = mutation.apply(&mut self.theme)?;

        if changed {
            self.version += 1;

            if let Mutation::RemoveBlock { block_id, .. } = &mutation {
                if self.selection.as_deref() == Some(block_id.as_str())
                    && !self.contains_block(block_id)
                {
                    self.selection = None;
                }
            }
        }

        debug!(?mutation, changed, version = self.version, "Applied mutation");

        Ok(MutationResult {
            version: self.version,
            changed,
        })
    }

    /// Append a block to the home page
    pub fn add_block(&mut self, block: LayoutBlock) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::AddBlock {
            page: Page::Home,
            block,
        })
    }

    /// Insert a block into the home page at a clamped position
    pub fn insert_block(
        &mut self,
        index: usize,
        block: LayoutBlock,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::InsertBlock {
            page: Page::Home,
            index,
            block,
        })
    }

    /// Remove a home page block by id
    pub fn remove_block(&mut self, block_id: &str) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::RemoveBlock {
            page: Page::Home,
            block_id: block_id.to_string(),
        })
    }

    /// Merge props into a home page block
    pub fn update_block(
        &mut self,
        block_id: &str,
        props: PropMap,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateBlock {
            page: Page::Home,
            block_id: block_id.to_string(),
            props,
        })
    }

    /// Move a home page block
    pub fn reorder_blocks(&mut self, from: usize, to: usize) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::ReorderBlocks {
            page: Page::Home,
            from,
            to,
        })
    }

    /// Merge a partial token record
    pub fn update_tokens(&mut self, tokens: TokensPatch) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateTokens { tokens })
    }

    /// Select a block by id. Returns false if no page has the block.
    pub fn select(&mut self, block_id: Option<&str>) -> bool {
        match block_id {
            Some(id) if self.contains_block(id) => {
                self.selection = Some(id.to_string());
                true
            }
            Some(_) => false,
            None => {
                self.selection = None;
                true
            }
        }
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Render the current document through the storefront renderer
    pub fn preview(&self, renderer: &Renderer<'_>, store: &StoreContext, page: Page) -> RenderedPage {
        renderer.render_page(&self.theme, page, store)
    }

    /// Validate and snapshot the document for saving
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.saving.is_some() {
            return Err(EditorError::SaveInProgress);
        }

        let findings = Validator::structural().validate(&self.theme);
        if has_errors(&findings) {
            let messages: Vec<&str> = findings
                .iter()
                .filter(|finding| finding.is_error())
                .map(|finding| finding.message.as_str())
                .collect();
            warn!(store = %self.store_slug, errors = messages.len(), "Save rejected by validation");
            return Err(PersistError::Validation(messages.join("; ")).into());
        }

        let id = NEXT_SAVE_ID.fetch_add(1, Ordering::Relaxed);
        self.saving = Some(id);

        Ok(SaveTicket {
            id,
            version: self.version,
            store_slug: self.store_slug.clone(),
            theme: self.theme.clone(),
        })
    }

    /// Complete a save with the store's result.
    ///
    /// On success the document is clean unless it was mutated after the
    /// snapshot. On failure the error is returned and nothing else changes.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<(), PersistError>,
    ) -> Result<(), EditorError> {
        if self.saving != Some(ticket.id) {
            return Err(EditorError::StaleSaveTicket);
        }

        self.saving = None;

        match result {
            Ok(()) => {
                self.saved_version = ticket.version;
                info!(store = %self.store_slug, version = ticket.version, "Saved theme");
                Ok(())
            }
            Err(err) => {
                warn!(store = %self.store_slug, error = %err, "Save failed");
                Err(err.into())
            }
        }
    }

    /// Save synchronously to `store`
    pub fn save(&mut self, store: &dyn ThemeStore) -> Result<(), EditorError> {
        let ticket = self.begin_save()?;
        let result = store.save(ticket.store_slug(), ticket.theme());
        self.finish_save(ticket, result)
    }

    fn contains_block(&self, block_id: &str) -> bool {
        self.theme.layout(Page::Home).iter().any(|block| block.id == block_id)
            || self
                .theme
                .layout(Page::Product)
                .iter()
                .any(|block| block.id == block_id)
    }
}
