//! # Preview Pipeline
//!
//! Coordinates the editor loop: Mutate → Render → Cache
//!
//! The Pipeline manages:
//! - Applying mutations to the editor
//! - Re-rendering the previewed page through the storefront renderer
//! - Reusing the cached preview when a mutation changed nothing

use crate::{Editor, EditorError, Mutation};
use storefront_document::Page;
use storefront_renderer::{RenderedPage, Renderer, StoreContext};
use tracing::debug;

/// Manages the full edit → render loop for one previewed page
pub struct Pipeline<'r> {
    editor: Editor,
    renderer: Renderer<'r>,
    store: StoreContext,
    page: Page,
    last_preview: Option<RenderedPage>,
}

impl<'r> Pipeline<'r> {
    /// Create pipeline previewing the home page
    pub fn new(editor: Editor, renderer: Renderer<'r>, store: StoreContext) -> Self {
        Self {
            editor,
            renderer,
            store,
            page: Page::Home,
            last_preview: None,
        }
    }

    /// Apply mutation and return the refreshed preview
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let result = self.editor.apply(mutation)?;

        let preview = match (&self.last_preview, result.changed) {
            (Some(cached), false) => cached.clone(),
            _ => self.full_render(),
        };

        Ok(PipelineResult {
            version: result.version,
            changed: result.changed,
            preview,
        })
    }

    /// Render from scratch and refresh the cache
    pub fn full_render(&mut self) -> RenderedPage {
        debug!(page = %self.page, version = self.editor.version(), "Rendering preview");
        let preview = self.editor.preview(&self.renderer, &self.store, self.page);
        self.last_preview = Some(preview.clone());
        preview
    }

    /// Switch the previewed page
    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            self.page = page;
            self.last_preview = None;
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Replace the render context, e.g. after the catalog changed
    pub fn set_store(&mut self, store: StoreContext) {
        self.store = store;
        self.last_preview = None;
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Mutating the editor directly bypasses the cache; call `full_render` after
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    pub fn last_preview(&self) -> Option<&RenderedPage> {
        self.last_preview.as_ref()
    }
}

/// Result of a pipeline mutation
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Document version after mutation
    pub version: u64,

    /// Whether the document changed
    pub changed: bool,

    /// Preview of the current page
    pub preview: RenderedPage,
}
