//! # Storefront Editor
//!
//! In-memory editing of a store's theme, feeding both the live preview and
//! the persistence boundary.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ThemeStore: load stored ThemeConfig         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor + mutations                  │
//! │  - Add / insert / remove / update blocks    │
//! │  - Reorder blocks, merge tokens             │
//! │  - Single in-flight save, validated         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: same code path as the storefront  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use storefront_document::TokensPatch;
//! use storefront_editor::{Editor, MemoryThemeStore};
//! use storefront_renderer::{BlockRegistry, Renderer, StoreContext};
//! use storefront_document::Page;
//!
//! let registry = BlockRegistry::with_built_ins();
//! let store = MemoryThemeStore::new();
//!
//! // Load, or provision the default theme
//! let mut editor = Editor::load(&store, "batik").unwrap();
//!
//! // Mutate
//! editor.reorder_blocks(0, 1).unwrap();
//! editor
//!     .update_tokens(TokensPatch::primary("#123456"))
//!     .unwrap();
//!
//! // Preview through the storefront renderer
//! let page = editor.preview(&Renderer::new(&registry), &StoreContext::new("batik"), Page::Home);
//! assert_eq!(page.nodes.len(), 2);
//!
//! // Save
//! editor.save(&store).unwrap();
//! assert!(!editor.is_dirty());
//! ```

mod editor;
mod errors;
mod mutations;
mod pipeline;
mod store;
mod validator;

pub use editor::{Editor, SaveTicket};
pub use errors::{EditorError, PersistError};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use pipeline::{Pipeline, PipelineResult};
pub use store::{FileThemeStore, MemoryThemeStore, ThemeStore};
pub use validator::{has_errors, ValidationLevel, ValidationWarning, Validator};
