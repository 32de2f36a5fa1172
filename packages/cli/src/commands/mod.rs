pub mod block;
pub mod init;
pub mod render;
pub mod tokens;
pub mod validate;

pub use block::{block, BlockCommand};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use tokens::{tokens, TokensArgs};
pub use validate::{validate, ValidateArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;
use storefront_editor::{Editor, FileThemeStore};

/// Open the configured store's theme for editing
pub(crate) fn open_editor(cwd: &Path) -> Result<(Config, FileThemeStore, Editor)> {
    let config = Config::load(cwd)?;
    let store = config.theme_store(cwd);
    let editor = Editor::load(&store, &config.store_slug)
        .with_context(|| format!("Cannot load theme for store '{}'", config.store_slug))?;

    Ok((config, store, editor))
}
