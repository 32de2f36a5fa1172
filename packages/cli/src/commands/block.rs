use super::open_editor;
use anyhow::{anyhow, bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;
use storefront_document::{Page, PropMap};
use storefront_editor::{Mutation, MutationResult};
use storefront_renderer::BlockRegistry;

#[derive(Subcommand, Debug)]
pub enum BlockCommand {
    /// List the blocks of a page
    List {
        #[arg(short, long, default_value = "home")]
        page: Page,
    },

    /// List registered block types
    Types,

    /// Add a block of a registered type
    Add {
        /// Block type (e.g. hero_v1, product_grid)
        block_type: String,

        /// Props to merge over the defaults, as a JSON object
        #[arg(long)]
        props: Option<String>,

        /// Insert at this position instead of appending
        #[arg(long)]
        at: Option<usize>,

        #[arg(short, long, default_value = "home")]
        page: Page,
    },

    /// Remove a block by id
    Remove {
        id: String,

        #[arg(short, long, default_value = "home")]
        page: Page,
    },

    /// Merge JSON props into a block
    Update {
        id: String,

        /// Props as a JSON object
        props: String,

        #[arg(short, long, default_value = "home")]
        page: Page,
    },

    /// Move the block at one position to another
    Move {
        from: usize,
        to: usize,

        #[arg(short, long, default_value = "home")]
        page: Page,
    },
}

pub fn block(command: BlockCommand, cwd: &Path) -> Result<()> {
    let (_config, store, mut editor) = open_editor(cwd)?;
    let registry = BlockRegistry::with_built_ins();

    let mutation = match command {
        BlockCommand::List { page } => {
            list_blocks(editor.theme().layout(page), &registry, page);
            return Ok(());
        }

        BlockCommand::Types => {
            for block_type in registry.types() {
                let label = registry
                    .resolve(block_type)
                    .map(|renderer| renderer.label().to_string())
                    .unwrap_or_default();
                println!("  {:<14} {}", block_type.bright_white(), label.dimmed());
            }
            return Ok(());
        }

        BlockCommand::Add {
            block_type,
            props,
            at,
            page,
        } => {
            let mut block = registry.create_block(&block_type).ok_or_else(|| {
                anyhow!(
                    "Unknown block type '{}'. Available: {}",
                    block_type,
                    registry.types().join(", ")
                )
            })?;

            if let Some(props) = props {
                block.props.merge(&parse_props(&props)?);
            }

            println!("  {} Added {}", "✓".green(), block.id.bright_white());

            match at {
                Some(index) => Mutation::InsertBlock { page, index, block },
                None => Mutation::AddBlock { page, block },
            }
        }

        BlockCommand::Remove { id, page } => Mutation::RemoveBlock { page, block_id: id },

        BlockCommand::Update { id, props, page } => Mutation::UpdateBlock {
            page,
            block_id: id,
            props: parse_props(&props)?,
        },

        BlockCommand::Move { from, to, page } => Mutation::ReorderBlocks { page, from, to },
    };

    let page = mutation.page().unwrap_or_default();
    let MutationResult { changed, .. } = editor.apply(mutation)?;

    if !changed {
        println!("{}", "⚠️  Nothing changed".yellow());
        return Ok(());
    }

    editor.save(&store)?;
    list_blocks(editor.theme().layout(page), &registry, page);

    Ok(())
}

fn parse_props(source: &str) -> Result<PropMap> {
    let value: serde_json::Value =
        serde_json::from_str(source).context("Props must be valid JSON")?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("Props must be a JSON object"),
    }
}

fn list_blocks(layout: &[storefront_document::LayoutBlock], registry: &BlockRegistry, page: Page) {
    println!("{} {} page", "📄".bright_blue(), page);

    if layout.is_empty() {
        println!("  {}", "(no blocks)".dimmed());
        return;
    }

    for (index, block) in layout.iter().enumerate() {
        let block_type = block.block_type();
        let status = if registry.contains(block_type) {
            block_type.normal()
        } else {
            format!("{} (unknown)", block_type).red()
        };

        println!("  {:>2}. {}  {}", index, block.id.bright_white(), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_props() {
        let props = parse_props(r#"{ "title": "Sale", "columns": 3 }"#).unwrap();
        assert_eq!(props.len(), 2);

        assert!(parse_props("[1, 2]").is_err());
        assert!(parse_props("{ nope").is_err());
    }
}
