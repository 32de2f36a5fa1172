use super::open_editor;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use storefront_compiler_html::{compile_to_html, CompileOptions};
use storefront_document::Page;
use storefront_renderer::{BlockRegistry, RenderOptions, Renderer};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page to render (home, product)
    #[arg(short, long, default_value = "home")]
    pub page: Page,

    /// Show placeholders for unknown block types
    #[arg(long)]
    pub preview: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let (config, _store, editor) = open_editor(cwd)?;
    let store = config.store_context(cwd)?;

    let registry = BlockRegistry::with_built_ins();
    let options = if args.preview {
        RenderOptions::preview()
    } else {
        RenderOptions::default()
    };
    let renderer = Renderer::with_options(&registry, options);

    let page = editor.preview(&renderer, &store, args.page);
    let html = compile_to_html(
        &page,
        CompileOptions {
            pretty: !args.compact,
            title: config.store_slug.clone(),
            ..Default::default()
        },
    )?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(dir) => cwd.join(dir),
        None => config.get_out_dir(cwd),
    };
    fs::create_dir_all(&out_dir)?;

    let output_path = out_dir.join(output_file_name(args.page));
    fs::write(&output_path, html)?;

    println!(
        "  {} {} page ({} blocks) → {}",
        "✓".green(),
        args.page,
        page.nodes.len(),
        output_path.display()
    );

    Ok(())
}

fn output_file_name(page: Page) -> &'static str {
    match page {
        Page::Home => "index.html",
        Page::Product => "product.html",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};

    #[test]
    fn test_render_writes_index() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                store: "batik".to_string(),
                currency: "USD".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        render(
            RenderArgs {
                page: Page::Home,
                preview: false,
                stdout: false,
                compact: true,
                out_dir: None,
            },
            dir.path(),
        )
        .unwrap();

        let html = fs::read_to_string(dir.path().join("dist").join("index.html")).unwrap();
        assert!(html.contains("Welcome to our store"));
        assert!(html.contains("<title>batik</title>"));
    }
}
