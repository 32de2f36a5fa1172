use super::open_editor;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use storefront_document::{ThemeTokens, TokensPatch};

#[derive(Debug, Args)]
pub struct TokensArgs {
    #[arg(long)]
    pub primary: Option<String>,

    #[arg(long)]
    pub secondary: Option<String>,

    #[arg(long)]
    pub accent: Option<String>,

    #[arg(long)]
    pub background: Option<String>,

    #[arg(long)]
    pub font_family: Option<String>,

    #[arg(long)]
    pub radius_base: Option<String>,

    #[arg(long)]
    pub radius_large: Option<String>,
}

impl From<TokensArgs> for TokensPatch {
    fn from(args: TokensArgs) -> Self {
        Self {
            primary: args.primary,
            secondary: args.secondary,
            accent: args.accent,
            background: args.background,
            font_family: args.font_family,
            radius_base: args.radius_base,
            radius_large: args.radius_large,
        }
    }
}

/// Print the tokens, or update them when any flag is given
pub fn tokens(args: TokensArgs, cwd: &Path) -> Result<()> {
    let (_config, store, mut editor) = open_editor(cwd)?;
    let patch = TokensPatch::from(args);

    if !patch.is_empty() {
        let result = editor.update_tokens(patch)?;
        if result.changed {
            editor.save(&store)?;
            println!("{} Tokens updated", "✓".green());
        } else {
            println!("{}", "⚠️  Nothing changed".yellow());
        }
    }

    print_tokens(&editor.theme().tokens);
    Ok(())
}

fn print_tokens(tokens: &ThemeTokens) {
    for (name, value) in tokens.css_variables() {
        println!("  {:<20} {}", name.bright_white(), value);
    }
}
