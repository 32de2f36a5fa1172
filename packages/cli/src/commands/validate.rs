use super::open_editor;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;
use storefront_editor::{has_errors, ValidationLevel, Validator};
use storefront_renderer::BlockRegistry;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let (config, _store, editor) = open_editor(cwd)?;
    let registry = BlockRegistry::with_built_ins();

    let findings = Validator::new(&registry).validate(editor.theme());

    if findings.is_empty() {
        println!(
            "{} Theme for '{}' is valid",
            "✅".green(),
            config.store_slug
        );
        return Ok(());
    }

    for finding in &findings {
        let level = match finding.level {
            ValidationLevel::Error => "error".red().bold(),
            ValidationLevel::Warning => "warning".yellow().bold(),
        };
        let location = match &finding.block_id {
            Some(id) => format!("{}/{}", finding.page, id),
            None => finding.page.to_string(),
        };

        println!("  {} [{}] {}", level, location.bright_white(), finding.message);
    }

    if has_errors(&findings) || args.strict {
        bail!("Validation failed with {} finding(s)", findings.len());
    }

    Ok(())
}
