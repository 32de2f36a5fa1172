use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use storefront_document::ThemeConfig;
use storefront_editor::ThemeStore;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store slug
    #[arg(short, long, default_value = "store")]
    pub store: String,

    /// Currency code for prices
    #[arg(short, long, default_value = "USD")]
    pub currency: String,

    /// Force overwrite existing config and theme
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing storefront theme...".bright_blue().bold()
    );

    // Create config
    let config = Config {
        store_slug: args.store.clone(),
        currency: args.currency.clone(),
        ..Default::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Provision the default theme
    let store = config.theme_store(cwd);
    let theme_path = store.path_for(&config.store_slug)?;
    if args.force || store.load(&config.store_slug)?.is_none() {
        store.save(&config.store_slug, &ThemeConfig::default())?;
        println!("  {} Created {}", "✓".green(), theme_path.display());
    }

    println!();
    println!("{}", "✅ Theme initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: storefront block list");
    println!("  2. Run: storefront render");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_theme() {
        let dir = tempfile::tempdir().unwrap();

        init(
            InitArgs {
                store: "batik".to_string(),
                currency: "IDR".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.store_slug, "batik");
        assert_eq!(config.currency, "IDR");

        let theme = config.theme_store(dir.path()).load("batik").unwrap();
        assert_eq!(theme, Some(ThemeConfig::default()));
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "storeSlug": "kept" }"#).unwrap();

        init(
            InitArgs {
                store: "other".to_string(),
                currency: "USD".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(Config::load(dir.path()).unwrap().store_slug, "kept");
    }
}
