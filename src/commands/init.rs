//! @acp:module "Init Command"
//! @acp:summary "Write a default briefing config file"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `briefing init`.

use std::path::PathBuf;

use anyhow::{bail, Result};
use console::style;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Where to write the config
    pub config_path: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            force: false,
        }
    }
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.config_path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.config_path.display()
        );
    }

    if let Some(parent) = options.config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let config = Config::default();
    config.save(&options.config_path)?;

    println!(
        "{} Created {}",
        style("✓").green(),
        options.config_path.display()
    );
    println!("  Engine: {} {}", config.engine.program, config.engine.args.join(" "));
    println!("  Prompts: {}", config.prompts_dir.display());
    println!("  Archive: {}", config.archive_dir.display());

    Ok(())
}
