use std::path::Path;

use crate::cli::context::CliContext;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tokio::fs;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Validate the configuration file
    Validate,

    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path().to_path_buf();
    match args.action {
        ConfigAction::Show => {
            println!("Current configuration ({}):", path.display());
            println!("{}", serde_yaml::to_string(ctx.config())?);
        }
        ConfigAction::Validate => {
            if fs::try_exists(&path).await? {
                let raw = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                let config = serde_yaml::from_str::<Config>(&raw)
                    .with_context(|| format!("parsing {}", path.display()))?;
                config
                    .validate()
                    .with_context(|| format!("validating {}", path.display()))?;
                ctx.rules()?;
                println!("Configuration file {} is valid", path.display());
            } else {
                Config::default().validate()?;
                println!(
                    "No configuration file at {}; defaults are valid",
                    path.display()
                );
            }
        }
        ConfigAction::Init { force } => {
            if fs::try_exists(&path).await? && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_config_file(&path, &Config::default()).await?;
            println!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}

async fn save_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
