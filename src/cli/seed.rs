use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use menuseal_catalog_export::{seed_from_csv, ExportFormat};
use tracing::info;

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct SeedArgs {
    /// Cleaned catalog CSV
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Destination dataset
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Dataset format (defaults to the configured export format)
    #[arg(long)]
    pub format: Option<ExportFormat>,
}

pub fn cmd_seed(args: SeedArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let rules = ctx.rules()?;
    let artifact = seed_from_csv(&args.input, &rules, &config.export)
        .with_context(|| format!("seeding from {}", args.input.display()))?;
    let format = args.format.unwrap_or(config.export.format);
    let written = artifact.write(&args.out, format)?;
    info!(items = artifact.item_count(), "catalog seeded");
    println!(
        "Seeded {} item(s) into {}",
        artifact.item_count(),
        written.display()
    );
    Ok(())
}
