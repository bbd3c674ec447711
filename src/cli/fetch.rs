use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use menuseal_catalog_export::ExportFormat;
use menuseal_core_types::{Nutrient, ReferenceProfile};
use menuseal_kb_retrieval::{FetchOptions, KnowledgeBaseClient, ReqwestTransport};
use tracing::info;

use crate::cli::context::CliContext;
use crate::cli::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct FetchSimilarArgs {
    /// Reference profile file (YAML or JSON map of nutrient -> value)
    #[arg(long, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Use a catalog item's nutrients as the reference
    #[arg(long, value_name = "NAME", conflicts_with = "reference")]
    pub like: Option<String>,

    /// Reference value, e.g. `--set calories=250` (repeatable)
    #[arg(long = "set", value_name = "NUTRIENT=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(Nutrient, f64)>,

    /// Maximum rows requested from the knowledge base
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Rows kept after random sampling
    #[arg(long, default_value_t = 6)]
    pub sample_size: usize,

    /// Label language
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the classified results as a dataset
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Dataset format for --out (defaults to the configured export format)
    #[arg(long)]
    pub format: Option<ExportFormat>,
}

fn parse_assignment(raw: &str) -> Result<(Nutrient, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NUTRIENT=VALUE, got '{raw}'"))?;
    let nutrient = Nutrient::parse(key.trim()).ok_or_else(|| format!("unknown nutrient '{key}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{value}' is not a finite number"));
    }
    Ok((nutrient, value))
}

fn reference_profile(args: &FetchSimilarArgs, ctx: &CliContext) -> Result<ReferenceProfile> {
    let mut profile = if let Some(path) = &args.reference {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str::<ReferenceProfile>(&raw)
            .with_context(|| format!("parsing {}", path.display()))?
    } else if let Some(name) = &args.like {
        let item = ctx
            .store()?
            .lookup_by_name(name)
            .with_context(|| format!("no catalog item named '{name}'"))?;
        item.nutrients.iter().collect()
    } else {
        ReferenceProfile::new()
    };
    for (nutrient, value) in &args.values {
        profile.insert(*nutrient, *value);
    }
    Ok(profile)
}

pub async fn cmd_fetch_similar(
    args: FetchSimilarArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    if args.sample_size == 0 {
        bail!("--sample-size must be positive");
    }
    let config = ctx.config();
    let reference = reference_profile(&args, ctx)?;

    let transport = ReqwestTransport::new(&config.knowledge_base)?;
    let mut client = KnowledgeBaseClient::new(transport, config.knowledge_base.clone())
        .with_tolerances(config.tolerance_table())
        .with_rules(ctx.rules()?)
        .with_export_options(config.export.clone());
    if let Some(seed) = args.seed {
        client = client.with_seed(seed);
    }

    let options = FetchOptions {
        limit: args.limit,
        sample_size: args.sample_size,
        language: args.language.clone(),
    };
    info!(
        endpoint = %config.knowledge_base.endpoint,
        filters = reference.len(),
        "querying knowledge base"
    );
    let found = client
        .fetch_similar(&reference, &options)
        .await
        .context("knowledge base lookup failed")?;

    if let Some(path) = &args.out {
        let format = args.format.unwrap_or(config.export.format);
        found.export.write(path, format)?;
    }

    output.emit(&found.items, || {
        if found.items.is_empty() {
            println!("No similar foods found");
            return;
        }
        for item in &found.items {
            let seals = if item.seals.is_empty() {
                "no seals".to_string()
            } else {
                item.seals.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            println!("- {} ({:.0} kcal) [{}]", item.name, item.nutrients.calories, seals);
            if let Some(link) = &item.source_link {
                println!("  {}", link);
            }
        }
        if let Some(path) = &args.out {
            println!("Dataset written to {}", path.display());
        }
    })
}
