use super::catalog::{cmd_audit, cmd_items, cmd_recommend, cmd_rules, cmd_search, cmd_show};
use super::config::cmd_config;
use super::env::CliArgs;
use super::fetch::cmd_fetch_similar;
use super::info::cmd_info;
use super::seed::cmd_seed;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    let output = cli.output.clone();
    match cli.command.clone() {
        Commands::Items(args) => cmd_items(args, ctx, output),
        Commands::Show(args) => cmd_show(args, ctx, output),
        Commands::Search(args) => cmd_search(args, ctx, output),
        Commands::Recommend(args) => cmd_recommend(args, ctx, output),
        Commands::FetchSimilar(args) => cmd_fetch_similar(args, ctx, output).await,
        Commands::Seed(args) => cmd_seed(args, ctx),
        Commands::Audit(args) => cmd_audit(args, ctx, output),
        Commands::Rules(args) => cmd_rules(args, ctx, output),
        Commands::Config(args) => cmd_config(args, ctx).await,
        Commands::Info => cmd_info(ctx),
    }
}
