use clap::Parser;
use std::path::PathBuf;

use super::commands::Commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    pub output: crate::cli::output::OutputFormat,

    /// Dataset to load instead of the configured sources (repeatable)
    #[arg(long = "source", value_name = "FILE", global = true)]
    pub sources: Vec<PathBuf>,

    /// Seal cache location
    #[arg(long, value_name = "FILE", global = true, conflicts_with = "no_cache")]
    pub cache: Option<PathBuf>,

    /// Classify on every run without reading or writing the seal cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}
