use clap::Subcommand;

use super::catalog::{AuditArgs, ItemsArgs, RecommendArgs, RulesArgs, SearchArgs, ShowArgs};
use super::config::ConfigArgs;
use super::fetch::FetchSimilarArgs;
use super::seed::SeedArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// List catalog items with their seals
    Items(ItemsArgs),

    /// Show one item by name
    Show(ShowArgs),

    /// Search items by name and recommend alternatives for the first hit
    Search(SearchArgs),

    /// Recommend nutritionally similar items
    Recommend(RecommendArgs),

    /// Fetch similar foods from the knowledge base
    FetchSimilar(FetchSimilarArgs),

    /// Build a classified dataset from a catalog CSV
    Seed(SeedArgs),

    /// Report nutrient values that needed coercion
    Audit(AuditArgs),

    /// Show the seal rule table
    Rules(RulesArgs),

    /// Manage menuseal configuration
    Config(ConfigArgs),

    /// Show build and configuration information
    Info,
}
