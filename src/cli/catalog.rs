//! Read-only commands over the local catalog.

use anyhow::Result;
use clap::Args;
use menuseal_core_types::{Category, MenuItem};
use menuseal_recommender::{recommend_with_distance, search_and_recommend, Recommendations};
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct ItemsArgs {
    /// Only list items of this category (`Sandwich`, `Drink`, ...)
    #[arg(long)]
    pub category: Option<Category>,

    /// Only list items carrying this seal label
    #[arg(long)]
    pub seal: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    /// Item name (case-insensitive)
    pub name: String,
}

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Substring of the item name
    #[arg(default_value = "")]
    pub query: String,

    /// Number of recommendations for the first hit
    #[arg(short, long)]
    pub k: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct RecommendArgs {
    /// Name of the base item (case-insensitive)
    pub name: String,

    /// Number of recommendations
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Include the distance to the base item
    #[arg(long)]
    pub with_distance: bool,
}

#[derive(Args, Clone, Debug)]
pub struct AuditArgs {
    /// Exit with an error when anything needed coercion
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Clone, Debug)]
pub struct RulesArgs {
    /// Show the rules the catalog was classified with instead of the
    /// configured table
    #[arg(long)]
    pub effective: bool,
}

pub fn cmd_items(args: ItemsArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let store = ctx.store()?;
    let items: Vec<MenuItem> = store
        .load()?
        .into_iter()
        .filter(|item| args.category.map_or(true, |c| item.category == Some(c)))
        .filter(|item| {
            args.seal.as_deref().map_or(true, |seal| {
                item.seals.iter().any(|s| s.eq_ignore_ascii_case(seal))
            })
        })
        .collect();

    output.emit(&items, || {
        println!("{} item(s)", items.len());
        for item in &items {
            print_item_line(item);
        }
    })
}

pub fn cmd_show(args: ShowArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let store = ctx.store()?;
    let item = match store.lookup_by_name(&args.name) {
        Ok(item) => Some(item),
        Err(err) if err.is_not_found() => None,
        Err(err) => return Err(err.into()),
    };

    output.emit(&item, || match item {
        Some(item) => print_item_detail(item),
        None => println!("No item named '{}'", args.name),
    })
}

pub fn cmd_search(args: SearchArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let store = ctx.store()?;
    let k = args.k.unwrap_or(ctx.config().recommend.k);
    let outcome = search_and_recommend(&args.query, store.items()?, k);

    output.emit(&outcome, || {
        println!("{} match(es) for '{}'", outcome.matches.len(), args.query);
        for item in &outcome.matches {
            print_item_line(item);
        }
        if let Some(first) = outcome.matches.first() {
            println!();
            println!("Similar to {}:", first.name);
            for item in &outcome.recommendations {
                print_item_line(item);
            }
        }
    })
}

#[derive(Serialize)]
struct Scored<'a> {
    #[serde(flatten)]
    item: &'a MenuItem,
    distance: f64,
}

pub fn cmd_recommend(args: RecommendArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let store = ctx.store()?;
    let catalog = store.items()?;
    let k = args.k.unwrap_or(ctx.config().recommend.k);

    if args.with_distance {
        let scored: Vec<Scored<'_>> = recommend_with_distance(&args.name, catalog, k)
            .into_iter()
            .map(|(item, distance)| Scored { item, distance })
            .collect();
        return output.emit(&scored, || {
            for entry in &scored {
                println!("{:>9.2}  {}", entry.distance, entry.item.name);
            }
        });
    }

    let payload = Recommendations::for_target(&args.name, catalog, k);
    output.emit(&payload, || match &payload.base {
        Some(base) => {
            println!("Recommendations for {}:", base.name);
            for item in &payload.recommendations {
                print_item_line(item);
            }
        }
        None => println!("No item named '{}'", args.name),
    })
}

pub fn cmd_audit(args: AuditArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let findings = ctx.store()?.audit()?;
    output.emit(&findings, || {
        if findings.is_empty() {
            println!("All nutrient values are plain numbers");
        }
        for finding in &findings {
            println!(
                "{} [{}]: {} {:?} -> {}",
                finding.name,
                finding.item,
                finding.nutrient,
                finding.raw.as_deref().unwrap_or("<missing>"),
                finding.coerced
            );
        }
    })?;
    if args.strict && !findings.is_empty() {
        anyhow::bail!("{} nutrient value(s) needed coercion", findings.len());
    }
    Ok(())
}

pub fn cmd_rules(args: RulesArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let table = if args.effective {
        ctx.store()?.rules()?.clone()
    } else {
        ctx.rules()?
    };
    let rules = table.rules();
    output.emit(rules, || {
        for rule in rules {
            println!(
                "{:<18} {:<24} {:<13} solid>={} liquid>={} {}",
                rule.id,
                rule.label,
                rule.nutrient.as_str(),
                rule.threshold_solid,
                rule.threshold_liquid,
                rule.unit.as_deref().unwrap_or("")
            );
        }
    })
}

fn print_item_line(item: &MenuItem) {
    let seals = if item.seals.is_empty() {
        "-".to_string()
    } else {
        item.seals.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!(
        "- {} ({}) {:.0} kcal [{}]",
        item.name,
        display_company(item),
        item.nutrients.calories,
        seals
    );
}

fn print_item_detail(item: &MenuItem) {
    println!("{}", item.name);
    println!("  id:       {}", item.id);
    println!("  company:  {}", display_company(item));
    println!(
        "  category: {}",
        item.category.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
    );
    println!("  state:    {}", item.physical_state.as_str());
    for (nutrient, value) in item.nutrients.iter() {
        println!("  {:<13} {} {}", nutrient.as_str(), value, nutrient.unit());
    }
    if item.seals.is_empty() {
        println!("  seals:    none");
    } else {
        for seal in &item.seals {
            println!("  seal:     {}", seal);
        }
    }
    if let Some(link) = &item.source_link {
        println!("  source:   {}", link);
    }
}

fn display_company(item: &MenuItem) -> String {
    if item.company.is_empty() {
        "unknown".to_string()
    } else {
        item.company_display()
    }
}
