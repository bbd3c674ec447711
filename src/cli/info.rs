use anyhow::Result;

use crate::cli::context::CliContext;

pub fn cmd_info(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();

    println!("menuseal System Information");
    println!("===========================");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Build Date: {}", option_env!("BUILD_DATE").unwrap_or("unknown"));
    println!("Git Commit: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!();

    println!("Configuration ({}):", ctx.config_path().display());
    println!("- Catalog Sources:");
    for source in &config.catalog.sources {
        let marker = if source.exists() { "✓" } else { "missing" };
        println!("  - {} {}", source.display(), marker);
    }
    match &config.catalog.cache_path {
        Some(path) => println!(
            "- Seal Cache: {} ({})",
            path.display(),
            if path.exists() { "present" } else { "not built" }
        ),
        None => println!("- Seal Cache: disabled"),
    }
    match &config.seals.rules_path {
        Some(path) => println!("- Seal Rules: {}", path.display()),
        None => println!("- Seal Rules: built-in"),
    }
    println!("- Knowledge Base: {}", config.knowledge_base.endpoint);
    println!("- Recommendations: k={}", config.recommend.k);
    println!();

    let rules = ctx.rules()?;
    println!("Seal Rules ({}):", rules.len());
    for rule in rules.rules() {
        println!(
            "- {} ({}): solid >= {}, liquid >= {}",
            rule.label,
            rule.nutrient.as_str(),
            rule.threshold_solid,
            rule.threshold_liquid
        );
    }

    Ok(())
}
