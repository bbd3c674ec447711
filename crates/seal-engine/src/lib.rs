pub mod classify;
pub mod defaults;
pub mod errors;
pub mod loader;
pub mod table;

pub use classify::{classify, classify_as, classify_nutrients, fired_rules, reclassify};
pub use defaults::default_rules;
pub use errors::RuleError;
pub use loader::{load_rules, load_rules_with_options, LoadOptions};
pub use table::RuleTable;

#[cfg(test)]
mod tests;
