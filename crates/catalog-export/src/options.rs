use std::fmt;
use std::str::FromStr;

use menuseal_core_types::Category;
use menuseal_item_store::vocab;
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

/// Company recorded for items that carry none of their own.
pub const PROVENANCE_COMPANY: &str = "http://dbpedia.org/resource/FOOD_LION";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Prefix of the synthetic item IRIs; items become `<base>1..n`.
    pub item_base: String,
    pub default_category: Category,
    pub provenance_company: String,
    pub format: ExportFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            item_base: vocab::ex("item/"),
            default_category: Category::Sandwich,
            provenance_company: PROVENANCE_COMPANY.to_string(),
            format: ExportFormat::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Ntriples,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Ntriples => "nt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Ntriples => f.write_str("ntriples"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "nt" | "ntriples" | "n-triples" => Ok(ExportFormat::Ntriples),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}
