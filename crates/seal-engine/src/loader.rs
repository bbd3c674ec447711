use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use menuseal_core_types::SealRule;
use serde::Deserialize;
use tracing::{debug, info};

use crate::defaults::default_rules;
use crate::errors::RuleError;
use crate::table::RuleTable;

const ENV_PREFIX: &str = "MENUSEAL_SEAL__";
const ENV_JSON: &str = "MENUSEAL_SEAL_RULES_JSON";

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub paths: Vec<PathBuf>,
    pub include_env: bool,
}

impl LoadOptions {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            include_env: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<SealRule>,
}

/// Loads the rule table: built-in defaults, replaced by the file at `path`
/// when it exists, then adjusted by `MENUSEAL_SEAL__<ID>__<FIELD>` variables.
pub fn load_rules(path: Option<&Path>) -> Result<RuleTable, RuleError> {
    let mut options = LoadOptions {
        include_env: true,
        ..Default::default()
    };
    if let Some(p) = path {
        options.paths.push(p.to_path_buf());
    }
    load_rules_with_options(&options)
}

pub fn load_rules_with_options(options: &LoadOptions) -> Result<RuleTable, RuleError> {
    let mut rules = default_rules();

    for path in &options.paths {
        if path.exists() {
            rules = rules_from_file(path)?;
            info!(path = %path.display(), count = rules.len(), "loaded seal rules");
        } else {
            debug!(path = %path.display(), "seal rule file missing; keeping current table");
        }
    }

    if options.include_env {
        if let Ok(raw_json) = env::var(ENV_JSON) {
            if !raw_json.trim().is_empty() {
                rules = serde_json::from_str(&raw_json)
                    .map_err(|err| RuleError::Invalid(format!("{}", err)))?;
            }
        }
        apply_env_overlays(&mut rules)?;
    }

    RuleTable::new(rules)
}

fn rules_from_file(path: &Path) -> Result<Vec<SealRule>, RuleError> {
    let content = fs::read_to_string(path).map_err(|err| RuleError::Io(format!("{}", err)))?;
    let parsed: RuleFile =
        serde_yaml::from_str(&content).map_err(|err| RuleError::Invalid(format!("{}", err)))?;
    Ok(parsed.rules)
}

fn apply_env_overlays(rules: &mut [SealRule]) -> Result<(), RuleError> {
    for (key, raw) in env::vars() {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let mut segments = stripped.splitn(2, "__");
        let id = segments.next().unwrap_or_default();
        let field = segments.next().unwrap_or_default().to_ascii_lowercase();
        let Some(rule) = rules.iter_mut().find(|r| r.id.eq_ignore_ascii_case(id)) else {
            debug!(%key, "no seal rule matches override");
            continue;
        };
        match field.as_str() {
            "threshold_solid" => rule.threshold_solid = parse_threshold(&key, &raw)?,
            "threshold_liquid" => rule.threshold_liquid = parse_threshold(&key, &raw)?,
            "label" => rule.label = raw.trim().to_string(),
            other => {
                return Err(RuleError::Invalid(format!(
                    "unsupported seal override field `{}` in {}",
                    other, key
                )))
            }
        }
    }
    Ok(())
}

fn parse_threshold(key: &str, raw: &str) -> Result<f64, RuleError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| RuleError::Invalid(format!("{}: {}", key, err)))
}
