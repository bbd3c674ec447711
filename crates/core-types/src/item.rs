use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::nutrient::{Nutrient, Nutrients};
use crate::CoreError;

/// IRI of a menu item inside a dataset.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    #[default]
    Solid,
    Liquid,
}

impl PhysicalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalState::Solid => "Solid",
            PhysicalState::Liquid => "Liquid",
        }
    }
}

impl FromStr for PhysicalState {
    type Err = CoreError;

    /// Accepts `solid`/`liquid` in any case, or an IRI ending in either.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match local_name(s).to_ascii_lowercase().as_str() {
            "solid" => Ok(PhysicalState::Solid),
            "liquid" => Ok(PhysicalState::Liquid),
            _ => Err(CoreError::UnknownPhysicalState(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bread,
    Breakfast,
    Cheese,
    Condiment,
    Dessert,
    Drink,
    Extra,
    KidsMeal,
    Pizza,
    Protein,
    Salad,
    Sandwich,
    Sauces,
    Seasonings,
    Snack,
    Veggies,
    Wrap,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::Bread,
        Category::Breakfast,
        Category::Cheese,
        Category::Condiment,
        Category::Dessert,
        Category::Drink,
        Category::Extra,
        Category::KidsMeal,
        Category::Pizza,
        Category::Protein,
        Category::Salad,
        Category::Sandwich,
        Category::Sauces,
        Category::Seasonings,
        Category::Snack,
        Category::Veggies,
        Category::Wrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bread => "Bread",
            Category::Breakfast => "Breakfast",
            Category::Cheese => "Cheese",
            Category::Condiment => "Condiment",
            Category::Dessert => "Dessert",
            Category::Drink => "Drink",
            Category::Extra => "Extra",
            Category::KidsMeal => "KidsMeal",
            Category::Pizza => "Pizza",
            Category::Protein => "Protein",
            Category::Salad => "Salad",
            Category::Sandwich => "Sandwich",
            Category::Sauces => "Sauces",
            Category::Seasonings => "Seasonings",
            Category::Snack => "Snack",
            Category::Veggies => "Veggies",
            Category::Wrap => "Wrap",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Accepts a bare token (`sandwich`, `Kids Meal`) or an IRI whose
    /// fragment names the category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token: String = local_name(s)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(&token))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// A food offering with its nutrient panel and derived seals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub physical_state: PhysicalState,
    #[serde(flatten)]
    pub nutrients: Nutrients,
    #[serde(default)]
    pub seals: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_link: Option<String>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            company: String::new(),
            category: None,
            physical_state: PhysicalState::Solid,
            nutrients: Nutrients::default(),
            seals: BTreeSet::new(),
            source_link: None,
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = company_token(company);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_state(mut self, state: PhysicalState) -> Self {
        self.physical_state = state;
        self
    }

    pub fn with_nutrient(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.nutrients.set(nutrient, value);
        self
    }

    pub fn with_source_link(mut self, link: impl Into<String>) -> Self {
        self.source_link = Some(link.into());
        self
    }

    pub fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient)
    }

    pub fn company_display(&self) -> String {
        company_display(&self.company)
    }
}

/// Normalizes a company name to a URI-safe token: apostrophes are dropped,
/// `&` and `"` become `and`, whitespace runs become a single `_`, and
/// anything else outside `[A-Za-z0-9_]` is dropped.
pub fn company_token(raw: &str) -> String {
    let source = if raw.contains("://") {
        local_name(raw)
    } else {
        raw.trim()
    };
    let mut token = String::with_capacity(source.len());
    for ch in source.chars() {
        if ch.is_whitespace() || ch == '_' {
            if !token.is_empty() && !token.ends_with('_') {
                token.push('_');
            }
        } else if ch == '&' || ch == '"' {
            token.push_str("and");
        } else if ch.is_ascii_alphanumeric() {
            token.push(ch);
        }
    }
    token.trim_end_matches('_').to_string()
}

/// Human-readable company name from a token or IRI (`FOOD_LION` -> `FOOD LION`).
pub fn company_display(token_or_iri: &str) -> String {
    local_name(token_or_iri).replace('_', " ")
}

fn local_name(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .rsplit(|c| c == '/' || c == '#')
        .next()
        .unwrap_or(trimmed)
}
