//! Data types shared by persona scoring and the A/B workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AbTestError;

/// Synthetic buyer archetype
///
/// Declaration order is the persona registry order: it drives the order of
/// `persona_analysis` entries and persona-specific recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    SingleMother,
    YoungMale,
    ElderlyRetiree,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [
        Archetype::SingleMother,
        Archetype::YoungMale,
        Archetype::ElderlyRetiree,
    ];

    /// Snake-case tag used as the persona key in serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::SingleMother => "single_mother",
            Archetype::YoungMale => "young_male",
            Archetype::ElderlyRetiree => "elderly_retiree",
        }
    }

    /// Title-cased label for reports ("Single Mother")
    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::SingleMother => "Single Mother",
            Archetype::YoungMale => "Young Male",
            Archetype::ElderlyRetiree => "Elderly Retiree",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = AbTestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| AbTestError::UnknownPersona(s.to_string()))
    }
}

/// Spending limits of a persona, in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetEnvelope {
    pub monthly_discretionary: f64,
    pub max_single_purchase: f64,
}

/// Static per-archetype configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Persona's first name
    pub name: String,

    pub archetype: Archetype,

    /// Decision factors, most important first. Informational only.
    pub decision_factors: Vec<String>,

    /// Informational only.
    #[serde(default)]
    pub priorities: Vec<String>,

    pub budget: BudgetEnvelope,
}

/// Attributes of the advertised product
///
/// Missing fields deserialize to neutral values: empty category, zero price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub price: f64,
}

impl ProductInfo {
    pub fn new(category: impl Into<String>, price: f64) -> Self {
        Self {
            category: category.into(),
            price,
        }
    }

    /// Product info assumed when neither the caller nor image analysis supplied any
    pub fn fallback() -> Self {
        Self::new("general", 50.0)
    }

    /// Reject prices no shop could charge
    pub fn validate(&self) -> Result<(), AbTestError> {
        validate_price(self.price, "product_info.price")
    }
}

pub(crate) fn validate_price(price: f64, field: &str) -> Result<(), AbTestError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AbTestError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, price
        )));
    }
    Ok(())
}

/// One persona's reaction to one piece of marketing content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaResponse {
    pub persona_type: Archetype,

    /// Heuristic score in [0.0, 1.0]
    pub purchase_likelihood: f64,

    pub reasoning: String,

    /// Tags of the scoring rules that fired, in rule order
    pub key_factors: Vec<String>,

    pub emotional_response: String,

    pub budget_consideration: String,
}
