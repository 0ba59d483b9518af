//! Persona models: a profile plus the rule table that scores it.

use std::collections::HashSet;

use super::rules::{RuleTable, ELDERLY_RETIREE_RULES, SINGLE_MOTHER_RULES, YOUNG_MALE_RULES};
use super::types::{Archetype, BudgetEnvelope, PersonaProfile, PersonaResponse, ProductInfo};
use crate::error::{AbTestError, Result};

/// A scoring persona
///
/// Immutable after construction and cheap to clone; scoring reads only
/// static configuration, so one instance can be shared across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaModel {
    profile: PersonaProfile,
    rules: &'static RuleTable,
}

impl PersonaModel {
    pub fn new(profile: PersonaProfile, rules: &'static RuleTable) -> Self {
        Self { profile, rules }
    }

    pub fn single_mother() -> Self {
        Self::new(
            PersonaProfile {
                name: "Sarah".to_string(),
                archetype: Archetype::SingleMother,
                decision_factors: strings(&[
                    "child_safety",
                    "value_for_money",
                    "durability",
                    "family_benefit",
                    "time_saving",
                    "necessity",
                ]),
                priorities: strings(&["kids_wellbeing", "practical_value", "safety"]),
                budget: BudgetEnvelope {
                    monthly_discretionary: 200.0,
                    max_single_purchase: 100.0,
                },
            },
            &SINGLE_MOTHER_RULES,
        )
    }

    pub fn young_male() -> Self {
        Self::new(
            PersonaProfile {
                name: "Jake".to_string(),
                archetype: Archetype::YoungMale,
                decision_factors: strings(&[
                    "status_symbol",
                    "personal_enjoyment",
                    "technology",
                    "style",
                    "performance",
                    "social_approval",
                ]),
                priorities: strings(&["self_image", "instant_gratification", "social_status"]),
                budget: BudgetEnvelope {
                    monthly_discretionary: 800.0,
                    max_single_purchase: 500.0,
                },
            },
            &YOUNG_MALE_RULES,
        )
    }

    pub fn elderly_retiree() -> Self {
        Self::new(
            PersonaProfile {
                name: "Robert".to_string(),
                archetype: Archetype::ElderlyRetiree,
                decision_factors: strings(&[
                    "value_for_money",
                    "necessity",
                    "quality",
                    "health_benefit",
                    "simplicity",
                    "longevity",
                ]),
                priorities: strings(&["frugality", "health", "practicality"]),
                budget: BudgetEnvelope {
                    monthly_discretionary: 150.0,
                    max_single_purchase: 75.0,
                },
            },
            &ELDERLY_RETIREE_RULES,
        )
    }

    pub fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::SingleMother => Self::single_mother(),
            Archetype::YoungMale => Self::young_male(),
            Archetype::ElderlyRetiree => Self::elderly_retiree(),
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.profile.archetype
    }

    pub fn profile(&self) -> &PersonaProfile {
        &self.profile
    }

    pub fn rules(&self) -> &'static RuleTable {
        self.rules
    }

    /// Estimate this persona's reaction to `text` advertising `product`
    ///
    /// Deterministic: identical inputs give an identical response.
    pub fn score(&self, text: &str, product: &ProductInfo) -> PersonaResponse {
        let (purchase_likelihood, key_factors) =
            self.rules.evaluate(text, &product.category, product.price);

        PersonaResponse {
            persona_type: self.profile.archetype,
            purchase_likelihood,
            reasoning: self.rules.reasoning.render(purchase_likelihood),
            key_factors,
            emotional_response: self.rules.emotion.label(purchase_likelihood).to_string(),
            budget_consideration: self
                .rules
                .budget_note(self.profile.budget.monthly_discretionary, product.price),
        }
    }
}

/// The three built-in personas in registry order
pub fn default_personas() -> Vec<PersonaModel> {
    Archetype::ALL
        .into_iter()
        .map(PersonaModel::for_archetype)
        .collect()
}

/// Build personas from archetype keys such as `"young_male"`, keeping input order
pub fn personas_from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Vec<PersonaModel>> {
    let archetypes = keys
        .iter()
        .map(|key| key.as_ref().parse::<Archetype>())
        .collect::<Result<Vec<_>>>()?;

    let personas: Vec<PersonaModel> = archetypes
        .into_iter()
        .map(PersonaModel::for_archetype)
        .collect();
    ensure_unique(&personas)?;
    Ok(personas)
}

/// A persona set must be non-empty with one model per archetype
pub fn ensure_unique(personas: &[PersonaModel]) -> Result<()> {
    if personas.is_empty() {
        return Err(AbTestError::InvalidInput(
            "at least one persona is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for persona in personas {
        if !seen.insert(persona.archetype()) {
            return Err(AbTestError::InvalidInput(format!(
                "persona '{}' listed more than once",
                persona.archetype()
            )));
        }
    }
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
