//! Data structures threaded through the A/B test pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AbTestError, Result};
use crate::personas::types::validate_price;
use crate::personas::{Archetype, PersonaResponse, ProductInfo};

// ============================================================================
// Variants
// ============================================================================

/// Label of one of the two competing treatments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub const BOTH: [Variant; 2] = [Variant::A, Variant::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }

    pub fn other(&self) -> Variant {
        match self {
            Variant::A => Variant::B,
            Variant::B => Variant::A,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketing copy for one variant
///
/// `price` and `category` override the base product info when present.
/// Anything else (marketing angle, call to action, layout) is carried in
/// `extra` for display and is never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantInfo {
    #[serde(default)]
    pub name: String,

    /// Copy shown to personas alongside the image description
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VariantInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a display-only field
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Base product info with this variant's overrides applied
    pub fn apply_to(&self, base: &ProductInfo) -> ProductInfo {
        ProductInfo {
            category: self
                .category
                .clone()
                .unwrap_or_else(|| base.category.clone()),
            price: self.price.unwrap_or(base.price),
        }
    }

    pub fn validate(&self, variant: Variant) -> Result<()> {
        if let Some(price) = self.price {
            validate_price(
                price,
                &format!("variant_{}_info.price", variant.as_str().to_lowercase()),
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Responses
// ============================================================================

/// One (variant, persona) score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaResponseRecord {
    pub variant: Variant,
    pub persona: Archetype,
    pub response: PersonaResponse,
}

/// Responses indexed by variant, then persona
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizedResponses {
    pub variant_a: BTreeMap<Archetype, PersonaResponse>,
    pub variant_b: BTreeMap<Archetype, PersonaResponse>,
}

impl OrganizedResponses {
    pub fn get(&self, variant: Variant) -> &BTreeMap<Archetype, PersonaResponse> {
        match variant {
            Variant::A => &self.variant_a,
            Variant::B => &self.variant_b,
        }
    }

    pub fn get_mut(&mut self, variant: Variant) -> &mut BTreeMap<Archetype, PersonaResponse> {
        match variant {
            Variant::A => &mut self.variant_a,
            Variant::B => &mut self.variant_b,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// How one persona scored the two variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaComparison {
    pub variant_a_score: f64,
    pub variant_b_score: f64,
    pub preferred_variant: Variant,
    pub score_difference: f64,
    pub variant_a_reasoning: String,
    pub variant_b_reasoning: String,
}

/// Outcome of an A/B test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    pub winner: Variant,

    /// |variant_a_average - variant_b_average|
    pub confidence_score: f64,

    pub variant_a_average: f64,
    pub variant_b_average: f64,

    /// Keyed by persona, in registry order
    pub persona_analysis: BTreeMap<Archetype, PersonaComparison>,

    /// Displayed positionally; order is significant
    pub recommendations: Vec<String>,

    /// confidence_score > 0.1
    pub statistical_significance: bool,
}

// ============================================================================
// Workflow state
// ============================================================================

/// The record threaded through every pipeline stage
///
/// Stages only add or overwrite fields. `persona_responses` is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub image_url: String,

    /// Empty until the image stage runs
    #[serde(default)]
    pub image_description: String,

    /// Caller-supplied, possibly completed by image analysis
    #[serde(default)]
    pub product_info: Option<ProductInfo>,

    pub variant_a_info: VariantInfo,
    pub variant_b_info: VariantInfo,

    #[serde(default)]
    pub persona_responses: Vec<PersonaResponseRecord>,

    /// Variant most recently scored
    #[serde(default)]
    pub current_variant: Option<Variant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organized_responses: Option<OrganizedResponses>,

    #[serde(default)]
    pub test_results: Option<TestResults>,

    #[serde(default)]
    pub analysis_complete: bool,
}

impl WorkflowState {
    pub fn new(
        image_url: impl Into<String>,
        product_info: Option<ProductInfo>,
        variant_a_info: VariantInfo,
        variant_b_info: VariantInfo,
    ) -> Self {
        Self {
            image_url: image_url.into(),
            image_description: String::new(),
            product_info,
            variant_a_info,
            variant_b_info,
            persona_responses: Vec::new(),
            current_variant: None,
            organized_responses: None,
            test_results: None,
            analysis_complete: false,
        }
    }

    pub fn variant_info(&self, variant: Variant) -> &VariantInfo {
        match variant {
            Variant::A => &self.variant_a_info,
            Variant::B => &self.variant_b_info,
        }
    }

    pub fn responses_for(&self, variant: Variant) -> impl Iterator<Item = &PersonaResponseRecord> {
        self.persona_responses
            .iter()
            .filter(move |r| r.variant == variant)
    }

    /// Required-field checks on caller input
    pub fn validate(&self) -> Result<()> {
        if self.image_url.trim().is_empty() {
            return Err(AbTestError::InvalidInput("image_url is required".to_string()));
        }
        if let Some(product) = &self.product_info {
            product.validate()?;
        }
        for variant in Variant::BOTH {
            self.variant_info(variant).validate(variant)?;
        }
        Ok(())
    }
}
