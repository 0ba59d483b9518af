//! Buyer personas
//!
//! Three synthetic buyer archetypes score marketing content with
//! deterministic keyword heuristics. Archetypes differ only in data: each
//! has a [`RuleTable`] consumed by the one scoring routine in
//! [`PersonaModel::score`].

pub mod model;
pub mod rules;
pub mod types;

pub use model::{default_personas, ensure_unique, personas_from_keys, PersonaModel};
pub use rules::{Effect, EmotionSplit, ReasoningBands, Rule, RuleTable, Signal, Threshold};
pub use types::{Archetype, BudgetEnvelope, PersonaProfile, PersonaResponse, ProductInfo};
