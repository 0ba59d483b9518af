//! Stage 4: check the response set and index it by variant and persona

use std::collections::HashSet;

use super::types::{OrganizedResponses, PersonaResponseRecord, Variant, WorkflowState};
use super::workflow::Stage;
use crate::error::{AbTestError, Result};
use crate::personas::PersonaModel;

/// Index records by variant, then persona
///
/// Later records for the same pair replace earlier ones; use
/// [`collect_responses`] when duplicates must be rejected.
pub fn organize_responses(records: &[PersonaResponseRecord]) -> OrganizedResponses {
    let mut organized = OrganizedResponses::default();
    for record in records {
        organized
            .get_mut(record.variant)
            .insert(record.persona, record.response.clone());
    }
    organized
}

/// Require exactly one response per (variant, persona) pair, then organize
pub fn collect_responses(
    mut state: WorkflowState,
    personas: &[PersonaModel],
) -> Result<WorkflowState> {
    let mut seen = HashSet::new();
    for record in &state.persona_responses {
        if !seen.insert((record.variant, record.persona)) {
            return Err(AbTestError::DuplicateResponse {
                variant: record.variant.to_string(),
                persona: record.persona.to_string(),
            });
        }
    }

    let expected = Variant::BOTH.len() * personas.len();
    let complete = Variant::BOTH.iter().all(|variant| {
        personas
            .iter()
            .all(|p| seen.contains(&(*variant, p.archetype())))
    });
    if !complete || state.persona_responses.len() != expected {
        return Err(AbTestError::IncompleteResponses {
            expected,
            actual: state.persona_responses.len(),
        });
    }

    tracing::debug!(
        stage = Stage::CollectResponses.id(),
        "collected {} responses",
        expected
    );
    state.organized_responses = Some(organize_responses(&state.persona_responses));
    Ok(state)
}
