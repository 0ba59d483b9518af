//! Stages 2 and 3: score one variant with every persona

use ab_testing_sdk::{log_persona_scored, log_task_complete, log_task_start};

use super::types::{PersonaResponseRecord, Variant, VariantInfo, WorkflowState};
use super::workflow::Stage;
use crate::error::{AbTestError, Result};
use crate::personas::{PersonaModel, PersonaResponse, ProductInfo};

/// Text a persona reads for one variant
///
/// The image description comes first, then the variant's own copy under a
/// labelled heading.
pub fn effective_text(variant: Variant, image_description: &str, info: &VariantInfo) -> String {
    format!(
        "{}\n\nVariant {} Details: {}",
        image_description, variant, info.description
    )
}

/// Score `info` with each persona, once each, in persona order
pub fn test_variant(
    variant: Variant,
    image_description: &str,
    base_product: &ProductInfo,
    info: &VariantInfo,
    personas: &[PersonaModel],
) -> Vec<PersonaResponse> {
    let text = effective_text(variant, image_description, info);
    let product = info.apply_to(base_product);

    personas
        .iter()
        .map(|persona| persona.score(&text, &product))
        .collect()
}

/// Run [`test_variant`] against the state and append the records
pub fn score_variant(
    variant: Variant,
    mut state: WorkflowState,
    personas: &[PersonaModel],
) -> Result<WorkflowState> {
    let stage = match variant {
        Variant::A => Stage::TestVariantA,
        Variant::B => Stage::TestVariantB,
    };
    let base_product = state.product_info.as_ref().ok_or(AbTestError::MissingState {
        stage: stage.id(),
        field: "product_info",
    })?;

    let info = state.variant_info(variant);
    tracing::debug!(
        "scoring variant {} ('{}') with {} personas",
        variant,
        info.name,
        personas.len()
    );

    let task_id = format!("variant_{}", variant.as_str().to_lowercase());
    log_task_start!(
        stage.number(),
        &task_id,
        format!("Score variant {} ({})", variant, info.name),
        personas.len()
    );

    let responses = test_variant(
        variant,
        &state.image_description,
        base_product,
        info,
        personas,
    );

    for response in responses {
        log_persona_scored!(variant, response.persona_type, response.purchase_likelihood);
        state.persona_responses.push(PersonaResponseRecord {
            variant,
            persona: response.persona_type,
            response,
        });
    }

    log_task_complete!(&task_id, format!("{} personas scored", personas.len()));
    state.current_variant = Some(variant);
    Ok(state)
}
