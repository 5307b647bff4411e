//! # People Routes
//!
//! Roster mutations and claim toggling. Every mutation responds with the
//! refreshed summary, so the client's breakdown is never stale.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::bill::SummaryResponse;
use crate::state::Sessions;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Response to adding a person: the new id plus the refreshed summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersonResponse {
    pub person_id: u32,
    #[serde(flatten)]
    pub summary: SummaryResponse,
}

/// Rename request.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Response to a claim toggle: the claim's new state plus the summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleClaimResponse {
    /// Whether the person claims the item after the toggle.
    pub claimed: bool,
    #[serde(flatten)]
    pub summary: SummaryResponse,
}

// =============================================================================
// Handlers
// =============================================================================

/// Adds a person to the bill.
pub async fn add_person(
    State(sessions): State<Sessions>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<AddPersonResponse>, ApiError> {
    debug!(%bill_id, "add_person");

    let result = sessions
        .with_bill_mut(bill_id, |bill| {
            let person_id = bill.add_person()?;
            Ok::<_, ApiError>((person_id, bill.summarize()))
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;
    let (person_id, summary) = result?;

    Ok(Json(AddPersonResponse {
        person_id,
        summary: summary.into(),
    }))
}

/// Removes a person from the bill.
///
/// Removing an unknown person, or the last remaining one, is a no-op
/// rather than an error; the response shows the roster either way.
pub async fn remove_person(
    State(sessions): State<Sessions>,
    Path((bill_id, person_id)): Path<(Uuid, u32)>,
) -> Result<Json<SummaryResponse>, ApiError> {
    debug!(%bill_id, person_id, "remove_person");

    let summary = sessions
        .with_bill_mut(bill_id, |bill| {
            bill.remove_person(person_id);
            bill.summarize()
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;

    Ok(Json(summary.into()))
}

/// Renames a person.
pub async fn rename_person(
    State(sessions): State<Sessions>,
    Path((bill_id, person_id)): Path<(Uuid, u32)>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    debug!(%bill_id, person_id, "rename_person");

    let result = sessions
        .with_bill_mut(bill_id, |bill| {
            bill.rename_person(person_id, &request.name)?;
            Ok::<_, ApiError>(bill.summarize())
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;

    Ok(Json(result?.into()))
}

/// Toggles a person's claim on an item.
pub async fn toggle_claim(
    State(sessions): State<Sessions>,
    Path((bill_id, person_id, item_index)): Path<(Uuid, u32, usize)>,
) -> Result<Json<ToggleClaimResponse>, ApiError> {
    debug!(%bill_id, person_id, item_index, "toggle_claim");

    let result = sessions
        .with_bill_mut(bill_id, |bill| {
            let claimed = bill.toggle_claim(person_id, item_index)?;
            Ok::<_, ApiError>((claimed, bill.summarize()))
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;
    let (claimed, summary) = result?;

    Ok(Json(ToggleClaimResponse {
        claimed,
        summary: summary.into(),
    }))
}
