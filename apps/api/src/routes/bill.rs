//! # Bill Routes
//!
//! Session creation, extraction intake, tax/tip edits, and the summary.
//!
//! ## Extraction Intake
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The extraction collaborator (image upload + multimodal model call)    │
//! │  lives outside this service. What arrives here is its JSON output:    │
//! │                                                                         │
//! │  { "items": [{"item": "Burger", "price": 12.99}, ...],                 │
//! │    "subtotalAmountOnBill": 17.49,                                       │
//! │    "taxAmountOnBill": 1.50 }                                            │
//! │                                                                         │
//! │  POST /api/bills/:id/extraction                                         │
//! │       │                                                                 │
//! │       ├── filter junk items (empty name, non-positive price)           │
//! │       ├── install the survivors (claims cleared)                       │
//! │       ├── derive tax rate from the stated figures, else unset          │
//! │       └── respond with counts + refreshed summary                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use tab_core::{parse, BillSummary, ExtractedReceipt, Money, TipSpec};

use crate::error::ApiError;
use crate::state::Sessions;

// =============================================================================
// Response Types
// =============================================================================

/// Response to session creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillResponse {
    pub bill_id: Uuid,
}

/// The summary plus 2-decimal currency strings for direct rendering.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: BillSummary,
    pub formatted: FormattedTotals,
}

/// Currency-formatted mirror of the summary totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub tip: String,
    pub grand_total: String,
    pub people: Vec<FormattedShare>,
}

/// Currency-formatted mirror of one person's share.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedShare {
    pub person_id: u32,
    pub subtotal: String,
    pub tax: String,
    pub tip: String,
    pub total: String,
}

impl From<BillSummary> for SummaryResponse {
    fn from(summary: BillSummary) -> Self {
        let dollars = |cents: i64| Money::from_cents(cents).to_string();
        let formatted = FormattedTotals {
            subtotal: dollars(summary.subtotal_cents),
            tax: dollars(summary.tax_cents),
            tip: dollars(summary.tip_cents),
            grand_total: dollars(summary.grand_total_cents),
            people: summary
                .people
                .iter()
                .map(|share| FormattedShare {
                    person_id: share.person_id,
                    subtotal: dollars(share.subtotal_cents),
                    tax: dollars(share.tax_cents),
                    tip: dollars(share.tip_cents),
                    total: dollars(share.total_cents),
                })
                .collect(),
        };
        SummaryResponse { summary, formatted }
    }
}

/// Response to extraction intake.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub items_extracted: usize,
    pub items_dropped: usize,
    /// Present when the client should tell the user something
    /// (e.g. nothing usable was extracted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub summary: SummaryResponse,
}

// =============================================================================
// Request Types
// =============================================================================

/// Tax rate edit. A blank string unsets the rate; anything else goes
/// through the tolerant parser (unparseable → 0%).
#[derive(Debug, Deserialize)]
pub struct TaxRateRequest {
    pub rate: String,
}

/// Tip edit: percentage of the subtotal or a fixed dollar amount,
/// value as typed by the user (tolerantly parsed).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    pub kind: TipKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TipKind {
    Percentage,
    FixedAmount,
}

// =============================================================================
// Handlers
// =============================================================================

/// Creates a new bill session.
pub async fn create_bill(
    State(sessions): State<Sessions>,
) -> (StatusCode, Json<CreateBillResponse>) {
    let bill_id = sessions.create();
    debug!(%bill_id, "create_bill");
    (StatusCode::CREATED, Json(CreateBillResponse { bill_id }))
}

/// Installs an extraction result into the bill.
pub async fn post_extraction(
    State(sessions): State<Sessions>,
    Path(bill_id): Path<Uuid>,
    Json(receipt): Json<ExtractedReceipt>,
) -> Result<Json<ExtractionResponse>, ApiError> {
    debug!(%bill_id, raw_items = receipt.items.len(), "post_extraction");

    let result = sessions
        .with_bill_mut(bill_id, |bill| {
            let outcome = bill.apply_extraction(&receipt)?;
            Ok::<_, ApiError>((outcome, bill.summarize()))
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;
    let (outcome, summary) = result?;

    let message = (outcome.items_kept == 0).then(|| {
        "No valid items and prices could be extracted. \
         Please try another image or enter items manually."
            .to_string()
    });

    Ok(Json(ExtractionResponse {
        items_extracted: outcome.items_kept,
        items_dropped: outcome.items_dropped,
        message,
        summary: summary.into(),
    }))
}

/// Sets or unsets the tax rate.
pub async fn put_tax_rate(
    State(sessions): State<Sessions>,
    Path(bill_id): Path<Uuid>,
    Json(request): Json<TaxRateRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    debug!(%bill_id, rate = %request.rate, "put_tax_rate");

    let rate = if request.rate.trim().is_empty() {
        None
    } else {
        Some(parse::rate_or_zero(&request.rate))
    };

    let summary = sessions
        .with_bill_mut(bill_id, |bill| {
            bill.set_tax_rate(rate);
            bill.summarize()
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;

    Ok(Json(summary.into()))
}

/// Sets the tip specification.
pub async fn put_tip(
    State(sessions): State<Sessions>,
    Path(bill_id): Path<Uuid>,
    Json(request): Json<TipRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    debug!(%bill_id, value = %request.value, "put_tip");

    let tip = match request.kind {
        TipKind::Percentage => TipSpec::Percentage(parse::rate_or_zero(&request.value)),
        TipKind::FixedAmount => TipSpec::FixedAmount(parse::money_or_zero(&request.value)),
    };

    let summary = sessions
        .with_bill_mut(bill_id, |bill| {
            bill.set_tip(tip);
            bill.summarize()
        })
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;

    Ok(Json(summary.into()))
}

/// Returns the current split.
pub async fn get_summary(
    State(sessions): State<Sessions>,
    Path(bill_id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, ApiError> {
    debug!(%bill_id, "get_summary");

    let summary = sessions
        .with_bill(bill_id, |bill| bill.summarize())
        .ok_or_else(|| ApiError::not_found("Bill", bill_id))?;

    Ok(Json(summary.into()))
}
