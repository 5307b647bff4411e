//! # Bill State
//!
//! The bill being split: extracted items, the roster of people, their
//! claims, and the tax/tip settings. `summarize()` turns that state into
//! the per-person breakdown.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bill Lifecycle                                     │
//! │                                                                         │
//! │  ┌──────────┐     ┌───────────────┐     ┌──────────────┐               │
//! │  │  Empty   │────►│ Items set via │────►│ Claims, tax, │──► summarize  │
//! │  │  Bill    │     │  extraction   │     │ tip edits    │               │
//! │  └──────────┘     └───────────────┘     └──────────────┘               │
//! │                          │                                              │
//! │                     apply_extraction                                    │
//! │                     (items replaced wholesale,                          │
//! │                      claims cleared, tax rate re-derived)               │
//! │                                                                         │
//! │  summarize() is a pure read: call it as often as you like, after       │
//! │  every mutation, and it always reflects exactly the current state.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Allocation Semantics
//! Tax and tip are distributed proportionally to each person's claimed
//! subtotal. A shared item counts in full toward every claimant, so the
//! sum of claimed subtotals need not reconcile with the bill subtotal
//! (unclaimed items pull it below, shared items push it above).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BillItem, ExtractedReceipt, Person, Rate, TipSpec};
use crate::validation::validate_person_name;
use crate::{MAX_BILL_ITEMS, MAX_PEOPLE};

// =============================================================================
// Bill
// =============================================================================

/// The complete state of one bill-splitting session.
///
/// ## Invariants
/// - At least one person always exists (removal of the last is a no-op)
/// - Every claim index is within `[0, items.len())`
/// - Person ids are assigned monotonically and never reused
/// - Item prices are non-negative
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Extracted line items; position is the claim index.
    pub items: Vec<BillItem>,

    /// People splitting the bill.
    pub people: Vec<Person>,

    /// Tax rate. `None` means not yet known (no bill-stated figures and
    /// no manual entry) — distinct from an explicit 0%.
    pub tax_rate: Option<Rate>,

    /// How the tip is specified.
    pub tip: TipSpec,

    /// When this bill session was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Next person id to assign. Monotonic so ids are never reused.
    next_person_id: u32,
}

/// What `apply_extraction` did, for logging and client feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    /// Items that survived the filter and were installed.
    pub items_kept: usize,
    /// Items dropped for empty names or junk prices.
    pub items_dropped: usize,
    /// Tax rate derived from the bill-stated figures, if any.
    pub tax_rate: Option<Rate>,
}

impl Bill {
    /// Creates a new bill with no items and one default person.
    pub fn new() -> Self {
        Bill {
            items: Vec::new(),
            people: vec![Person::new(1)],
            tax_rate: None,
            tip: TipSpec::default(),
            created_at: Utc::now(),
            next_person_id: 2,
        }
    }

    // -------------------------------------------------------------------------
    // Item mutations
    // -------------------------------------------------------------------------

    /// Replaces the item sequence.
    ///
    /// All existing claims are cleared: indices refer to positions in the
    /// new sequence and carrying them over would silently reassign money.
    pub fn set_items(&mut self, items: Vec<BillItem>) -> CoreResult<()> {
        if items.len() > MAX_BILL_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_BILL_ITEMS,
            });
        }
        if let Some(bad) = items.iter().find(|i| i.price_cents < 0) {
            return Err(crate::error::ValidationError::OutOfRange {
                field: format!("price of '{}'", bad.name),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        self.items = items;
        for person in &mut self.people {
            person.claimed_items.clear();
        }
        Ok(())
    }

    /// Installs a fresh extraction result.
    ///
    /// Filters the raw items, replaces the item sequence, and re-derives
    /// the tax rate from the bill-stated figures. When no rate can be
    /// derived the rate is left unset so the caller knows to ask the user
    /// for it — a previous bill's rate never leaks into a new extraction.
    pub fn apply_extraction(&mut self, receipt: &ExtractedReceipt) -> CoreResult<ExtractionOutcome> {
        let (items, dropped) = receipt.clean_items();
        let kept = items.len();
        self.set_items(items)?;
        self.tax_rate = receipt.derived_tax_rate();

        Ok(ExtractionOutcome {
            items_kept: kept,
            items_dropped: dropped,
            tax_rate: self.tax_rate,
        })
    }

    // -------------------------------------------------------------------------
    // People mutations
    // -------------------------------------------------------------------------

    /// Adds a person with a default name. Returns the new person's id.
    pub fn add_person(&mut self) -> CoreResult<u32> {
        if self.people.len() >= MAX_PEOPLE {
            return Err(CoreError::TooManyPeople { max: MAX_PEOPLE });
        }

        let id = self.next_person_id;
        self.next_person_id += 1;
        self.people.push(Person::new(id));
        Ok(id)
    }

    /// Removes a person by id.
    ///
    /// ## Behavior
    /// - Unknown id: no-op (not an error)
    /// - Last remaining person: no-op — a bill always has someone to pay it
    ///
    /// Returns whether a person was actually removed.
    pub fn remove_person(&mut self, id: u32) -> bool {
        if self.people.len() <= 1 {
            return false;
        }
        let before = self.people.len();
        self.people.retain(|p| p.id != id);
        self.people.len() < before
    }

    /// Renames a person. Unknown ids are a no-op, matching remove.
    pub fn rename_person(&mut self, id: u32, name: &str) -> CoreResult<()> {
        let name = validate_person_name(name)?;
        if let Some(person) = self.people.iter_mut().find(|p| p.id == id) {
            person.name = name;
        }
        Ok(())
    }

    /// Toggles a claim: claims the item if unclaimed by this person,
    /// releases it otherwise.
    ///
    /// ## Errors
    /// - `InvalidItemIndex` when the index is outside the item sequence.
    ///   The bill is left untouched; clamping or ignoring would silently
    ///   misattribute money.
    /// - `PersonNotFound` when the person id is not on this bill.
    ///
    /// Returns whether the item is claimed by this person afterwards.
    pub fn toggle_claim(&mut self, person_id: u32, item_index: usize) -> CoreResult<bool> {
        if item_index >= self.items.len() {
            return Err(CoreError::InvalidItemIndex {
                index: item_index,
                len: self.items.len(),
            });
        }

        let person = self
            .people
            .iter_mut()
            .find(|p| p.id == person_id)
            .ok_or(CoreError::PersonNotFound(person_id))?;

        if person.claimed_items.remove(&item_index) {
            Ok(false)
        } else {
            person.claimed_items.insert(item_index);
            Ok(true)
        }
    }

    // -------------------------------------------------------------------------
    // Tax & tip
    // -------------------------------------------------------------------------

    /// Overrides the tax rate (`None` = unset).
    pub fn set_tax_rate(&mut self, rate: Option<Rate>) {
        self.tax_rate = rate;
    }

    /// Overrides the tip specification.
    pub fn set_tip(&mut self, tip: TipSpec) {
        self.tip = tip;
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// Computes the full split: bill totals plus one share per person.
    ///
    /// Pure function of the current state — no side effects, identical
    /// output for identical state. An unset tax rate computes as 0%.
    /// An empty bill yields an all-zero summary, not an error.
    pub fn summarize(&self) -> BillSummary {
        let subtotal: Money = self.items.iter().map(BillItem::price).sum();
        let tax_rate = self.tax_rate.unwrap_or_default();
        let tax = subtotal.apply_rate(tax_rate);
        let tip = self.tip.amount(subtotal);
        let grand_total = subtotal + tax + tip;

        let people = self
            .people
            .iter()
            .map(|person| {
                let claimed = person.claimed_subtotal(&self.items);
                // Zero-subtotal bills allocate nothing (proportion = 0)
                let person_tax = tax.proportional_share(claimed, subtotal);
                let person_tip = tip.proportional_share(claimed, subtotal);

                PersonShare {
                    person_id: person.id,
                    name: person.name.clone(),
                    claimed_items: person.claimed_items.iter().copied().collect(),
                    subtotal_cents: claimed.cents(),
                    tax_cents: person_tax.cents(),
                    tip_cents: person_tip.cents(),
                    total_cents: (claimed + person_tax + person_tip).cents(),
                }
            })
            .collect();

        BillSummary {
            subtotal_cents: subtotal.cents(),
            tax_rate_bps: tax_rate.bps(),
            tax_cents: tax.cents(),
            tip_cents: tip.cents(),
            grand_total_cents: grand_total.cents(),
            people,
        }
    }
}

impl Default for Bill {
    fn default() -> Self {
        Bill::new()
    }
}

// =============================================================================
// Summary Types
// =============================================================================

/// One person's share of the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonShare {
    pub person_id: u32,
    pub name: String,
    /// Claimed item indices, ascending.
    pub claimed_items: Vec<usize>,
    /// Sum of claimed item prices (full price per claimant).
    pub subtotal_cents: i64,
    /// Proportional share of the bill's tax.
    pub tax_cents: i64,
    /// Proportional share of the bill's tip.
    pub tip_cents: i64,
    /// subtotal + tax + tip, exactly.
    pub total_cents: i64,
}

/// The computed split for the whole bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Sum of all item prices.
    pub subtotal_cents: i64,
    /// Effective tax rate (0 when unset).
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub tip_cents: i64,
    /// subtotal + tax + tip, exactly.
    pub grand_total_cents: i64,
    pub people: Vec<PersonShare>,
}

// =============================================================================
// Unit Tests
// =============================================================================
