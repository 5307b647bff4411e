//! # Domain Types
//!
//! Core domain types used throughout TabSplit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BillItem     │   │     Person      │   │    TipSpec      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (u32)       │   │  Percentage     │       │
//! │  │  price_cents    │   │  name           │   │  FixedAmount    │       │
//! │  └─────────────────┘   │  claimed_items  │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌───────────────────────────────┐               │
//! │  │      Rate       │   │      ExtractedReceipt         │               │
//! │  │  ─────────────  │   │  ─────────────────────────    │               │
//! │  │  bps (u32)      │   │  items: [{item, price}]       │               │
//! │  │  858 = 8.58%    │   │  subtotal/tax as on the bill  │               │
//! │  └─────────────────┘   └───────────────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stable Claim Indices
//! Items form an ordered sequence and the position in that sequence is the
//! identity a claim refers to. The sequence is immutable once installed for
//! a given extraction; a new extraction replaces it wholesale and clears
//! all claims.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 858 bps = 8.58% — two decimal places of percent, which is exactly the
/// precision receipts state tax at and users type rates at.
///
/// Used for both the tax rate and percentage tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a decimal percentage, rounded to the nearest
    /// basis point. Returns `None` for non-finite or negative input.
    pub fn from_percent(pct: f64) -> Option<Self> {
        if !pct.is_finite() || pct < 0.0 {
            return None;
        }
        let bps = (pct * 100.0).round();
        if bps > u32::MAX as f64 {
            return None;
        }
        Some(Rate(bps as u32))
    }

    /// Derives the rate that relates a stated tax amount to a stated
    /// subtotal: `tax / subtotal × 100`, rounded to the nearest basis
    /// point (two decimal places of percent).
    ///
    /// Returns `None` when the subtotal is not positive or the tax is
    /// negative — the caller must fall back to manual entry rather than
    /// assuming a zero rate.
    ///
    /// ## Example
    /// ```rust
    /// use tab_core::money::Money;
    /// use tab_core::types::Rate;
    ///
    /// // $1.50 tax stated against a $17.49 subtotal → 8.58%
    /// let rate = Rate::derived(Money::from_cents(150), Money::from_cents(1749));
    /// assert_eq!(rate, Some(Rate::from_bps(858)));
    /// ```
    pub fn derived(tax: Money, subtotal: Money) -> Option<Self> {
        if !subtotal.is_positive() || tax.cents() < 0 {
            return None;
        }
        let bps = (tax.cents() as i128 * 10_000 + subtotal.cents() as i128 / 2)
            / subtotal.cents() as i128;
        u32::try_from(bps).ok().map(Rate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line item extracted from the receipt.
///
/// Position in the item sequence is the stable index people claim by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillItem {
    /// Display name as it appeared on the receipt.
    pub name: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,
}

impl BillItem {
    /// Creates a new bill item.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        BillItem {
            name: name.into(),
            price_cents: price.cents(),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Person
// =============================================================================

/// A participant in the split, with the set of item indices they claimed.
///
/// ## Identity
/// `id` is a small integer unique within one bill, assigned monotonically
/// so that removing a person never causes another person's id to be
/// reused (the original assigned `people.length + 1`, which does).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Person {
    /// Unique id within the bill.
    pub id: u32,

    /// Display name ("Person 1" until renamed).
    pub name: String,

    /// Indices into the bill's item sequence. An item may be claimed by
    /// zero, one, or several people.
    pub claimed_items: BTreeSet<usize>,
}

impl Person {
    /// Creates a person with a default name derived from the id.
    pub fn new(id: u32) -> Self {
        Person {
            id,
            name: format!("Person {}", id),
            claimed_items: BTreeSet::new(),
        }
    }

    /// Sums the prices of this person's claimed items.
    ///
    /// Each claimant is charged the full price of every item they claimed;
    /// a shared item is counted in full for each of its claimants.
    pub fn claimed_subtotal(&self, items: &[BillItem]) -> Money {
        self.claimed_items
            .iter()
            .filter_map(|&idx| items.get(idx))
            .map(BillItem::price)
            .sum()
    }
}

// =============================================================================
// Tip Specification
// =============================================================================

/// How the tip is specified: a percentage of the subtotal, or a fixed
/// dollar amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TipSpec {
    /// Tip as a percentage of the subtotal (basis points).
    Percentage(Rate),
    /// Tip as a fixed amount (cents), independent of the subtotal.
    FixedAmount(Money),
}

impl TipSpec {
    /// Computes the tip amount for a given subtotal.
    pub fn amount(&self, subtotal: Money) -> Money {
        match self {
            TipSpec::Percentage(rate) => subtotal.apply_rate(*rate),
            TipSpec::FixedAmount(amount) => *amount,
        }
    }
}

impl Default for TipSpec {
    /// No tip until the user says otherwise.
    fn default() -> Self {
        TipSpec::Percentage(Rate::zero())
    }
}

// =============================================================================
// Extraction Payload
// =============================================================================

/// One raw line item as produced by the multimodal extraction model.
///
/// Prices arrive as decimal numbers; they only become `Money` after the
/// filtering pass in [`ExtractedReceipt::clean_items`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawReceiptItem {
    /// Item name as read off the receipt.
    pub item: String,
    /// Decimal price as read off the receipt.
    pub price: f64,
}

/// The extraction collaborator's full output for one receipt image.
///
/// Field names match the JSON schema the extraction model is asked to
/// produce. The bill-stated subtotal and tax are optional: receipts do
/// not always show them, and the model reports what it sees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReceipt {
    /// Extracted line items, possibly including junk entries.
    #[serde(default)]
    pub items: Vec<RawReceiptItem>,

    /// Subtotal amount as printed on the bill, if the model found one.
    #[serde(default)]
    pub subtotal_amount_on_bill: Option<f64>,

    /// Total tax amount as printed on the bill, if the model found one.
    #[serde(default)]
    pub tax_amount_on_bill: Option<f64>,
}

impl ExtractedReceipt {
    /// Filters the raw items down to usable bill items.
    ///
    /// Items with an empty name, a non-finite price, or a non-positive
    /// price are dropped before they ever reach the allocator. Returns
    /// the kept items and the number dropped.
    pub fn clean_items(&self) -> (Vec<BillItem>, usize) {
        let mut kept = Vec::with_capacity(self.items.len());
        for raw in &self.items {
            let name = raw.item.trim();
            let price = Money::from_decimal(raw.price);
            match price {
                Some(p) if !name.is_empty() && p.is_positive() => {
                    kept.push(BillItem::new(name, p));
                }
                _ => {}
            }
        }
        let dropped = self.items.len() - kept.len();
        (kept, dropped)
    }

    /// Derives the tax rate from the bill-stated subtotal and tax, when
    /// both are present and the subtotal is positive.
    ///
    /// Returns `None` otherwise — the rate is left *unset*, not zero, so
    /// the caller knows the user must supply it manually.
    pub fn derived_tax_rate(&self) -> Option<Rate> {
        let subtotal = Money::from_decimal(self.subtotal_amount_on_bill?)?;
        let tax = Money::from_decimal(self.tax_amount_on_bill?)?;
        Rate::derived(tax, subtotal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(858);
        assert_eq!(rate.bps(), 858);
        assert!((rate.percentage() - 8.58).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percent() {
        assert_eq!(Rate::from_percent(8.58), Some(Rate::from_bps(858)));
        assert_eq!(Rate::from_percent(0.0), Some(Rate::zero()));
        assert_eq!(Rate::from_percent(-1.0), None);
        assert_eq!(Rate::from_percent(f64::NAN), None);
    }

    #[test]
    fn test_rate_derived_reference_bill() {
        // 1.50 / 17.49 * 100 = 8.576...% → 8.58%
        let rate = Rate::derived(Money::from_cents(150), Money::from_cents(1749));
        assert_eq!(rate, Some(Rate::from_bps(858)));
    }

    #[test]
    fn test_rate_derived_guards() {
        // Zero subtotal: no rate can be inferred
        assert_eq!(Rate::derived(Money::from_cents(150), Money::zero()), None);
        // Zero tax against a real subtotal is a genuine 0% rate
        assert_eq!(
            Rate::derived(Money::zero(), Money::from_cents(1749)),
            Some(Rate::zero())
        );
    }

    #[test]
    fn test_person_claimed_subtotal() {
        let items = vec![
            BillItem::new("Burger", Money::from_cents(1299)),
            BillItem::new("Fries", Money::from_cents(450)),
        ];
        let mut person = Person::new(1);
        assert_eq!(person.claimed_subtotal(&items), Money::zero());

        person.claimed_items.insert(0);
        assert_eq!(person.claimed_subtotal(&items), Money::from_cents(1299));

        person.claimed_items.insert(1);
        assert_eq!(person.claimed_subtotal(&items), Money::from_cents(1749));
    }

    #[test]
    fn test_tip_spec_amount() {
        let subtotal = Money::from_cents(1749);

        let pct = TipSpec::Percentage(Rate::from_bps(1500)); // 15%
        assert_eq!(pct.amount(subtotal).cents(), 262); // $2.62

        let fixed = TipSpec::FixedAmount(Money::from_cents(500));
        assert_eq!(fixed.amount(subtotal).cents(), 500);
        // Fixed tips ignore the subtotal entirely
        assert_eq!(fixed.amount(Money::zero()).cents(), 500);
    }

    #[test]
    fn test_extraction_payload_field_names() {
        // The wire shape the extraction model is prompted to produce
        let json = r#"{
            "items": [{"item": "Burger", "price": 12.99}, {"item": "Fries", "price": 4.50}],
            "subtotalAmountOnBill": 17.49,
            "taxAmountOnBill": 1.50
        }"#;
        let receipt: ExtractedReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.derived_tax_rate(), Some(Rate::from_bps(858)));
    }

    #[test]
    fn test_clean_items_filters_junk() {
        let receipt = ExtractedReceipt {
            items: vec![
                RawReceiptItem {
                    item: "Burger".into(),
                    price: 12.99,
                },
                RawReceiptItem {
                    item: "".into(),
                    price: 3.00,
                },
                RawReceiptItem {
                    item: "Comp'd dessert".into(),
                    price: 0.0,
                },
                RawReceiptItem {
                    item: "Refund".into(),
                    price: -4.00,
                },
                RawReceiptItem {
                    item: "Glitch".into(),
                    price: f64::NAN,
                },
            ],
            subtotal_amount_on_bill: None,
            tax_amount_on_bill: None,
        };

        let (kept, dropped) = receipt.clean_items();
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped, 4);
        assert_eq!(kept[0].name, "Burger");
        assert_eq!(kept[0].price(), Money::from_cents(1299));
    }

    #[test]
    fn test_derived_tax_rate_requires_both_figures() {
        let mut receipt = ExtractedReceipt::default();
        assert_eq!(receipt.derived_tax_rate(), None);

        receipt.subtotal_amount_on_bill = Some(17.49);
        assert_eq!(receipt.derived_tax_rate(), None);

        receipt.tax_amount_on_bill = Some(1.50);
        assert_eq!(receipt.derived_tax_rate(), Some(Rate::from_bps(858)));

        // Subtotal of zero on the bill: leave the rate unset
        receipt.subtotal_amount_on_bill = Some(0.0);
        assert_eq!(receipt.derived_tax_rate(), None);
    }
}
