//! # tab-core: Pure Business Logic for TabSplit
//!
//! This crate is the **heart** of TabSplit. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        TabSplit Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (TypeScript)                           │   │
//! │  │   Upload UI ──► Claim checkboxes ──► Tax/Tip ──► Breakdown     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON/REST                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/api (Axum handlers)                       │   │
//! │  │   per-session bill store, extraction intake, mutations         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tab-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   bill    │  │   parse   │  │   │
//! │  │   │ BillItem  │  │   Money   │  │   Bill    │  │ tolerant  │  │   │
//! │  │   │  Person   │  │   Rate    │  │  Summary  │  │  input    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BillItem, Person, TipSpec, ExtractedReceipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`bill`] - Bill state, mutations, and the allocation algorithm
//! - [`parse`] - Tolerant parsing of user-typed tax/tip input
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `summarize()` is deterministic - same state = same split
//! 2. **No I/O**: Network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Forgiving Input**: Unparseable tax/tip input coerces to zero; only
//!    operations that would corrupt the split are errors
//!
//! ## Example Usage
//!
//! ```rust
//! use tab_core::bill::Bill;
//! use tab_core::money::Money;
//! use tab_core::types::{BillItem, Rate, TipSpec};
//!
//! let mut bill = Bill::new();
//! bill.set_items(vec![
//!     BillItem::new("Burger", Money::from_cents(1299)),
//!     BillItem::new("Fries", Money::from_cents(450)),
//! ]).unwrap();
//! bill.set_tax_rate(Some(Rate::from_bps(858)));
//! bill.set_tip(TipSpec::Percentage(Rate::from_bps(1500)));
//! bill.toggle_claim(1, 0).unwrap(); // Person 1 takes the burger
//!
//! let summary = bill.summarize();
//! assert_eq!(summary.grand_total_cents, 2161); // $21.61
//! assert_eq!(summary.people[0].total_cents, 1605); // $16.05
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod money;
pub mod parse;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tab_core::Bill` instead of
// `use tab_core::bill::Bill`

pub use bill::{Bill, BillSummary, ExtractionOutcome, PersonShare};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on a single bill
///
/// ## Business Reason
/// Receipts are short; a cap this generous only guards against a
/// runaway extraction payload, not any real receipt.
pub const MAX_BILL_ITEMS: usize = 200;

/// Maximum people splitting a single bill
///
/// ## Business Reason
/// Keeps the roster and the per-person breakdown bounded; parties larger
/// than this are beyond what one receipt split can usefully model.
pub const MAX_PEOPLE: usize = 50;
