//! # Session State
//!
//! Per-session bill storage.
//!
//! ## Why Per-Session?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Isolation                                    │
//! │                                                                         │
//! │  A process-wide "last parsed items" variable works for one user and    │
//! │  silently cross-wires bills for two. Every request here addresses a    │
//! │  bill by session id, so concurrent parties never see each other's      │
//! │  state:                                                                 │
//! │                                                                         │
//! │  POST /api/bills            ──► billId: 7c0e…                          │
//! │  POST /api/bills/7c0e…/…    ──► that bill, and only that bill          │
//! │                                                                         │
//! │  summarize() itself is stateless per call - the store is the only      │
//! │  shared thing, and it is behind one Mutex.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `Arc<Mutex<HashMap>>` - bill operations are quick, and most of them
//! mutate, so a plain Mutex beats the complexity of an RwLock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use tab_core::Bill;

/// Shared store of live bill sessions.
#[derive(Debug, Clone)]
pub struct Sessions {
    bills: Arc<Mutex<HashMap<Uuid, Bill>>>,
    max_sessions: usize,
}

impl Sessions {
    /// Creates an empty store capped at `max_sessions` live bills.
    pub fn new(max_sessions: usize) -> Self {
        Sessions {
            bills: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
        }
    }

    /// Creates a new bill session and returns its id.
    ///
    /// When the cap is reached the oldest session is evicted - sessions
    /// are ephemeral calculator state, not records.
    pub fn create(&self) -> Uuid {
        let mut bills = self.bills.lock().expect("Sessions mutex poisoned");

        if bills.len() >= self.max_sessions {
            if let Some(oldest) = bills
                .iter()
                .min_by_key(|(_, bill)| bill.created_at)
                .map(|(id, _)| *id)
            {
                debug!(session = %oldest, "Evicting oldest bill session");
                bills.remove(&oldest);
            }
        }

        let id = Uuid::new_v4();
        bills.insert(id, Bill::new());
        id
    }

    /// Executes a function with read access to a bill.
    ///
    /// Returns `None` when the session id is unknown.
    pub fn with_bill<F, R>(&self, id: Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&Bill) -> R,
    {
        let bills = self.bills.lock().expect("Sessions mutex poisoned");
        bills.get(&id).map(f)
    }

    /// Executes a function with write access to a bill.
    ///
    /// Returns `None` when the session id is unknown.
    pub fn with_bill_mut<F, R>(&self, id: Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut Bill) -> R,
    {
        let mut bills = self.bills.lock().expect("Sessions mutex poisoned");
        bills.get_mut(&id).map(f)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.bills.lock().expect("Sessions mutex poisoned").len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tab_core::{BillItem, Money};

    #[test]
    fn test_sessions_are_isolated() {
        let sessions = Sessions::new(16);
        let a = sessions.create();
        let b = sessions.create();

        sessions
            .with_bill_mut(a, |bill| {
                bill.set_items(vec![BillItem::new("Burger", Money::from_cents(1299))])
            })
            .unwrap()
            .unwrap();

        let a_subtotal = sessions.with_bill(a, |b| b.summarize().subtotal_cents).unwrap();
        let b_subtotal = sessions.with_bill(b, |b| b.summarize().subtotal_cents).unwrap();
        assert_eq!(a_subtotal, 1299);
        assert_eq!(b_subtotal, 0);
    }

    #[test]
    fn test_unknown_session() {
        let sessions = Sessions::new(16);
        assert!(sessions.with_bill(Uuid::new_v4(), |_| ()).is_none());
        assert!(sessions.with_bill_mut(Uuid::new_v4(), |_| ()).is_none());
    }

    #[test]
    fn test_eviction_at_cap() {
        let sessions = Sessions::new(2);
        let first = sessions.create();
        let _second = sessions.create();
        let _third = sessions.create();

        assert_eq!(sessions.len(), 2);
        // The oldest session made way for the newest
        assert!(sessions.with_bill(first, |_| ()).is_none());
    }
}
