// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use log::debug;

use crate::error::LedgerError;
use crate::models::{Subscription, SubscriptionFields};

/// The authoritative in-memory collection of subscriptions.
///
/// Insertion order is kept so that a persisted snapshot reloads in the same
/// order. Persistence is the caller's job: every mutator only touches memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Subscription>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from a stored snapshot, rejecting repeated ids.
    pub fn from_entries(entries: Vec<Subscription>) -> Result<Self, LedgerError> {
        let mut ledger = Ledger::new();
        for sub in entries {
            ledger.add(sub)?;
        }
        Ok(ledger)
    }

    /// Appends a record whose id is not yet present.
    pub fn add(&mut self, sub: Subscription) -> Result<i64, LedgerError> {
        if self.position(sub.id).is_some() {
            return Err(LedgerError::DuplicateId(sub.id));
        }
        let id = sub.id;
        self.entries.push(sub);
        debug!("ledger: added subscription {}", id);
        Ok(id)
    }

    /// Allocates a fresh id from `ids` and appends the new record.
    pub fn create(
        &mut self,
        ids: &mut IdGenerator,
        fields: SubscriptionFields,
    ) -> Result<i64, LedgerError> {
        ids.observe(self.max_id());
        let id = ids.next_id()?;
        self.add(Subscription::new(id, fields))
    }

    pub fn update(
        &mut self,
        id: i64,
        fields: SubscriptionFields,
    ) -> Result<&Subscription, LedgerError> {
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        let entry = &mut self.entries[idx];
        entry.apply(fields);
        debug!("ledger: updated subscription {}", id);
        Ok(entry)
    }

    pub fn remove(&mut self, id: i64) -> Result<Subscription, LedgerError> {
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        debug!("ledger: removed subscription {}", id);
        Ok(self.entries.remove(idx))
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Subscription> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Subscription] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_id(&self) -> Option<i64> {
        self.entries.iter().map(|s| s.id).max()
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.entries.iter().position(|s| s.id == id)
    }
}

/// Hands out millisecond-timestamp ids that never repeat within a process.
///
/// Two calls inside the same millisecond (or a clock that went backwards)
/// still yield strictly increasing values: `next = max(now, last + 1)`.
/// Once `i64::MAX` has been handed out (or observed) no further id exists.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts above every id already present in `ledger`.
    pub fn seeded(ledger: &Ledger) -> Self {
        let mut ids = Self::new();
        ids.observe(ledger.max_id());
        ids
    }

    pub fn observe(&mut self, id: Option<i64>) {
        if let Some(id) = id {
            self.last = self.last.max(id);
        }
    }

    pub fn next_id(&mut self) -> Result<i64, LedgerError> {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    pub fn next_id_at(&mut self, now_ms: i64) -> Result<i64, LedgerError> {
        let floor = self
            .last
            .checked_add(1)
            .ok_or(LedgerError::IdSpaceExhausted(self.last))?;
        let id = now_ms.max(floor);
        self.last = id;
        Ok(id)
    }
}
