// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::{debug, warn};

use crate::error::{LedgerError, PersistenceError};
use crate::ledger::Ledger;
use crate::models::Subscription;

pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";

/// A durable string-to-string map. Writes are last-writer-wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// In-process store for tests and dry runs. `set_failing(true)` makes every
/// call report the store as unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.failing.get() {
            return Err(PersistenceError::Store("memory store is offline".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check()?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the whole subscription list as one JSON blob.
#[derive(Debug)]
pub struct SubscriptionGateway<S> {
    store: S,
}

impl<S: KeyValueStore> SubscriptionGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Missing (or `null`) data is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<Subscription>, PersistenceError> {
        let Some(blob) = self.store.get(SUBSCRIPTIONS_KEY)? else {
            debug!("store: no saved subscriptions");
            return Ok(Vec::new());
        };
        let subs: Option<Vec<Subscription>> =
            serde_json::from_str(&blob).map_err(PersistenceError::Decode)?;
        let subs = subs.unwrap_or_default();
        for sub in subs.iter().filter(|s| !s.cycle.is_known()) {
            warn!(
                "store: subscription {} has unrecognized cycle '{}'; it is kept but not costed",
                sub.id, sub.cycle
            );
        }
        debug!("store: loaded {} subscriptions", subs.len());
        Ok(subs)
    }

    pub fn load_ledger(&self) -> Result<Ledger, PersistenceError> {
        Ledger::from_entries(self.load()?).map_err(|e| match e {
            LedgerError::DuplicateId(id) => {
                PersistenceError::Corrupt(format!("id {} appears more than once", id))
            }
            other => PersistenceError::Corrupt(other.to_string()),
        })
    }

    pub fn save(&self, subs: &[Subscription]) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(subs).map_err(PersistenceError::Encode)?;
        if let Err(e) = self.store.set(SUBSCRIPTIONS_KEY, &blob) {
            warn!("store: saving {} subscriptions failed: {}", subs.len(), e);
            return Err(e);
        }
        debug!("store: saved {} subscriptions", subs.len());
        Ok(())
    }
}
