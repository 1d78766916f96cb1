// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// A form field failed validation; the ledger was not touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid price '{0}', expected a number")]
    InvalidPrice(String),

    #[error("price must be greater than zero (got {0})")]
    NonPositivePrice(String),

    #[error("price {0} has too many digits, use at most 2 decimal places and 15 digits")]
    PricePrecision(String),

    #[error("unknown cycle '{0}', expected monthly|quarterly|half-yearly|yearly|one-time")]
    UnknownCycle(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("subscription {0} not found")]
    NotFound(i64),

    #[error("subscription id {0} already exists")]
    DuplicateId(i64),

    #[error("no subscription id left above {0}")]
    IdSpaceExhausted(i64),
}

/// The store could not be read or written. The in-memory ledger is still
/// authoritative, but changes may not survive a restart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store unavailable: {0}")]
    Store(String),

    #[error("failed to encode subscriptions: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("stored subscriptions are unreadable: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("stored subscriptions are inconsistent: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(e: rusqlite::Error) -> Self {
        PersistenceError::Store(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
