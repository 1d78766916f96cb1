// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form boundary: raw field values in, validated fields out, plus the
//! add/edit mode the form is currently in.

use log::{debug, info};
use rust_decimal::Decimal;

use crate::error::{LedgerError, TrackerError, ValidationError};
use crate::ledger::{IdGenerator, Ledger};
use crate::models::{Cycle, Subscription, SubscriptionFields};
use crate::utils::parse_date;

/// Service selector value meaning "use the free-form name".
pub const CUSTOM: &str = "custom";

pub const KNOWN_SERVICES: &[&str] = &[
    "Netflix",
    "Disney+",
    "Spotify",
    "YouTube Premium",
    "Apple Music",
    "Apple TV+",
    "iCloud+",
    "Google One",
    "Amazon Prime",
    "ChatGPT Plus",
    "Microsoft 365",
    "Adobe Creative Cloud",
    "Nintendo Switch Online",
];

pub fn is_known_service(name: &str) -> bool {
    KNOWN_SERVICES.contains(&name)
}

/// Unvalidated form contents, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub service: String,
    pub custom_name: String,
    pub price: String,
    pub cycle: String,
    pub next_date: String,
}

impl FormInput {
    /// Picks the catalogue entry when `name` is one, otherwise `custom`.
    pub fn for_name(name: &str) -> Self {
        let mut input = FormInput::default();
        input.set_name(name);
        input
    }

    pub fn set_name(&mut self, name: &str) {
        if is_known_service(name) {
            self.service = name.to_string();
            self.custom_name.clear();
        } else {
            self.service = CUSTOM.to_string();
            self.custom_name = name.to_string();
        }
    }

    /// Prefills the form for editing an existing record.
    pub fn from_subscription(sub: &Subscription) -> Self {
        let mut input = FormInput::for_name(&sub.name);
        input.price = sub.price.normalize().to_string();
        input.cycle = sub.cycle.to_string();
        input.next_date = sub.next_date.to_string();
        input
    }

    pub fn is_custom(&self) -> bool {
        self.service == CUSTOM
    }

    pub fn name(&self) -> &str {
        if self.is_custom() {
            &self.custom_name
        } else {
            &self.service
        }
    }

    pub fn validate(&self) -> Result<SubscriptionFields, ValidationError> {
        let name = self.name().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidPrice(self.price.clone()))?;
        let cycle = self.cycle.parse::<Cycle>()?;
        let next_date = parse_date(&self.next_date)
            .map_err(|_| ValidationError::InvalidDate(self.next_date.clone()))?;
        SubscriptionFields::new(name, price, cycle, next_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added(i64),
    Updated(i64),
}

impl Submitted {
    pub fn id(self) -> i64 {
        match self {
            Submitted::Added(id) | Submitted::Updated(id) => id,
        }
    }
}

/// Tracks whether the form adds a new record or edits an existing one.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    editing: Option<i64>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn start_edit(&mut self, ledger: &Ledger, id: i64) -> Result<FormInput, LedgerError> {
        let sub = ledger.find_by_id(id).ok_or(LedgerError::NotFound(id))?;
        self.editing = Some(id);
        debug!("form: editing subscription {}", id);
        Ok(FormInput::from_subscription(sub))
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Validates `input` and applies it. Invalid input leaves both the ledger
    /// and the edit mode as they were.
    pub fn submit(
        &mut self,
        ledger: &mut Ledger,
        ids: &mut IdGenerator,
        input: &FormInput,
    ) -> Result<Submitted, TrackerError> {
        let fields = input.validate()?;
        match self.editing.take() {
            Some(id) => {
                ledger.update(id, fields)?;
                info!("form: saved changes to subscription {}", id);
                Ok(Submitted::Updated(id))
            }
            None => {
                let id = ledger.create(ids, fields)?;
                info!("form: added subscription {}", id);
                Ok(Submitted::Added(id))
            }
        }
    }

    /// Removes `id`; deleting the record being edited also leaves edit mode.
    pub fn delete(&mut self, ledger: &mut Ledger, id: i64) -> Result<Subscription, LedgerError> {
        if self.editing == Some(id) {
            debug!("form: edited subscription {} deleted, leaving edit mode", id);
            self.editing = None;
        }
        ledger.remove(id)
    }
}
