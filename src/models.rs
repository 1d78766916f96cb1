// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Billing frequency of a subscription.
///
/// Stored as its kebab-case name. A name this build does not know loads as
/// `Unknown` with the original text kept, so it is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cycle {
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
    OneTime,
    Unknown(String),
}

impl Cycle {
    /// Display order used when listing subscriptions grouped by cycle.
    pub const ALL: [Cycle; 5] = [
        Cycle::Monthly,
        Cycle::Quarterly,
        Cycle::HalfYearly,
        Cycle::Yearly,
        Cycle::OneTime,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Cycle::Monthly => "monthly",
            Cycle::Quarterly => "quarterly",
            Cycle::HalfYearly => "half-yearly",
            Cycle::Yearly => "yearly",
            Cycle::OneTime => "one-time",
            Cycle::Unknown(raw) => raw,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Cycle::Monthly => "Monthly",
            Cycle::Quarterly => "Quarterly",
            Cycle::HalfYearly => "Half-yearly",
            Cycle::Yearly => "Yearly",
            Cycle::OneTime => "One-time",
            Cycle::Unknown(_) => "Unrecognized cycle",
        }
    }

    pub fn is_recurring(&self) -> bool {
        *self != Cycle::OneTime
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Cycle::Unknown(_))
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input: unknown names are rejected.
impl FromStr for Cycle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Cycle::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ValidationError::UnknownCycle(s.to_string()))
    }
}

impl From<String> for Cycle {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Cycle::Unknown(raw))
    }
}

impl From<Cycle> for String {
    fn from(cycle: Cycle) -> Self {
        match cycle {
            Cycle::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A recorded recurring or one-time payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub cycle: Cycle,
    pub next_date: NaiveDate,
}

impl Subscription {
    pub fn new(id: i64, fields: SubscriptionFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            cycle: fields.cycle,
            next_date: fields.next_date,
        }
    }

    /// Replaces every mutable field at once; `id` is untouched.
    pub fn apply(&mut self, fields: SubscriptionFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.cycle = fields.cycle;
        self.next_date = fields.next_date;
    }

    pub fn fields(&self) -> SubscriptionFields {
        SubscriptionFields {
            name: self.name.clone(),
            price: self.price,
            cycle: self.cycle.clone(),
            next_date: self.next_date,
        }
    }
}

/// The four mutable fields of a subscription, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFields {
    pub name: String,
    pub price: Decimal,
    pub cycle: Cycle,
    pub next_date: NaiveDate,
}

impl SubscriptionFields {
    /// Builds a field set, enforcing a non-blank name and a positive price.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        cycle: Cycle,
        next_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(price.to_string()));
        }
        if !price_is_storable(price) {
            return Err(ValidationError::PricePrecision(price.to_string()));
        }
        Ok(Self {
            name,
            price,
            cycle,
            next_date,
        })
    }
}

/// Prices are stored as JSON numbers, so only values an `f64` carries
/// exactly back to the same decimal are accepted: at most two decimal places
/// and fifteen significant digits.
pub fn price_is_storable(price: Decimal) -> bool {
    if price.normalize().scale() > MAX_PRICE_SCALE || price.abs() > max_price() {
        return false;
    }
    price
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        .is_some_and(|back| back == price)
}

const MAX_PRICE_SCALE: u32 = 2;

fn max_price() -> Decimal {
    Decimal::new(999_999_999_999_999, MAX_PRICE_SCALE)
}
