// Copyright 2025 Cowboy AI, LLC.

//! Fee computation
//!
//! A pure function of vehicle category and entry/exit timestamps. Stays of
//! fifteen minutes or less bill the flat minimum; everything longer bills
//! the category's hourly rate times the stay rounded up to whole hours.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DomainError, DomainResult};
use crate::vehicle::VehicleCategory;

/// A monetary amount in minor currency units (cents)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Construct from minor units
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// The amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

impl std::ops::Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

/// Flat fee for stays of up to fifteen minutes
pub const MINIMUM_FEE: Money = Money::from_cents(100);

/// Grace window billed at the minimum fee, in minutes
pub const MINIMUM_FEE_WINDOW_MINUTES: i64 = 15;

/// Hourly rate for a vehicle category
pub const fn hourly_rate(category: VehicleCategory) -> Money {
    match category {
        VehicleCategory::Motorcycle => Money::from_cents(200),
        VehicleCategory::Car => Money::from_cents(500),
        VehicleCategory::Bus => Money::from_cents(1000),
    }
}

/// Result of a fee computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeeBreakdown {
    /// Total fee owed
    pub fee: Money,
    /// Whole minutes between entry and exit
    pub duration_minutes: i64,
}

/// Compute the parking fee for a completed stay.
///
/// Duration is the whole-minute difference between exit and entry. Stays of
/// [`MINIMUM_FEE_WINDOW_MINUTES`] or less bill [`MINIMUM_FEE`] regardless of
/// category; longer stays bill `hourly_rate(category) * ceil(minutes / 60)`.
/// A 61-minute stay therefore bills as two hours.
///
/// # Errors
///
/// [`DomainError::InvalidInterval`] if `exit_time` precedes `entry_time`.
pub fn compute_fee(
    category: VehicleCategory,
    entry_time: DateTime<Utc>,
    exit_time: DateTime<Utc>,
) -> DomainResult<FeeBreakdown> {
    if exit_time < entry_time {
        return Err(DomainError::InvalidInterval {
            entry: entry_time.to_rfc3339(),
            exit: exit_time.to_rfc3339(),
        });
    }

    let duration_minutes = (exit_time - entry_time).num_minutes();

    if duration_minutes <= MINIMUM_FEE_WINDOW_MINUTES {
        return Ok(FeeBreakdown {
            fee: MINIMUM_FEE,
            duration_minutes,
        });
    }

    let billed_hours = (duration_minutes + 59) / 60;
    Ok(FeeBreakdown {
        fee: hourly_rate(category) * billed_hours,
        duration_minutes,
    })
}
