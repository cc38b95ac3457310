// Copyright 2025 Cowboy AI, LLC.

//! Parking tickets and their lifecycle
//!
//! A ticket is the record of one vehicle visit. It is created `Active` at
//! entry and transitions exactly once to `Paid` at exit, when the exit
//! timestamp, fee, and payment timestamp are all set together. Paid tickets
//! are never mutated or deleted; they are the audit trail.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DomainError, DomainResult};
use crate::fees::Money;
use crate::identifiers::{LicensePlate, SpotCode, TicketNumber};

/// Lifecycle status of a parking ticket
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketStatus {
    /// Vehicle is parked; no exit recorded yet
    Active,
    /// Visit is complete; exit, fee, and payment are recorded
    Paid,
}

impl TicketStatus {
    /// Status name for logging
    pub fn name(&self) -> &'static str {
        match self {
            TicketStatus::Active => "Active",
            TicketStatus::Paid => "Paid",
        }
    }

    /// Paid is the terminal status; no transition leaves it
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Paid)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One vehicle visit, from entry to exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Ticket {
    /// Globally unique ticket number
    pub number: TicketNumber,
    /// Plate of the vehicle this ticket was issued to
    pub plate: LicensePlate,
    /// Spot the vehicle occupies
    pub spot_code: SpotCode,
    /// When the vehicle entered
    pub entry_time: DateTime<Utc>,
    /// When the vehicle exited; absent while active
    pub exit_time: Option<DateTime<Utc>>,
    /// Fee charged at exit; absent while active
    pub fee: Option<Money>,
    /// When the fee was settled; absent while active
    pub paid_at: Option<DateTime<Utc>>,
    /// Lifecycle status
    pub status: TicketStatus,
}

impl Ticket {
    /// Issue a new active ticket
    pub fn issue(
        number: TicketNumber,
        plate: LicensePlate,
        spot_code: SpotCode,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            plate,
            spot_code,
            entry_time,
            exit_time: None,
            fee: None,
            paid_at: None,
            status: TicketStatus::Active,
        }
    }

    /// Whether this ticket represents a vehicle currently in the lot
    pub fn is_active(&self) -> bool {
        self.status == TicketStatus::Active
    }

    /// Close the ticket: record exit time and fee, settle payment, and
    /// move to `Paid`, all in one transition.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the ticket is not active; a ticket in
    /// a terminal status cannot be closed again.
    pub(crate) fn close(&mut self, exit_time: DateTime<Utc>, fee: Money) -> DomainResult<()> {
        if !self.is_active() {
            return Err(DomainError::not_found(
                "active ticket",
                self.number.as_str(),
            ));
        }
        self.exit_time = Some(exit_time);
        self.fee = Some(fee);
        self.paid_at = Some(exit_time);
        self.status = TicketStatus::Paid;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        Ticket::issue(
            TicketNumber::from("PKT-20250601100000-ABCD1234"),
            LicensePlate::new("KA01AB1234"),
            SpotCode::from("1-C-01"),
            Utc::now(),
        )
    }

    #[test]
    fn issued_tickets_are_active_with_no_exit_data() {
        let ticket = sample_ticket();
        assert!(ticket.is_active());
        assert!(ticket.exit_time.is_none());
        assert!(ticket.fee.is_none());
        assert!(ticket.paid_at.is_none());
    }

    #[test]
    fn close_sets_exit_fee_and_payment_atomically() {
        let mut ticket = sample_ticket();
        let exit = ticket.entry_time + chrono::Duration::hours(2);
        ticket.close(exit, Money::from_cents(1000)).unwrap();

        assert_eq!(ticket.status, TicketStatus::Paid);
        assert_eq!(ticket.exit_time, Some(exit));
        assert_eq!(ticket.fee, Some(Money::from_cents(1000)));
        assert_eq!(ticket.paid_at, Some(exit));
    }

    #[test]
    fn paid_is_terminal() {
        let mut ticket = sample_ticket();
        let exit = ticket.entry_time + chrono::Duration::hours(1);
        ticket.close(exit, Money::from_cents(500)).unwrap();

        assert!(ticket.status.is_terminal());
        let err = ticket.close(exit, Money::from_cents(500)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
