// Copyright 2025 Cowboy AI, LLC.

//! Ticket ledger
//!
//! Exclusive owner of ticket records, the vehicle table, and the
//! active-ticket-per-vehicle index. The index is derived state, rebuilt
//! from the tickets on restore; it exists so that "is this vehicle
//! currently parked" is an O(1) check-and-set under one write guard, which
//! is what makes concurrent duplicate entries impossible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};

use crate::errors::{DomainError, DomainResult};
use crate::fees::Money;
use crate::identifiers::{LicensePlate, SpotCode, TicketNumber};
use crate::ticket::Ticket;
use crate::vehicle::{Vehicle, VehicleCategory};

/// Serializable ledger contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    /// Every vehicle ever seen, by plate
    pub vehicles: HashMap<LicensePlate, Vehicle>,
    /// Every ticket ever issued, by number
    pub tickets: HashMap<TicketNumber, Ticket>,
    /// Derived index: plate of a parked vehicle to its active ticket
    #[serde(skip)]
    active_by_plate: HashMap<LicensePlate, TicketNumber>,
}

impl LedgerState {
    fn rebuild_index(&mut self) {
        self.active_by_plate = self
            .tickets
            .values()
            .filter(|t| t.is_active())
            .map(|t| (t.plate.clone(), t.number.clone()))
            .collect();
    }
}

/// Owner of the ticket lifecycle and vehicle identity
#[derive(Debug, Default)]
pub struct TicketLedger {
    inner: RwLock<LedgerState>,
}

impl TicketLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, LedgerState>> {
        self.inner
            .read()
            .map_err(|_| DomainError::Internal("ticket ledger lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, LedgerState>> {
        self.inner
            .write()
            .map_err(|_| DomainError::Internal("ticket ledger lock poisoned".into()))
    }

    /// Return the vehicle for a plate, creating it on first sight.
    /// A returning vehicle keeps its original registration.
    pub fn register_vehicle(
        &self,
        plate: LicensePlate,
        category: VehicleCategory,
        owner_name: Option<String>,
        seen_at: DateTime<Utc>,
    ) -> DomainResult<Vehicle> {
        let mut state = self.write()?;
        let vehicle = state
            .vehicles
            .entry(plate.clone())
            .or_insert_with(|| Vehicle::new(plate, category, owner_name, seen_at));
        Ok(vehicle.clone())
    }

    /// Look up a known vehicle
    pub fn vehicle(&self, plate: &LicensePlate) -> DomainResult<Option<Vehicle>> {
        Ok(self.read()?.vehicles.get(plate).cloned())
    }

    /// Issue an active ticket for a vehicle.
    ///
    /// The one-active-ticket-per-vehicle check and the insert happen under
    /// the same write guard; two concurrent calls for the same plate cannot
    /// both succeed.
    ///
    /// # Errors
    ///
    /// [`DomainError::AlreadyActive`] if the vehicle already holds an
    /// active ticket.
    pub fn issue(
        &self,
        plate: LicensePlate,
        spot_code: SpotCode,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<Ticket> {
        let mut state = self.write()?;

        if state.active_by_plate.contains_key(&plate) {
            warn!(plate = %plate, "ticket issuance rejected: vehicle already parked");
            return Err(DomainError::AlreadyActive {
                plate: plate.to_string(),
            });
        }

        let mut number = TicketNumber::generate(entry_time);
        while state.tickets.contains_key(&number) {
            number = TicketNumber::generate(entry_time);
        }

        let ticket = Ticket::issue(number.clone(), plate.clone(), spot_code, entry_time);
        state.tickets.insert(number.clone(), ticket.clone());
        state.active_by_plate.insert(plate, number);
        info!(ticket = %ticket.number, plate = %ticket.plate, spot = %ticket.spot_code, "ticket issued");
        Ok(ticket)
    }

    /// Close an active ticket: set exit time, fee, payment timestamp, and
    /// status in one transition, and drop the active index entry.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if no such ticket exists or it is not
    /// active.
    pub fn close(
        &self,
        number: &TicketNumber,
        exit_time: DateTime<Utc>,
        fee: Money,
    ) -> DomainResult<Ticket> {
        let mut state = self.write()?;

        let ticket = state
            .tickets
            .get_mut(number)
            .ok_or_else(|| DomainError::not_found("ticket", number.as_str()))?;
        ticket.close(exit_time, fee)?;
        let closed = ticket.clone();

        if state.active_by_plate.get(&closed.plate) == Some(number) {
            state.active_by_plate.remove(&closed.plate);
        }
        info!(ticket = %closed.number, fee = %fee, "ticket closed");
        Ok(closed)
    }

    /// The active ticket for a plate, if the vehicle is currently parked
    pub fn find_active_by_vehicle(&self, plate: &LicensePlate) -> DomainResult<Option<Ticket>> {
        let state = self.read()?;
        Ok(state
            .active_by_plate
            .get(plate)
            .and_then(|number| state.tickets.get(number))
            .cloned())
    }

    /// Look up any ticket by number
    pub fn ticket(&self, number: &TicketNumber) -> DomainResult<Option<Ticket>> {
        Ok(self.read()?.tickets.get(number).cloned())
    }

    /// Number of vehicles currently parked
    pub fn count_active(&self) -> DomainResult<usize> {
        Ok(self.read()?.active_by_plate.len())
    }

    /// Clone the ledger contents for snapshotting
    pub fn state(&self) -> DomainResult<LedgerState> {
        Ok(self.read()?.clone())
    }

    /// Replace the ledger contents, rebuilding the active index
    pub fn restore(&self, mut state: LedgerState) -> DomainResult<()> {
        state.rebuild_index();
        *self.write()? = state;
        Ok(())
    }
}
