// Copyright 2025 Cowboy AI, LLC.

//! Parking orchestrator
//!
//! [`ParkingLot`] composes the registries, the allocation engine, the
//! ticket ledger, and the fee calculator into the lot's use cases. Every
//! method is callable from concurrent threads; the orchestrator owns the
//! ordering of operations and short-circuits on the first failure.
//!
//! Ordering on entry matters: the spot is marked occupied before the
//! ticket is issued, so a lost issuance race must release the spot before
//! reporting failure. On exit, the ticket is closed before the spot is
//! released, so a vehicle is never "free to leave" while still owning a
//! spot.

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::allocation::AllocationEngine;
use crate::catalog::LotCatalog;
use crate::errors::{DomainError, DomainResult};
use crate::fees::compute_fee;
use crate::floor::Floor;
use crate::identifiers::{FloorNumber, LicensePlate, SpotCode, TicketNumber};
use crate::ledger::TicketLedger;
use crate::responses::{CategoryAvailability, ExitReceipt, FloorStatus, LotStatus, ParkReceipt};
use crate::spot::{Spot, SpotCategory};
use crate::ticket::Ticket;
use crate::vehicle::{Vehicle, VehicleCategory};

/// The parking lot facade
#[derive(Debug)]
pub struct ParkingLot {
    engine: AllocationEngine,
    ledger: TicketLedger,
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingLot {
    /// Create an empty lot
    pub fn new() -> Self {
        Self::with_catalog(LotCatalog::new())
    }

    /// Create a lot over a pre-provisioned catalog
    pub fn with_catalog(catalog: LotCatalog) -> Self {
        Self {
            engine: AllocationEngine::new(Arc::new(RwLock::new(catalog))),
            ledger: TicketLedger::new(),
        }
    }

    /// The allocation engine (shares this lot's catalog)
    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// The ticket ledger
    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    // --- entry -----------------------------------------------------------

    /// Park a vehicle, allocating the first eligible spot.
    ///
    /// # Errors
    ///
    /// [`DomainError::AlreadyActive`] if the vehicle is already parked,
    /// [`DomainError::NoCapacity`] if no eligible spot exists. Both are
    /// ordinary business failures.
    pub fn park(
        &self,
        plate: &str,
        category: VehicleCategory,
        owner_name: Option<String>,
    ) -> DomainResult<ParkReceipt> {
        self.park_at(plate, category, owner_name, None, Utc::now())
    }

    /// Park a vehicle preferring a floor; falls back to an unconstrained
    /// search when the preferred floor is unusable.
    pub fn park_with_preference(
        &self,
        plate: &str,
        category: VehicleCategory,
        owner_name: Option<String>,
        preferred_floor: FloorNumber,
    ) -> DomainResult<ParkReceipt> {
        self.park_at(plate, category, owner_name, Some(preferred_floor), Utc::now())
    }

    /// Park with an explicit entry time
    pub fn park_at(
        &self,
        plate: &str,
        category: VehicleCategory,
        owner_name: Option<String>,
        preferred_floor: Option<FloorNumber>,
        entry_time: DateTime<Utc>,
    ) -> DomainResult<ParkReceipt> {
        let plate = LicensePlate::new(plate);

        // Idempotent rejection before touching any state. The ledger
        // re-checks under its own lock at issuance.
        if self.ledger.find_active_by_vehicle(&plate)?.is_some() {
            warn!(plate = %plate, "park rejected: vehicle already in the lot");
            return Err(DomainError::AlreadyActive {
                plate: plate.to_string(),
            });
        }

        let vehicle =
            self.ledger
                .register_vehicle(plate.clone(), category, owner_name, entry_time)?;

        // A returning vehicle keeps its registered category
        let spot = match preferred_floor {
            Some(floor) => self
                .engine
                .allocate_with_floor_preference(vehicle.category, floor)?,
            None => self.engine.allocate(vehicle.category)?,
        };

        let ticket = match self.ledger.issue(plate, spot.code.clone(), entry_time) {
            Ok(ticket) => ticket,
            Err(err) => {
                // Lost the issuance race; the spot must not stay occupied
                // without a ticket
                if let Err(release_err) = self.engine.release(&spot.code) {
                    warn!(code = %spot.code, error = %release_err, "failed to release spot after issuance failure");
                }
                return Err(err);
            }
        };

        self.engine
            .attach_ticket(&spot.code, ticket.number.clone())?;

        info!(plate = %ticket.plate, ticket = %ticket.number, spot = %spot.code, "vehicle parked");
        Ok(ParkReceipt {
            ticket_number: ticket.number,
            spot_code: spot.code,
            entry_time,
        })
    }

    // --- exit ------------------------------------------------------------

    /// Process a vehicle exit: close the active ticket and free its spot.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the plate has no active ticket.
    pub fn exit(&self, plate: &str) -> DomainResult<ExitReceipt> {
        self.exit_at(plate, Utc::now())
    }

    /// Process an exit with an explicit exit time
    pub fn exit_at(&self, plate: &str, exit_time: DateTime<Utc>) -> DomainResult<ExitReceipt> {
        let plate = LicensePlate::new(plate);

        let ticket = self
            .ledger
            .find_active_by_vehicle(&plate)?
            .ok_or_else(|| DomainError::not_found("active ticket for plate", plate.as_str()))?;

        let vehicle = self.ledger.vehicle(&plate)?.ok_or_else(|| {
            DomainError::Internal(format!("vehicle record missing for plate {plate}"))
        })?;

        let breakdown = compute_fee(vehicle.category, ticket.entry_time, exit_time)?;

        let closed = self
            .ledger
            .close(&ticket.number, exit_time, breakdown.fee)?;
        self.engine.release(&closed.spot_code)?;

        info!(plate = %plate, ticket = %closed.number, fee = %breakdown.fee, "vehicle exited");
        Ok(ExitReceipt {
            ticket_number: closed.number,
            spot_code: closed.spot_code,
            entry_time: closed.entry_time,
            exit_time,
            fee: breakdown.fee,
            duration_minutes: breakdown.duration_minutes,
        })
    }

    // --- queries ---------------------------------------------------------

    /// Aggregate lot status
    pub fn status(&self) -> DomainResult<LotStatus> {
        let catalog = self.engine.read()?;
        let excluded = catalog.maintenance_floor_set();

        let available_by_category = CategoryAvailability {
            motorcycle: catalog
                .spots()
                .count_available_excluding(SpotCategory::Motorcycle, &excluded),
            compact: catalog
                .spots()
                .count_available_excluding(SpotCategory::Compact, &excluded),
            large: catalog
                .spots()
                .count_available_excluding(SpotCategory::Large, &excluded),
        };
        let available_spots = available_by_category.motorcycle
            + available_by_category.compact
            + available_by_category.large;
        let occupied_spots = catalog.spots().iter().filter(|s| s.occupied).count();

        Ok(LotStatus {
            total_spots: catalog.spots().len(),
            effective_spots: catalog.effective_spot_count(),
            available_spots,
            occupied_spots,
            active_tickets: self.ledger.count_active()?,
            available_by_category,
        })
    }

    /// Status of one floor
    pub fn floor_status(&self, number: FloorNumber) -> DomainResult<FloorStatus> {
        let catalog = self.engine.read()?;
        let (floor, spots) = catalog.floor_with_spots(number)?;
        Ok(Self::build_floor_status(floor, &spots))
    }

    /// Status of every floor, ascending
    pub fn all_floors_status(&self) -> DomainResult<Vec<FloorStatus>> {
        let catalog = self.engine.read()?;
        catalog
            .floors()
            .iter()
            .map(|floor| {
                let spots = catalog.spots().spots_on_floor(floor.number);
                Ok(Self::build_floor_status(floor, &spots))
            })
            .collect()
    }

    fn build_floor_status(floor: &Floor, spots: &[&Spot]) -> FloorStatus {
        let total = spots.len();
        let available = spots.iter().filter(|s| s.is_available()).count();

        // A maintenance floor offers nothing, whatever its physical state
        let (available_spots, occupied_spots, available_by_category) = if floor.under_maintenance {
            (0, total, CategoryAvailability::default())
        } else {
            let by_category = CategoryAvailability {
                motorcycle: Self::count_available_of(spots, SpotCategory::Motorcycle),
                compact: Self::count_available_of(spots, SpotCategory::Compact),
                large: Self::count_available_of(spots, SpotCategory::Large),
            };
            (available, total - available, by_category)
        };

        FloorStatus {
            floor_number: floor.number,
            display_name: floor.display_name.clone(),
            under_maintenance: floor.under_maintenance,
            maintenance_reason: floor.maintenance_reason.clone(),
            total_spots: total,
            available_spots,
            occupied_spots,
            available_by_category,
        }
    }

    fn count_available_of(spots: &[&Spot], category: SpotCategory) -> usize {
        spots
            .iter()
            .filter(|s| s.category == category && s.is_available())
            .count()
    }

    /// Look up a known vehicle
    pub fn vehicle(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        self.ledger.vehicle(&LicensePlate::new(plate))
    }

    /// Look up any ticket by number
    pub fn ticket(&self, number: &TicketNumber) -> DomainResult<Option<Ticket>> {
        self.ledger.ticket(number)
    }

    // --- floor and spot management ---------------------------------------

    /// Provision a floor with the given spot complement
    pub fn add_floor(
        &self,
        number: FloorNumber,
        motorcycle_spots: u16,
        compact_spots: u16,
        large_spots: u16,
    ) -> DomainResult<()> {
        self.engine
            .write()?
            .add_floor(number, motorcycle_spots, compact_spots, large_spots)
    }

    /// Add one spot to an existing floor, returning its generated code
    pub fn add_spot(&self, floor: FloorNumber, category: SpotCategory) -> DomainResult<SpotCode> {
        Ok(self.engine.write()?.add_spot(floor, category)?.code)
    }

    /// Remove an unoccupied spot
    pub fn remove_spot(&self, code: &SpotCode) -> DomainResult<()> {
        self.engine.write()?.remove_spot(code)
    }

    /// Remove a floor and all of its (unoccupied) spots
    pub fn remove_floor(&self, number: FloorNumber) -> DomainResult<()> {
        self.engine.write()?.remove_floor(number)
    }

    /// Flip a floor's maintenance flag. The flip is atomic with respect to
    /// in-flight allocations: both go through the catalog's write lock.
    pub fn set_floor_maintenance(
        &self,
        number: FloorNumber,
        on: bool,
        reason: Option<String>,
    ) -> DomainResult<()> {
        self.engine.write()?.set_maintenance(number, on, reason)
    }

    /// Floor numbers under maintenance, ascending
    pub fn list_maintenance_floors(&self) -> DomainResult<Vec<FloorNumber>> {
        Ok(self.engine.read()?.floors().maintenance_floors())
    }

    /// Floor numbers in service, ascending
    pub fn list_available_floors(&self) -> DomainResult<Vec<FloorNumber>> {
        Ok(self.engine.read()?.floors().available_floors())
    }

    // --- persistence ------------------------------------------------------

    /// Capture the full lot state for an external [`crate::persistence::LotStore`]
    pub fn snapshot(&self) -> DomainResult<crate::persistence::LotSnapshot> {
        Ok(crate::persistence::LotSnapshot {
            catalog: self.engine.read()?.clone(),
            ledger: self.ledger.state()?,
            taken_at: Utc::now(),
        })
    }

    /// Rebuild a lot from a snapshot
    pub fn from_snapshot(snapshot: crate::persistence::LotSnapshot) -> DomainResult<Self> {
        let lot = Self::with_catalog(snapshot.catalog);
        lot.ledger.restore(snapshot.ledger)?;
        Ok(lot)
    }
}
