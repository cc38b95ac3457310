// Copyright 2025 Cowboy AI, LLC.

//! Allocation engine
//!
//! Selects a spot for an arriving vehicle using the category fallback
//! order, restricted to in-service floors, first-fit in (floor, code)
//! order. First-fit packs usage onto lower floors before opening higher
//! ones; there is no load balancing.
//!
//! The engine holds the lot catalog behind a single `RwLock` and performs
//! the whole find-then-mark sequence under one write guard, so two
//! concurrent requests for the last remaining spot cannot both succeed.
//! Maintenance flips go through the same lock (see
//! [`crate::lot::ParkingLot`]), which makes them atomic with respect to
//! in-flight allocations.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::catalog::LotCatalog;
use crate::errors::{DomainError, DomainResult};
use crate::identifiers::{FloorNumber, SpotCode, TicketNumber};
use crate::spot::Spot;
use crate::vehicle::VehicleCategory;

/// Allocates and releases parking spots
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    catalog: Arc<RwLock<LotCatalog>>,
}

impl AllocationEngine {
    /// Create an engine over a shared catalog
    pub fn new(catalog: Arc<RwLock<LotCatalog>>) -> Self {
        Self { catalog }
    }

    pub(crate) fn read(&self) -> DomainResult<RwLockReadGuard<'_, LotCatalog>> {
        self.catalog
            .read()
            .map_err(|_| DomainError::Internal("lot catalog lock poisoned".into()))
    }

    pub(crate) fn write(&self) -> DomainResult<RwLockWriteGuard<'_, LotCatalog>> {
        self.catalog
            .write()
            .map_err(|_| DomainError::Internal("lot catalog lock poisoned".into()))
    }

    /// Allocate the first eligible spot for a vehicle category and mark it
    /// occupied, atomically.
    ///
    /// # Errors
    ///
    /// [`DomainError::NoCapacity`] if no eligible spot exists on an
    /// in-service floor.
    pub fn allocate(&self, vehicle: VehicleCategory) -> DomainResult<Spot> {
        let mut catalog = self.write()?;
        Self::allocate_locked(&mut catalog, vehicle)
    }

    /// Allocate preferring a floor; falls back to an unconstrained search
    /// when the preferred floor is under maintenance or has no eligible
    /// spot. Both attempts happen under one critical section.
    pub fn allocate_with_floor_preference(
        &self,
        vehicle: VehicleCategory,
        preferred: FloorNumber,
    ) -> DomainResult<Spot> {
        let mut catalog = self.write()?;

        let preferred_ok = !catalog.maintenance_floor_set().contains(&preferred);
        if preferred_ok {
            let candidate = vehicle
                .eligible_spot_categories()
                .iter()
                .find_map(|&category| {
                    catalog
                        .spots()
                        .list_available_on_floor(category, preferred)
                        .first()
                        .map(|spot| spot.code.clone())
                });
            if let Some(code) = candidate {
                return Self::take(&mut catalog, &code);
            }
        }

        Self::allocate_locked(&mut catalog, vehicle)
    }

    fn allocate_locked(catalog: &mut LotCatalog, vehicle: VehicleCategory) -> DomainResult<Spot> {
        let excluded = catalog.maintenance_floor_set();
        let candidate = vehicle
            .eligible_spot_categories()
            .iter()
            .find_map(|&category| {
                catalog
                    .spots()
                    .list_available_excluding(category, &excluded)
                    .first()
                    .map(|spot| spot.code.clone())
            });

        match candidate {
            Some(code) => Self::take(catalog, &code),
            None => Err(DomainError::NoCapacity {
                vehicle: vehicle.to_string(),
            }),
        }
    }

    fn take(catalog: &mut LotCatalog, code: &SpotCode) -> DomainResult<Spot> {
        catalog.spots_mut().mark_occupied(code)?;
        let spot = catalog
            .spots()
            .get(code)
            .cloned()
            .ok_or_else(|| DomainError::Internal(format!("allocated spot {code} vanished")))?;
        debug!(code = %code, category = %spot.category, "spot allocated");
        Ok(spot)
    }

    /// Attach the issued ticket to an allocated spot
    pub fn attach_ticket(&self, code: &SpotCode, ticket: TicketNumber) -> DomainResult<()> {
        self.write()?.spots_mut().attach_ticket(code, ticket)
    }

    /// Free a spot and clear its ticket back-reference. Idempotent if the
    /// spot is already free.
    pub fn release(&self, code: &SpotCode) -> DomainResult<()> {
        let mut catalog = self.write()?;
        catalog.spots_mut().mark_free(code)?;
        debug!(code = %code, "spot released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::SpotCategory;

    fn engine_with(setup: impl FnOnce(&mut LotCatalog)) -> AllocationEngine {
        let mut catalog = LotCatalog::new();
        setup(&mut catalog);
        AllocationEngine::new(Arc::new(RwLock::new(catalog)))
    }

    #[test]
    fn motorcycles_prefer_motorcycle_spots() {
        let engine = engine_with(|c| c.add_floor(FloorNumber(1), 1, 1, 1).unwrap());
        let spot = engine.allocate(VehicleCategory::Motorcycle).unwrap();
        assert_eq!(spot.category, SpotCategory::Motorcycle);
    }

    #[test]
    fn fallback_reaches_large_spots_when_nothing_smaller_is_free() {
        let engine = engine_with(|c| c.add_floor(FloorNumber(1), 0, 0, 2).unwrap());

        let for_motorcycle = engine.allocate(VehicleCategory::Motorcycle).unwrap();
        assert_eq!(for_motorcycle.category, SpotCategory::Large);

        let for_car = engine.allocate(VehicleCategory::Car).unwrap();
        assert_eq!(for_car.category, SpotCategory::Large);
    }

    #[test]
    fn buses_never_take_smaller_spots() {
        let engine = engine_with(|c| c.add_floor(FloorNumber(1), 5, 5, 0).unwrap());
        let err = engine.allocate(VehicleCategory::Bus).unwrap_err();
        assert!(matches!(err, DomainError::NoCapacity { .. }));
    }

    #[test]
    fn first_fit_packs_lower_floors_first() {
        let engine = engine_with(|c| {
            c.add_floor(FloorNumber(1), 0, 1, 0).unwrap();
            c.add_floor(FloorNumber(2), 0, 1, 0).unwrap();
        });

        let first = engine.allocate(VehicleCategory::Car).unwrap();
        assert_eq!(first.floor, FloorNumber(1));
        let second = engine.allocate(VehicleCategory::Car).unwrap();
        assert_eq!(second.floor, FloorNumber(2));
    }

    #[test]
    fn maintenance_floors_are_never_selected() {
        let engine = engine_with(|c| {
            c.add_floor(FloorNumber(1), 0, 1, 0).unwrap();
            c.add_floor(FloorNumber(2), 0, 1, 0).unwrap();
            c.set_maintenance(FloorNumber(1), true, Some("flooded".into()))
                .unwrap();
        });

        let spot = engine.allocate(VehicleCategory::Car).unwrap();
        assert_eq!(spot.floor, FloorNumber(2));

        let err = engine.allocate(VehicleCategory::Car).unwrap_err();
        assert!(matches!(err, DomainError::NoCapacity { .. }));
    }

    #[test]
    fn floor_preference_is_honored_when_possible() {
        let engine = engine_with(|c| {
            c.add_floor(FloorNumber(1), 0, 2, 0).unwrap();
            c.add_floor(FloorNumber(2), 0, 2, 0).unwrap();
        });

        let spot = engine
            .allocate_with_floor_preference(VehicleCategory::Car, FloorNumber(2))
            .unwrap();
        assert_eq!(spot.floor, FloorNumber(2));
    }

    #[test]
    fn floor_preference_falls_back_when_floor_is_unusable() {
        let engine = engine_with(|c| {
            c.add_floor(FloorNumber(1), 0, 1, 0).unwrap();
            c.add_floor(FloorNumber(2), 0, 1, 0).unwrap();
            c.set_maintenance(FloorNumber(2), true, None).unwrap();
        });

        let spot = engine
            .allocate_with_floor_preference(VehicleCategory::Car, FloorNumber(2))
            .unwrap();
        assert_eq!(spot.floor, FloorNumber(1));

        // Nonexistent preferred floor also falls back
        let engine = engine_with(|c| c.add_floor(FloorNumber(1), 0, 1, 0).unwrap());
        let spot = engine
            .allocate_with_floor_preference(VehicleCategory::Car, FloorNumber(7))
            .unwrap();
        assert_eq!(spot.floor, FloorNumber(1));
    }

    #[test]
    fn release_is_idempotent() {
        let engine = engine_with(|c| c.add_floor(FloorNumber(1), 0, 1, 0).unwrap());
        let spot = engine.allocate(VehicleCategory::Car).unwrap();
        engine.release(&spot.code).unwrap();
        engine.release(&spot.code).unwrap();

        // Spot is allocatable again
        let again = engine.allocate(VehicleCategory::Car).unwrap();
        assert_eq!(again.code, spot.code);
    }
}
