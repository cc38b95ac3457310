// Copyright 2025 Cowboy AI, LLC.

//! Lot catalog: the consistency boundary over floors and spots
//!
//! Floor-level invariants span both registries: a floor cannot enter
//! maintenance or be removed while one of its spots is occupied, and spots
//! can only be provisioned on floors that exist. The catalog owns both
//! registries so those checks and their consequences happen under one
//! borrow; callers that need cross-thread atomicity wrap the catalog in a
//! single lock (see [`crate::allocation::AllocationEngine`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use crate::errors::{DomainError, DomainResult};
use crate::floor::{Floor, FloorRegistry};
use crate::identifiers::{FloorNumber, SpotCode};
use crate::registry::SpotRegistry;
use crate::spot::{Spot, SpotCategory};

/// Floors and spots of one parking lot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotCatalog {
    spots: SpotRegistry,
    floors: FloorRegistry,
}

impl LotCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The spot registry
    pub fn spots(&self) -> &SpotRegistry {
        &self.spots
    }

    /// The floor registry
    pub fn floors(&self) -> &FloorRegistry {
        &self.floors
    }

    pub(crate) fn spots_mut(&mut self) -> &mut SpotRegistry {
        &mut self.spots
    }

    /// Provision a floor with the given spot complement.
    ///
    /// # Errors
    ///
    /// [`DomainError::Conflict`] if the floor record already exists or the
    /// floor already has spots.
    pub fn add_floor(
        &mut self,
        number: FloorNumber,
        motorcycle_spots: u16,
        compact_spots: u16,
        large_spots: u16,
    ) -> DomainResult<()> {
        if !self.spots.spots_on_floor(number).is_empty() {
            return Err(DomainError::conflict(format!(
                "floor {number} already has spots"
            )));
        }
        self.floors.add(number)?;

        for (category, count) in [
            (SpotCategory::Motorcycle, motorcycle_spots),
            (SpotCategory::Compact, compact_spots),
            (SpotCategory::Large, large_spots),
        ] {
            for _ in 0..count {
                self.spots.add_spot(number, category)?;
            }
        }

        info!(
            floor = %number,
            motorcycle = motorcycle_spots,
            compact = compact_spots,
            large = large_spots,
            "floor provisioned"
        );
        Ok(())
    }

    /// Add a single spot to an existing floor.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the floor does not exist.
    pub fn add_spot(&mut self, floor: FloorNumber, category: SpotCategory) -> DomainResult<Spot> {
        if !self.floors.contains(floor) {
            return Err(DomainError::not_found("floor", floor.to_string()));
        }
        let spot = self.spots.add_spot(floor, category)?;
        info!(code = %spot.code, "parking spot added");
        Ok(spot)
    }

    /// Remove a spot. Fails with [`DomainError::Conflict`] while occupied.
    pub fn remove_spot(&mut self, code: &SpotCode) -> DomainResult<()> {
        self.spots.remove_spot(code)?;
        info!(code = %code, "parking spot removed");
        Ok(())
    }

    /// Remove a floor together with all of its spots.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the floor does not exist;
    /// [`DomainError::Conflict`] if any of its spots is occupied.
    pub fn remove_floor(&mut self, number: FloorNumber) -> DomainResult<()> {
        if !self.floors.contains(number) {
            return Err(DomainError::not_found("floor", number.to_string()));
        }
        if self.spots.has_occupied_on_floor(number) {
            return Err(DomainError::conflict(format!(
                "cannot remove floor {number}: some spots are occupied"
            )));
        }
        self.spots.remove_floor_spots(number);
        self.floors.remove(number)?;
        info!(floor = %number, "floor removed");
        Ok(())
    }

    /// Flip a floor's maintenance flag.
    ///
    /// Turning maintenance on requires every spot on the floor to be
    /// unoccupied; vehicles already parked keep their spots, so the flag
    /// only ever gates new allocations. Turning it off clears the reason.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the floor does not exist;
    /// [`DomainError::Conflict`] if turning on with occupied spots.
    pub fn set_maintenance(
        &mut self,
        number: FloorNumber,
        on: bool,
        reason: Option<String>,
    ) -> DomainResult<()> {
        if !self.floors.contains(number) {
            return Err(DomainError::not_found("floor", number.to_string()));
        }
        if on && self.spots.has_occupied_on_floor(number) {
            return Err(DomainError::conflict(format!(
                "cannot set floor {number} to maintenance: some spots are occupied"
            )));
        }
        if let Some(floor) = self.floors.get_mut(number) {
            floor.set_maintenance(on, reason.clone());
        }
        info!(floor = %number, on, reason = reason.as_deref(), "floor maintenance changed");
        Ok(())
    }

    /// Floors currently under maintenance, as a set for exclusion filters
    pub fn maintenance_floor_set(&self) -> BTreeSet<FloorNumber> {
        self.floors.maintenance_floors().into_iter().collect()
    }

    /// Number of spots on floors that are in service
    pub fn effective_spot_count(&self) -> usize {
        let excluded = self.maintenance_floor_set();
        self.spots
            .iter()
            .filter(|s| !excluded.contains(&s.floor))
            .count()
    }

    /// Available spots of a category on in-service floors
    pub fn effective_available(&self, category: SpotCategory) -> usize {
        let excluded = self.maintenance_floor_set();
        self.spots.count_available_excluding(category, &excluded)
    }

    /// A floor record together with its spots
    pub fn floor_with_spots(&self, number: FloorNumber) -> DomainResult<(&Floor, Vec<&Spot>)> {
        let floor = self
            .floors
            .get(number)
            .ok_or_else(|| DomainError::not_found("floor", number.to_string()))?;
        Ok((floor, self.spots.spots_on_floor(number)))
    }
}
