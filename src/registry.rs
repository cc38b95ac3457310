// Copyright 2025 Cowboy AI, LLC.

//! Spot registry
//!
//! Owns the catalog of parking spots and their occupancy. All candidate
//! listings are ordered by (floor ascending, code ascending) so allocation
//! is deterministic. The registry itself holds no lock; callers that need
//! atomicity serialize access through [`crate::catalog::LotCatalog`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{DomainError, DomainResult};
use crate::identifiers::{FloorNumber, SpotCode, TicketNumber};
use crate::spot::{Spot, SpotCategory};

/// Catalog of all parking spots in the lot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotRegistry {
    spots: IndexMap<SpotCode, Spot>,
}

impl SpotRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a new spot on a floor, generating its code.
    ///
    /// The sequence number is the lowest positive integer whose code is not
    /// currently present for that floor+category prefix. A number freed by
    /// deletion may be reused; a number still in use never is.
    ///
    /// # Errors
    ///
    /// [`DomainError::Internal`] if the sequence space for the prefix is
    /// exhausted.
    pub fn add_spot(&mut self, floor: FloorNumber, category: SpotCategory) -> DomainResult<Spot> {
        let code = self.next_code(floor, category)?;
        let spot = Spot::new(code.clone(), floor, category);
        self.spots.insert(code, spot.clone());
        Ok(spot)
    }

    fn next_code(&self, floor: FloorNumber, category: SpotCategory) -> DomainResult<SpotCode> {
        for sequence in 1..=u16::MAX {
            let candidate = SpotCode::new(floor, category, sequence);
            if !self.spots.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal(format!(
            "spot sequence exhausted for prefix {}",
            SpotCode::prefix_for(floor, category)
        )))
    }

    /// Remove a spot from the catalog.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if no such spot exists;
    /// [`DomainError::Conflict`] if the spot is occupied.
    pub fn remove_spot(&mut self, code: &SpotCode) -> DomainResult<()> {
        let spot = self
            .spots
            .get(code)
            .ok_or_else(|| DomainError::not_found("parking spot", code.as_str()))?;
        if spot.occupied {
            return Err(DomainError::conflict(format!(
                "cannot remove occupied parking spot {code}"
            )));
        }
        self.spots.shift_remove(code);
        Ok(())
    }

    /// Look up a spot by code
    pub fn get(&self, code: &SpotCode) -> Option<&Spot> {
        self.spots.get(code)
    }

    /// Available spots of a category, ordered by (floor, code)
    pub fn list_available(&self, category: SpotCategory) -> Vec<&Spot> {
        self.list_available_where(category, |_| true)
    }

    /// Available spots of a category on one floor, ordered by code
    pub fn list_available_on_floor(
        &self,
        category: SpotCategory,
        floor: FloorNumber,
    ) -> Vec<&Spot> {
        self.list_available_where(category, |spot| spot.floor == floor)
    }

    /// Available spots of a category outside the excluded floors,
    /// ordered by (floor, code)
    pub fn list_available_excluding(
        &self,
        category: SpotCategory,
        excluded_floors: &BTreeSet<FloorNumber>,
    ) -> Vec<&Spot> {
        self.list_available_where(category, |spot| !excluded_floors.contains(&spot.floor))
    }

    fn list_available_where(
        &self,
        category: SpotCategory,
        filter: impl Fn(&Spot) -> bool,
    ) -> Vec<&Spot> {
        let mut candidates: Vec<&Spot> = self
            .spots
            .values()
            .filter(|spot| spot.category == category && spot.is_available() && filter(spot))
            .collect();
        candidates.sort_by(|a, b| (a.floor, &a.code).cmp(&(b.floor, &b.code)));
        candidates
    }

    /// Count of available spots across all categories
    pub fn count_available(&self) -> usize {
        self.spots.values().filter(|s| s.is_available()).count()
    }

    /// Count of available spots of one category
    pub fn count_available_by_category(&self, category: SpotCategory) -> usize {
        self.spots
            .values()
            .filter(|s| s.category == category && s.is_available())
            .count()
    }

    /// Count of available spots of one category outside the excluded floors
    pub fn count_available_excluding(
        &self,
        category: SpotCategory,
        excluded_floors: &BTreeSet<FloorNumber>,
    ) -> usize {
        self.spots
            .values()
            .filter(|s| {
                s.category == category && s.is_available() && !excluded_floors.contains(&s.floor)
            })
            .count()
    }

    /// Total number of spots in the catalog
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// All spots, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values()
    }

    /// All spots on one floor
    pub fn spots_on_floor(&self, floor: FloorNumber) -> Vec<&Spot> {
        self.spots.values().filter(|s| s.floor == floor).collect()
    }

    /// Whether any spot on the floor is occupied
    pub fn has_occupied_on_floor(&self, floor: FloorNumber) -> bool {
        self.spots
            .values()
            .any(|s| s.floor == floor && s.occupied)
    }

    /// Delete every spot on a floor. Callers must have verified that none
    /// are occupied.
    pub(crate) fn remove_floor_spots(&mut self, floor: FloorNumber) {
        self.spots.retain(|_, spot| spot.floor != floor);
    }

    /// Mark a spot occupied.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if no such spot; [`DomainError::Conflict`]
    /// if it is already occupied.
    pub fn mark_occupied(&mut self, code: &SpotCode) -> DomainResult<()> {
        let spot = self
            .spots
            .get_mut(code)
            .ok_or_else(|| DomainError::not_found("parking spot", code.as_str()))?;
        if spot.occupied {
            return Err(DomainError::conflict(format!(
                "parking spot {code} is already occupied"
            )));
        }
        spot.occupy();
        Ok(())
    }

    /// Attach the active ticket back-reference to an occupied spot
    pub fn attach_ticket(&mut self, code: &SpotCode, ticket: TicketNumber) -> DomainResult<()> {
        let spot = self
            .spots
            .get_mut(code)
            .ok_or_else(|| DomainError::not_found("parking spot", code.as_str()))?;
        spot.attach_ticket(ticket);
        Ok(())
    }

    /// Mark a spot free and clear its ticket back-reference. Idempotent if
    /// the spot is already free.
    pub fn mark_free(&mut self, code: &SpotCode) -> DomainResult<()> {
        let spot = self
            .spots
            .get_mut(code)
            .ok_or_else(|| DomainError::not_found("parking spot", code.as_str()))?;
        spot.free();
        Ok(())
    }
}
