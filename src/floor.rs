// Copyright 2025 Cowboy AI, LLC.

//! Floor records
//!
//! One floor record is the sole source of truth for both floor existence
//! and maintenance state. A floor exists iff its record exists; absence of
//! a record means the floor does not exist, not "available by default".

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identifiers::FloorNumber;

/// A parking floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Floor {
    /// Floor number, the floor's identity
    pub number: FloorNumber,
    /// Human-readable name
    pub display_name: String,
    /// Whether the floor is out of service for allocation
    pub under_maintenance: bool,
    /// Why the floor is under maintenance; present iff the flag is set
    pub maintenance_reason: Option<String>,
}

impl Floor {
    /// Create an in-service floor
    pub fn new(number: FloorNumber) -> Self {
        Self {
            number,
            display_name: format!("Floor {}", number),
            under_maintenance: false,
            maintenance_reason: None,
        }
    }

    /// Flip the maintenance flag. Turning maintenance off always clears
    /// the reason; occupancy gating is the registry's responsibility.
    pub(crate) fn set_maintenance(&mut self, on: bool, reason: Option<String>) {
        self.under_maintenance = on;
        self.maintenance_reason = if on { reason } else { None };
    }
}

/// Table of floor records, ordered by floor number
///
/// Occupancy gating for maintenance and removal requires the spot catalog
/// and lives in [`crate::catalog::LotCatalog`]; this registry owns the
/// records themselves.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FloorRegistry {
    floors: std::collections::BTreeMap<FloorNumber, Floor>,
}

impl FloorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new floor record.
    ///
    /// # Errors
    ///
    /// [`crate::DomainError::Conflict`] if the floor already exists.
    pub fn add(&mut self, number: FloorNumber) -> crate::DomainResult<&Floor> {
        if self.floors.contains_key(&number) {
            return Err(crate::DomainError::conflict(format!(
                "floor {number} already exists"
            )));
        }
        Ok(self.floors.entry(number).or_insert_with(|| Floor::new(number)))
    }

    /// Delete a floor record. Callers must have removed its spots first.
    pub(crate) fn remove(&mut self, number: FloorNumber) -> crate::DomainResult<()> {
        self.floors
            .remove(&number)
            .map(|_| ())
            .ok_or_else(|| crate::DomainError::not_found("floor", number.to_string()))
    }

    /// Look up a floor record
    pub fn get(&self, number: FloorNumber) -> Option<&Floor> {
        self.floors.get(&number)
    }

    pub(crate) fn get_mut(&mut self, number: FloorNumber) -> Option<&mut Floor> {
        self.floors.get_mut(&number)
    }

    /// Whether the floor exists
    pub fn contains(&self, number: FloorNumber) -> bool {
        self.floors.contains_key(&number)
    }

    /// Floor numbers currently under maintenance, ascending
    pub fn maintenance_floors(&self) -> Vec<FloorNumber> {
        self.floors
            .values()
            .filter(|f| f.under_maintenance)
            .map(|f| f.number)
            .collect()
    }

    /// Floor numbers currently in service, ascending
    pub fn available_floors(&self) -> Vec<FloorNumber> {
        self.floors
            .values()
            .filter(|f| !f.under_maintenance)
            .map(|f| f.number)
            .collect()
    }

    /// All floors, ascending
    pub fn iter(&self) -> impl Iterator<Item = &Floor> {
        self.floors.values()
    }

    /// Number of floors
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Whether there are no floors
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }
}
