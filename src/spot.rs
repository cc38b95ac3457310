// Copyright 2025 Cowboy AI, LLC.

//! Parking spot records and categories

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::{FloorNumber, SpotCode, TicketNumber};

/// Physical size class of a parking spot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpotCategory {
    /// Fits motorcycles only
    Motorcycle,
    /// Fits motorcycles and cars
    Compact,
    /// Fits everything up to buses
    Large,
}

impl SpotCategory {
    /// Single-letter prefix used in spot codes
    pub fn prefix(&self) -> char {
        match self {
            SpotCategory::Motorcycle => 'M',
            SpotCategory::Compact => 'C',
            SpotCategory::Large => 'L',
        }
    }

    /// All categories, in size order
    pub const ALL: [SpotCategory; 3] = [
        SpotCategory::Motorcycle,
        SpotCategory::Compact,
        SpotCategory::Large,
    ];
}

impl fmt::Display for SpotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotCategory::Motorcycle => write!(f, "MOTORCYCLE"),
            SpotCategory::Compact => write!(f, "COMPACT"),
            SpotCategory::Large => write!(f, "LARGE"),
        }
    }
}

/// A single parking spot
///
/// Occupancy is owned by the spot registry: only allocation marks a spot
/// occupied and only release frees it. `current_ticket` is a derived,
/// non-owning back-reference to the active ticket for convenience lookup;
/// the ticket's spot reference is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Spot {
    /// Unique spot code, e.g. `"2-C-07"`
    pub code: SpotCode,
    /// Floor this spot is on
    pub floor: FloorNumber,
    /// Size class
    pub category: SpotCategory,
    /// Whether a vehicle currently occupies this spot
    pub occupied: bool,
    /// Active ticket currently attached to this spot, if any
    pub current_ticket: Option<TicketNumber>,
}

impl Spot {
    /// Create a new, unoccupied spot
    pub fn new(code: SpotCode, floor: FloorNumber, category: SpotCategory) -> Self {
        Self {
            code,
            floor,
            category,
            occupied: false,
            current_ticket: None,
        }
    }

    /// Whether this spot can be handed to an arriving vehicle
    pub fn is_available(&self) -> bool {
        !self.occupied
    }

    pub(crate) fn occupy(&mut self) {
        self.occupied = true;
    }

    pub(crate) fn attach_ticket(&mut self, ticket: TicketNumber) {
        self.current_ticket = Some(ticket);
    }

    pub(crate) fn free(&mut self) {
        self.occupied = false;
        self.current_ticket = None;
    }
}
