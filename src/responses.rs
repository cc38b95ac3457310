// Copyright 2025 Cowboy AI, LLC.

//! Boundary DTOs returned by the parking orchestrator

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fees::Money;
use crate::identifiers::{FloorNumber, SpotCode, TicketNumber};

/// Receipt handed to a vehicle at entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParkReceipt {
    /// Ticket to present at exit
    pub ticket_number: TicketNumber,
    /// Spot the vehicle should park in
    pub spot_code: SpotCode,
    /// Recorded entry time
    pub entry_time: DateTime<Utc>,
}

/// Receipt handed to a vehicle at exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExitReceipt {
    /// Ticket that was closed
    pub ticket_number: TicketNumber,
    /// Spot that was freed
    pub spot_code: SpotCode,
    /// Recorded entry time
    pub entry_time: DateTime<Utc>,
    /// Recorded exit time
    pub exit_time: DateTime<Utc>,
    /// Fee charged, in minor currency units
    pub fee: Money,
    /// Whole minutes between entry and exit
    pub duration_minutes: i64,
}

/// Available spots by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryAvailability {
    /// Available motorcycle spots
    pub motorcycle: usize,
    /// Available compact spots
    pub compact: usize,
    /// Available large spots
    pub large: usize,
}

/// Aggregate status of the lot
///
/// `total_spots` is the raw catalog size including maintenance floors;
/// `effective_spots` counts only spots on in-service floors. Availability
/// figures always exclude maintenance floors, since those spots cannot be
/// allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LotStatus {
    /// Every spot in the catalog
    pub total_spots: usize,
    /// Spots on floors not under maintenance
    pub effective_spots: usize,
    /// Allocatable spots right now
    pub available_spots: usize,
    /// Spots with a vehicle in them
    pub occupied_spots: usize,
    /// Tickets currently active
    pub active_tickets: usize,
    /// Availability broken down by spot category
    pub available_by_category: CategoryAvailability,
}

/// Per-floor status report
///
/// A floor under maintenance reports zero available spots and its whole
/// complement as unavailable, regardless of physical occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FloorStatus {
    /// Floor number
    pub floor_number: FloorNumber,
    /// Human-readable name
    pub display_name: String,
    /// Whether the floor is out of service
    pub under_maintenance: bool,
    /// Maintenance reason, present iff under maintenance
    pub maintenance_reason: Option<String>,
    /// Spots on this floor
    pub total_spots: usize,
    /// Allocatable spots on this floor
    pub available_spots: usize,
    /// Spots counted against this floor as unavailable
    pub occupied_spots: usize,
    /// Availability broken down by spot category
    pub available_by_category: CategoryAvailability,
}
